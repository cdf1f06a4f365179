//! # Error Types
//!
//! Errors raised while parsing shared types from text.

use thiserror::Error;

/// Errors that can occur while parsing an [`Address`](crate::Address).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input was not valid hexadecimal.
    #[error("Invalid hex in address: {0}")]
    InvalidHex(String),

    /// The decoded input was not exactly 20 bytes long.
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}
