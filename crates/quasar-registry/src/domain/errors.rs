//! # Domain Errors
//!
//! Error types for the currency registry.
//!
//! Every error is a rejected operation: the registry state is left exactly
//! as it was before the call and no event is published.

use serde::{Deserialize, Serialize};
use shared_types::{Address, CurrencyId};
use thiserror::Error;

/// Registry error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Caller is not the administrator.
    #[error("Unauthorized caller: {caller:?}")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// Name was empty.
    #[error("Currency name cannot be blank")]
    BlankName,

    /// Symbol was empty.
    #[error("Currency symbol cannot be blank")]
    BlankSymbol,

    /// The id was never assigned.
    #[error("Currency not found: {0}")]
    NotFound(CurrencyId),

    /// The currency exists but is inactive.
    #[error("Currency {0} is not supported (inactive)")]
    Unsupported(CurrencyId),

    /// Malformed argument (e.g. zero administrator address).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The `u64` id space has been used up.
    #[error("Currency id space exhausted")]
    IdSpaceExhausted,
}

impl RegistryError {
    /// Stable revert-style reason string.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "Ownable: caller is not the owner",
            Self::BlankName => "Quasar: name cannot be blank",
            Self::BlankSymbol => "Quasar: symbol cannot be blank",
            Self::NotFound(_) => "Quasar: currency should exist",
            Self::Unsupported(_) => "Quasar: currency is not supported",
            Self::InvalidArgument(_) => "Ownable: new owner is the zero address",
            Self::IdSpaceExhausted => "Quasar: id overflow",
        }
    }

    /// Serializable discriminant.
    #[must_use]
    pub fn kind(&self) -> RegistryErrorKind {
        match self {
            Self::Unauthorized { .. } => RegistryErrorKind::Unauthorized,
            Self::BlankName => RegistryErrorKind::BlankName,
            Self::BlankSymbol => RegistryErrorKind::BlankSymbol,
            Self::NotFound(_) => RegistryErrorKind::NotFound,
            Self::Unsupported(_) => RegistryErrorKind::Unsupported,
            Self::InvalidArgument(_) => RegistryErrorKind::InvalidArgument,
            Self::IdSpaceExhausted => RegistryErrorKind::IdSpaceExhausted,
        }
    }

    /// Returns true if the caller lacked authority.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Error type enumeration for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryErrorKind {
    Unauthorized,
    BlankName,
    BlankSymbol,
    NotFound,
    Unsupported,
    InvalidArgument,
    IdSpaceExhausted,
}
