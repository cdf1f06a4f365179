//! # Access Control
//!
//! The administrator capability check every mutation goes through.

mod guard;

pub use guard::AccessGuard;
