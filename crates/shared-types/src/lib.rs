//! # Shared Types Crate
//!
//! Identity and value types used across the Quasar workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Address`, `CurrencyId` and `U256` are defined
//!   once here and re-used by the registry, the event bus and the runtime.
//! - **Envelope-free identity**: callers are identified by a 20-byte account
//!   address; there is no separate session or role object.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
