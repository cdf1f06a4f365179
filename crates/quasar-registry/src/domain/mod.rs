//! # Domain Module
//!
//! Pure registry logic with no I/O: the `Currency` record, its metadata
//! validation, the activation state machine and the id counter rules.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
