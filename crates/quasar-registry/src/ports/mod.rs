//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: `CurrencyRegistryApi`, consumed by callers
//! - **Driven Ports (Outbound)**: `CurrencyStore` and `EventPublisher`,
//!   implemented by adapters

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
