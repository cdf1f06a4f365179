//! # Quasar Currency Registry
//!
//! A single-authority registry of currencies. Each currency carries a
//! name, a ticker symbol, the latest pushed price and an activation flag.
//!
//! ## Purpose
//!
//! One administrator registers currencies, edits their metadata, toggles
//! whether they are active and pushes their latest price. Anyone may read.
//! Every successful change is announced on the event bus; the registry keeps
//! no history itself, so consumers such as [`CurrencyHistoryIndexer`]
//! rebuild it from the events.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Ids are dense from 1 and never reused | `domain/invariants.rs` - `advance_next_id()` |
//! | Only the administrator mutates | `access/guard.rs` - `authorize()` |
//! | Name and symbol are never empty | `domain/value_objects.rs` - `CurrencyMetadata::new()` |
//! | Inactive currencies accept no price | `domain/entities.rs` - `push_price()` |
//! | One event per success, none per failure | `service.rs` - `mutate()` |
//!
//! ## State Machine
//!
//! ```text
//! [NONEXISTENT] ──create──→ [ACTIVE] ──set_active(false)──→ [INACTIVE]
//!                               ↑                                │
//!                               └────────set_active(true)────────┘
//! ```
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/ - In-memory store, history indexer                   │
//! │  service.rs - CurrencyRegistry (lock + publish)                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - CurrencyRegistryApi trait                  │
//! │  ports/outbound.rs - CurrencyStore, EventPublisher traits       │
//! │  access/guard.rs   - AccessGuard (administrator capability)     │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/entities.rs      - Currency                             │
//! │  domain/value_objects.rs - CurrencyMetadata, CurrencyState      │
//! │  domain/invariants.rs    - id counter rules                     │
//! │  domain/errors.rs        - RegistryError enum                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let bus = Arc::new(InMemoryEventBus::new());
//! let registry = CurrencyRegistry::new(config, InMemoryCurrencyStore::new(), bus.clone())?;
//!
//! let id = registry.create(admin, "Alpha", "ALP")?;
//! registry.push_price(admin, id, Price::from(100u64))?;
//! assert_eq!(registry.get_price(id)?, Price::from(100u64));
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod access;
pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use access::AccessGuard;
pub use adapters::{CurrencyHistory, CurrencyHistoryIndexer, IndexerError, InMemoryCurrencyStore};
pub use config::{ConfigError, RegistryConfig};
pub use domain::{
    Currency, CurrencyId, CurrencyMetadata, CurrencyState, Price, RegistryError,
    RegistryErrorKind, FIRST_CURRENCY_ID,
};
pub use ports::{CurrencyRegistryApi, CurrencyStore, EventPublisher};
pub use service::{CurrencyRegistry, Operation, ServiceStats};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
