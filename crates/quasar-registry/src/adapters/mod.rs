//! # Adapters Layer (Hexagonal Architecture)
//!
//! - `InMemoryCurrencyStore`: the `CurrencyStore` port over a `BTreeMap`
//! - `CurrencyHistoryIndexer`: an event-stream consumer that rebuilds history

mod history_indexer;
mod memory_store;

pub use history_indexer::{CurrencyHistory, CurrencyHistoryIndexer, IndexerError};
pub use memory_store::InMemoryCurrencyStore;
