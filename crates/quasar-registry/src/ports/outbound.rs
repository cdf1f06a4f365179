//! # Outbound Ports (Driven Ports)
//!
//! What the registry needs from its surroundings: somewhere to keep currency
//! records and somewhere to publish events.

use crate::domain::{Currency, CurrencyId};

pub use shared_bus::EventPublisher;

/// Storage for currency records.
///
/// Called only while the registry holds its lock, so implementations need no
/// synchronization of their own. Records are never removed.
pub trait CurrencyStore: Send + Sync {
    /// Look up a currency.
    fn get(&self, id: CurrencyId) -> Option<&Currency>;

    /// Look up a currency for in-place mutation.
    fn get_mut(&mut self, id: CurrencyId) -> Option<&mut Currency>;

    /// Store a newly created currency.
    fn insert(&mut self, currency: Currency);

    /// Number of stored currencies.
    fn len(&self) -> usize;

    /// Returns true if no currency was ever stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored ids in ascending order.
    fn ids(&self) -> Vec<CurrencyId>;
}
