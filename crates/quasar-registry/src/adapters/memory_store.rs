//! In-Memory Currency Store
//!
//! Implements the `CurrencyStore` port with an ordered map.

use std::collections::BTreeMap;

use crate::domain::{Currency, CurrencyId};
use crate::ports::outbound::CurrencyStore;

/// In-memory store backed by a `BTreeMap`, so `ids()` is naturally sorted.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCurrencyStore {
    currencies: BTreeMap<CurrencyId, Currency>,
}

impl InMemoryCurrencyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CurrencyStore for InMemoryCurrencyStore {
    fn get(&self, id: CurrencyId) -> Option<&Currency> {
        self.currencies.get(&id)
    }

    fn get_mut(&mut self, id: CurrencyId) -> Option<&mut Currency> {
        self.currencies.get_mut(&id)
    }

    fn insert(&mut self, currency: Currency) {
        self.currencies.insert(currency.id, currency);
    }

    fn len(&self) -> usize {
        self.currencies.len()
    }

    fn ids(&self) -> Vec<CurrencyId> {
        self.currencies.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencyMetadata;

    fn currency(id: CurrencyId) -> Currency {
        Currency::new(id, CurrencyMetadata::new("currency", "CRN").unwrap())
    }

    #[test]
    fn test_empty_store() {
        let store = InMemoryCurrencyStore::new();
        assert!(store.is_empty());
        assert!(store.get(1).is_none());
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = InMemoryCurrencyStore::new();
        store.insert(currency(1));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1), Some(&currency(1)));
    }

    #[test]
    fn test_get_mut_modifies_in_place() {
        let mut store = InMemoryCurrencyStore::new();
        store.insert(currency(1));

        store.get_mut(1).unwrap().set_active(false);
        assert!(!store.get(1).unwrap().active);
    }

    #[test]
    fn test_ids_sorted() {
        let mut store = InMemoryCurrencyStore::new();
        store.insert(currency(3));
        store.insert(currency(1));
        store.insert(currency(2));

        assert_eq!(store.ids(), vec![1, 2, 3]);
    }
}
