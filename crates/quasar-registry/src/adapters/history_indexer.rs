//! # Currency History Indexer
//!
//! Downstream consumer that rebuilds registry history from the event stream.
//!
//! The registry keeps only the latest price. Everything else (the sequence of
//! prices, past names, administrator succession) exists only in the events,
//! and this adapter is what turns them back into queryable state.
//!
//! Expects an unfiltered stream: a creation it never saw makes every later
//! event for that id unknown.

use std::collections::BTreeMap;

use shared_bus::{RegistryEvent, Subscription, SubscriptionError};
use shared_types::Address;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{CurrencyId, CurrencyMetadata, Price, FIRST_CURRENCY_ID};

/// Errors raised while applying events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexerError {
    /// Event references an id that was never added.
    #[error("Event for unknown currency {0}")]
    UnknownCurrency(CurrencyId),

    /// A creation arrived with an id other than the next one.
    #[error("Out-of-sequence currency id: expected {expected}, got {got}")]
    OutOfSequence {
        /// Id the indexer expected next.
        expected: CurrencyId,
        /// Id carried by the event.
        got: CurrencyId,
    },

    /// The underlying subscription failed.
    #[error("Subscription error: {0}")]
    Subscription(#[from] SubscriptionError),
}

/// Everything the event stream says about one currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyHistory {
    /// Currency id.
    pub id: CurrencyId,
    /// Current name and symbol.
    pub metadata: CurrencyMetadata,
    /// Every name/symbol pair ever held, oldest first.
    pub metadata_history: Vec<CurrencyMetadata>,
    /// Current activation flag.
    pub active: bool,
    /// Latest price (zero until the first push).
    pub price: Price,
    /// Every pushed price, oldest first.
    pub price_history: Vec<Price>,
}

/// Rebuilds per-currency history from `RegistryEvent`s.
#[derive(Debug, Clone)]
pub struct CurrencyHistoryIndexer {
    currencies: BTreeMap<CurrencyId, CurrencyHistory>,
    administrators: Vec<Address>,
    next_id: CurrencyId,
    events_applied: u64,
}

impl Default for CurrencyHistoryIndexer {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrencyHistoryIndexer {
    /// Create an indexer for a fresh registry.
    pub fn new() -> Self {
        Self {
            currencies: BTreeMap::new(),
            administrators: Vec::new(),
            next_id: FIRST_CURRENCY_ID,
            events_applied: 0,
        }
    }

    /// Create an indexer that already knows the initial administrator.
    pub fn with_administrator(administrator: Address) -> Self {
        let mut indexer = Self::new();
        indexer.administrators.push(administrator);
        indexer
    }

    /// Apply one event.
    ///
    /// A rejected event leaves the indexer unchanged.
    pub fn apply(&mut self, event: &RegistryEvent) -> Result<(), IndexerError> {
        match event {
            RegistryEvent::CurrencyAdded { id, name, symbol } => {
                if *id != self.next_id {
                    warn!(expected = self.next_id, got = *id, "Out-of-sequence CurrencyAdded");
                    return Err(IndexerError::OutOfSequence {
                        expected: self.next_id,
                        got: *id,
                    });
                }
                let metadata = CurrencyMetadata {
                    name: name.clone(),
                    symbol: symbol.clone(),
                };
                self.currencies.insert(
                    *id,
                    CurrencyHistory {
                        id: *id,
                        metadata: metadata.clone(),
                        metadata_history: vec![metadata],
                        active: true,
                        price: Price::zero(),
                        price_history: Vec::new(),
                    },
                );
                self.next_id = self.next_id.saturating_add(1);
            }
            RegistryEvent::CurrencyUpdated { id, name, symbol } => {
                let entry = self.entry_mut(*id)?;
                let metadata = CurrencyMetadata {
                    name: name.clone(),
                    symbol: symbol.clone(),
                };
                entry.metadata_history.push(metadata.clone());
                entry.metadata = metadata;
            }
            RegistryEvent::CurrencyStateChanged { id, active } => {
                self.entry_mut(*id)?.active = *active;
            }
            RegistryEvent::PriceUpdated { id, price } => {
                let entry = self.entry_mut(*id)?;
                entry.price = *price;
                entry.price_history.push(*price);
            }
            RegistryEvent::AdministratorChanged { previous, new } => {
                if self.administrators.last() != Some(previous) {
                    self.administrators.push(*previous);
                }
                self.administrators.push(*new);
            }
        }

        self.events_applied += 1;
        debug!(event = event.name(), applied = self.events_applied, "Event indexed");
        Ok(())
    }

    /// Apply every event currently queued on `subscription`, one at a time.
    ///
    /// Returns how many events were applied. On an apply error the offending
    /// event is consumed and everything behind it stays queued for the next
    /// call.
    pub fn drain(&mut self, subscription: &mut Subscription) -> Result<usize, IndexerError> {
        let mut applied = 0;
        loop {
            match subscription.try_recv() {
                Ok(Some(event)) => {
                    self.apply(&event)?;
                    applied += 1;
                }
                Ok(None) | Err(SubscriptionError::Closed) => return Ok(applied),
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// History of one currency.
    pub fn currency(&self, id: CurrencyId) -> Option<&CurrencyHistory> {
        self.currencies.get(&id)
    }

    /// Every indexed currency, ordered by id.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyHistory> {
        self.currencies.values()
    }

    /// Administrators in order of succession (current last).
    pub fn administrators(&self) -> &[Address] {
        &self.administrators
    }

    /// Number of events applied so far.
    pub fn events_applied(&self) -> u64 {
        self.events_applied
    }

    fn entry_mut(&mut self, id: CurrencyId) -> Result<&mut CurrencyHistory, IndexerError> {
        self.currencies
            .get_mut(&id)
            .ok_or(IndexerError::UnknownCurrency(id))
    }
}
