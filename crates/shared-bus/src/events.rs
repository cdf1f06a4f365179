//! # Registry Events
//!
//! Defines every event that flows through the shared bus.
//!
//! Each successful registry mutation produces exactly one of these. Consumers
//! rebuild history from the ordered stream; the registry itself keeps only
//! the latest state.

use serde::{Deserialize, Serialize};
use shared_types::{Address, CurrencyId, U256};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    // =========================================================================
    // CURRENCY LIFECYCLE
    // =========================================================================
    /// A currency was created. Always carries the freshly assigned id.
    CurrencyAdded {
        /// Assigned identifier.
        id: CurrencyId,
        /// Display name.
        name: String,
        /// Ticker symbol.
        symbol: String,
    },

    /// Name and symbol of an existing currency were overwritten.
    CurrencyUpdated {
        /// Currency identifier.
        id: CurrencyId,
        /// New display name.
        name: String,
        /// New ticker symbol.
        symbol: String,
    },

    /// A currency was activated or deactivated.
    CurrencyStateChanged {
        /// Currency identifier.
        id: CurrencyId,
        /// Requested flag value (emitted even if unchanged).
        active: bool,
    },

    // =========================================================================
    // PRICES
    // =========================================================================
    /// A new price replaced the previous one.
    PriceUpdated {
        /// Currency identifier.
        id: CurrencyId,
        /// The pushed price.
        price: U256,
    },

    // =========================================================================
    // ACCESS CONTROL
    // =========================================================================
    /// The administrator role moved to a new account.
    AdministratorChanged {
        /// Outgoing administrator.
        previous: Address,
        /// Incoming administrator.
        new: Address,
    },
}

impl RegistryEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::CurrencyAdded { .. } | Self::CurrencyUpdated { .. } => EventTopic::Metadata,
            Self::CurrencyStateChanged { .. } => EventTopic::Activation,
            Self::PriceUpdated { .. } => EventTopic::Prices,
            Self::AdministratorChanged { .. } => EventTopic::Administration,
        }
    }

    /// The currency this event concerns, if any.
    #[must_use]
    pub fn currency_id(&self) -> Option<CurrencyId> {
        match self {
            Self::CurrencyAdded { id, .. }
            | Self::CurrencyUpdated { id, .. }
            | Self::CurrencyStateChanged { id, .. }
            | Self::PriceUpdated { id, .. } => Some(*id),
            Self::AdministratorChanged { .. } => None,
        }
    }

    /// Event name as it appears in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CurrencyAdded { .. } => "CurrencyAdded",
            Self::CurrencyUpdated { .. } => "CurrencyUpdated",
            Self::CurrencyStateChanged { .. } => "CurrencyStateChanged",
            Self::PriceUpdated { .. } => "PriceUpdated",
            Self::AdministratorChanged { .. } => "AdministratorChanged",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Creation and metadata edits.
    Metadata,
    /// Active flag toggles.
    Activation,
    /// Price pushes.
    Prices,
    /// Administrator transfers.
    Administration,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Currencies to include. Empty means all currencies.
    ///
    /// Events without a currency (administrator transfers) only pass when
    /// this list is empty.
    pub currency_ids: Vec<CurrencyId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            currency_ids: Vec::new(),
        }
    }

    /// Create a filter for events about specific currencies.
    #[must_use]
    pub fn for_currencies(currency_ids: Vec<CurrencyId>) -> Self {
        Self {
            topics: Vec::new(),
            currency_ids,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &RegistryEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let currency_match = self.currency_ids.is_empty()
            || event
                .currency_id()
                .is_some_and(|id| self.currency_ids.contains(&id));

        topic_match && currency_match
    }
}
