//! # Currency Registry Service
//!
//! Owns the registry state and applies every operation of
//! [`CurrencyRegistryApi`].
//!
//! ## Atomicity
//!
//! All mutations run inside one write-locked critical section:
//!
//! 1. Authorize the caller through the [`AccessGuard`]
//! 2. Check existence and validate arguments
//! 3. Apply the change
//! 4. Publish exactly one event
//!
//! A failure in steps 1-2 returns before anything is touched, so there is
//! never a half-applied change and never an event for a rejected call.
//! Publishing while still holding the lock keeps the event order identical
//! to the order in which mutations were applied.
//!
//! Reads take the read lock and return owned snapshots.

use parking_lot::RwLock;
use shared_bus::RegistryEvent;
use shared_types::Address;
use tracing::{debug, info, instrument, warn};

use crate::access::AccessGuard;
use crate::config::{ConfigError, RegistryConfig};
use crate::domain::{
    advance_next_id, invariant_id_assigned, Currency, CurrencyId, CurrencyMetadata, Price,
    RegistryError, FIRST_CURRENCY_ID,
};
use crate::ports::inbound::CurrencyRegistryApi;
use crate::ports::outbound::{CurrencyStore, EventPublisher};

/// Mutating operations, for stats and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `create`
    Create,
    /// `update`
    Update,
    /// `push_price`
    PushPrice,
    /// `set_active`
    SetActive,
    /// `transfer_administrator`
    TransferAdministrator,
}

impl Operation {
    /// Operation name as it appears in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::PushPrice => "push_price",
            Self::SetActive => "set_active",
            Self::TransferAdministrator => "transfer_administrator",
        }
    }
}

/// Statistics for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Successful `create` calls.
    pub currencies_created: u64,
    /// Successful `update` calls.
    pub currencies_updated: u64,
    /// Successful `push_price` calls.
    pub prices_pushed: u64,
    /// Successful `set_active` calls.
    pub state_changes: u64,
    /// Successful administrator transfers.
    pub administrator_transfers: u64,
    /// Rejected mutations of any kind.
    pub rejected_requests: u64,
    /// Rejected mutations whose caller was not the administrator.
    pub unauthorized_requests: u64,
}

impl ServiceStats {
    fn record_success(&mut self, operation: Operation) {
        let counter = match operation {
            Operation::Create => &mut self.currencies_created,
            Operation::Update => &mut self.currencies_updated,
            Operation::PushPrice => &mut self.prices_pushed,
            Operation::SetActive => &mut self.state_changes,
            Operation::TransferAdministrator => &mut self.administrator_transfers,
        };
        *counter += 1;
    }

    fn record_rejection(&mut self, error: &RegistryError) {
        self.rejected_requests += 1;
        if error.is_unauthorized() {
            self.unauthorized_requests += 1;
        }
    }

    /// Total successful mutations.
    pub fn successful_mutations(&self) -> u64 {
        self.currencies_created
            + self.currencies_updated
            + self.prices_pushed
            + self.state_changes
            + self.administrator_transfers
    }
}

/// Everything guarded by the registry lock.
struct RegistryState<S> {
    guard: AccessGuard,
    store: S,
    next_id: CurrencyId,
    stats: ServiceStats,
}

impl<S: CurrencyStore> RegistryState<S> {
    fn currency(&self, id: CurrencyId) -> Result<&Currency, RegistryError> {
        self.store.get(id).ok_or(RegistryError::NotFound(id))
    }

    fn currency_mut(&mut self, id: CurrencyId) -> Result<&mut Currency, RegistryError> {
        self.store.get_mut(id).ok_or(RegistryError::NotFound(id))
    }
}

/// The currency registry.
///
/// Share it behind an `Arc`; every method takes `&self`.
pub struct CurrencyRegistry<S: CurrencyStore, P: EventPublisher> {
    config: RegistryConfig,
    state: RwLock<RegistryState<S>>,
    publisher: P,
}

impl<S: CurrencyStore, P: EventPublisher> CurrencyRegistry<S, P> {
    /// Create a registry owned by `config.administrator`.
    ///
    /// `store` is expected to be empty; ids restart at 1. Fails when
    /// `config` does not pass [`RegistryConfig::validate`].
    pub fn new(config: RegistryConfig, store: S, publisher: P) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(administrator = %config.administrator, "Creating currency registry");

        let state = RegistryState {
            guard: AccessGuard::new(config.administrator),
            store,
            next_id: FIRST_CURRENCY_ID,
            stats: ServiceStats::default(),
        };

        Ok(Self {
            config,
            state: RwLock::new(state),
            publisher,
        })
    }

    /// Configuration the registry was created with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Snapshot of service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.state.read().stats.clone()
    }

    /// Access the event publisher.
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    /// Run one mutation atomically.
    ///
    /// `apply` must validate before it writes; on `Err` the state it saw
    /// must be unchanged.
    fn mutate<T>(
        &self,
        operation: Operation,
        caller: Address,
        apply: impl FnOnce(&mut RegistryState<S>) -> Result<(T, RegistryEvent), RegistryError>,
    ) -> Result<T, RegistryError> {
        let mut state = self.state.write();

        let result = match state.guard.authorize(caller) {
            Ok(()) => apply(&mut *state),
            Err(err) => Err(err),
        };

        match result {
            Ok((value, event)) => {
                state.stats.record_success(operation);
                info!(
                    operation = operation.as_str(),
                    event = event.name(),
                    currency_id = ?event.currency_id(),
                    "Registry mutation applied"
                );
                self.publisher.publish(event);
                Ok(value)
            }
            Err(err) => {
                state.stats.record_rejection(&err);
                warn!(
                    operation = operation.as_str(),
                    caller = %caller,
                    error = %err,
                    "Registry mutation rejected"
                );
                Err(err)
            }
        }
    }

    /// Run one read against a consistent snapshot.
    fn read<T>(&self, f: impl FnOnce(&RegistryState<S>) -> T) -> T {
        f(&*self.state.read())
    }
}

impl<S: CurrencyStore, P: EventPublisher> CurrencyRegistryApi for CurrencyRegistry<S, P> {
    #[instrument(skip(self), fields(caller = %caller))]
    fn create(&self, caller: Address, name: &str, symbol: &str) -> Result<CurrencyId, RegistryError> {
        self.mutate(Operation::Create, caller, |state| {
            let metadata = CurrencyMetadata::new(name, symbol)?;
            let id = state.next_id;
            let next_id = advance_next_id(id)?;

            state.store.insert(Currency::new(id, metadata.clone()));
            state.next_id = next_id;

            let event = RegistryEvent::CurrencyAdded {
                id,
                name: metadata.name,
                symbol: metadata.symbol,
            };
            Ok((id, event))
        })
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn update(
        &self,
        caller: Address,
        id: CurrencyId,
        name: &str,
        symbol: &str,
    ) -> Result<(), RegistryError> {
        self.mutate(Operation::Update, caller, |state| {
            // Existence first, then field validation
            state.currency(id)?;
            let metadata = CurrencyMetadata::new(name, symbol)?;

            state.currency_mut(id)?.rename(metadata.clone());

            let event = RegistryEvent::CurrencyUpdated {
                id,
                name: metadata.name,
                symbol: metadata.symbol,
            };
            Ok(((), event))
        })
    }

    #[instrument(skip(self), fields(caller = %caller, price = %price))]
    fn push_price(&self, caller: Address, id: CurrencyId, price: Price) -> Result<(), RegistryError> {
        self.mutate(Operation::PushPrice, caller, |state| {
            state.currency_mut(id)?.push_price(price)?;
            Ok(((), RegistryEvent::PriceUpdated { id, price }))
        })
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn set_active(&self, caller: Address, id: CurrencyId, active: bool) -> Result<(), RegistryError> {
        self.mutate(Operation::SetActive, caller, |state| {
            state.currency_mut(id)?.set_active(active);
            Ok(((), RegistryEvent::CurrencyStateChanged { id, active }))
        })
    }

    #[instrument(skip(self), fields(caller = %caller, new_admin = %new_admin))]
    fn transfer_administrator(
        &self,
        caller: Address,
        new_admin: Address,
    ) -> Result<(), RegistryError> {
        self.mutate(Operation::TransferAdministrator, caller, |state| {
            let event = state.guard.transfer_administrator(caller, new_admin)?;
            Ok(((), event))
        })
    }

    fn get_metadata(&self, id: CurrencyId) -> Result<CurrencyMetadata, RegistryError> {
        debug!(currency_id = id, "get_metadata");
        self.read(|state| state.currency(id).map(|c| c.metadata.clone()))
    }

    fn get_price(&self, id: CurrencyId) -> Result<Price, RegistryError> {
        debug!(currency_id = id, "get_price");
        self.read(|state| state.currency(id).map(|c| c.price))
    }

    fn is_active(&self, id: CurrencyId) -> Result<bool, RegistryError> {
        debug!(currency_id = id, "is_active");
        self.read(|state| state.currency(id).map(|c| c.active))
    }

    fn get_currency(&self, id: CurrencyId) -> Result<Currency, RegistryError> {
        self.read(|state| {
            let currency = state.currency(id)?;
            debug_assert!(invariant_id_assigned(currency.id, state.next_id));
            Ok(currency.clone())
        })
    }

    fn next_id(&self) -> CurrencyId {
        self.read(|state| state.next_id)
    }

    fn currency_count(&self) -> u64 {
        self.read(|state| state.next_id - FIRST_CURRENCY_ID)
    }

    fn administrator(&self) -> Address {
        self.read(|state| state.guard.administrator())
    }
}
