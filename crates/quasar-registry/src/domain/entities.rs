//! # Domain Entities
//!
//! The `Currency` record and the transitions it supports.

use serde::{Deserialize, Serialize};

use super::errors::RegistryError;
use super::value_objects::{CurrencyId, CurrencyMetadata, CurrencyState, Price};

/// A registered currency.
///
/// Created once, mutated in place, never removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Permanent identifier.
    pub id: CurrencyId,
    /// Name and symbol.
    pub metadata: CurrencyMetadata,
    /// Latest pushed price (zero until the first push).
    pub price: Price,
    /// Activation flag.
    pub active: bool,
}

impl Currency {
    /// Create a freshly registered currency: active, price zero.
    pub fn new(id: CurrencyId, metadata: CurrencyMetadata) -> Self {
        Self {
            id,
            metadata,
            price: Price::zero(),
            active: true,
        }
    }

    /// Current activation state.
    pub fn state(&self) -> CurrencyState {
        CurrencyState::from(self.active)
    }

    /// Replace name and symbol. Price and activation are untouched.
    pub fn rename(&mut self, metadata: CurrencyMetadata) {
        self.metadata = metadata;
    }

    /// Overwrite the price, discarding the previous value.
    pub fn push_price(&mut self, price: Price) -> Result<(), RegistryError> {
        if !self.state().accepts_prices() {
            return Err(RegistryError::Unsupported(self.id));
        }
        self.price = price;
        Ok(())
    }

    /// Set the activation flag. Setting the current value is allowed.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}
