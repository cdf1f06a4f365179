//! # Value Objects
//!
//! Immutable domain primitives for the currency registry.

use serde::{Deserialize, Serialize};

use super::errors::RegistryError;

pub use shared_types::{CurrencyId, U256};

/// Latest pushed price. Unsigned, so never negative.
pub type Price = U256;

/// First identifier handed out by a fresh registry.
pub const FIRST_CURRENCY_ID: CurrencyId = 1;

// =============================================================================
// METADATA
// =============================================================================

/// Display name and ticker symbol of a currency.
///
/// Construct through [`CurrencyMetadata::new`] so neither field is ever empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyMetadata {
    /// Display name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
}

impl CurrencyMetadata {
    /// Validate and build metadata. The name is checked before the symbol.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        let symbol = symbol.into();

        if name.is_empty() {
            return Err(RegistryError::BlankName);
        }
        if symbol.is_empty() {
            return Err(RegistryError::BlankSymbol);
        }

        Ok(Self { name, symbol })
    }
}

// =============================================================================
// ACTIVATION STATE
// =============================================================================

/// Activation state of an existing currency.
///
/// ```text
/// Nonexistent ──create──→ Active ⇄ Inactive   (set_active)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyState {
    /// Accepts price pushes.
    Active,
    /// Logically retired; metadata can still be edited.
    Inactive,
}

impl CurrencyState {
    /// Whether prices may be pushed in this state.
    #[must_use]
    pub fn accepts_prices(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<bool> for CurrencyState {
    fn from(active: bool) -> Self {
        if active {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

impl From<CurrencyState> for bool {
    fn from(state: CurrencyState) -> Self {
        state.accepts_prices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_valid() {
        let meta = CurrencyMetadata::new("currency", "CRN").unwrap();
        assert_eq!(meta.name, "currency");
        assert_eq!(meta.symbol, "CRN");
    }

    #[test]
    fn test_metadata_blank_name_checked_first() {
        assert_eq!(CurrencyMetadata::new("", ""), Err(RegistryError::BlankName));
        assert_eq!(CurrencyMetadata::new("", "CRN"), Err(RegistryError::BlankName));
    }

    #[test]
    fn test_metadata_blank_symbol() {
        assert_eq!(
            CurrencyMetadata::new("currency", ""),
            Err(RegistryError::BlankSymbol)
        );
    }

    #[test]
    fn test_whitespace_is_not_blank() {
        // Only the empty string counts as blank
        assert!(CurrencyMetadata::new(" ", " ").is_ok());
    }

    #[test]
    fn test_state_round_trip_through_bool() {
        assert_eq!(CurrencyState::from(true), CurrencyState::Active);
        assert_eq!(CurrencyState::from(false), CurrencyState::Inactive);
        assert!(bool::from(CurrencyState::Active));
        assert!(!CurrencyState::Inactive.accepts_prices());
    }
}
