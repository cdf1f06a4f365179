//! # Domain Invariants
//!
//! Rules that must hold for every reachable registry state.

use super::errors::RegistryError;
use super::value_objects::{CurrencyId, FIRST_CURRENCY_ID};

/// Invariant: ids are dense from 1.
///
/// `ids` (ascending) must be exactly `1..next_id`.
pub fn invariant_dense_ids(ids: &[CurrencyId], next_id: CurrencyId) -> bool {
    let expected = next_id.saturating_sub(FIRST_CURRENCY_ID);
    ids.len() as u64 == expected
        && ids
            .iter()
            .zip(FIRST_CURRENCY_ID..)
            .all(|(id, expected)| *id == expected)
}

/// Invariant: an id refers to an existing currency iff it was handed out.
pub fn invariant_id_assigned(id: CurrencyId, next_id: CurrencyId) -> bool {
    id >= FIRST_CURRENCY_ID && id < next_id
}

/// Next counter value after a successful creation.
///
/// Fails instead of wrapping so an id can never be handed out twice.
pub fn advance_next_id(next_id: CurrencyId) -> Result<CurrencyId, RegistryError> {
    next_id
        .checked_add(1)
        .ok_or(RegistryError::IdSpaceExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_ids_empty_registry() {
        assert!(invariant_dense_ids(&[], 1));
    }

    #[test]
    fn test_dense_ids_pass() {
        assert!(invariant_dense_ids(&[1, 2, 3], 4));
    }

    #[test]
    fn test_dense_ids_gap_fails() {
        assert!(!invariant_dense_ids(&[1, 3], 4));
    }

    #[test]
    fn test_dense_ids_counter_mismatch_fails() {
        assert!(!invariant_dense_ids(&[1, 2], 4));
    }

    #[test]
    fn test_id_assigned() {
        assert!(!invariant_id_assigned(0, 3));
        assert!(invariant_id_assigned(1, 3));
        assert!(invariant_id_assigned(2, 3));
        assert!(!invariant_id_assigned(3, 3));
    }

    #[test]
    fn test_advance_next_id_overflow() {
        assert_eq!(advance_next_id(1), Ok(2));
        assert_eq!(
            advance_next_id(CurrencyId::MAX),
            Err(RegistryError::IdSpaceExhausted)
        );
    }
}
