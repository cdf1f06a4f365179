//! # Inbound Ports (Driving Ports)
//!
//! The operations the registry exposes to callers.

use shared_types::Address;

use crate::domain::{Currency, CurrencyId, CurrencyMetadata, Price, RegistryError};

/// Primary API of the currency registry.
///
/// Mutating methods take the caller identity and are rejected with
/// `Unauthorized` unless it is the administrator. Read methods are open to
/// everyone.
pub trait CurrencyRegistryApi: Send + Sync {
    // =========================================================================
    // MUTATIONS (administrator only)
    // =========================================================================

    /// Register a new currency and return its id.
    ///
    /// ## Errors
    ///
    /// - `Unauthorized`: caller is not the administrator
    /// - `BlankName` / `BlankSymbol`: empty field (name checked first)
    fn create(&self, caller: Address, name: &str, symbol: &str) -> Result<CurrencyId, RegistryError>;

    /// Overwrite name and symbol of an existing currency.
    ///
    /// ## Errors
    ///
    /// Checked in order: `Unauthorized`, `NotFound`, `BlankName`, `BlankSymbol`.
    fn update(
        &self,
        caller: Address,
        id: CurrencyId,
        name: &str,
        symbol: &str,
    ) -> Result<(), RegistryError>;

    /// Replace the price of an active currency.
    ///
    /// ## Errors
    ///
    /// Checked in order: `Unauthorized`, `NotFound`, `Unsupported`.
    fn push_price(&self, caller: Address, id: CurrencyId, price: Price) -> Result<(), RegistryError>;

    /// Activate or deactivate a currency.
    ///
    /// ## Errors
    ///
    /// Checked in order: `Unauthorized`, `NotFound`.
    fn set_active(&self, caller: Address, id: CurrencyId, active: bool) -> Result<(), RegistryError>;

    /// Hand the administrator role to another account.
    ///
    /// ## Errors
    ///
    /// - `Unauthorized`: caller is not the administrator
    /// - `InvalidArgument`: `new_admin` is the zero address
    fn transfer_administrator(&self, caller: Address, new_admin: Address)
        -> Result<(), RegistryError>;

    // =========================================================================
    // READS
    // =========================================================================

    /// Name and symbol of a currency.
    fn get_metadata(&self, id: CurrencyId) -> Result<CurrencyMetadata, RegistryError>;

    /// Latest pushed price (zero if never pushed).
    fn get_price(&self, id: CurrencyId) -> Result<Price, RegistryError>;

    /// Activation flag.
    fn is_active(&self, id: CurrencyId) -> Result<bool, RegistryError>;

    /// Full snapshot of one currency.
    fn get_currency(&self, id: CurrencyId) -> Result<Currency, RegistryError>;

    /// The id the next successful `create` will return.
    fn next_id(&self) -> CurrencyId;

    /// Number of currencies ever created.
    fn currency_count(&self) -> u64;

    /// The current administrator.
    fn administrator(&self) -> Address;
}
