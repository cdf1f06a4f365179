//! # Access Guard
//!
//! Holds the single administrator identity and authorizes every mutation.
//! Composed into the registry by delegation; it owns no currency state.

use shared_bus::RegistryEvent;
use shared_types::Address;
use tracing::{debug, info};

use crate::domain::RegistryError;

/// Single-administrator capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard {
    administrator: Address,
}

impl AccessGuard {
    /// Create a guard owned by `administrator`.
    pub fn new(administrator: Address) -> Self {
        Self { administrator }
    }

    /// The current administrator.
    pub fn administrator(&self) -> Address {
        self.administrator
    }

    /// Fail with `Unauthorized` unless `caller` is the administrator.
    pub fn authorize(&self, caller: Address) -> Result<(), RegistryError> {
        if caller != self.administrator {
            debug!(caller = %caller, "Caller is not the administrator");
            return Err(RegistryError::Unauthorized { caller });
        }
        Ok(())
    }

    /// Hand the administrator role to `new_admin`.
    ///
    /// Returns the `AdministratorChanged` notification for the caller to
    /// publish once the surrounding state change is committed.
    pub fn transfer_administrator(
        &mut self,
        caller: Address,
        new_admin: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        self.authorize(caller)?;

        if new_admin.is_zero() {
            return Err(RegistryError::InvalidArgument(
                "new administrator is the zero address".to_string(),
            ));
        }

        let previous = std::mem::replace(&mut self.administrator, new_admin);
        info!(previous = %previous, new = %new_admin, "Administrator transferred");

        Ok(RegistryEvent::AdministratorChanged {
            previous,
            new: new_admin,
        })
    }
}
