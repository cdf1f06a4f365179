//! Registry configuration from environment variables.

use std::env;

use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::{Address, AddressError};
use thiserror::Error;

/// Environment variable holding the administrator address.
pub const ADMINISTRATOR_ENV: &str = "QUASAR_ADMINISTRATOR";

/// Environment variable holding the event bus capacity.
pub const EVENT_CAPACITY_ENV: &str = "QUASAR_EVENT_CAPACITY";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No administrator was configured.
    #[error("Administrator address not set (set QUASAR_ADMINISTRATOR)")]
    MissingAdministrator,

    /// The administrator address did not parse.
    #[error("Invalid administrator address: {0}")]
    InvalidAdministrator(#[from] AddressError),

    /// The zero address cannot administer the registry.
    #[error("Administrator cannot be the zero address")]
    ZeroAdministrator,

    /// Event capacity was not a positive integer.
    #[error("Invalid event capacity: {0}")]
    InvalidEventCapacity(String),
}

/// Registry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Initial administrator.
    pub administrator: Address,
    /// Events buffered per subscriber before the oldest are dropped.
    pub event_capacity: usize,
}

impl RegistryConfig {
    /// Configuration with default capacity for the given administrator.
    pub fn new(administrator: Address) -> Self {
        Self {
            administrator,
            event_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QUASAR_ADMINISTRATOR`: hex administrator address (required)
    /// - `QUASAR_EVENT_CAPACITY`: event bus capacity (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let administrator = lookup(ADMINISTRATOR_ENV)
            .ok_or(ConfigError::MissingAdministrator)?
            .parse::<Address>()?;

        let event_capacity = match lookup(EVENT_CAPACITY_ENV) {
            Some(raw) => parse_capacity(&raw)?,
            None => DEFAULT_CHANNEL_CAPACITY,
        };

        let config = Self {
            administrator,
            event_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the registry cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.administrator.is_zero() {
            return Err(ConfigError::ZeroAdministrator);
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::InvalidEventCapacity("0".to_string()));
        }
        Ok(())
    }
}

/// Parse a strictly positive event capacity.
pub fn parse_capacity(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidEventCapacity(raw.to_string())),
    }
}
