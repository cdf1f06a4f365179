//! # Script Commands
//!
//! One JSON object per line, tagged by `op`:
//!
//! ```text
//! {"op":"create","caller":"0xab..","name":"Alpha","symbol":"ALP"}
//! {"op":"update","caller":"0xab..","id":1,"name":"Alpha","symbol":"ALP2"}
//! {"op":"push_price","caller":"0xab..","id":1,"price":"100"}
//! {"op":"set_active","caller":"0xab..","id":1,"active":false}
//! {"op":"transfer_administrator","caller":"0xab..","new_admin":"0xcd.."}
//! {"op":"get_currency","id":1}
//! ```
//!
//! Prices are decimal strings so values beyond `u64` survive JSON.

use quasar_registry::{
    Currency, CurrencyId, CurrencyRegistryApi, Price, RegistryError, RegistryErrorKind,
};
use serde::{Deserialize, Serialize};
use shared_types::Address;
use thiserror::Error;

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RegistryCommand {
    Create {
        caller: Address,
        name: String,
        symbol: String,
    },
    Update {
        caller: Address,
        id: CurrencyId,
        name: String,
        symbol: String,
    },
    PushPrice {
        caller: Address,
        id: CurrencyId,
        price: String,
    },
    SetActive {
        caller: Address,
        id: CurrencyId,
        active: bool,
    },
    TransferAdministrator {
        caller: Address,
        new_admin: Address,
    },
    /// Reads are open to anyone; the caller is only recorded.
    GetCurrency {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caller: Option<Address>,
        id: CurrencyId,
    },
}

impl RegistryCommand {
    /// Operation name as written in scripts.
    pub fn op(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::PushPrice { .. } => "push_price",
            Self::SetActive { .. } => "set_active",
            Self::TransferAdministrator { .. } => "transfer_administrator",
            Self::GetCurrency { .. } => "get_currency",
        }
    }

    /// Parse one script line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        serde_json::from_str(line).map_err(|e| CommandError::Malformed(e.to_string()))
    }
}

/// Errors raised before a command reaches the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The line is not a valid command.
    #[error("Malformed command: {0}")]
    Malformed(String),

    /// The price is not a decimal `U256`.
    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),
}

/// Parse a decimal price string.
pub fn parse_price(raw: &str) -> Result<Price, CommandError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CommandError::InvalidPrice(raw.to_string()));
    }
    Price::from_dec_str(trimmed).map_err(|_| CommandError::InvalidPrice(raw.to_string()))
}

/// A currency as printed in command output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyView {
    pub id: CurrencyId,
    pub name: String,
    pub symbol: String,
    /// Decimal string.
    pub price: String,
    pub active: bool,
}

impl From<Currency> for CurrencyView {
    fn from(currency: Currency) -> Self {
        Self {
            id: currency.id,
            name: currency.metadata.name,
            symbol: currency.metadata.symbol,
            price: currency.price.to_string(),
            active: currency.active,
        }
    }
}

/// Result of running one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// `create` succeeded.
    Created { id: CurrencyId },
    /// A mutation other than `create` succeeded.
    Applied,
    /// `get_currency` result.
    Found { currency: CurrencyView },
    /// The registry refused the command.
    Rejected {
        kind: RegistryErrorKind,
        reason: String,
        message: String,
    },
    /// The command never reached the registry.
    Invalid { message: String },
}

impl CommandOutcome {
    /// Whether the registry state may have changed.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Created { .. } | Self::Applied)
    }
}

impl From<RegistryError> for CommandOutcome {
    fn from(err: RegistryError) -> Self {
        Self::Rejected {
            kind: err.kind(),
            reason: err.reason().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<CommandError> for CommandOutcome {
    fn from(err: CommandError) -> Self {
        Self::Invalid {
            message: err.to_string(),
        }
    }
}

/// Run one command against the registry.
pub fn execute(registry: &impl CurrencyRegistryApi, command: RegistryCommand) -> CommandOutcome {
    let result = match command {
        RegistryCommand::Create {
            caller,
            name,
            symbol,
        } => registry
            .create(caller, &name, &symbol)
            .map(|id| CommandOutcome::Created { id }),
        RegistryCommand::Update {
            caller,
            id,
            name,
            symbol,
        } => registry
            .update(caller, id, &name, &symbol)
            .map(|()| CommandOutcome::Applied),
        RegistryCommand::PushPrice { caller, id, price } => match parse_price(&price) {
            Ok(price) => registry
                .push_price(caller, id, price)
                .map(|()| CommandOutcome::Applied),
            Err(err) => return err.into(),
        },
        RegistryCommand::SetActive { caller, id, active } => registry
            .set_active(caller, id, active)
            .map(|()| CommandOutcome::Applied),
        RegistryCommand::TransferAdministrator { caller, new_admin } => registry
            .transfer_administrator(caller, new_admin)
            .map(|()| CommandOutcome::Applied),
        RegistryCommand::GetCurrency { id, .. } => registry
            .get_currency(id)
            .map(|currency| CommandOutcome::Found {
                currency: currency.into(),
            }),
    };

    result.unwrap_or_else(CommandOutcome::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quasar_registry::{CurrencyRegistry, InMemoryCurrencyStore, RegistryConfig};
    use shared_bus::InMemoryEventBus;

    const ADMIN: Address = Address::repeat_byte(0xAB);

    fn registry() -> CurrencyRegistry<InMemoryCurrencyStore, InMemoryEventBus> {
        CurrencyRegistry::new(
            RegistryConfig::new(ADMIN),
            InMemoryCurrencyStore::new(),
            InMemoryEventBus::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_create() {
        let line = format!(
            r#"{{"op":"create","caller":"{}","name":"Alpha","symbol":"ALP"}}"#,
            ADMIN.to_hex()
        );
        assert_eq!(
            RegistryCommand::parse(&line).unwrap(),
            RegistryCommand::Create {
                caller: ADMIN,
                name: "Alpha".to_string(),
                symbol: "ALP".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_get_without_caller() {
        let command = RegistryCommand::parse(r#"{"op":"get_currency","id":3}"#).unwrap();
        assert_eq!(command, RegistryCommand::GetCurrency { caller: None, id: 3 });
        assert_eq!(command.op(), "get_currency");
    }

    #[test]
    fn test_parse_rejects_unknown_op() {
        assert!(matches!(
            RegistryCommand::parse(r#"{"op":"delete","id":1}"#),
            Err(CommandError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("100"), Ok(Price::from(100u64)));
        assert_eq!(
            parse_price("340282366920938463463374607431768211456"),
            Ok(Price::from(u128::MAX) + Price::one())
        );
        assert!(parse_price("").is_err());
        assert!(parse_price("-5").is_err());
        assert!(parse_price("1.5").is_err());
    }

    #[test]
    fn test_execute_flow() {
        let registry = registry();

        let created = execute(
            &registry,
            RegistryCommand::Create {
                caller: ADMIN,
                name: "Alpha".to_string(),
                symbol: "ALP".to_string(),
            },
        );
        assert_eq!(created, CommandOutcome::Created { id: 1 });

        let pushed = execute(
            &registry,
            RegistryCommand::PushPrice {
                caller: ADMIN,
                id: 1,
                price: "100".to_string(),
            },
        );
        assert_eq!(pushed, CommandOutcome::Applied);

        let found = execute(&registry, RegistryCommand::GetCurrency { caller: None, id: 1 });
        assert_eq!(
            found,
            CommandOutcome::Found {
                currency: CurrencyView {
                    id: 1,
                    name: "Alpha".to_string(),
                    symbol: "ALP".to_string(),
                    price: "100".to_string(),
                    active: true,
                }
            }
        );
    }

    #[test]
    fn test_execute_rejection_carries_reason() {
        let registry = registry();
        let outcome = execute(
            &registry,
            RegistryCommand::SetActive {
                caller: ADMIN,
                id: 7,
                active: false,
            },
        );

        match outcome {
            CommandOutcome::Rejected { kind, reason, .. } => {
                assert_eq!(kind, RegistryErrorKind::NotFound);
                assert_eq!(reason, "Quasar: currency should exist");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_bad_price_never_reaches_registry() {
        let registry = registry();
        let outcome = execute(
            &registry,
            RegistryCommand::PushPrice {
                caller: Address::repeat_byte(1),
                id: 1,
                price: "lots".to_string(),
            },
        );
        assert!(matches!(outcome, CommandOutcome::Invalid { .. }));
        assert_eq!(registry.stats().rejected_requests, 0);
    }

    #[test]
    fn test_outcome_json_shape() {
        let json = serde_json::to_string(&CommandOutcome::Created { id: 4 }).unwrap();
        assert_eq!(json, r#"{"status":"created","id":4}"#);

        let json = serde_json::to_string(&CommandOutcome::from(RegistryError::BlankName)).unwrap();
        assert!(json.contains(r#""status":"rejected""#));
        assert!(json.contains(r#""kind":"BlankName""#));
    }
}
