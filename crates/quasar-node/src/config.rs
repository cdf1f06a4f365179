//! # Node Configuration
//!
//! Command-line flags layered over environment variables.
//!
//! Registry settings come from `--admin` / `--event-capacity`, which fall back
//! to `QUASAR_ADMINISTRATOR` / `QUASAR_EVENT_CAPACITY`. Logging settings start
//! from `TelemetryConfig::from_env()` and are overridden by `--json-logs` and
//! `--log-level` when given.

use std::path::PathBuf;

use clap::Parser;
use quasar_registry::config::{parse_capacity, ADMINISTRATOR_ENV, EVENT_CAPACITY_ENV};
use quasar_registry::{ConfigError, RegistryConfig};
use quasar_telemetry::TelemetryConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::Address;

/// Quasar node: single-authority currency registry runtime
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "quasar-node")]
#[command(about = "Replay a JSON-lines command script against a currency registry")]
pub struct CliArgs {
    /// Administrator address (hex, optional 0x prefix)
    #[arg(long, env = ADMINISTRATOR_ENV)]
    pub admin: Option<Address>,

    /// Command script (one JSON command per line); reads stdin when omitted or "-"
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Emit JSON formatted logs
    #[arg(long)]
    pub json_logs: bool,

    /// Log filter directive (overrides QUASAR_LOG_LEVEL / RUST_LOG)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Events buffered per subscriber
    #[arg(long, env = EVENT_CAPACITY_ENV, value_parser = parse_capacity)]
    pub event_capacity: Option<usize>,
}

/// Where the command script comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    /// Standard input.
    Stdin,
    /// A file on disk.
    File(PathBuf),
}

/// Complete node configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeConfig {
    /// Registry configuration.
    pub registry: RegistryConfig,
    /// Logging configuration.
    pub telemetry: TelemetryConfig,
    /// Command script source.
    pub script: ScriptSource,
}

impl NodeConfig {
    /// Resolve parsed arguments against the environment's telemetry settings.
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        Self::resolve(args, TelemetryConfig::from_env())
    }

    /// Resolve parsed arguments over a base telemetry configuration.
    pub fn resolve(args: CliArgs, mut telemetry: TelemetryConfig) -> Result<Self, ConfigError> {
        let administrator = args.admin.ok_or(ConfigError::MissingAdministrator)?;

        let registry = RegistryConfig {
            administrator,
            event_capacity: args.event_capacity.unwrap_or(DEFAULT_CHANNEL_CAPACITY),
        };
        registry.validate()?;

        if args.json_logs {
            telemetry.json_logs = true;
        }
        if let Some(level) = args.log_level {
            telemetry.log_level = level;
        }

        let script = match args.script {
            Some(path) if path.as_os_str() != "-" => ScriptSource::File(path),
            _ => ScriptSource::Stdin,
        };

        Ok(Self {
            registry,
            telemetry,
            script,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_HEX: &str = "0xabababababababababababababababababababab";

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["quasar-node"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_resolve() {
        let parsed = args(&[
            "--admin",
            ADMIN_HEX,
            "--script",
            "prices.jsonl",
            "--json-logs",
            "--log-level",
            "debug",
            "--event-capacity",
            "64",
        ]);
        let config = NodeConfig::resolve(parsed, TelemetryConfig::default()).unwrap();

        assert_eq!(config.registry.administrator, Address::repeat_byte(0xab));
        assert_eq!(config.registry.event_capacity, 64);
        assert!(config.telemetry.json_logs);
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(
            config.script,
            ScriptSource::File(PathBuf::from("prices.jsonl"))
        );
    }

    #[test]
    fn test_defaults() {
        let parsed = CliArgs {
            admin: Some(Address::repeat_byte(1)),
            script: None,
            json_logs: false,
            log_level: None,
            event_capacity: None,
        };
        let config = NodeConfig::resolve(parsed, TelemetryConfig::default()).unwrap();

        assert_eq!(config.registry.event_capacity, DEFAULT_CHANNEL_CAPACITY);
        assert_eq!(config.telemetry, TelemetryConfig::default());
        assert_eq!(config.script, ScriptSource::Stdin);
    }

    #[test]
    fn test_dash_means_stdin() {
        let parsed = CliArgs {
            admin: Some(Address::repeat_byte(1)),
            script: Some(PathBuf::from("-")),
            json_logs: false,
            log_level: None,
            event_capacity: None,
        };
        let config = NodeConfig::resolve(parsed, TelemetryConfig::default()).unwrap();
        assert_eq!(config.script, ScriptSource::Stdin);
    }

    #[test]
    fn test_missing_admin() {
        let parsed = CliArgs {
            admin: None,
            script: None,
            json_logs: false,
            log_level: None,
            event_capacity: None,
        };
        assert_eq!(
            NodeConfig::resolve(parsed, TelemetryConfig::default()),
            Err(ConfigError::MissingAdministrator)
        );
    }

    #[test]
    fn test_zero_admin_rejected() {
        let parsed = CliArgs {
            admin: Some(Address::ZERO),
            script: None,
            json_logs: false,
            log_level: None,
            event_capacity: None,
        };
        assert_eq!(
            NodeConfig::resolve(parsed, TelemetryConfig::default()),
            Err(ConfigError::ZeroAdministrator)
        );
    }

    #[test]
    fn test_bad_capacity_rejected_by_parser() {
        let result = CliArgs::try_parse_from(["quasar-node", "--event-capacity", "0"]);
        assert!(result.is_err());
    }
}
