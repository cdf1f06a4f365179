//! # Node Runtime
//!
//! Wires the registry, the event bus and a history indexer together and
//! replays command scripts against them.
//!
//! ## Startup Sequence
//!
//! 1. Create the event bus with the configured capacity
//! 2. Subscribe the history indexer before any mutation can happen
//! 3. Create the registry owned by the configured administrator
//!
//! After every command the indexer drains the bus, so it never falls more
//! than one event behind and cannot lag out of a bounded channel.

use std::io::{BufRead, Write};
use std::sync::Arc;

use quasar_registry::{
    ConfigError, CurrencyHistoryIndexer, CurrencyRegistry, CurrencyRegistryApi,
    InMemoryCurrencyStore, IndexerError, RegistryConfig, ServiceStats,
};
use serde::Serialize;
use shared_bus::{EventFilter, InMemoryEventBus, Subscription};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::commands::{execute, CommandOutcome, RegistryCommand};

/// Registry wired to the in-process bus.
pub type NodeRegistry = CurrencyRegistry<InMemoryCurrencyStore, Arc<InMemoryEventBus>>;

/// Errors that stop the runtime from starting or abort a script run.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The registry configuration was refused.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reading the script or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An outcome could not be serialized.
    #[error("Output serialization failed: {0}")]
    Output(#[from] serde_json::Error),

    /// The event stream disagreed with the indexer.
    #[error("Indexer error: {0}")]
    Indexer(#[from] IndexerError),
}

/// One line of script output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptLine {
    /// 1-based line number in the script.
    pub line: usize,
    /// Operation name, when the line parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub op: Option<&'static str>,
    #[serde(flatten)]
    pub outcome: CommandOutcome,
}

/// Counts for a completed script run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Commands read (blank and comment lines excluded).
    pub commands: usize,
    /// Mutations applied.
    pub applied: usize,
    /// Commands the registry refused.
    pub rejected: usize,
    /// Lines that never reached the registry.
    pub invalid: usize,
    /// Reads answered.
    pub reads: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &CommandOutcome) {
        self.commands += 1;
        match outcome {
            CommandOutcome::Created { .. } | CommandOutcome::Applied => self.applied += 1,
            CommandOutcome::Rejected { .. } => self.rejected += 1,
            CommandOutcome::Invalid { .. } => self.invalid += 1,
            CommandOutcome::Found { .. } => self.reads += 1,
        }
    }
}

/// The running node.
pub struct NodeRuntime {
    registry: Arc<NodeRegistry>,
    bus: Arc<InMemoryEventBus>,
    subscription: Subscription,
    indexer: CurrencyHistoryIndexer,
}

impl NodeRuntime {
    /// Create a runtime for the given registry configuration.
    pub fn new(config: RegistryConfig) -> Result<Self, RuntimeError> {
        config.validate()?;
        info!("Creating Quasar node runtime");

        let bus = Arc::new(InMemoryEventBus::with_capacity(config.event_capacity));
        let subscription = bus.subscribe(EventFilter::all());
        let indexer = CurrencyHistoryIndexer::with_administrator(config.administrator);
        let registry = Arc::new(CurrencyRegistry::new(
            config,
            InMemoryCurrencyStore::new(),
            Arc::clone(&bus),
        )?);

        Ok(Self {
            registry,
            bus,
            subscription,
            indexer,
        })
    }

    /// Shared handle to the registry.
    pub fn registry(&self) -> Arc<NodeRegistry> {
        Arc::clone(&self.registry)
    }

    /// The event bus.
    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }

    /// History rebuilt from the events seen so far.
    pub fn indexer(&self) -> &CurrencyHistoryIndexer {
        &self.indexer
    }

    /// Registry service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.registry.stats()
    }

    /// Run one script line. Returns `None` for blank and `#` comment lines.
    pub fn run_line(&mut self, line_no: usize, raw: &str) -> Result<Option<ScriptLine>, RuntimeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (op, outcome) = match RegistryCommand::parse(trimmed) {
            Ok(command) => {
                let op = command.op();
                debug!(line = line_no, op, "Executing command");
                (Some(op), execute(self.registry.as_ref(), command))
            }
            Err(err) => {
                warn!(line = line_no, error = %err, "Skipping malformed command");
                (None, CommandOutcome::from(err))
            }
        };

        if outcome.is_mutation() {
            self.indexer.drain(&mut self.subscription)?;
        }

        Ok(Some(ScriptLine {
            line: line_no,
            op,
            outcome,
        }))
    }

    /// Run every line of `script`, writing one JSON outcome per command to `output`.
    ///
    /// Rejected and malformed commands are reported and the run continues.
    pub fn run_script<R: BufRead, W: Write>(
        &mut self,
        script: R,
        mut output: W,
    ) -> Result<RunSummary, RuntimeError> {
        let mut summary = RunSummary::default();

        for (index, line) in script.lines().enumerate() {
            let line = line?;
            let Some(result) = self.run_line(index + 1, &line)? else {
                continue;
            };

            summary.record(&result.outcome);
            serde_json::to_writer(&mut output, &result)?;
            output.write_all(b"\n")?;
        }
        output.flush()?;

        info!(
            commands = summary.commands,
            applied = summary.applied,
            rejected = summary.rejected,
            invalid = summary.invalid,
            reads = summary.reads,
            "Script complete"
        );
        Ok(summary)
    }

    /// Log what the indexer rebuilt from the event stream.
    pub fn log_indexer_summary(&self) {
        let stats = self.registry.stats();
        info!(
            events = self.indexer.events_applied(),
            currencies = self.registry.currency_count(),
            administrator = %self.registry.administrator(),
            administrator_changes = self.indexer.administrators().len().saturating_sub(1),
            unauthorized = stats.unauthorized_requests,
            "Indexer summary"
        );

        for history in self.indexer.currencies() {
            info!(
                currency_id = history.id,
                name = %history.metadata.name,
                symbol = %history.metadata.symbol,
                active = history.active,
                price = %history.price,
                price_updates = history.price_history.len(),
                renames = history.metadata_history.len().saturating_sub(1),
                "Currency"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quasar_registry::Price;
    use shared_types::Address;

    const ADMIN: Address = Address::repeat_byte(0xAB);

    fn runtime() -> NodeRuntime {
        NodeRuntime::new(RegistryConfig::new(ADMIN)).unwrap()
    }

    fn script(lines: &[String]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_end_to_end_script() {
        let admin = ADMIN.to_hex();
        let intruder = Address::repeat_byte(0x66).to_hex();
        let input = script(&[
            "# Alpha lifecycle".to_string(),
            format!(r#"{{"op":"create","caller":"{admin}","name":"Alpha","symbol":"ALP"}}"#),
            format!(r#"{{"op":"push_price","caller":"{admin}","id":1,"price":"100"}}"#),
            format!(r#"{{"op":"push_price","caller":"{intruder}","id":1,"price":"999"}}"#),
            format!(r#"{{"op":"set_active","caller":"{admin}","id":1,"active":false}}"#),
            format!(r#"{{"op":"push_price","caller":"{admin}","id":1,"price":"50"}}"#),
            String::new(),
            r#"{"op":"get_currency","id":1}"#.to_string(),
        ]);

        let mut rt = runtime();
        let mut output = Vec::new();
        let summary = rt.run_script(input.as_bytes(), &mut output).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                commands: 6,
                applied: 3,
                rejected: 2,
                invalid: 0,
                reads: 1,
            }
        );

        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0]["line"], 2);
        assert_eq!(lines[0]["status"], "created");
        assert_eq!(lines[2]["kind"], "Unauthorized");
        assert_eq!(lines[4]["reason"], "Quasar: currency is not supported");
        assert_eq!(lines[5]["currency"]["price"], "100");
        assert_eq!(lines[5]["currency"]["active"], false);

        let history = rt.indexer().currency(1).unwrap();
        assert_eq!(history.price_history, vec![Price::from(100u64)]);
        assert!(!history.active);
    }

    #[test]
    fn test_malformed_lines_do_not_stop_script() {
        let admin = ADMIN.to_hex();
        let input = script(&[
            "not json".to_string(),
            format!(r#"{{"op":"push_price","caller":"{admin}","id":1,"price":"abc"}}"#),
            format!(r#"{{"op":"create","caller":"{admin}","name":"Beta","symbol":"BET"}}"#),
        ]);

        let mut rt = runtime();
        let mut output = Vec::new();
        let summary = rt.run_script(input.as_bytes(), &mut output).unwrap();

        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.applied, 1);
        assert_eq!(rt.registry().next_id(), 2);
    }

    #[test]
    fn test_indexer_follows_administrator_handover() {
        let admin = ADMIN.to_hex();
        let next = Address::repeat_byte(0xCD);
        let input = script(&[format!(
            r#"{{"op":"transfer_administrator","caller":"{admin}","new_admin":"{}"}}"#,
            next.to_hex()
        )]);

        let mut rt = runtime();
        rt.run_script(input.as_bytes(), std::io::sink()).unwrap();

        assert_eq!(rt.registry().administrator(), next);
        assert_eq!(rt.indexer().administrators(), &[ADMIN, next]);
        assert_eq!(rt.stats().administrator_transfers, 1);
    }

    #[test]
    fn test_zero_administrator_refused_at_startup() {
        let result = NodeRuntime::new(RegistryConfig::new(Address::ZERO));
        assert!(matches!(
            result,
            Err(RuntimeError::Config(ConfigError::ZeroAdministrator))
        ));
    }

    #[test]
    fn test_long_script_outruns_small_capacity() {
        let admin = ADMIN.to_hex();
        let mut lines = vec![format!(
            r#"{{"op":"create","caller":"{admin}","name":"Gamma","symbol":"GAM"}}"#
        )];
        for price in 0..50 {
            lines.push(format!(
                r#"{{"op":"push_price","caller":"{admin}","id":1,"price":"{price}"}}"#
            ));
        }

        let mut config = RegistryConfig::new(ADMIN);
        config.event_capacity = 4;
        let mut rt = NodeRuntime::new(config).unwrap();
        let summary = rt.run_script(script(&lines).as_bytes(), std::io::sink()).unwrap();

        assert_eq!(summary.applied, 51);
        assert_eq!(rt.indexer().currency(1).unwrap().price_history.len(), 50);
    }
}
