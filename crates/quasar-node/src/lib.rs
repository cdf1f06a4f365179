//! # Quasar Node Library
//!
//! Exposes the runtime pieces of the `quasar-node` binary for testing.
//!
//! - `config/` - command-line flags over environment variables
//! - `commands/` - the JSON-lines command format and its outcomes
//! - `runtime/` - registry, event bus and history indexer wiring

pub mod commands;
pub mod config;
pub mod runtime;

pub use commands::{execute, CommandError, CommandOutcome, CurrencyView, RegistryCommand};
pub use config::{CliArgs, NodeConfig, ScriptSource};
pub use runtime::{NodeRegistry, NodeRuntime, RunSummary, RuntimeError, ScriptLine};
