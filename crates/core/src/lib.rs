pub mod collector;
pub mod config;
pub mod invoker;
pub mod orchestrator;
pub mod registry;
pub mod relocator;
pub mod report;
pub mod testing;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use orchestrator::{Operation, Orchestrator, OrchestratorError, RunOptions, RunSummary};
