//! Configuration for the PolarCraft simulation.
//!
//! Settings persist to disk as a RON file. Every section uses
//! `#[serde(default)]`, so older and newer files both load. Command-line
//! values parsed with clap override whatever the file says.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, SimulationConfig, default_config_dir};
pub use error::ConfigError;
