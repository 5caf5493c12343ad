//! Command-line overrides shared by PolarCraft binaries.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Global options, flattened into a binary's own parser.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Half-extent of the world in blocks.
    #[arg(long, global = true)]
    pub world_size: Option<i32>,

    /// Maximum cells a single ray may enter.
    #[arg(long, global = true)]
    pub max_depth: Option<u32>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.world_size {
            self.simulation.world_size = size;
        }
        if let Some(depth) = args.max_depth {
            self.simulation.max_depth = depth;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
