//! Headless PolarCraft runner.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! `polarcraft list` shows the built-in levels; `polarcraft run waveplate --solve`
//! loads one, applies its solution, and reports the goal sensors.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use polarcraft_config::{CliArgs, Config, default_config_dir};
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "polarcraft", about = "Polarized light puzzle simulator", version)]
struct Cli {
    #[command(flatten)]
    overrides: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in levels.
    List,
    /// Load a level and report its goal sensors.
    Run {
        /// Built-in level name or path to a `.ron` level file.
        level: String,
        /// Place the level's solution before reporting.
        #[arg(long)]
        solve: bool,
        /// Print a JSON report including the full light snapshot.
        #[arg(long)]
        json: bool,
    },
    /// Write a level to a RON file.
    Export {
        /// Built-in level name or path to a `.ron` level file.
        level: String,
        /// Destination file.
        path: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config_dir = cli.overrides.config.clone().or_else(|| default_config_dir().ok());

    let mut config = match &config_dir {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&cli.overrides);

    let log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    polarcraft_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Command::List => commands::list(&mut stdout),
        Command::Run { level, solve, json } => {
            commands::run(&mut stdout, &config.simulation, &level, solve, json)
        }
        Command::Export { level, path } => commands::export(&mut stdout, &level, &path),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
