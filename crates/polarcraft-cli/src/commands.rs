//! Subcommand implementations. Output goes to the given writer.

use std::error::Error;
use std::io::Write;
use std::path::Path;

use polarcraft_config::SimulationConfig;
use polarcraft_levels::{
    apply_solution, builtin_levels, goal_status, is_solved, resolve_level, save_level_file,
};
use polarcraft_world::{BlockPosition, CellLight, PropagationStats, World};
use serde::Serialize;
use tracing::info;

pub type CommandResult = Result<(), Box<dyn Error>>;

/// JSON shape printed by `run --json`.
#[derive(Serialize)]
struct RunReport<'a> {
    level: &'a str,
    solved: bool,
    stats: PropagationStats,
    sensors: Vec<SensorReport>,
    light: Vec<CellLight>,
}

#[derive(Serialize)]
struct SensorReport {
    position: BlockPosition,
    activated: bool,
}

pub fn list(out: &mut impl Write) -> CommandResult {
    for level in builtin_levels() {
        writeln!(out, "{:<20} {}", level.name, level.description)?;
    }
    Ok(())
}

pub fn run(
    out: &mut impl Write,
    simulation: &SimulationConfig,
    name: &str,
    solve: bool,
    json: bool,
) -> CommandResult {
    let level = resolve_level(name)?;
    let mut world = World::from_config(simulation);
    let mut stats = world.load_level(&level);
    if solve {
        stats = apply_solution(&mut world, &level);
    }
    let solved = is_solved(&level, &world);
    info!(level = %level.name, solve, solved, "ran level");

    let sensors: Vec<SensorReport> = goal_status(&level, &world)
        .into_iter()
        .map(|(position, activated)| SensorReport {
            position,
            activated,
        })
        .collect();

    if json {
        let report = RunReport {
            level: &level.name,
            solved,
            stats,
            sensors,
            light: world.light_snapshot(),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "level: {}", level.name)?;
    if !level.description.is_empty() {
        writeln!(out, "  {}", level.description)?;
    }
    writeln!(
        out,
        "propagation: {} emitters, {} steps, {} capped",
        stats.emitters, stats.steps, stats.depth_capped
    )?;
    for sensor in &sensors {
        let state = if sensor.activated { "active" } else { "inactive" };
        writeln!(
            out,
            "sensor {} (intensity {}): {state}",
            sensor.position,
            world.total_light_intensity(sensor.position)
        )?;
    }
    writeln!(out, "goal: {}", if solved { "solved" } else { "unsolved" })?;
    Ok(())
}

pub fn export(out: &mut impl Write, name: &str, path: &Path) -> CommandResult {
    let level = resolve_level(name)?;
    save_level_file(&level, path)?;
    writeln!(out, "wrote {} to {}", level.name, path.display())?;
    Ok(())
}
