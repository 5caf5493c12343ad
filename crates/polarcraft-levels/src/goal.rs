//! Goal checking against a live world.

use polarcraft_world::{BlockPosition, BlockState, Level, PropagationStats, World};
use tracing::debug;

/// `true` when every goal sensor exists and is activated.
///
/// A level without goal sensors is never solved.
pub fn is_solved(level: &Level, world: &World) -> bool {
    !level.goal.sensors.is_empty() && goal_status(level, world).iter().all(|(_, lit)| *lit)
}

/// Activation of each goal sensor, in goal order. Missing or non-sensor
/// blocks count as inactive.
pub fn goal_status(level: &Level, world: &World) -> Vec<(BlockPosition, bool)> {
    level
        .goal
        .sensors
        .iter()
        .map(|&position| {
            let lit = world
                .get_block(position)
                .and_then(BlockState::is_activated)
                .unwrap_or(false);
            (position, lit)
        })
        .collect()
}

/// Places the level's solution blocks, then propagates once.
pub fn apply_solution(world: &mut World, level: &Level) -> PropagationStats {
    let stats = world.apply_placements(&level.solution);
    debug!(level = %level.name, placed = level.solution.len(), "applied solution");
    stats
}
