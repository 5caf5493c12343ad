//! Light walk from every emitter through the block grid.
//!
//! Packets march one cell per step. The walk uses an explicit LIFO work
//! stack of pending rays instead of recursion, so a mirror loop runs into the
//! depth cap rather than the call stack.

use polarcraft_optics::LightPacket;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::block::{BlockKind, BlockState, LightInteraction};
use crate::light::LightState;
use crate::position::BlockPosition;

/// Counters from a single propagation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationStats {
    /// Emitters that fired.
    pub emitters: usize,
    /// Cells entered across all rays.
    pub steps: usize,
    /// Rays stopped by the depth cap.
    pub depth_capped: usize,
    /// Sensors active after evaluation.
    pub active_sensors: usize,
}

/// A pending ray: the packet sitting at `position`, about to step forward.
struct Ray {
    position: BlockPosition,
    packet: LightPacket,
    depth: u32,
}

/// Walks light from every emitter and returns the lit cells.
///
/// Emitters fire in position order so the result (including packet order
/// within a cell) is deterministic for a given grid. Emitters stored outside
/// the world bounds are counted but never fire.
pub(crate) fn propagate(
    blocks: &FxHashMap<BlockPosition, BlockState>,
    world_size: i32,
    max_depth: u32,
) -> (FxHashMap<BlockPosition, LightState>, PropagationStats) {
    let mut light: FxHashMap<BlockPosition, LightState> = FxHashMap::default();
    let mut stats = PropagationStats::default();

    let mut emitters: Vec<(BlockPosition, LightPacket)> = blocks
        .iter()
        .filter_map(|(&position, block)| match block.kind {
            BlockKind::Emitter { polarization } => Some((
                position,
                LightPacket::emitted(block.emission_direction(), polarization),
            )),
            _ => None,
        })
        .collect();
    emitters.sort_by_key(|(position, _)| *position);
    stats.emitters = emitters.len();

    let mut stack: Vec<Ray> = Vec::new();
    for (position, packet) in emitters {
        if !position.within(world_size) {
            continue;
        }
        stack.push(Ray {
            position,
            packet,
            depth: 0,
        });

        while let Some(ray) = stack.pop() {
            let next = ray.position.offset(ray.packet.direction);
            if !next.within(world_size) {
                continue;
            }
            if ray.depth >= max_depth {
                stats.depth_capped += 1;
                continue;
            }
            stats.steps += 1;
            light.entry(next).or_default().record(ray.packet);

            let depth = ray.depth + 1;
            let interaction = blocks
                .get(&next)
                .map_or(LightInteraction::Transparent, BlockState::interaction);
            match interaction {
                LightInteraction::Transparent => stack.push(Ray {
                    position: next,
                    packet: ray.packet,
                    depth,
                }),
                LightInteraction::Absorb => {}
                LightInteraction::Element(element) => {
                    // Reversed so the first output is walked first.
                    for packet in element.interact(ray.packet).into_iter().rev() {
                        if packet.is_extinguished() {
                            continue;
                        }
                        stack.push(Ray {
                            position: next,
                            packet,
                            depth,
                        });
                    }
                }
            }
        }
    }

    // Destructive interference can leave a cell with nothing in it.
    light.retain(|_, state| !state.is_empty());
    (light, stats)
}
