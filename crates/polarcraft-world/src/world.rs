//! The voxel world: sparse block grid, light state, and change notifications.

use polarcraft_config::SimulationConfig;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::block::{BlockKind, BlockState};
use crate::events::{ListenerId, Listeners, WorldEvent};
use crate::level::{BlockPlacement, Level};
use crate::light::{CellLight, LightState};
use crate::position::BlockPosition;
use crate::propagation::{self, PropagationStats};

/// Owns the block grid and the light state derived from it.
///
/// Cells absent from the grid are air. The light state is rebuilt from
/// scratch after every mutation. Writes are accepted at any coordinate;
/// only propagation respects `world_size`.
pub struct World {
    blocks: FxHashMap<BlockPosition, BlockState>,
    light_states: FxHashMap<BlockPosition, LightState>,
    /// Half-extent: propagation stops once any `|coord|` exceeds this.
    world_size: i32,
    max_depth: u32,
    ground_plane: bool,
    listeners: Listeners,
}

impl World {
    /// Creates an empty world (no ground plane laid yet).
    pub fn new(world_size: i32) -> Self {
        Self::from_config(&SimulationConfig {
            world_size,
            ..SimulationConfig::default()
        })
    }

    /// Creates an empty world using the simulation settings.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            blocks: FxHashMap::default(),
            light_states: FxHashMap::default(),
            world_size: config.world_size.max(0),
            max_depth: config.max_depth,
            ground_plane: config.ground_plane,
            listeners: Listeners::default(),
        }
    }

    pub fn world_size(&self) -> i32 {
        self.world_size
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    // -----------------------------------------------------------------------
    // Block queries
    // -----------------------------------------------------------------------

    /// Returns the block at `position`, or `None` for air.
    pub fn get_block(&self, position: BlockPosition) -> Option<&BlockState> {
        self.blocks.get(&position)
    }

    /// Iterates over every stored (non-air) block in arbitrary order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockPosition, &BlockState)> {
        self.blocks.iter().map(|(&position, block)| (position, block))
    }

    /// Every stored block, sorted by position.
    pub fn block_snapshot(&self) -> Vec<(BlockPosition, BlockState)> {
        let mut blocks: Vec<_> = self.blocks.iter().map(|(&p, &b)| (p, b)).collect();
        blocks.sort_by_key(|(position, _)| *position);
        blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    // -----------------------------------------------------------------------
    // Light queries
    // -----------------------------------------------------------------------

    /// Light recorded at `position` during the last pass.
    pub fn get_light_state(&self, position: BlockPosition) -> Option<&LightState> {
        self.light_states.get(&position)
    }

    /// Every lit cell in arbitrary order.
    pub fn light_states(&self) -> impl Iterator<Item = (BlockPosition, &LightState)> {
        self.light_states
            .iter()
            .map(|(&position, state)| (position, state))
    }

    /// Every lit cell, sorted by position.
    pub fn light_snapshot(&self) -> Vec<CellLight> {
        let mut cells: Vec<CellLight> = self
            .light_states
            .iter()
            .map(|(&position, state)| CellLight {
                position,
                packets: state.packets.clone(),
            })
            .collect();
        cells.sort_by_key(|cell| cell.position);
        cells
    }

    /// Summed packet intensity at `position`, clamped to 15. Dark cells give 0.
    pub fn total_light_intensity(&self, position: BlockPosition) -> u8 {
        self.light_states
            .get(&position)
            .map_or(0, LightState::total_intensity)
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Writes a cell. `None` (air) deletes the entry.
    ///
    /// Emits `BlockChanged`, then recomputes light.
    pub fn set_block(&mut self, position: BlockPosition, block: Option<BlockState>) {
        self.write_cell(position, block);
        self.update_light_propagation();
    }

    /// Same as `set_block(position, None)`.
    pub fn remove_block(&mut self, position: BlockPosition) {
        self.set_block(position, None);
    }

    /// Advances the orientation state machine of the block at `position`.
    ///
    /// Returns `false` (and does nothing) for air and for blocks without an
    /// orientation.
    pub fn rotate_block(&mut self, position: BlockPosition) -> bool {
        let Some(block) = self.blocks.get_mut(&position) else {
            return false;
        };
        if !block.rotate() {
            return false;
        }
        let block = *block;
        trace!(%position, ?block, "rotated block");
        self.emit(WorldEvent::BlockChanged {
            position,
            block: Some(block),
        });
        self.update_light_propagation();
        true
    }

    /// Empties the grid, lays the ground plane, and recomputes light.
    pub fn clear(&mut self) {
        self.reset_grid();
        self.emit(WorldEvent::WorldCleared);
        self.update_light_propagation();
    }

    /// Clears the world and applies a level's placements, propagating once.
    pub fn load_level(&mut self, level: &Level) -> PropagationStats {
        debug!(level = %level.name, blocks = level.blocks.len(), "loading level");
        self.reset_grid();
        self.emit(WorldEvent::WorldCleared);
        self.apply_placements(&level.blocks)
    }

    /// Applies several placements in order, then propagates once.
    pub fn apply_placements(&mut self, placements: &[BlockPlacement]) -> PropagationStats {
        for placement in placements {
            self.write_cell(placement.position(), placement.to_block_state());
        }
        self.update_light_propagation()
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    /// Registers a callback invoked synchronously for every [`WorldEvent`].
    pub fn add_listener(&mut self, listener: impl FnMut(&WorldEvent) + 'static) -> ListenerId {
        self.listeners.add(Box::new(listener))
    }

    /// Returns `false` if the id was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // -----------------------------------------------------------------------
    // Propagation
    // -----------------------------------------------------------------------

    /// Recomputes all light from scratch, re-evaluates sensors, and emits
    /// `SensorChanged` (per flip) followed by `LightUpdated`.
    pub fn update_light_propagation(&mut self) -> PropagationStats {
        let (light_states, mut stats) =
            propagation::propagate(&self.blocks, self.world_size, self.max_depth);
        self.light_states = light_states;

        let (changes, active) = self.evaluate_sensors();
        stats.active_sensors = active;

        debug!(
            emitters = stats.emitters,
            steps = stats.steps,
            depth_capped = stats.depth_capped,
            lit_cells = self.light_states.len(),
            active_sensors = stats.active_sensors,
            "light propagation complete"
        );

        for (position, activated) in changes {
            debug!(%position, activated, "sensor changed");
            self.emit(WorldEvent::SensorChanged {
                position,
                activated,
            });
        }
        if !self.listeners.is_empty() {
            let snapshot = self.light_snapshot();
            self.emit(WorldEvent::LightUpdated { snapshot });
        }
        stats
    }

    /// Updates every sensor's `activated` flag from the current light state.
    ///
    /// Returns the flips in position order and the number of active sensors.
    fn evaluate_sensors(&mut self) -> (Vec<(BlockPosition, bool)>, usize) {
        let mut changes = Vec::new();
        let mut active = 0;
        for (position, block) in self.blocks.iter_mut() {
            let BlockKind::Sensor {
                polarization,
                required_intensity,
                activated,
            } = &mut block.kind
            else {
                continue;
            };
            let now = self.light_states.get(position).is_some_and(|light| {
                light.intensity_sum() >= u32::from(*required_intensity)
                    && light.has_polarization(*polarization)
            });
            if now {
                active += 1;
            }
            if now != *activated {
                *activated = now;
                changes.push((*position, now));
            }
        }
        changes.sort_by_key(|(position, _)| *position);
        (changes, active)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn write_cell(&mut self, position: BlockPosition, block: Option<BlockState>) {
        match block {
            Some(block) => {
                self.blocks.insert(position, block);
            }
            None => {
                self.blocks.remove(&position);
            }
        }
        self.emit(WorldEvent::BlockChanged { position, block });
    }

    /// Drops all blocks and light, then lays a solid floor at `y = 0`.
    fn reset_grid(&mut self) {
        self.blocks.clear();
        self.light_states.clear();
        if self.ground_plane {
            let s = self.world_size;
            for x in -s..=s {
                for z in -s..=s {
                    self.blocks
                        .insert(BlockPosition::new(x, 0, z), BlockState::solid());
                }
            }
        }
    }

    fn emit(&mut self, event: WorldEvent) {
        self.listeners.emit(&event);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("blocks", &self.blocks.len())
            .field("lit_cells", &self.light_states.len())
            .field("world_size", &self.world_size)
            .field("max_depth", &self.max_depth)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::events::{EventBuffer, WorldEventKind};
    use polarcraft_optics::{Direction, PolarizationAngle};

    fn flat_world() -> World {
        World::from_config(&SimulationConfig {
            world_size: 8,
            max_depth: 100,
            ground_plane: false,
        })
    }

    fn p(x: i32, y: i32, z: i32) -> BlockPosition {
        BlockPosition::new(x, y, z)
    }

    #[test]
    fn test_get_block_empty_is_none() {
        let world = flat_world();
        assert!(world.get_block(p(0, 0, 0)).is_none());
        assert_eq!(world.total_light_intensity(p(0, 0, 0)), 0);
    }

    #[test]
    fn test_set_and_remove_block() {
        let mut world = flat_world();
        world.set_block(p(1, 2, 3), BlockState::create(BlockType::Mirror));
        assert_eq!(world.block_count(), 1);
        world.remove_block(p(1, 2, 3));
        assert!(world.get_block(p(1, 2, 3)).is_none());
        assert_eq!(world.block_count(), 0);
    }

    #[test]
    fn test_set_block_emits_block_changed_then_light() {
        let mut world = flat_world();
        let buffer = EventBuffer::new();
        world.add_listener(buffer.recorder());
        world.set_block(p(0, 1, 0), Some(BlockState::solid()));
        let kinds: Vec<_> = buffer.read().iter().map(WorldEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![WorldEventKind::BlockChanged, WorldEventKind::LightUpdated]
        );
    }

    #[test]
    fn test_rotate_missing_or_solid_is_noop() {
        let mut world = flat_world();
        let buffer = EventBuffer::new();
        world.set_block(p(0, 1, 0), Some(BlockState::solid()));
        world.add_listener(buffer.recorder());
        assert!(!world.rotate_block(p(0, 1, 0)));
        assert!(!world.rotate_block(p(5, 5, 5)));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_total_intensity_clamped() {
        let mut world = flat_world();
        // Two emitters converge on the same cell from opposite sides.
        world.set_block(
            p(-2, 1, 0),
            Some(BlockState::emitter(Direction::East, PolarizationAngle::Deg0)),
        );
        world.set_block(
            p(2, 1, 0),
            Some(BlockState::emitter(Direction::West, PolarizationAngle::Deg0)),
        );
        let state = world.get_light_state(p(0, 1, 0)).unwrap();
        assert_eq!(state.packets.len(), 2);
        assert_eq!(state.intensity_sum(), 30);
        assert_eq!(world.total_light_intensity(p(0, 1, 0)), 15);
    }

    #[test]
    fn test_clear_lays_ground_plane() {
        let mut world = World::from_config(&SimulationConfig {
            world_size: 2,
            max_depth: 100,
            ground_plane: true,
        });
        world.set_block(p(0, 3, 0), Some(BlockState::solid()));
        world.clear();
        assert_eq!(world.block_count(), 25);
        assert!(world.blocks().all(|(pos, b)| pos.y == 0 && *b == BlockState::solid()));
    }

    #[test]
    fn test_remove_listener_stops_delivery() {
        let mut world = flat_world();
        let buffer = EventBuffer::new();
        let id = world.add_listener(buffer.recorder());
        assert_eq!(world.listener_count(), 1);
        assert!(world.remove_listener(id));
        world.set_block(p(0, 1, 0), Some(BlockState::solid()));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_debug_output_summarizes() {
        let world = flat_world();
        let text = format!("{world:?}");
        assert!(text.contains("world_size: 8"));
    }
}
