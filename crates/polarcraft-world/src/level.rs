//! Declarative puzzle layouts.
//!
//! A [`Level`] is plain data: a list of block placements, an optional
//! solution (the placements a player is expected to add), and goal metadata
//! naming the sensors that must light up. The world applies placements but
//! never enforces the goal.

use polarcraft_optics::{Direction, PolarizationAngle, RotationAmount};
use serde::{Deserialize, Serialize};

use crate::block::{BlockKind, BlockState, BlockType, Rotation};
use crate::position::BlockPosition;

/// A named puzzle scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub blocks: Vec<BlockPlacement>,
    #[serde(default)]
    pub solution: Vec<BlockPlacement>,
    #[serde(default)]
    pub goal: LevelGoal,
}

/// Win-condition metadata, checked by the UI layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGoal {
    /// Sensors that must all be activated.
    #[serde(default)]
    pub sensors: Vec<BlockPosition>,
}

/// One `{x, y, z, type, state?}` entry of a level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPlacement {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub block: BlockType,
    #[serde(default)]
    pub state: Option<BlockOverrides>,
}

/// Partial overrides on top of the factory defaults.
///
/// Fields that do not apply to the placed block type are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockOverrides {
    pub facing: Option<Direction>,
    pub rotation: Option<Rotation>,
    pub polarization: Option<PolarizationAngle>,
    pub rotation_amount: Option<RotationAmount>,
    pub required_intensity: Option<u8>,
}

impl Level {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            blocks: Vec::new(),
            solution: Vec::new(),
            goal: LevelGoal::default(),
        }
    }

    pub fn with_block(mut self, placement: BlockPlacement) -> Self {
        self.blocks.push(placement);
        self
    }

    pub fn with_solution(mut self, placement: BlockPlacement) -> Self {
        self.solution.push(placement);
        self
    }

    /// Adds a sensor placement and registers it as a goal.
    pub fn with_goal_sensor(mut self, placement: BlockPlacement) -> Self {
        self.goal.sensors.push(placement.position());
        self.blocks.push(placement);
        self
    }
}

impl BlockPlacement {
    pub fn new(x: i32, y: i32, z: i32, block: BlockType) -> Self {
        Self {
            x,
            y,
            z,
            block,
            state: None,
        }
    }

    pub fn with_state(mut self, state: BlockOverrides) -> Self {
        self.state = Some(state);
        self
    }

    pub fn position(&self) -> BlockPosition {
        BlockPosition::new(self.x, self.y, self.z)
    }

    /// Builds the block for this placement. Air yields `None`.
    pub fn to_block_state(&self) -> Option<BlockState> {
        let mut block = BlockState::create(self.block)?;
        if let Some(overrides) = &self.state {
            overrides.apply(&mut block);
        }
        Some(block)
    }
}

impl BlockOverrides {
    pub fn facing(facing: Direction) -> Self {
        Self {
            facing: Some(facing),
            ..Self::default()
        }
    }

    pub fn with_polarization(mut self, polarization: PolarizationAngle) -> Self {
        self.polarization = Some(polarization);
        self
    }

    pub fn with_rotation_amount(mut self, amount: RotationAmount) -> Self {
        self.rotation_amount = Some(amount);
        self
    }

    pub fn with_required_intensity(mut self, intensity: u8) -> Self {
        self.required_intensity = Some(intensity);
        self
    }

    /// Writes every applicable override into `block`.
    ///
    /// An explicit `rotation` wins over `facing` and turns the block to the
    /// matching cardinal direction.
    pub fn apply(&self, block: &mut BlockState) {
        if let Some(facing) = self.facing {
            *block = block.with_facing(facing);
        }
        if let Some(rotation) = self.rotation {
            *block = block.with_rotation(rotation);
        }
        match &mut block.kind {
            BlockKind::Emitter { polarization } | BlockKind::Polarizer { polarization } => {
                if let Some(p) = self.polarization {
                    *polarization = p;
                }
            }
            BlockKind::Rotator { amount } => {
                if let Some(a) = self.rotation_amount {
                    *amount = a;
                }
            }
            BlockKind::Sensor {
                polarization,
                required_intensity,
                ..
            } => {
                if let Some(p) = self.polarization {
                    *polarization = p;
                }
                if let Some(i) = self.required_intensity {
                    *required_intensity = i.min(polarcraft_optics::MAX_INTENSITY);
                }
            }
            BlockKind::Solid | BlockKind::Splitter | BlockKind::Mirror => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_placement_has_no_state() {
        assert!(BlockPlacement::new(0, 1, 0, BlockType::Air).to_block_state().is_none());
    }

    #[test]
    fn test_overrides_apply_to_matching_kind() {
        let placement = BlockPlacement::new(0, 1, 0, BlockType::Sensor).with_state(
            BlockOverrides::facing(Direction::West)
                .with_polarization(PolarizationAngle::Deg90)
                .with_required_intensity(3),
        );
        let block = placement.to_block_state().unwrap();
        assert_eq!(block.facing, Direction::West);
        assert_eq!(block.rotation, Rotation::R270);
        assert_eq!(
            block.kind,
            BlockKind::Sensor {
                polarization: PolarizationAngle::Deg90,
                required_intensity: 3,
                activated: false,
            }
        );
    }

    #[test]
    fn test_irrelevant_overrides_ignored() {
        let placement = BlockPlacement::new(0, 1, 0, BlockType::Mirror).with_state(
            BlockOverrides::facing(Direction::South)
                .with_polarization(PolarizationAngle::Deg45)
                .with_rotation_amount(RotationAmount::Deg90),
        );
        let block = placement.to_block_state().unwrap();
        assert_eq!(block, BlockState::mirror(Direction::South));
    }

    #[test]
    fn test_explicit_rotation_wins() {
        let overrides = BlockOverrides {
            facing: Some(Direction::East),
            rotation: Some(Rotation::R180),
            ..BlockOverrides::default()
        };
        let mut block = BlockState::splitter(Direction::North);
        overrides.apply(&mut block);
        assert_eq!(block.facing, Direction::South);
        assert_eq!(block.rotation, Rotation::R180);
    }

    #[test]
    fn test_rotation_override_steers_emitter() {
        let placement = BlockPlacement::new(0, 1, 0, BlockType::Emitter).with_state(BlockOverrides {
            rotation: Some(Rotation::R270),
            ..BlockOverrides::default()
        });
        let block = placement.to_block_state().unwrap();
        assert_eq!(block.facing, Direction::West);
        assert_eq!(block.emission_direction(), Direction::West);
    }

    #[test]
    fn test_goal_sensor_registers_position() {
        let level = Level::new("t", "").with_goal_sensor(BlockPlacement::new(4, 1, 0, BlockType::Sensor));
        assert_eq!(level.goal.sensors, vec![BlockPosition::new(4, 1, 0)]);
        assert_eq!(level.blocks.len(), 1);
    }

    #[test]
    fn test_level_json_shape() {
        let level = Level::new("demo", "d").with_block(
            BlockPlacement::new(0, 1, 0, BlockType::Emitter)
                .with_state(BlockOverrides::facing(Direction::East)),
        );
        let json = serde_json::to_string(&level).unwrap();
        assert!(json.contains("\"block\":\"emitter\""));
        assert!(json.contains("\"facing\":\"east\""));
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(back, level);
    }
}
