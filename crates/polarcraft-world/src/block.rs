//! Block kinds and per-cell block state.
//!
//! Air is never a [`BlockState`]: an empty cell is simply absent from the
//! grid. [`BlockType`] still names it so level data and factories can refer
//! to "no block".

use polarcraft_optics::{Direction, OpticalElement, PolarizationAngle, RotationAmount};
use serde::{Deserialize, Serialize};

/// Default intensity a freshly placed sensor asks for.
pub const DEFAULT_REQUIRED_INTENSITY: u8 = 8;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Block type tag, including air.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    Air,
    Solid,
    Emitter,
    Polarizer,
    Rotator,
    Splitter,
    Sensor,
    Mirror,
}

/// Quarter-turn orientation of a block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Adds 90° modulo 360°.
    pub fn next(self) -> Rotation {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// The cardinal direction this rotation points at (0° = north).
    pub fn facing(self) -> Direction {
        match self {
            Rotation::R0 => Direction::North,
            Rotation::R90 => Direction::East,
            Rotation::R180 => Direction::South,
            Rotation::R270 => Direction::West,
        }
    }
}

/// Wraps modulo 360 and rounds down to a quarter turn.
impl From<i32> for Rotation {
    fn from(degrees: i32) -> Self {
        match degrees.rem_euclid(360) / 90 {
            0 => Rotation::R0,
            1 => Rotation::R90,
            2 => Rotation::R180,
            _ => Rotation::R270,
        }
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        i32::from(rotation.degrees())
    }
}

/// Type-specific payload of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Solid,
    Emitter {
        polarization: PolarizationAngle,
    },
    Polarizer {
        polarization: PolarizationAngle,
    },
    Rotator {
        amount: RotationAmount,
    },
    Splitter,
    Sensor {
        polarization: PolarizationAngle,
        /// Threshold on the summed cell intensity, `0..=15`.
        required_intensity: u8,
        /// Derived by the world after each propagation pass.
        activated: bool,
    },
    Mirror,
}

/// What a block does to light entering its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightInteraction {
    /// Light continues unchanged.
    Transparent,
    /// Light stops here.
    Absorb,
    /// Light is transformed by an optical element.
    Element(OpticalElement),
}

/// A non-air block stored in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    #[serde(flatten)]
    pub kind: BlockKind,
    pub facing: Direction,
    pub rotation: Rotation,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl BlockState {
    /// Creates a block facing north with no rotation.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            facing: Direction::North,
            rotation: Rotation::R0,
        }
    }

    /// Factory with type-appropriate defaults. Air yields `None`.
    pub fn create(block_type: BlockType) -> Option<Self> {
        let kind = match block_type {
            BlockType::Air => return None,
            BlockType::Solid => BlockKind::Solid,
            BlockType::Emitter => BlockKind::Emitter {
                polarization: PolarizationAngle::Deg0,
            },
            BlockType::Polarizer => BlockKind::Polarizer {
                polarization: PolarizationAngle::Deg0,
            },
            BlockType::Rotator => BlockKind::Rotator {
                amount: RotationAmount::Deg45,
            },
            BlockType::Splitter => BlockKind::Splitter,
            BlockType::Sensor => BlockKind::Sensor {
                polarization: PolarizationAngle::Deg0,
                required_intensity: DEFAULT_REQUIRED_INTENSITY,
                activated: false,
            },
            BlockType::Mirror => BlockKind::Mirror,
        };
        Some(Self::new(kind))
    }

    pub fn solid() -> Self {
        Self::new(BlockKind::Solid)
    }

    pub fn emitter(facing: Direction, polarization: PolarizationAngle) -> Self {
        Self::new(BlockKind::Emitter { polarization }).with_facing(facing)
    }

    pub fn polarizer(polarization: PolarizationAngle) -> Self {
        Self::new(BlockKind::Polarizer { polarization })
    }

    pub fn rotator(amount: RotationAmount) -> Self {
        Self::new(BlockKind::Rotator { amount })
    }

    pub fn splitter(facing: Direction) -> Self {
        Self::new(BlockKind::Splitter).with_facing(facing)
    }

    pub fn mirror(facing: Direction) -> Self {
        Self::new(BlockKind::Mirror).with_facing(facing)
    }

    pub fn sensor(polarization: PolarizationAngle, required_intensity: u8) -> Self {
        Self::new(BlockKind::Sensor {
            polarization,
            required_intensity: required_intensity.min(polarcraft_optics::MAX_INTENSITY),
            activated: false,
        })
    }

    /// Sets `facing` and keeps `rotation` in step with it for cardinal
    /// directions (north = 0°, east = 90°, ...).
    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        if let Some(index) = Direction::CARDINAL.iter().position(|&d| d == facing) {
            self.rotation = Rotation::from(index as i32 * 90);
        }
        self
    }

    /// Sets `rotation` and turns `facing` to the matching cardinal direction.
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self.facing = rotation.facing();
        self
    }
}

// ---------------------------------------------------------------------------
// Queries and state machine
// ---------------------------------------------------------------------------

impl BlockState {
    pub fn block_type(&self) -> BlockType {
        match self.kind {
            BlockKind::Solid => BlockType::Solid,
            BlockKind::Emitter { .. } => BlockType::Emitter,
            BlockKind::Polarizer { .. } => BlockType::Polarizer,
            BlockKind::Rotator { .. } => BlockType::Rotator,
            BlockKind::Splitter => BlockType::Splitter,
            BlockKind::Sensor { .. } => BlockType::Sensor,
            BlockKind::Mirror => BlockType::Mirror,
        }
    }

    /// The polarization this block emits, filters to, or requires.
    pub fn polarization(&self) -> Option<PolarizationAngle> {
        match self.kind {
            BlockKind::Emitter { polarization }
            | BlockKind::Polarizer { polarization }
            | BlockKind::Sensor { polarization, .. } => Some(polarization),
            _ => None,
        }
    }

    /// `Some(activated)` for sensors.
    pub fn is_activated(&self) -> Option<bool> {
        match self.kind {
            BlockKind::Sensor { activated, .. } => Some(activated),
            _ => None,
        }
    }

    /// Direction an emitter fires in.
    pub fn emission_direction(&self) -> Direction {
        self.facing
    }

    /// How light entering this cell is treated.
    ///
    /// Emitters act as obstacles for light arriving from elsewhere.
    pub fn interaction(&self) -> LightInteraction {
        match self.kind {
            BlockKind::Solid | BlockKind::Emitter { .. } => LightInteraction::Absorb,
            BlockKind::Sensor { .. } => LightInteraction::Transparent,
            BlockKind::Polarizer { polarization } => {
                LightInteraction::Element(OpticalElement::Polarizer { axis: polarization })
            }
            BlockKind::Rotator { amount } => {
                LightInteraction::Element(OpticalElement::Rotator { amount })
            }
            BlockKind::Splitter => LightInteraction::Element(OpticalElement::Splitter {
                facing: self.facing,
            }),
            BlockKind::Mirror => LightInteraction::Element(OpticalElement::Mirror {
                facing: self.facing,
            }),
        }
    }

    /// Advances the block's orientation by one step.
    ///
    /// - emitter, polarizer: polarization 0 → 45 → 90 → 135 → 0
    /// - rotator: 45 ↔ 90
    /// - splitter, sensor, mirror: rotation +90°, facing to the next cardinal
    /// - solid: nothing to rotate
    ///
    /// Returns `false` if the block has no orientation.
    pub fn rotate(&mut self) -> bool {
        match &mut self.kind {
            BlockKind::Emitter { polarization } | BlockKind::Polarizer { polarization } => {
                *polarization = polarization.next();
            }
            BlockKind::Rotator { amount } => {
                *amount = amount.toggled();
            }
            BlockKind::Splitter | BlockKind::Sensor { .. } | BlockKind::Mirror => {
                self.rotation = self.rotation.next();
                self.facing = self.facing.clockwise();
            }
            BlockKind::Solid => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_factory_is_none() {
        assert!(BlockState::create(BlockType::Air).is_none());
    }

    #[test]
    fn test_factory_defaults() {
        let sensor = BlockState::create(BlockType::Sensor).unwrap();
        assert_eq!(sensor.block_type(), BlockType::Sensor);
        assert_eq!(sensor.is_activated(), Some(false));
        assert_eq!(sensor.polarization(), Some(PolarizationAngle::Deg0));
        assert_eq!(sensor.facing, Direction::North);
        assert_eq!(sensor.rotation, Rotation::R0);

        let rotator = BlockState::create(BlockType::Rotator).unwrap();
        assert_eq!(
            rotator.kind,
            BlockKind::Rotator {
                amount: RotationAmount::Deg45
            }
        );
    }

    #[test]
    fn test_factory_covers_every_non_air_type() {
        for t in [
            BlockType::Solid,
            BlockType::Emitter,
            BlockType::Polarizer,
            BlockType::Rotator,
            BlockType::Splitter,
            BlockType::Sensor,
            BlockType::Mirror,
        ] {
            assert_eq!(BlockState::create(t).unwrap().block_type(), t);
        }
    }

    #[test]
    fn test_rotate_emitter_cycles_polarization() {
        let mut b = BlockState::emitter(Direction::East, PolarizationAngle::Deg135);
        assert!(b.rotate());
        assert_eq!(b.polarization(), Some(PolarizationAngle::Deg0));
        // Facing is untouched.
        assert_eq!(b.facing, Direction::East);
    }

    #[test]
    fn test_rotate_rotator_toggles() {
        let mut b = BlockState::rotator(RotationAmount::Deg45);
        b.rotate();
        assert_eq!(
            b.kind,
            BlockKind::Rotator {
                amount: RotationAmount::Deg90
            }
        );
        b.rotate();
        assert_eq!(
            b.kind,
            BlockKind::Rotator {
                amount: RotationAmount::Deg45
            }
        );
    }

    #[test]
    fn test_rotate_mirror_turns_facing_and_rotation() {
        let mut b = BlockState::mirror(Direction::North);
        let mut seen = Vec::new();
        for _ in 0..4 {
            b.rotate();
            seen.push((b.facing, b.rotation.degrees()));
        }
        assert_eq!(
            seen,
            vec![
                (Direction::East, 90),
                (Direction::South, 180),
                (Direction::West, 270),
                (Direction::North, 0),
            ]
        );
    }

    #[test]
    fn test_rotate_solid_is_noop() {
        let mut b = BlockState::solid();
        assert!(!b.rotate());
        assert_eq!(b, BlockState::solid());
    }

    #[test]
    fn test_with_facing_syncs_rotation() {
        assert_eq!(
            BlockState::splitter(Direction::West).rotation,
            Rotation::R270
        );
        assert_eq!(BlockState::splitter(Direction::Up).rotation, Rotation::R0);
    }

    #[test]
    fn test_with_rotation_syncs_facing() {
        for direction in Direction::CARDINAL {
            let block = BlockState::mirror(Direction::North)
                .with_rotation(BlockState::mirror(direction).rotation);
            assert_eq!(block.facing, direction);
        }
        let mirror = BlockState::mirror(Direction::North).with_rotation(Rotation::R90);
        assert_eq!(mirror.interaction(), BlockState::mirror(Direction::East).interaction());
    }

    #[test]
    fn test_interaction() {
        assert_eq!(
            BlockState::solid().interaction(),
            LightInteraction::Absorb
        );
        assert_eq!(
            BlockState::sensor(PolarizationAngle::Deg0, 1).interaction(),
            LightInteraction::Transparent
        );
        assert_eq!(
            BlockState::emitter(Direction::East, PolarizationAngle::Deg0).interaction(),
            LightInteraction::Absorb
        );
        assert_eq!(
            BlockState::mirror(Direction::South).interaction(),
            LightInteraction::Element(OpticalElement::Mirror {
                facing: Direction::South
            })
        );
    }

    #[test]
    fn test_sensor_threshold_clamped() {
        let s = BlockState::sensor(PolarizationAngle::Deg90, 40);
        assert!(matches!(
            s.kind,
            BlockKind::Sensor {
                required_intensity: 15,
                ..
            }
        ));
    }

    #[test]
    fn test_rotation_from_degrees() {
        assert_eq!(Rotation::from(450), Rotation::R90);
        assert_eq!(Rotation::from(-90), Rotation::R270);
    }
}
