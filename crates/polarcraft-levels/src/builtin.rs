//! The tutorial levels.
//!
//! Every level sits on the ground plane at `y = 1` and fits inside a world of
//! half-extent 8.

use polarcraft_optics::{Direction, PolarizationAngle, RotationAmount};
use polarcraft_world::{BlockOverrides, BlockPlacement, BlockType, Level};

/// All built-in levels in teaching order.
pub fn builtin_levels() -> Vec<Level> {
    vec![
        first_light(),
        polarizer(),
        crossed_polarizers(),
        waveplate(),
        calcite_splitter(),
        mirror_corner(),
    ]
}

/// Looks up a built-in level by name (case-insensitive).
pub fn find_builtin(name: &str) -> Option<Level> {
    builtin_levels()
        .into_iter()
        .find(|level| level.name.eq_ignore_ascii_case(name))
}

fn emitter(x: i32, z: i32, facing: Direction, polarization: PolarizationAngle) -> BlockPlacement {
    BlockPlacement::new(x, 1, z, BlockType::Emitter)
        .with_state(BlockOverrides::facing(facing).with_polarization(polarization))
}

fn sensor(x: i32, z: i32, polarization: PolarizationAngle, required: u8) -> BlockPlacement {
    BlockPlacement::new(x, 1, z, BlockType::Sensor).with_state(
        BlockOverrides::default()
            .with_polarization(polarization)
            .with_required_intensity(required),
    )
}

fn polarizer_at(x: i32, z: i32, polarization: PolarizationAngle) -> BlockPlacement {
    BlockPlacement::new(x, 1, z, BlockType::Polarizer)
        .with_state(BlockOverrides::default().with_polarization(polarization))
}

fn first_light() -> Level {
    Level::new(
        "first_light",
        "Place an emitter facing east to light the sensor.",
    )
    .with_goal_sensor(sensor(3, 0, PolarizationAngle::Deg0, 8))
    .with_solution(emitter(-3, 0, Direction::East, PolarizationAngle::Deg0))
}

fn polarizer() -> Level {
    Level::new(
        "polarizer",
        "The sensor only accepts 45° light. Filter the beam.",
    )
    .with_block(emitter(-3, 0, Direction::East, PolarizationAngle::Deg0))
    .with_goal_sensor(sensor(3, 0, PolarizationAngle::Deg45, 5))
    .with_solution(polarizer_at(0, 0, PolarizationAngle::Deg45))
}

fn crossed_polarizers() -> Level {
    Level::new(
        "crossed_polarizers",
        "Crossed polarizers block everything. A third one in between does not.",
    )
    .with_block(emitter(-4, 0, Direction::East, PolarizationAngle::Deg0))
    .with_block(polarizer_at(-2, 0, PolarizationAngle::Deg0))
    .with_block(polarizer_at(2, 0, PolarizationAngle::Deg90))
    .with_goal_sensor(sensor(4, 0, PolarizationAngle::Deg90, 3))
    .with_solution(polarizer_at(0, 0, PolarizationAngle::Deg45))
}

fn waveplate() -> Level {
    Level::new(
        "waveplate",
        "Turn the polarization without losing any light.",
    )
    .with_block(emitter(-3, 0, Direction::East, PolarizationAngle::Deg0))
    .with_goal_sensor(sensor(3, 0, PolarizationAngle::Deg90, 15))
    .with_solution(
        BlockPlacement::new(0, 1, 0, BlockType::Rotator)
            .with_state(BlockOverrides::default().with_rotation_amount(RotationAmount::Deg90)),
    )
}

fn calcite_splitter() -> Level {
    Level::new(
        "calcite_splitter",
        "Split diagonal light into its 0° and 90° parts to feed both sensors.",
    )
    .with_block(emitter(-3, 0, Direction::East, PolarizationAngle::Deg45))
    .with_goal_sensor(sensor(3, 0, PolarizationAngle::Deg0, 8))
    .with_goal_sensor(sensor(0, -3, PolarizationAngle::Deg90, 7))
    .with_solution(
        BlockPlacement::new(0, 1, 0, BlockType::Splitter)
            .with_state(BlockOverrides::facing(Direction::North)),
    )
}

fn mirror_corner() -> Level {
    Level::new("mirror_corner", "Bend the beam around the corner.")
        .with_block(emitter(-3, 0, Direction::East, PolarizationAngle::Deg0))
        .with_goal_sensor(sensor(0, 3, PolarizationAngle::Deg0, 15))
        .with_solution(
            BlockPlacement::new(0, 1, 0, BlockType::Mirror)
                .with_state(BlockOverrides::facing(Direction::South)),
        )
}
