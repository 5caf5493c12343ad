use criterion::{Criterion, black_box, criterion_group, criterion_main};
use polarcraft_config::SimulationConfig;
use polarcraft_optics::{Direction, PolarizationAngle, RotationAmount};
use polarcraft_world::{BlockPosition, BlockState, World};

fn config() -> SimulationConfig {
    SimulationConfig {
        world_size: 32,
        max_depth: 100,
        ground_plane: true,
    }
}

fn bench_single_beam(c: &mut Criterion) {
    let mut world = World::from_config(&config());
    world.clear();
    world.set_block(
        BlockPosition::new(-32, 1, 0),
        Some(BlockState::emitter(Direction::East, PolarizationAngle::Deg0)),
    );
    c.bench_function("propagate_single_beam", |bencher| {
        bencher.iter(|| black_box(world.update_light_propagation()))
    });
}

fn bench_emitter_wall(c: &mut Criterion) {
    let mut world = World::from_config(&config());
    world.clear();
    for z in -16..16 {
        world.set_block(
            BlockPosition::new(-20, 1, z),
            Some(BlockState::emitter(Direction::East, PolarizationAngle::Deg45)),
        );
        let element = match z.rem_euclid(3) {
            0 => BlockState::polarizer(PolarizationAngle::Deg0),
            1 => BlockState::rotator(RotationAmount::Deg45),
            _ => BlockState::splitter(Direction::North),
        };
        world.set_block(BlockPosition::new(0, 1, z), Some(element));
    }
    c.bench_function("propagate_emitter_wall", |bencher| {
        bencher.iter(|| black_box(world.update_light_propagation()))
    });
}

fn bench_mirror_loop(c: &mut Criterion) {
    let mut world = World::from_config(&config());
    world.set_block(
        BlockPosition::new(1, 1, 0),
        Some(BlockState::splitter(Direction::East)),
    );
    world.set_block(BlockPosition::new(3, 1, 0), Some(BlockState::mirror(Direction::South)));
    world.set_block(BlockPosition::new(3, 1, 2), Some(BlockState::mirror(Direction::West)));
    world.set_block(BlockPosition::new(1, 1, 2), Some(BlockState::mirror(Direction::North)));
    world.set_block(
        BlockPosition::new(1, 1, -2),
        Some(BlockState::emitter(Direction::South, PolarizationAngle::Deg90)),
    );
    c.bench_function("propagate_mirror_loop", |bencher| {
        bencher.iter(|| black_box(world.update_light_propagation()))
    });
}

criterion_group!(
    benches,
    bench_single_beam,
    bench_emitter_wall,
    bench_mirror_loop
);
criterion_main!(benches);
