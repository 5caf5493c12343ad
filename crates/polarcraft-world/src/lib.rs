//! Sparse voxel world with polarized light propagation.
//!
//! [`World`] owns the block grid and the per-cell light state. Every edit
//! triggers a full recompute: packets are walked out of each emitter one cell
//! at a time, transformed by the optics in [`polarcraft_optics`], merged per
//! cell, and finally used to evaluate sensors. Consumers subscribe to
//! [`WorldEvent`]s and read state back through the query methods.

pub mod block;
pub mod events;
pub mod level;
pub mod light;
pub mod position;
mod propagation;
pub mod world;

pub use block::{BlockKind, BlockState, BlockType, LightInteraction, Rotation};
pub use events::{EventBuffer, ListenerId, WorldEvent, WorldEventKind};
pub use level::{BlockOverrides, BlockPlacement, Level, LevelGoal};
pub use light::{CellLight, LightState};
pub use position::{BlockPosition, PositionKeyError};
pub use propagation::PropagationStats;
pub use world::World;
