//! Direction primitives, polarization types, and the stateless optics used by
//! the light propagation engine.
//!
//! Everything here is pure value data: elements take a [`LightPacket`] and
//! return new packets, never mutating shared state.

pub mod direction;
pub mod physics;
pub mod polarization;

pub use direction::Direction;
pub use physics::{OpticalElement, combine, combine_into, mirror, polarizer, rotator, splitter};
pub use polarization::{LightPacket, MAX_INTENSITY, PolarizationAngle, RotationAmount};
