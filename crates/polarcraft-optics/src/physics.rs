//! Optical element transforms on light packets.
//!
//! A simplified, non-complex take on Jones calculus: polarization is one of
//! four linear axes, intensity is a 4-bit integer, and every element is an
//! ideal (lossless except where the physics says otherwise) component.
//!
//! | Element   | Behavior                                                    |
//! |-----------|-------------------------------------------------------------|
//! | Polarizer | Malus's law, re-aligns to the transmission axis             |
//! | Rotator   | Adds 45° or 90° to the polarization, lossless               |
//! | Splitter  | Calcite double refraction into 0° and 90° rays              |
//! | Mirror    | 45° reflector, preserves intensity and polarization         |

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::polarization::{
    LightPacket, MAX_INTENSITY, PolarizationAngle, RotationAmount, scale_intensity,
};

/// Polarization label carried by a splitter's ordinary ray.
pub const ORDINARY_AXIS: PolarizationAngle = PolarizationAngle::Deg0;
/// Polarization label carried by a splitter's extraordinary ray.
pub const EXTRAORDINARY_AXIS: PolarizationAngle = PolarizationAngle::Deg90;

/// An element that transforms light passing through its cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpticalElement {
    Polarizer { axis: PolarizationAngle },
    Rotator { amount: RotationAmount },
    Splitter { facing: Direction },
    Mirror { facing: Direction },
}

impl OpticalElement {
    /// Applies this element to `packet` and returns the outgoing packets.
    ///
    /// The result may contain zero-intensity packets (a splitter always
    /// yields two); callers drop those before propagating further.
    pub fn interact(&self, packet: LightPacket) -> Vec<LightPacket> {
        match *self {
            OpticalElement::Polarizer { axis } => polarizer(packet, axis).into_iter().collect(),
            OpticalElement::Rotator { amount } => vec![rotator(packet, amount)],
            OpticalElement::Splitter { facing } => splitter(packet, facing).to_vec(),
            OpticalElement::Mirror { facing } => mirror(packet, facing).into_iter().collect(),
        }
    }
}

/// `cos²` of an angle in degrees.
fn cos_squared(degrees: u16) -> f64 {
    f64::from(degrees).to_radians().cos().powi(2)
}

/// Ideal linear polarizer (Malus's law: `I = I₀·cos²Δ`).
///
/// Returns `None` when the transmitted intensity rounds to zero.
pub fn polarizer(packet: LightPacket, axis: PolarizationAngle) -> Option<LightPacket> {
    let delta = packet.polarization.difference(axis);
    let intensity = match delta {
        0 => packet.intensity,
        90 => 0,
        _ => scale_intensity(packet.intensity, cos_squared(delta)),
    };
    (intensity > 0).then(|| packet.with_intensity(intensity).with_polarization(axis))
}

/// Ideal waveplate: rotates the polarization, never attenuates.
pub fn rotator(packet: LightPacket, amount: RotationAmount) -> LightPacket {
    packet.with_polarization(packet.polarization.rotated(i32::from(amount.degrees())))
}

/// Birefringent splitter.
///
/// Returns `[ordinary, extraordinary]`. The ordinary ray keeps the incoming
/// direction and carries [`ORDINARY_AXIS`]; the extraordinary ray is
/// deflected toward the splitter's facing (or the next clockwise direction
/// when the facing lies on the ray's own axis) and carries
/// [`EXTRAORDINARY_AXIS`]. The two intensities always sum to the input.
pub fn splitter(packet: LightPacket, facing: Direction) -> [LightPacket; 2] {
    let theta = packet.polarization.difference(ORDINARY_AXIS);
    let ordinary_intensity = match theta {
        0 => packet.intensity,
        90 => 0,
        _ => scale_intensity(packet.intensity, cos_squared(theta)),
    };
    let extraordinary_intensity = packet.intensity.saturating_sub(ordinary_intensity);

    let ordinary = packet
        .with_intensity(ordinary_intensity)
        .with_polarization(ORDINARY_AXIS);
    let extraordinary = packet
        .with_direction(deflection(packet.direction, facing))
        .with_intensity(extraordinary_intensity)
        .with_polarization(EXTRAORDINARY_AXIS);

    [ordinary, extraordinary]
}

fn deflection(direction: Direction, facing: Direction) -> Direction {
    if facing.is_parallel(direction) {
        facing.clockwise()
    } else {
        facing
    }
}

/// 45° mirror.
///
/// The mirror surface normal is `facing + facing.clockwise()`, so a ray
/// travelling against `facing` is turned toward `facing.clockwise()` and
/// vice versa. Rays parallel to the mirror plane return `None`.
pub fn mirror(packet: LightPacket, facing: Direction) -> Option<LightPacket> {
    let normal = facing.vector() + facing.clockwise().vector();
    let d = packet.direction.vector();
    let k = d.dot(normal);
    if k == 0 {
        return None;
    }
    // normal·normal == 2, so 2k·n/(n·n) reduces to k·n.
    let reflected = Direction::from_vector(d - normal * k)?;
    Some(packet.with_direction(reflected))
}

/// Records `packet` into a cell's packet list, merging with an existing
/// packet of the same direction and polarization.
///
/// Same-phase packets add linearly (clamped to [`MAX_INTENSITY`]). Opposite
/// phases cancel: the difference survives with the stronger packet's phase,
/// and a zero result removes the entry.
pub fn combine_into(packets: &mut Vec<LightPacket>, packet: LightPacket) {
    if packet.is_extinguished() {
        return;
    }
    let slot = packets
        .iter()
        .position(|p| p.direction == packet.direction && p.polarization == packet.polarization);
    let Some(index) = slot else {
        packets.push(packet);
        return;
    };

    match interfere(packets[index], packet) {
        Some(merged) => packets[index] = merged,
        None => {
            packets.remove(index);
        }
    }
}

/// Merges a whole packet list. Idempotent on its own output.
pub fn combine(packets: &[LightPacket]) -> Vec<LightPacket> {
    let mut out = Vec::with_capacity(packets.len());
    for &packet in packets {
        combine_into(&mut out, packet);
    }
    out
}

fn interfere(a: LightPacket, b: LightPacket) -> Option<LightPacket> {
    if a.phase.signum() == b.phase.signum() {
        let sum = a.intensity.saturating_add(b.intensity).min(MAX_INTENSITY);
        return Some(a.with_intensity(sum));
    }
    let (strong, weak) = if a.intensity >= b.intensity { (a, b) } else { (b, a) };
    let remaining = strong.intensity - weak.intensity;
    (remaining > 0).then(|| strong.with_intensity(remaining))
}
