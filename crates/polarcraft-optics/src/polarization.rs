//! Discrete polarization angles and the light packet value type.
//!
//! Angles live on a 4-element ring `{0°, 45°, 90°, 135°}` that wraps at 180°
//! (a linear polarization at 180° is the same as at 0°). Intensity is an
//! integer in `0..=15`.

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Maximum packet intensity. Emitters start here.
pub const MAX_INTENSITY: u8 = 15;

/// Linear polarization angle, snapped to 45° steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum PolarizationAngle {
    #[default]
    Deg0,
    Deg45,
    Deg90,
    Deg135,
}

impl PolarizationAngle {
    pub const ALL: [PolarizationAngle; 4] = [
        PolarizationAngle::Deg0,
        PolarizationAngle::Deg45,
        PolarizationAngle::Deg90,
        PolarizationAngle::Deg135,
    ];

    /// Angle in degrees (0, 45, 90 or 135).
    pub const fn degrees(self) -> u16 {
        match self {
            PolarizationAngle::Deg0 => 0,
            PolarizationAngle::Deg45 => 45,
            PolarizationAngle::Deg90 => 90,
            PolarizationAngle::Deg135 => 135,
        }
    }

    /// Wraps `degrees` modulo 180 and snaps to the nearest 45° step.
    pub fn from_degrees(degrees: i32) -> PolarizationAngle {
        let wrapped = degrees.rem_euclid(180);
        // Nearest multiple of 45, where 180 folds back to 0.
        match ((wrapped + 22) / 45) % 4 {
            0 => PolarizationAngle::Deg0,
            1 => PolarizationAngle::Deg45,
            2 => PolarizationAngle::Deg90,
            _ => PolarizationAngle::Deg135,
        }
    }

    /// Cycles 0 → 45 → 90 → 135 → 0.
    pub fn next(self) -> PolarizationAngle {
        self.rotated(45)
    }

    /// Adds `degrees` and wraps at 180°.
    pub fn rotated(self, degrees: i32) -> PolarizationAngle {
        PolarizationAngle::from_degrees(i32::from(self.degrees()) + degrees)
    }

    /// Smallest angle between two polarization axes: 0, 45 or 90 degrees.
    pub fn difference(self, other: PolarizationAngle) -> u16 {
        let d = self.degrees().abs_diff(other.degrees());
        d.min(180 - d)
    }

    /// The perpendicular axis.
    pub fn orthogonal(self) -> PolarizationAngle {
        self.rotated(90)
    }
}

impl From<i32> for PolarizationAngle {
    fn from(degrees: i32) -> Self {
        PolarizationAngle::from_degrees(degrees)
    }
}

impl From<PolarizationAngle> for i32 {
    fn from(angle: PolarizationAngle) -> Self {
        i32::from(angle.degrees())
    }
}

impl std::fmt::Display for PolarizationAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Rotation added by a waveplate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum RotationAmount {
    #[default]
    Deg45,
    Deg90,
}

impl RotationAmount {
    pub const fn degrees(self) -> u16 {
        match self {
            RotationAmount::Deg45 => 45,
            RotationAmount::Deg90 => 90,
        }
    }

    /// 45 ↔ 90.
    pub fn toggled(self) -> RotationAmount {
        match self {
            RotationAmount::Deg45 => RotationAmount::Deg90,
            RotationAmount::Deg90 => RotationAmount::Deg45,
        }
    }
}

/// Anything at or above 68° is treated as a half-wave (90°) plate.
impl From<i32> for RotationAmount {
    fn from(degrees: i32) -> Self {
        if degrees.rem_euclid(180) >= 68 {
            RotationAmount::Deg90
        } else {
            RotationAmount::Deg45
        }
    }
}

impl From<RotationAmount> for i32 {
    fn from(amount: RotationAmount) -> Self {
        i32::from(amount.degrees())
    }
}

/// A single discrete unit of propagating light.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LightPacket {
    pub direction: Direction,
    /// `0..=MAX_INTENSITY`; zero means extinguished.
    pub intensity: u8,
    pub polarization: PolarizationAngle,
    /// Coherence sign marker, `+1` or `-1`.
    pub phase: i8,
}

impl LightPacket {
    /// Creates an in-phase packet. Intensity is clamped to [`MAX_INTENSITY`].
    pub fn new(direction: Direction, intensity: u8, polarization: PolarizationAngle) -> Self {
        Self {
            direction,
            intensity: intensity.min(MAX_INTENSITY),
            polarization,
            phase: 1,
        }
    }

    /// A full-intensity packet as produced by an emitter.
    pub fn emitted(direction: Direction, polarization: PolarizationAngle) -> Self {
        Self::new(direction, MAX_INTENSITY, polarization)
    }

    pub fn with_direction(self, direction: Direction) -> Self {
        Self { direction, ..self }
    }

    /// Clamps to [`MAX_INTENSITY`].
    pub fn with_intensity(self, intensity: u8) -> Self {
        Self {
            intensity: intensity.min(MAX_INTENSITY),
            ..self
        }
    }

    pub fn with_polarization(self, polarization: PolarizationAngle) -> Self {
        Self {
            polarization,
            ..self
        }
    }

    pub fn is_extinguished(&self) -> bool {
        self.intensity == 0
    }
}

/// Scales an intensity by a real factor, rounding to the discrete scale.
///
/// NaN and negative results collapse to 0.
pub(crate) fn scale_intensity(intensity: u8, factor: f64) -> u8 {
    let scaled = (f64::from(intensity) * factor).round();
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        scaled.min(f64::from(MAX_INTENSITY)) as u8
    }
}
