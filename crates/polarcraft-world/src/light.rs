//! Per-cell light aggregates.

use polarcraft_optics::{LightPacket, MAX_INTENSITY, PolarizationAngle, combine_into};
use serde::{Deserialize, Serialize};

use crate::position::BlockPosition;

/// All packets that entered a cell during the last propagation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    pub packets: Vec<LightPacket>,
}

impl LightState {
    /// Adds a packet, merging it with any packet of the same direction and
    /// polarization already in the cell.
    pub fn record(&mut self, packet: LightPacket) {
        combine_into(&mut self.packets, packet);
    }

    /// Unclamped sum of packet intensities.
    pub fn intensity_sum(&self) -> u32 {
        self.packets.iter().map(|p| u32::from(p.intensity)).sum()
    }

    /// Sum of packet intensities, clamped to [`MAX_INTENSITY`].
    pub fn total_intensity(&self) -> u8 {
        self.intensity_sum().min(u32::from(MAX_INTENSITY)) as u8
    }

    /// Returns `true` if any packet carries exactly `polarization`.
    pub fn has_polarization(&self, polarization: PolarizationAngle) -> bool {
        self.packets.iter().any(|p| p.polarization == polarization)
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }
}

/// One entry of a light snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellLight {
    pub position: BlockPosition,
    pub packets: Vec<LightPacket>,
}
