//! Integer grid coordinates and their `"x,y,z"` string key form.

use std::num::ParseIntError;
use std::str::FromStr;

use glam::IVec3;
use polarcraft_optics::Direction;
use serde::{Deserialize, Serialize};

/// A cell in the block grid.
///
/// Identity is exact integer equality on `(x, y, z)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// Errors from parsing a `"x,y,z"` key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionKeyError {
    /// The key did not have exactly three comma-separated fields.
    #[error("expected 3 comma-separated fields, found {0}")]
    FieldCount(usize),

    /// A field was not a valid integer.
    #[error("invalid coordinate {field:?}: {source}")]
    InvalidCoordinate {
        field: String,
        #[source]
        source: ParseIntError,
    },
}

impl BlockPosition {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The neighboring cell one step along `direction`. Saturates at the
    /// `i32` range.
    pub fn offset(self, direction: Direction) -> Self {
        let step = direction.vector();
        Self::new(
            self.x.saturating_add(step.x),
            self.y.saturating_add(step.y),
            self.z.saturating_add(step.z),
        )
    }

    pub fn as_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }

    /// Returns `true` if no coordinate exceeds `half_extent` in magnitude.
    pub fn within(self, half_extent: i32) -> bool {
        let Ok(limit) = u32::try_from(half_extent) else {
            return false;
        };
        [self.x, self.y, self.z]
            .into_iter()
            .all(|c| c.unsigned_abs() <= limit)
    }

    /// String key used by map-based callers, e.g. `"3,-1,0"`.
    pub fn key(self) -> String {
        self.to_string()
    }
}

impl From<IVec3> for BlockPosition {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<(i32, i32, i32)> for BlockPosition {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl std::fmt::Display for BlockPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for BlockPosition {
    type Err = PositionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').collect();
        if fields.len() != 3 {
            return Err(PositionKeyError::FieldCount(fields.len()));
        }
        let parse = |field: &str| {
            field
                .trim()
                .parse::<i32>()
                .map_err(|source| PositionKeyError::InvalidCoordinate {
                    field: field.to_string(),
                    source,
                })
        };
        Ok(Self::new(
            parse(fields[0])?,
            parse(fields[1])?,
            parse(fields[2])?,
        ))
    }
}
