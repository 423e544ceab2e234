use core::fmt;
use derive_more::{
    Add, AddAssign, AsMut, AsRef, Deref, DerefMut, From, Into, Neg, Sub, SubAssign,
};
use nalgebra::Vector3;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A position in some scanner frame, in integer units.
///
/// This is used both for beacons and for scanner positions. Which frame a `Coordinate` is
/// expressed in is not tracked by the type; the scanner that owns a sequence of coordinates
/// documents it instead (see [`crate::Scanner::resolved`]).
///
/// Equality is exact. Two beacons observed by different scanners are considered the same
/// beacon only when their coordinates are equal after alignment.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    AsMut,
    AsRef,
    Deref,
    DerefMut,
    From,
    Into,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Neg,
)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Coordinate(pub Vector3<i32>);

impl Coordinate {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// The origin of whichever frame the coordinate is used in.
    pub fn origin() -> Self {
        Self(Vector3::zeros())
    }

    /// The L1 distance `|dx| + |dy| + |dz|`, computed in `i64` so that it is exact for any pair.
    pub fn manhattan_distance(self, other: Self) -> i64 {
        self.iter()
            .zip(other.iter())
            .map(|(&a, &b)| (i64::from(a) - i64::from(b)).abs())
            .sum()
    }

    /// Adds component-wise, or returns `None` if any component overflows.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(other.x)?,
            self.y.checked_add(other.y)?,
            self.z.checked_add(other.z)?,
        ))
    }
}

impl From<[i32; 3]> for Coordinate {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}
