use crate::Coordinate;
use derive_more::{AsRef, Deref, Into};
use nalgebra::Matrix3;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The number of proper rotations of the cube.
pub const ROTATION_COUNT: usize = 24;

/// A rotation that maps the axes of one scanner frame onto the axes of another.
///
/// Scanners are only ever rotated by multiples of 90 degrees around their axes, so
/// the rotation is stored exactly as a signed permutation matrix with determinant `+1`.
/// Reflections are not rotations and never appear in [`Rotation::all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRef, Deref, Into)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Rotation(Matrix3<i32>);

impl Rotation {
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Retrieves all 24 rotations in a fixed order.
    ///
    /// The table is built from six facings (which reference axis the local `+x` axis points along)
    /// times four quarter turns about local `x`. The rotation at index `4 * facing + spin` is
    /// `facing * spin`, so index `0` is always the identity.
    pub fn all() -> [Self; ROTATION_COUNT] {
        let spin = quarter_turn_about_x();
        let mut rotations = [Self::identity(); ROTATION_COUNT];
        for (facing_ix, facing) in facings().iter().enumerate() {
            let mut rotation = *facing;
            for spin_ix in 0..4 {
                rotations[4 * facing_ix + spin_ix] = Self(rotation);
                rotation *= spin;
            }
        }
        rotations
    }

    /// Builds a rotation from a matrix, rejecting anything that is not one of the 24.
    pub fn from_matrix(matrix: Matrix3<i32>) -> Option<Self> {
        let candidate = Self(matrix);
        Self::all().contains(&candidate).then(|| candidate)
    }

    /// Looks up the position of this rotation in [`Rotation::all`].
    pub fn index(&self) -> Option<usize> {
        Self::all().iter().position(|r| r == self)
    }

    pub fn matrix(&self) -> Matrix3<i32> {
        self.0
    }

    pub fn apply(&self, coordinate: Coordinate) -> Coordinate {
        Coordinate(self.0 * coordinate.0)
    }

    /// Rotates a beacon sequence, preserving the position of each beacon in the sequence.
    pub fn apply_all(&self, coordinates: &[Coordinate]) -> Vec<Coordinate> {
        coordinates.iter().map(|&c| self.apply(c)).collect()
    }

    /// The rotation that applies `other` first and then `self`.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Inverts the rotation, which is just the transpose for an orthogonal matrix.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Computed exactly in integers; always `1` for members of [`Rotation::all`].
    pub fn determinant(&self) -> i32 {
        let m = &self.0;
        m.m11 * (m.m22 * m.m33 - m.m23 * m.m32) - m.m12 * (m.m21 * m.m33 - m.m23 * m.m31)
            + m.m13 * (m.m21 * m.m32 - m.m22 * m.m31)
    }
}

/// Produces the rotated image of a beacon sequence under each of the 24 rotations.
///
/// The output has [`ROTATION_COUNT`] sequences, each the same length as the input.
pub fn orientations(coordinates: &[Coordinate]) -> Vec<Vec<Coordinate>> {
    Rotation::all()
        .iter()
        .map(|rotation| rotation.apply_all(coordinates))
        .collect()
}

#[rustfmt::skip]
fn facings() -> [Matrix3<i32>; 6] {
    [
        // +x
        Matrix3::new( 1,  0,  0,
                      0,  1,  0,
                      0,  0,  1),
        // -x
        Matrix3::new(-1,  0,  0,
                      0, -1,  0,
                      0,  0,  1),
        // +y
        Matrix3::new( 0, -1,  0,
                      1,  0,  0,
                      0,  0,  1),
        // -y
        Matrix3::new( 0,  1,  0,
                     -1,  0,  0,
                      0,  0,  1),
        // +z
        Matrix3::new( 0,  0, -1,
                      0,  1,  0,
                      1,  0,  0),
        // -z
        Matrix3::new( 0,  0,  1,
                      0,  1,  0,
                     -1,  0,  0),
    ]
}

#[rustfmt::skip]
fn quarter_turn_about_x() -> Matrix3<i32> {
    Matrix3::new(1,  0,  0,
                 0,  0, -1,
                 0,  1,  0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn twenty_four_distinct() {
        let rotations = Rotation::all();
        let distinct: HashSet<_> = rotations.iter().collect();
        assert_eq!(distinct.len(), ROTATION_COUNT);
        assert_eq!(rotations[0], Rotation::identity());
    }

    #[test]
    fn no_reflections() {
        for rotation in Rotation::all() {
            assert_eq!(rotation.determinant(), 1, "{:?}", rotation);
            assert_eq!(
                rotation.matrix() * rotation.matrix().transpose(),
                Matrix3::identity()
            );
        }
    }

    #[test]
    fn closed_under_composition() {
        let rotations = Rotation::all();
        for a in &rotations {
            for b in &rotations {
                assert!(rotations.contains(&a.compose(b)));
            }
            assert!(rotations.contains(&a.inverse()));
            assert_eq!(a.compose(&a.inverse()), Rotation::identity());
        }
    }

    #[test]
    fn reflection_has_no_index() {
        let mirror = Rotation(Matrix3::new(1, 0, 0, 0, 1, 0, 0, 0, -1));
        assert_eq!(mirror.index(), None);
    }

    #[test]
    fn reflection_rejected() {
        let mirror = Matrix3::new(-1, 0, 0, 0, 1, 0, 0, 0, 1);
        assert!(Rotation::from_matrix(mirror).is_none());
        let quarter = Rotation::all()[1].matrix();
        assert_eq!(Rotation::from_matrix(quarter), Some(Rotation::all()[1]));
    }

    #[test]
    fn index_roundtrip() {
        for (ix, rotation) in Rotation::all().iter().enumerate() {
            assert_eq!(rotation.index(), Some(ix));
        }
    }

    #[test]
    fn orientation_preserves_order() {
        let beacons = [Coordinate::new(1, 2, 3), Coordinate::new(-4, 5, -6)];
        let all = orientations(&beacons);
        assert_eq!(all.len(), ROTATION_COUNT);
        for (rotation, oriented) in Rotation::all().iter().zip(&all) {
            assert_eq!(oriented.len(), beacons.len());
            for (&original, &rotated) in beacons.iter().zip(oriented) {
                assert_eq!(rotation.apply(original), rotated);
            }
        }
        assert_eq!(all[0], beacons);
    }
}
