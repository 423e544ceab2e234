//! # Beacon Core
//!
//! This library provides the common types used to align beacon scanners into a single map.
//! The alignment engine in `beacon-align` and the sandbox tooling both depend on it, so it is kept
//! small: integer coordinates, the rotation group of the cube, scanner records, and the report parser.
//!
//! ## Frames
//!
//! Every scanner observes beacons in its own frame. Two frames differ by one of the 24
//! [proper rotations of the cube](Rotation::all) followed by an integer translation. One scanner
//! is designated the reference and its frame is the global frame.
//!
//! - `R` the reference scanner
//! - `S` another scanner whose orientation is unknown
//! - `b` a beacon observed by both
//!
//! ```text
//!          y
//!          |     b
//!          |    / \
//!          |   /   \
//!          R--/-----\------ x
//!            /       S
//!           /       /
//!          z       (S sees b in its own, rotated axes)
//! ```
//!
//! Once the rotation of `S` is known, every beacon of `S` is re-expressed with the reference
//! orientation while keeping `S` at its origin. This is the scanner's resolved frame. The offset of
//! `S` relative to the scanner it was aligned against is the translation stored on the alignment
//! edge, and summing those offsets along the path from `R` yields the absolute position of `S`.
//!
//! Coordinates are exact integers. There is no noise model; two beacons are the same beacon if and
//! only if their coordinates are equal.

mod coordinate;
mod error;
mod once;
mod parse;
mod rotation;
mod scanner;

pub use coordinate::*;
pub use error::*;
pub use nalgebra;
pub use once::*;
pub use parse::*;
pub use rotation::*;
pub use scanner::*;
