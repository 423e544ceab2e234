//! # Beacon Align
//!
//! Aligns a set of beacon scanners with unknown orientations and positions into one global map.
//!
//! The work happens in three stages:
//!
//! 1. [`PairwiseAligner`] decides whether two scanners see enough of the same beacons, and if so
//!    which of the 24 [cube rotations](beacon_core::Rotation::all) and which translation bring the
//!    candidate into the anchor's frame.
//! 2. [`GraphBuilder`] expands breadth-first from the reference scanner. Each expanded scanner is
//!    searched against every scanner that is still unaligned, in parallel when the `rayon` feature
//!    is enabled. The result is an [`AlignmentGraph`], a spanning tree of accepted alignments.
//! 3. [`compose`] walks that tree, accumulates each scanner's absolute position, and merges all
//!    beacons into a set of distinct global coordinates.
//!
//! [`align`] runs all three and summarizes the result in an [`AlignmentReport`].
//!
//! ```no_run
//! let report = std::fs::read_to_string("scanners.txt").unwrap();
//! let scanners = beacon_core::parse_report(&report).unwrap();
//! let aligned = beacon_align::align(scanners).unwrap();
//! println!("{} beacons, {} apart", aligned.beacon_count, aligned.max_distance);
//! ```
//!
//! The outcome is deterministic: the same input yields the same edges and positions no matter how
//! many threads run the search.

mod compose;
mod error;
mod graph;
mod pairwise;
mod settings;
mod table;

pub use compose::*;
pub use error::*;
pub use graph::*;
pub use pairwise::*;
pub use settings::*;
pub use table::*;

use beacon_core::{Coordinate, Scanner};
use log::*;
use std::collections::{BTreeMap, HashSet};

/// Everything learned from aligning a set of scanners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentReport {
    /// The number of distinct beacons in the global map.
    pub beacon_count: usize,
    /// The largest Manhattan distance between two scanner positions.
    pub max_distance: i64,
    /// Every scanner's position in the reference frame, keyed by scanner id.
    pub positions: BTreeMap<usize, Coordinate>,
    /// The accepted alignments in discovery order.
    pub edges: Vec<AlignmentEdge>,
    /// The distinct beacons in the reference frame.
    pub beacons: HashSet<Coordinate>,
}

/// Aligns `scanners` with the default [`AlignSettings`].
pub fn align(scanners: impl IntoIterator<Item = Scanner>) -> Result<AlignmentReport> {
    align_with(&AlignSettings::default(), scanners)
}

/// Aligns `scanners` against the reference scanner named in `settings`.
pub fn align_with(
    settings: &AlignSettings,
    scanners: impl IntoIterator<Item = Scanner>,
) -> Result<AlignmentReport> {
    let mut table = ScannerTable::new(scanners)?;
    let graph = GraphBuilder::new(settings).build(&mut table)?;
    let map = compose(&graph, &mut table)?;

    let beacon_count = map.beacon_count();
    let max_distance = map.max_distance();
    info!(
        "aligned {} scanners: {} beacons, max distance {}",
        graph.scanner_count(),
        beacon_count,
        max_distance
    );
    Ok(AlignmentReport {
        beacon_count,
        max_distance,
        positions: map.positions,
        edges: graph.into_edges(),
        beacons: map.beacons,
    })
}
