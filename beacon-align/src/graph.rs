use crate::{
    AlignError, AlignSettings, Anchor, PairwiseAligner, PairwiseAlignment, Result, ScannerTable,
};
use beacon_core::{Coordinate, Scanner};
use log::*;
use std::collections::{BTreeMap, VecDeque};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// One accepted pairwise alignment.
///
/// Adding `translation` to the child's beacons in orientation `orientation` expresses them in
/// the parent's resolved frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentEdge {
    pub parent: usize,
    pub child: usize,
    pub orientation: usize,
    pub translation: Coordinate,
}

/// The tree of accepted alignments, rooted at the reference scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentGraph {
    root: usize,
    edges: Vec<AlignmentEdge>,
}

impl AlignmentGraph {
    pub fn new(root: usize) -> Self {
        Self {
            root,
            edges: vec![],
        }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// Edges in the order they were discovered.
    pub fn edges(&self) -> &[AlignmentEdge] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<AlignmentEdge> {
        self.edges
    }

    /// The number of scanners connected to the root, including the root.
    pub fn scanner_count(&self) -> usize {
        self.edges.len() + 1
    }

    pub fn push(&mut self, edge: AlignmentEdge) {
        self.edges.push(edge);
    }

    /// Groups the outgoing edges of each scanner, keyed by parent id.
    pub fn children(&self) -> BTreeMap<usize, Vec<AlignmentEdge>> {
        let mut children: BTreeMap<usize, Vec<AlignmentEdge>> = BTreeMap::new();
        for &edge in &self.edges {
            children.entry(edge.parent).or_default().push(edge);
        }
        children
    }
}

/// Connects every scanner to the reference scanner by breadth-first expansion.
///
/// The scanner being expanded is the anchor for one batch of pairwise searches, one per
/// scanner that is still unaligned. The batch runs in parallel when the `rayon` feature is
/// enabled, and all scanner updates happen here after the batch has finished, in ascending
/// child id order.
#[derive(Debug, Copy, Clone)]
pub struct GraphBuilder {
    pub aligner: PairwiseAligner,
    pub reference: usize,
}

impl GraphBuilder {
    pub fn new(settings: &AlignSettings) -> Self {
        Self {
            aligner: PairwiseAligner::from_settings(settings),
            reference: settings.reference,
        }
    }

    /// Aligns every scanner in the table, resolving each scanner's beacons along the way.
    ///
    /// Fails with [`AlignError::AlignmentIncomplete`] if some scanners cannot be reached.
    pub fn build(&self, table: &mut ScannerTable) -> Result<AlignmentGraph> {
        table
            .get_mut(self.reference)
            .map_err(|_| AlignError::MissingReference {
                reference: self.reference,
            })?
            .make_reference()?;
        info!(
            "aligning {} scanners against reference scanner {}",
            table.len(),
            self.reference
        );

        let mut graph = AlignmentGraph::new(self.reference);
        let mut queue = VecDeque::from([self.reference]);
        while let Some(parent) = queue.pop_front() {
            if table.pending().next().is_none() {
                break;
            }
            for (child, alignment) in self.expand(table, parent)? {
                info!(
                    "found alignment between scanner {} and scanner {}: {} ({} beacons in common)",
                    parent, child, alignment.translation, alignment.matches
                );
                table
                    .get_mut(child)?
                    .resolve_orientation(alignment.orientation)?;
                graph.push(AlignmentEdge {
                    parent,
                    child,
                    orientation: alignment.orientation,
                    translation: alignment.translation,
                });
                queue.push_back(child);
            }
        }

        let unaligned: Vec<usize> = table.pending().map(Scanner::id).collect();
        if !unaligned.is_empty() {
            return Err(AlignError::AlignmentIncomplete { unaligned });
        }
        Ok(graph)
    }

    /// Runs one batch: every pending scanner against `parent`.
    ///
    /// Only reads the table. The successful alignments come back in ascending child id order.
    pub fn expand(
        &self,
        table: &ScannerTable,
        parent: usize,
    ) -> Result<Vec<(usize, PairwiseAlignment)>> {
        let anchor = Anchor::new(table.get(parent)?)?;
        let pending: Vec<&Scanner> = table.pending().collect();
        debug!(
            "expanding scanner {} ({} beacons) against {} pending scanners",
            parent,
            anchor.len(),
            pending.len()
        );

        let search = |candidate: &&Scanner| {
            trace!("searching match between {} and {}", parent, candidate.id());
            self.aligner.align(&anchor, candidate)
        };
        #[cfg(not(feature = "rayon"))]
        let attempts: Vec<_> = pending.iter().map(search).collect();
        #[cfg(feature = "rayon")]
        let attempts: Vec<_> = pending.par_iter().map(search).collect();

        let mut found = vec![];
        for (candidate, attempt) in pending.iter().zip(attempts) {
            if let Some(alignment) = attempt? {
                found.push((candidate.id(), alignment));
            }
        }
        Ok(found)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new(&AlignSettings::default())
    }
}
