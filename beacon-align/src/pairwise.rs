use crate::{AlignError, AlignSettings, Result};
use beacon_core::{Coordinate, Rotation, Scanner};
use itertools::Itertools;
use std::collections::HashSet;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// The distinct resolved beacons of an aligned scanner, indexed for exact lookup.
///
/// One anchor is built per expansion of a scanner and then shared read-only by every pairwise
/// search against it. Repeated beacons are kept once, at their first position, so that the
/// search visits hypotheses in a reproducible order.
#[derive(Debug, Clone)]
pub struct Anchor {
    id: usize,
    beacons: Vec<Coordinate>,
    lookup: HashSet<Coordinate>,
}

impl Anchor {
    pub fn new(scanner: &Scanner) -> Result<Self> {
        let beacons = scanner.resolved().ok_or(AlignError::UnresolvedParent {
            scanner: scanner.id(),
        })?;
        Ok(Self::from_beacons(scanner.id(), beacons))
    }

    pub fn from_beacons(id: usize, beacons: &[Coordinate]) -> Self {
        let beacons = distinct(beacons);
        let lookup = beacons.iter().copied().collect();
        Self {
            id,
            beacons,
            lookup,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn beacons(&self) -> &[Coordinate] {
        &self.beacons
    }

    pub fn len(&self) -> usize {
        self.beacons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beacons.is_empty()
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.lookup.contains(coordinate)
    }
}

/// Keeps the first occurrence of every beacon.
fn distinct(beacons: &[Coordinate]) -> Vec<Coordinate> {
    beacons.iter().copied().unique().collect()
}

/// An accepted alignment of a candidate scanner against an anchor.
///
/// `orientation` indexes [`Rotation::all`] and the candidate's orientations.
/// Adding `translation` to every beacon of that orientation expresses it in the anchor's
/// resolved frame, which also makes `translation` the candidate's offset from the anchor scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairwiseAlignment {
    pub orientation: usize,
    pub translation: Coordinate,
    /// The number of distinct candidate beacons that coincide with anchor beacons.
    pub matches: usize,
}

impl PairwiseAlignment {
    pub fn rotation(&self) -> Option<Rotation> {
        Rotation::all().get(self.orientation).copied()
    }

    /// The candidate's beacons in the accepted orientation, before translation.
    ///
    /// `None` if `candidate` has no such orientation.
    pub fn oriented<'a>(&self, candidate: &'a Scanner) -> Option<&'a [Coordinate]> {
        candidate.orientation(self.orientation)
    }

    /// The candidate's beacons expressed in the anchor's resolved frame.
    pub fn translated<'a>(
        &self,
        candidate: &'a Scanner,
    ) -> Option<impl Iterator<Item = Coordinate> + 'a> {
        let translation = self.translation;
        let oriented = self.oriented(candidate)?;
        Some(oriented.iter().map(move |&beacon| beacon + translation))
    }
}

/// Searches rotation and translation space for an overlap between two scanners.
///
/// Every pair of an anchor beacon `a` and an oriented candidate beacon `b` proposes the
/// translation `a - b`. A translation is accepted once [`PairwiseAligner::overlap_threshold`]
/// distinct candidate beacons land exactly on anchor beacons. Hypotheses are visited by
/// orientation, then anchor beacon, then candidate beacon, and the first accepted one wins.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PairwiseAligner {
    pub overlap_threshold: usize,
    pub reject_ambiguous: bool,
}

impl PairwiseAligner {
    pub fn new(overlap_threshold: usize) -> Self {
        Self {
            overlap_threshold,
            reject_ambiguous: false,
        }
    }

    pub fn from_settings(settings: &AlignSettings) -> Self {
        Self {
            overlap_threshold: settings.overlap_threshold,
            reject_ambiguous: settings.reject_ambiguous,
        }
    }

    /// Counts the distinct beacons of `oriented` that land on anchor beacons when moved by
    /// `translation`.
    pub fn count_matches(
        &self,
        anchor: &Anchor,
        oriented: &[Coordinate],
        translation: Coordinate,
    ) -> usize {
        oriented
            .iter()
            .map(|&beacon| beacon + translation)
            .filter(|beacon| anchor.contains(beacon))
            .unique()
            .count()
    }

    /// Like [`PairwiseAligner::count_matches`], but stops as soon as the outcome is decided.
    ///
    /// `oriented` must not repeat beacons.
    fn reaches_threshold(
        &self,
        anchor: &Anchor,
        oriented: &[Coordinate],
        translation: Coordinate,
    ) -> bool {
        let mut matches = 0;
        for (ix, &beacon) in oriented.iter().enumerate() {
            if anchor.contains(&(beacon + translation)) {
                matches += 1;
                if matches >= self.overlap_threshold {
                    return true;
                }
            } else if matches + (oriented.len() - ix - 1) < self.overlap_threshold {
                return false;
            }
        }
        matches >= self.overlap_threshold
    }

    /// Every translation hypothesis for one orientation, in search order.
    ///
    /// Any accepted translation is proposed by at least `overlap_threshold` distinct anchor
    /// beacons, so the last `overlap_threshold - 1` anchor beacons never propose one first.
    fn hypotheses<'b>(
        &self,
        anchor: &'b Anchor,
        oriented: &'b [Coordinate],
    ) -> impl Iterator<Item = Coordinate> + 'b {
        let proposers = (anchor.len() + 1).saturating_sub(self.overlap_threshold.max(1));
        let proposers: &'b [Coordinate] = &anchor.beacons()[..proposers];
        proposers
            .iter()
            .flat_map(move |&a| oriented.iter().map(move |&b| a - b))
    }

    fn feasible(&self, anchor: &Anchor, oriented: &[Coordinate]) -> bool {
        !oriented.is_empty()
            && oriented.len() >= self.overlap_threshold
            && anchor.len() >= self.overlap_threshold
    }

    /// Finds the first translation that aligns a single orientation of the candidate.
    pub fn align_orientation(
        &self,
        anchor: &Anchor,
        oriented: &[Coordinate],
    ) -> Option<Coordinate> {
        let oriented = distinct(oriented);
        if !self.feasible(anchor, &oriented) {
            return None;
        }
        let found = self
            .hypotheses(anchor, &oriented)
            .find(|&translation| self.reaches_threshold(anchor, &oriented, translation));
        found
    }

    /// Finds every distinct translation that aligns a single orientation of the candidate.
    pub fn qualifying_translations(
        &self,
        anchor: &Anchor,
        oriented: &[Coordinate],
    ) -> Vec<Coordinate> {
        let oriented = distinct(oriented);
        if !self.feasible(anchor, &oriented) {
            return vec![];
        }
        let mut tried = HashSet::new();
        self.hypotheses(anchor, &oriented)
            .filter(|&translation| tried.insert(translation))
            .filter(|&translation| self.reaches_threshold(anchor, &oriented, translation))
            .collect()
    }

    /// Searches all 24 orientations of `candidate` against the anchor.
    ///
    /// Returns `Ok(None)` when the scanners do not share enough beacons. With
    /// `reject_ambiguous` set, every hypothesis is examined and
    /// [`AlignError::AmbiguousAlignment`] is returned if more than one qualifies.
    pub fn align<'c>(
        &self,
        anchor: &Anchor,
        candidate: &'c Scanner,
    ) -> Result<Option<PairwiseAlignment>> {
        if self.reject_ambiguous {
            return self.align_unique(anchor, candidate);
        }

        let search = |(orientation, oriented): (usize, &'c Vec<Coordinate>)| {
            self.align_orientation(anchor, oriented)
                .map(|translation| (orientation, oriented, translation))
        };
        #[cfg(not(feature = "rayon"))]
        let found = candidate.orientations().iter().enumerate().find_map(search);
        // `find_map_first` keeps the lowest orientation no matter which worker finishes first.
        #[cfg(feature = "rayon")]
        let found = candidate
            .orientations()
            .par_iter()
            .enumerate()
            .find_map_first(search);

        Ok(found.map(|(orientation, oriented, translation)| {
            self.accepted(anchor, oriented, orientation, translation)
        }))
    }

    fn align_unique<'c>(
        &self,
        anchor: &Anchor,
        candidate: &'c Scanner,
    ) -> Result<Option<PairwiseAlignment>> {
        let search = |(orientation, oriented): (usize, &'c Vec<Coordinate>)| {
            self.qualifying_translations(anchor, oriented)
                .into_iter()
                .map(move |translation| (orientation, oriented, translation))
                .collect::<Vec<_>>()
        };
        #[cfg(not(feature = "rayon"))]
        let qualifying: Vec<_> = candidate
            .orientations()
            .iter()
            .enumerate()
            .flat_map(search)
            .collect();
        #[cfg(feature = "rayon")]
        let qualifying: Vec<_> = candidate
            .orientations()
            .par_iter()
            .enumerate()
            .flat_map_iter(search)
            .collect();

        match qualifying.as_slice() {
            [] => Ok(None),
            &[(orientation, oriented, translation)] => Ok(Some(self.accepted(
                anchor,
                oriented,
                orientation,
                translation,
            ))),
            _ => Err(AlignError::AmbiguousAlignment {
                parent: anchor.id(),
                child: candidate.id(),
            }),
        }
    }

    fn accepted(
        &self,
        anchor: &Anchor,
        oriented: &[Coordinate],
        orientation: usize,
        translation: Coordinate,
    ) -> PairwiseAlignment {
        PairwiseAlignment {
            orientation,
            translation,
            matches: self.count_matches(anchor, oriented, translation),
        }
    }
}

impl Default for PairwiseAligner {
    fn default() -> Self {
        Self::from_settings(&AlignSettings::default())
    }
}
