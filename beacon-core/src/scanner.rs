use crate::{orientations, Coordinate, CoreError, Result, WriteOnce};

/// A sensor that reports the beacons within its range in its own frame.
///
/// All 24 orientations of the beacons are computed when the scanner is created, since the
/// alignment search visits every one of them for every candidate parent. Beacon `i` is the
/// same physical beacon in [`Scanner::beacons`] and in every sequence of
/// [`Scanner::orientations`].
///
/// The resolved beacons and absolute position are filled in once during alignment and
/// never change afterwards. Beacon components are expected to lie within
/// [`crate::COORDINATE_LIMIT`], which [`crate::parse_report`] enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanner {
    id: usize,
    beacons: Vec<Coordinate>,
    orientations: Vec<Vec<Coordinate>>,
    resolved: WriteOnce<Vec<Coordinate>>,
    position: WriteOnce<Coordinate>,
}

impl Scanner {
    pub fn new(id: usize, beacons: Vec<Coordinate>) -> Self {
        let orientations = orientations(&beacons);
        Self {
            id,
            beacons,
            orientations,
            resolved: WriteOnce::new(),
            position: WriteOnce::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// The beacons as reported, in the scanner's own frame.
    pub fn beacons(&self) -> &[Coordinate] {
        &self.beacons
    }

    /// All [`crate::ROTATION_COUNT`] rotated images of the beacons, indexed like [`crate::Rotation::all`].
    pub fn orientations(&self) -> &[Vec<Coordinate>] {
        &self.orientations
    }

    pub fn orientation(&self, index: usize) -> Option<&[Coordinate]> {
        self.orientations.get(index).map(Vec::as_slice)
    }

    /// The beacons expressed with the reference orientation, relative to this scanner.
    ///
    /// This is `None` until the scanner has been aligned.
    pub fn resolved(&self) -> Option<&[Coordinate]> {
        self.resolved.get().map(Vec::as_slice)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_set()
    }

    /// The scanner's position in the reference frame, once composed.
    pub fn position(&self) -> Option<Coordinate> {
        self.position.get().copied()
    }

    pub fn resolve(&mut self, beacons: Vec<Coordinate>) -> Result<()> {
        self.resolved
            .set(beacons)
            .map_err(|_| CoreError::AlreadyResolved { scanner: self.id })
    }

    /// Resolves the scanner with one of its own orientations.
    pub fn resolve_orientation(&mut self, index: usize) -> Result<()> {
        let oriented = self
            .orientation(index)
            .ok_or(CoreError::UnknownOrientation { index })?
            .to_vec();
        self.resolve(oriented)
    }

    pub fn place(&mut self, position: Coordinate) -> Result<()> {
        self.position
            .set(position)
            .map_err(|_| CoreError::AlreadyPlaced { scanner: self.id })
    }

    /// Makes this scanner the reference: its own frame becomes the global frame.
    pub fn make_reference(&mut self) -> Result<()> {
        self.resolve_orientation(0)?;
        self.place(Coordinate::origin())
    }

    /// The resolved beacons moved into the global frame.
    pub fn placed_beacons(&self) -> Result<Vec<Coordinate>> {
        let (resolved, position) = match (self.resolved(), self.position()) {
            (Some(resolved), Some(position)) => (resolved, position),
            _ => return Err(CoreError::Unplaced { scanner: self.id }),
        };
        resolved
            .iter()
            .map(|&beacon| {
                beacon
                    .checked_add(position)
                    .ok_or(CoreError::CoordinateOverflow { scanner: self.id })
            })
            .collect()
    }
}
