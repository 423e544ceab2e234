/// Invalid updates to scanner state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("scanner {scanner} already has resolved beacons")]
    AlreadyResolved { scanner: usize },
    #[error("scanner {scanner} already has an absolute position")]
    AlreadyPlaced { scanner: usize },
    #[error("orientation {index} is not one of the 24 rotations")]
    UnknownOrientation { index: usize },
    #[error("scanner {scanner} has not been both resolved and placed")]
    Unplaced { scanner: usize },
    #[error("coordinates of scanner {scanner} overflow the global frame")]
    CoordinateOverflow { scanner: usize },
}

/// A scanner report that could not be read.
///
/// Line numbers start at `1`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("report contains no scanners")]
    Empty,
    #[error("line {line}: beacon listed before any scanner header")]
    MissingHeader { line: usize },
    #[error("line {line}: invalid scanner header {text:?}")]
    InvalidHeader { line: usize, text: String },
    #[error("line {line}: invalid beacon coordinate {text:?}")]
    InvalidCoordinate { line: usize, text: String },
    #[error("line {line}: beacon coordinate {text:?} exceeds {limit} in magnitude")]
    CoordinateOutOfRange {
        line: usize,
        text: String,
        limit: i32,
    },
}

pub type Result<T> = core::result::Result<T, CoreError>;
