use beacon_core::CoreError;

/// The ways a batch alignment can fail.
///
/// A pair of scanners that simply does not overlap is not an error; it only becomes one
/// when no chain of overlapping pairs reaches some scanner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlignError {
    /// The search ran out of scanners to expand before every scanner was aligned.
    #[error("no chain of overlapping scanners reaches scanners {unaligned:?}")]
    AlignmentIncomplete { unaligned: Vec<usize> },
    /// Only reported when [`crate::AlignSettings::reject_ambiguous`] is set.
    #[error("scanner {child} aligns to scanner {parent} in more than one way")]
    AmbiguousAlignment { parent: usize, child: usize },
    #[error("reference scanner {reference} is not among the input scanners")]
    MissingReference { reference: usize },
    #[error("scanner {scanner} appears more than once in the input")]
    DuplicateScanner { scanner: usize },
    #[error("scanner {scanner} is not in the scanner table")]
    UnknownScanner { scanner: usize },
    #[error("scanner {scanner} was used as an alignment parent before it was resolved")]
    UnresolvedParent { scanner: usize },
    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type Result<T> = core::result::Result<T, AlignError>;
