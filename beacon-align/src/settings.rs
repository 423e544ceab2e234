#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The settings for the alignment process.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AlignSettings {
    /// The minimum number of beacons two scanners must have in common for their alignment to be accepted
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_overlap_threshold")
    )]
    pub overlap_threshold: usize,
    /// The id of the scanner whose frame becomes the global frame
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_reference"))]
    pub reference: usize,
    /// Search every hypothesis of a pair and fail if more than one reaches the overlap threshold,
    /// rather than accepting the first one found
    #[cfg_attr(
        feature = "serde-serialize",
        serde(default = "default_reject_ambiguous")
    )]
    pub reject_ambiguous: bool,
}

impl Default for AlignSettings {
    fn default() -> Self {
        Self {
            overlap_threshold: default_overlap_threshold(),
            reference: default_reference(),
            reject_ambiguous: default_reject_ambiguous(),
        }
    }
}

fn default_overlap_threshold() -> usize {
    12
}

fn default_reference() -> usize {
    0
}

fn default_reject_ambiguous() -> bool {
    false
}
