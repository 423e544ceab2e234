use crate::{AlignError, Result};
use beacon_core::Scanner;
use std::collections::BTreeMap;

/// All scanners of one alignment run, keyed by id.
///
/// Scanners never refer to each other. Parent and child relations live in
/// [`crate::AlignmentGraph`] as a separate edge list.
#[derive(Debug, Clone, Default)]
pub struct ScannerTable {
    scanners: BTreeMap<usize, Scanner>,
}

impl ScannerTable {
    pub fn new(scanners: impl IntoIterator<Item = Scanner>) -> Result<Self> {
        let mut table = BTreeMap::new();
        for scanner in scanners {
            let id = scanner.id();
            if table.insert(id, scanner).is_some() {
                return Err(AlignError::DuplicateScanner { scanner: id });
            }
        }
        Ok(Self { scanners: table })
    }

    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }

    pub fn get(&self, id: usize) -> Result<&Scanner> {
        self.scanners
            .get(&id)
            .ok_or(AlignError::UnknownScanner { scanner: id })
    }

    pub fn get_mut(&mut self, id: usize) -> Result<&mut Scanner> {
        self.scanners
            .get_mut(&id)
            .ok_or(AlignError::UnknownScanner { scanner: id })
    }

    /// Iterates over the scanners in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Scanner> {
        self.scanners.values()
    }

    /// Scanners that have not been aligned yet, in ascending id order.
    pub fn pending(&self) -> impl Iterator<Item = &Scanner> {
        self.iter().filter(|scanner| !scanner.is_resolved())
    }

    pub fn into_scanners(self) -> impl Iterator<Item = Scanner> {
        self.scanners.into_values()
    }
}
