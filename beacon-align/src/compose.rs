use crate::{AlignError, AlignmentGraph, Result, ScannerTable};
use beacon_core::{Coordinate, CoreError};
use itertools::Itertools;
use log::*;
use std::collections::{BTreeMap, HashSet};

/// The merged result of an alignment: where every scanner is and which beacons exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalMap {
    /// Absolute scanner positions in the reference frame, keyed by scanner id.
    pub positions: BTreeMap<usize, Coordinate>,
    /// Every distinct beacon in the reference frame.
    pub beacons: HashSet<Coordinate>,
}

impl GlobalMap {
    pub fn beacon_count(&self) -> usize {
        self.beacons.len()
    }

    /// The largest Manhattan distance between any two scanners.
    pub fn max_distance(&self) -> i64 {
        let positions: Vec<Coordinate> = self.positions.values().copied().collect();
        max_manhattan_distance(&positions)
    }
}

/// The largest Manhattan distance over all unordered pairs, or `0` for fewer than two positions.
pub fn max_manhattan_distance(positions: &[Coordinate]) -> i64 {
    positions
        .iter()
        .tuple_combinations()
        .map(|(a, b)| a.manhattan_distance(*b))
        .max()
        .unwrap_or(0)
}

/// Places every scanner of an aligned table in the reference frame and merges their beacons.
///
/// The alignment tree is walked from the root with an explicit stack. Each scanner's position is
/// its parent's position plus the translation on the edge between them, and is written to the
/// scanner exactly once. A scanner's beacons are placed by adding its position to its resolved
/// beacons. A position or beacon that leaves the `i32` range fails with
/// [`beacon_core::CoreError::CoordinateOverflow`].
pub fn compose(graph: &AlignmentGraph, table: &mut ScannerTable) -> Result<GlobalMap> {
    let children = graph.children();
    let mut positions = BTreeMap::new();
    let mut stack = vec![(graph.root(), Coordinate::origin())];
    while let Some((id, position)) = stack.pop() {
        let scanner = table.get_mut(id)?;
        if id != graph.root() {
            scanner.place(position)?;
        }
        debug!("scanner {} is at {}", id, position);
        positions.insert(id, position);
        for edge in children.get(&id).into_iter().flatten() {
            let child = position
                .checked_add(edge.translation)
                .ok_or(CoreError::CoordinateOverflow { scanner: edge.child })?;
            stack.push((edge.child, child));
        }
    }

    let unaligned: Vec<usize> = table
        .iter()
        .map(|scanner| scanner.id())
        .filter(|id| !positions.contains_key(id))
        .collect();
    if !unaligned.is_empty() {
        return Err(AlignError::AlignmentIncomplete { unaligned });
    }

    let mut beacons = HashSet::new();
    for scanner in table.iter() {
        beacons.extend(scanner.placed_beacons()?);
    }
    info!(
        "merged {} scanners into {} distinct beacons",
        positions.len(),
        beacons.len()
    );

    Ok(GlobalMap { positions, beacons })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AlignmentEdge;
    use beacon_core::Scanner;

    fn edge(parent: usize, child: usize, translation: [i32; 3]) -> AlignmentEdge {
        AlignmentEdge {
            parent,
            child,
            orientation: 0,
            translation: translation.into(),
        }
    }

    /// Scanners resolved in their own orientation, each seeing one beacon at `(1, 1, 1)` locally.
    fn table(ids: &[usize]) -> ScannerTable {
        let mut table = ScannerTable::new(
            ids.iter()
                .map(|&id| Scanner::new(id, vec![Coordinate::new(1, 1, 1)])),
        )
        .unwrap();
        table.get_mut(0).unwrap().make_reference().unwrap();
        for &id in &ids[1..] {
            table.get_mut(id).unwrap().resolve_orientation(0).unwrap();
        }
        table
    }

    fn graph(edges: &[AlignmentEdge]) -> AlignmentGraph {
        let mut graph = AlignmentGraph::new(0);
        for &edge in edges {
            graph.push(edge);
        }
        graph
    }

    #[test]
    fn translations_accumulate_along_paths() {
        let graph = graph(&[
            edge(0, 1, [10, 0, 0]),
            edge(1, 2, [0, 20, 0]),
            edge(2, 3, [0, 0, 30]),
            edge(0, 4, [-5, -5, -5]),
        ]);
        let mut table = table(&[0, 1, 2, 3, 4]);
        let map = compose(&graph, &mut table).unwrap();

        assert_eq!(map.positions[&3], Coordinate::new(10, 20, 30));
        assert_eq!(map.positions[&4], Coordinate::new(-5, -5, -5));
        assert_eq!(
            table.get(2).unwrap().position(),
            Some(Coordinate::new(10, 20, 0))
        );
        assert!(map.beacons.contains(&Coordinate::new(11, 21, 31)));
        assert!(map.beacons.contains(&Coordinate::new(1, 1, 1)));
        assert_eq!(map.beacon_count(), 5);
        assert_eq!(map.max_distance(), 75);
    }

    #[test]
    fn duplicate_beacons_merge() {
        let graph = graph(&[edge(0, 1, [0, 0, 0]), edge(0, 2, [1, 0, 0])]);
        let mut table = table(&[0, 1, 2]);
        let map = compose(&graph, &mut table).unwrap();
        assert_eq!(map.beacon_count(), 2);
    }

    #[test]
    fn unreachable_scanner() {
        let graph = graph(&[edge(0, 1, [1, 2, 3])]);
        let mut table = table(&[0, 1, 2]);
        assert_eq!(
            compose(&graph, &mut table),
            Err(AlignError::AlignmentIncomplete { unaligned: vec![2] })
        );
    }

    #[test]
    fn composing_twice_is_rejected() {
        let graph = graph(&[edge(0, 1, [1, 2, 3])]);
        let mut table = table(&[0, 1]);
        compose(&graph, &mut table).unwrap();
        assert_eq!(
            compose(&graph, &mut table),
            Err(AlignError::Core(CoreError::AlreadyPlaced { scanner: 1 }))
        );
    }

    #[test]
    fn position_overflow() {
        let graph = graph(&[edge(0, 1, [i32::MAX, 0, 0]), edge(1, 2, [1, 0, 0])]);
        let mut table = table(&[0, 1, 2]);
        assert_eq!(
            compose(&graph, &mut table),
            Err(AlignError::Core(CoreError::CoordinateOverflow { scanner: 2 }))
        );
    }

    #[test]
    fn beacon_overflow() {
        let graph = graph(&[edge(0, 1, [0, 0, i32::MAX])]);
        let mut table = table(&[0, 1]);
        assert_eq!(
            compose(&graph, &mut table),
            Err(AlignError::Core(CoreError::CoordinateOverflow { scanner: 1 }))
        );
    }

    #[test]
    fn far_apart_positions() {
        let positions = [
            Coordinate::new(i32::MAX, i32::MAX, i32::MAX),
            Coordinate::new(i32::MIN, i32::MIN, i32::MIN),
        ];
        assert_eq!(
            max_manhattan_distance(&positions),
            3 * (i64::from(i32::MAX) - i64::from(i32::MIN))
        );
    }

    #[test]
    fn max_distance_of_few_positions() {
        assert_eq!(max_manhattan_distance(&[]), 0);
        assert_eq!(max_manhattan_distance(&[Coordinate::new(4, 5, 6)]), 0);
        assert_eq!(
            max_manhattan_distance(&[
                Coordinate::new(0, 0, 0),
                Coordinate::new(3, -4, 0),
                Coordinate::new(-1, 1, 1),
            ]),
            10
        );
    }
}
