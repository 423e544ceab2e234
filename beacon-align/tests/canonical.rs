use beacon_align::{align, align_with, AlignError, AlignSettings, AlignmentReport};
use beacon_core::{parse_report, Coordinate, Scanner};
use std::collections::BTreeMap;

const REPORT: &str = include_str!("data/scanners.txt");

fn scanners() -> Vec<Scanner> {
    let _ = pretty_env_logger::try_init();
    parse_report(REPORT).unwrap()
}

#[test]
fn beacon_count_and_distance() {
    let report = align(scanners()).unwrap();
    assert_eq!(report.beacon_count, 79);
    assert_eq!(report.beacons.len(), 79);
    assert_eq!(report.max_distance, 3621);
}

#[test]
fn scanner_positions() {
    let report = align(scanners()).unwrap();
    let expected: BTreeMap<usize, Coordinate> = [
        (0, Coordinate::origin()),
        (1, Coordinate::new(68, -1246, -43)),
        (2, Coordinate::new(1105, -1205, 1229)),
        (3, Coordinate::new(-92, -2380, -20)),
        (4, Coordinate::new(-20, -1133, 1061)),
    ]
    .into_iter()
    .collect();
    assert_eq!(report.positions, expected);
    assert_eq!(
        report.positions[&2].manhattan_distance(report.positions[&3]),
        3621
    );
}

#[test]
fn breadth_first_edges() {
    let report = align(scanners()).unwrap();
    let edges: Vec<_> = report
        .edges
        .iter()
        .map(|edge| (edge.parent, edge.child, edge.translation))
        .collect();
    assert_eq!(
        edges,
        [
            (0, 1, Coordinate::new(68, -1246, -43)),
            (1, 3, Coordinate::new(-160, -1134, 23)),
            (1, 4, Coordinate::new(-88, 113, 1104)),
            (4, 2, Coordinate::new(1125, -72, 168)),
        ]
    );
}

#[test]
fn known_beacons_are_placed() {
    let report = align(scanners()).unwrap();
    for beacon in [
        Coordinate::new(-892, 524, 684),
        Coordinate::new(459, -707, 401),
        Coordinate::new(1889, -1729, 1762),
        Coordinate::new(-618, -824, -621),
    ] {
        assert!(report.beacons.contains(&beacon), "missing {}", beacon);
    }
}

#[test]
fn repeated_runs_agree() {
    let first = align(scanners()).unwrap();
    for _ in 0..3 {
        assert_eq!(align(scanners()).unwrap(), first);
    }
}

#[test]
fn input_order_does_not_matter() {
    let expected = align(scanners()).unwrap();
    let mut reordered = scanners();
    reordered.reverse();
    let report: AlignmentReport = align(reordered).unwrap();
    assert_eq!(report, expected);
}

#[test]
fn other_reference() {
    let settings = AlignSettings {
        reference: 1,
        ..AlignSettings::default()
    };
    let report = align_with(&settings, scanners()).unwrap();
    assert_eq!(report.beacon_count, 79);
    assert_eq!(report.max_distance, 3621);
    assert_eq!(report.positions[&1], Coordinate::origin());
    assert_eq!(report.edges[0].parent, 1);
}

#[test]
fn missing_bridge_scanner() {
    let scanners = scanners().into_iter().filter(|scanner| scanner.id() != 1);
    assert_eq!(
        align(scanners),
        Err(AlignError::AlignmentIncomplete {
            unaligned: vec![2, 3, 4]
        })
    );
}

#[test]
fn strict_mode_accepts_unique_alignments() {
    let settings = AlignSettings {
        reject_ambiguous: true,
        ..AlignSettings::default()
    };
    let strict = align_with(&settings, scanners()).unwrap();
    assert_eq!(strict, align(scanners()).unwrap());
}

#[test]
fn duplicate_scanner_ids() {
    let mut scanners = scanners();
    scanners.push(scanners[3].clone());
    assert_eq!(
        align(scanners),
        Err(AlignError::DuplicateScanner { scanner: 3 })
    );
}

#[test]
fn repeated_beacon_lines_do_not_align() {
    let mut report = REPORT.split("\n\n").next().unwrap().to_owned();
    let first = report.lines().nth(1).unwrap().to_owned();
    report.push_str("\n\n--- scanner 1 ---\n");
    for _ in 0..12 {
        report.push_str(&first);
        report.push('\n');
    }
    let scanners = parse_report(&report).unwrap();
    assert_eq!(scanners[1].beacons().len(), 12);
    assert_eq!(
        align(scanners),
        Err(AlignError::AlignmentIncomplete { unaligned: vec![1] })
    );
}
