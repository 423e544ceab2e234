//! Parser for scanner reports.
//!
//! A report lists each scanner under a header naming its id, followed by one beacon per line
//! as comma separated integers in the scanner's own frame. Blocks are separated by blank lines.
//!
//! ```text
//! --- scanner 0 ---
//! 404,-588,-901
//! 528,-643,409
//!
//! --- scanner 1 ---
//! 686,422,578
//! 605,423,415
//! ```
//!
//! Windows line endings and surrounding whitespace are accepted. Beacon components must lie
//! within [`COORDINATE_LIMIT`].

use crate::{Coordinate, ParseError, Scanner};

const HEADER_PREFIX: &str = "--- scanner ";
const HEADER_SUFFIX: &str = " ---";

/// The largest magnitude accepted for a beacon component.
///
/// Alignment adds and subtracts up to three such values, which must stay within `i32`.
pub const COORDINATE_LIMIT: i32 = 1 << 24;

/// Parses a full report into scanners, in the order they appear.
pub fn parse_report(input: &str) -> Result<Vec<Scanner>, ParseError> {
    let mut scanners = vec![];
    let mut current: Option<(usize, Vec<Coordinate>)> = None;

    for (ix, line) in input.lines().enumerate() {
        let line_number = ix + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("---") {
            let id = parse_header(line).ok_or_else(|| ParseError::InvalidHeader {
                line: line_number,
                text: line.to_owned(),
            })?;
            if let Some((id, beacons)) = current.replace((id, vec![])) {
                scanners.push(Scanner::new(id, beacons));
            }
            continue;
        }

        let (_, beacons) = current
            .as_mut()
            .ok_or(ParseError::MissingHeader { line: line_number })?;
        let beacon = parse_coordinate(line).ok_or_else(|| ParseError::InvalidCoordinate {
            line: line_number,
            text: line.to_owned(),
        })?;
        if beacon
            .iter()
            .any(|n| !(-COORDINATE_LIMIT..=COORDINATE_LIMIT).contains(n))
        {
            return Err(ParseError::CoordinateOutOfRange {
                line: line_number,
                text: line.to_owned(),
                limit: COORDINATE_LIMIT,
            });
        }
        beacons.push(beacon);
    }

    if let Some((id, beacons)) = current {
        scanners.push(Scanner::new(id, beacons));
    }
    if scanners.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(scanners)
}

fn parse_header(line: &str) -> Option<usize> {
    line.strip_prefix(HEADER_PREFIX)?
        .strip_suffix(HEADER_SUFFIX)?
        .trim()
        .parse()
        .ok()
}

fn parse_coordinate(line: &str) -> Option<Coordinate> {
    let mut components = line.split(',').map(|n| n.trim().parse::<i32>());
    let x = components.next()?.ok()?;
    let y = components.next()?.ok()?;
    let z = components.next()?.ok()?;
    if components.next().is_some() {
        return None;
    }
    Some(Coordinate::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_scanners() {
        let report = "--- scanner 0 ---\r\n404,-588,-901\r\n528,-643,409\r\n\r\n--- scanner 7 ---\r\n686,422,578\r\n";
        let scanners = parse_report(report).unwrap();
        assert_eq!(scanners.len(), 2);
        assert_eq!(scanners[0].id(), 0);
        assert_eq!(
            scanners[0].beacons(),
            [
                Coordinate::new(404, -588, -901),
                Coordinate::new(528, -643, 409)
            ]
        );
        assert_eq!(scanners[1].id(), 7);
        assert_eq!(scanners[1].beacons(), [Coordinate::new(686, 422, 578)]);
    }

    #[test]
    fn header_without_beacons() {
        let scanners = parse_report("--- scanner 2 ---\n\n--- scanner 3 ---\n1,2,3").unwrap();
        assert!(scanners[0].beacons().is_empty());
        assert_eq!(scanners[1].beacons().len(), 1);
    }

    #[test]
    fn beacon_before_header() {
        assert_eq!(
            parse_report("\n1,2,3\n--- scanner 0 ---\n"),
            Err(ParseError::MissingHeader { line: 2 })
        );
    }

    #[test]
    fn bad_header() {
        assert_eq!(
            parse_report("--- scanner x ---\n1,2,3\n"),
            Err(ParseError::InvalidHeader {
                line: 1,
                text: "--- scanner x ---".to_owned()
            })
        );
    }

    #[test]
    fn bad_coordinates() {
        for text in ["1,2", "1,2,3,4", "1,two,3", "1,,3"] {
            let report = format!("--- scanner 0 ---\n{}\n", text);
            assert_eq!(
                parse_report(&report),
                Err(ParseError::InvalidCoordinate {
                    line: 2,
                    text: text.to_owned()
                })
            );
        }
    }

    #[test]
    fn coordinate_limit() {
        let report = format!("--- scanner 0 ---\n{0},-{0},0\n", COORDINATE_LIMIT);
        assert_eq!(parse_report(&report).unwrap()[0].beacons().len(), 1);

        for text in ["2147483647,0,0", "0,-16777217,0"] {
            let report = format!("--- scanner 0 ---\n1,2,3\n{}\n", text);
            assert_eq!(
                parse_report(&report),
                Err(ParseError::CoordinateOutOfRange {
                    line: 3,
                    text: text.to_owned(),
                    limit: COORDINATE_LIMIT,
                })
            );
        }
    }

    #[test]
    fn empty() {
        assert_eq!(parse_report(" \n\n"), Err(ParseError::Empty));
    }
}
