use std::io;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use common::{Point, Segment};

/// Reads line segments from a `(x1,y1)(x2,y2)`-per-line text file.
///
/// Malformed lines are reported and skipped, never fatal. File-level
/// failures are reported and yield an empty collection, so callers can
/// always treat the result as "whatever was usable, in file order".
pub fn load_segments(path: &Path) -> Vec<Segment> {
    let file = match File::open(path) {
        Ok(file) =>
            file,
        Err(error) => {
            report_open_error(path, &error);
            return Vec::new();
        },
    };

    let mut segments = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = match line {
            Ok(line) =>
                line,
            Err(error) => {
                error!("read error in {:?}: {}", path, error);
                return Vec::new();
            },
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match parse_segment(trimmed) {
            Some(segment) =>
                segments.push(segment),
            None =>
                warn!("skipping invalid line {}: {}", index + 1, trimmed),
        }
    }
    segments
}

fn report_open_error(path: &Path, error: &io::Error) {
    match error.kind() {
        io::ErrorKind::NotFound => {
            error!("the file {:?} was not found", path);
            error!("run the koch curve generator first to create it");
        },
        io::ErrorKind::PermissionDenied =>
            error!("permission denied when trying to read {:?}", path),
        _ =>
            error!("unexpected error while reading {:?}: {}", path, error),
    }
}

// A well-formed line is exactly two parenthesized pairs back to back,
// e.g. `(100,500)(366.6,500)`. Anything else is malformed.
fn parse_segment(line: &str) -> Option<Segment> {
    if line.matches('(').count() != 2 || line.matches(')').count() != 2 {
        return None;
    }
    let parts: Vec<&str> = line.split(")(").collect();
    if parts.len() != 2 {
        return None;
    }
    let src = parse_point(parts[0].strip_prefix('(')?)?;
    let dst = parse_point(parts[1].strip_suffix(')')?)?;
    Some(Segment { src, dst })
}

// Pair grammar: two comma-separated signed decimal numbers, surrounding
// whitespace allowed, nothing else accepted.
fn parse_point(text: &str) -> Option<Point> {
    let mut fields = text.split(',');
    let x: f64 = fields.next()?.trim().parse().ok()?;
    let y: f64 = fields.next()?.trim().parse().ok()?;
    if fields.next().is_some() || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point { x, y })
}
