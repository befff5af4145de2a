//! Text serialization for the AutoCAD `.pat` pattern-definition format.
//!
//! One pattern renders as a comment header, two machine-readable directives
//! (`;%UNITS=` and `;%TYPE=`), a `*name` line, and one descriptor line per
//! grid in the fixed field order
//! `angle, origin.u, origin.v, shift, offset, seg1, seg2, ...`.

use chrono::Local;

use crate::constants::{COORD_RESOLUTION, ZERO_TOL};
use crate::domain::PatternTarget;
use crate::geometry::Vector2;

/// Field separator used on grid descriptor lines.
pub const PAT_SEPARATOR: &str = ", ";

/// Formats a value as a fixed high-precision decimal, collapsing an all-zero
/// fraction to a single `.0`.
///
/// `45.0` renders as `45.0`; `0.25` keeps its full 16-digit fraction so the
/// value survives a round-trip through the file.
pub fn flatten_zeros(value: f64) -> String {
    let text = format!("{:.prec$}", value, prec = COORD_RESOLUTION as usize);
    match text.split_once('.') {
        Some((whole, frac)) if frac.bytes().all(|b| b == b'0') => format!("{whole}.0"),
        _ => text,
    }
}

/// Renders the pattern-file header: provenance comments plus the units and
/// name/type directives.
///
/// The units directive follows the foot-to-inch export convention: a scale
/// of 12 marks an imperial pattern, anything else is metric.
pub fn header(name: &str, target: PatternTarget, scale: f64) -> String {
    let units = if (scale - 12.0).abs() <= ZERO_TOL {
        "INCH"
    } else {
        "MM"
    };
    let now = Local::now();
    format!(
        ";        Written by the patkit pattern generator\n\
         ;          https://github.com/patkit/patkit\n\
         ;-Date                                   : {date}\n\
         ;-Time                                   : {time}\n\
         ;-Version                                : {version}\n\
         ;---------------------------------------------------------------------\n\
         ;%UNITS={units}\n\
         *{name},exported by patkit\n\
         ;%TYPE={target}\n",
        date = now.format("%Y-%m-%d"),
        time = now.format("%H:%M:%S"),
        version = env!("CARGO_PKG_VERSION"),
        units = units,
        name = name,
        target = target,
    )
}

/// Renders one grid descriptor line (without the trailing newline).
///
/// Origin, shift, offset, and segments are scaled into export units; the
/// angle is emitted in degrees. Odd-indexed segments are negated on the way
/// out, encoding the draw/gap dash convention.
pub fn grid_line(
    angle: f64,
    origin: Vector2,
    shift: f64,
    offset: f64,
    segments: &[f64],
    scale: f64,
) -> String {
    let mut fields = vec![
        flatten_zeros(angle.to_degrees()),
        flatten_zeros(origin.u * scale),
        flatten_zeros(origin.v * scale),
        flatten_zeros(shift * scale),
        flatten_zeros(offset * scale),
    ];
    for (idx, seg) in segments.iter().enumerate() {
        let seg = if idx % 2 != 0 { -seg } else { *seg };
        fields.push(flatten_zeros(seg * scale));
    }
    fields.join(PAT_SEPARATOR)
}

/// Parses a grid descriptor line back into
/// `(angle_radians, origin, shift, offset, segments)`.
///
/// The inverse of [`grid_line`] up to the formatter's precision; segment
/// signs are restored to their unsigned draw/gap lengths.
pub fn parse_grid_line(line: &str) -> Option<(f64, Vector2, f64, f64, Vec<f64>)> {
    let values: Vec<f64> = line
        .split(',')
        .map(|field| field.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    if values.len() < 5 {
        return None;
    }
    let segments = values[5..]
        .iter()
        .enumerate()
        .map(|(idx, seg)| if idx % 2 != 0 { -seg } else { *seg })
        .collect();
    Some((
        values[0].to_radians(),
        Vector2::new(values[1], values[2]),
        values[3],
        values[4],
        segments,
    ))
}

/// Reduces a pattern name to a safe file stem.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
