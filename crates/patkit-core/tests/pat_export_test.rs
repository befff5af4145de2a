//! Pattern-file text output: exact format, round-trip, and file writing.

use std::f64::consts::FRAC_PI_4;

use patkit_core::{
    pat_file, Domain, Line2, Pattern, PatternConfig, PatternTarget, RawGrid, Vector2,
};

fn pure_u_pattern(config: PatternConfig) -> Pattern {
    let domain = Domain::new(
        Vector2::ZERO,
        Vector2::new(2.0, 1.0),
        config.target,
        false,
    )
    .unwrap();
    let mut pattern = Pattern::new(domain, config);
    pattern
        .append_line(Line2::new(Vector2::ZERO, Vector2::new(2.0, 0.0)))
        .unwrap();
    pattern
}

/// Grid descriptor lines are everything after the directives.
fn grid_lines(text: &str) -> Vec<&str> {
    text.lines()
        .skip_while(|line| !line.starts_with(";%TYPE="))
        .skip(1)
        .collect()
}

#[test]
fn test_export_layout() {
    let pattern = pure_u_pattern(PatternConfig::new("rows", PatternTarget::Drafting));
    let text = pattern.to_pat_string();

    assert!(text.starts_with(';'));
    assert!(text.contains(";%UNITS=MM\n"));
    assert!(text.contains("*rows,exported by patkit\n"));
    assert!(text.contains(";%TYPE=DRAFTING\n"));
    assert!(text.ends_with('\n'));

    // every non-grid line is either a comment or the name line
    for line in text.lines() {
        assert!(!line.is_empty());
        let is_header = line.starts_with(';') || line.starts_with('*');
        let is_grid = line.contains(", ");
        assert!(is_header || is_grid);
    }
}

#[test]
fn test_pure_u_grid_line_is_exact() {
    let pattern = pure_u_pattern(PatternConfig::new("rows", PatternTarget::Drafting));
    let text = pattern.to_pat_string();

    let grids = grid_lines(&text);
    assert_eq!(grids, vec!["0.0, 0.0, 0.0, 0.0, -1.0, 2.0, -0.0"]);
}

#[test]
fn test_units_directive_follows_scale() {
    let mut config = PatternConfig::new("rows", PatternTarget::Model);
    config.scale = 12.0;
    let text = pure_u_pattern(config).to_pat_string();
    assert!(text.contains(";%UNITS=INCH\n"));
    assert!(text.contains(";%TYPE=MODEL\n"));
}

#[test]
fn test_grid_line_round_trip() {
    let mut config = PatternConfig::new("diag", PatternTarget::Drafting);
    config.scale = 2.0;
    let domain = Domain::new(
        Vector2::ZERO,
        Vector2::new(1.0, 1.0),
        config.target,
        false,
    )
    .unwrap();
    let mut pattern = Pattern::new(domain, config);
    pattern
        .append_line(Line2::new(
            Vector2::new(0.25, 0.25),
            Vector2::new(0.75, 0.75),
        ))
        .unwrap();

    let text = pattern.to_pat_string();
    let grids = grid_lines(&text);
    assert_eq!(grids.len(), 1);

    let (angle, origin, shift, offset, segments) = pat_file::parse_grid_line(grids[0]).unwrap();
    assert!((angle - FRAC_PI_4).abs() < 1e-9);
    // text values carry the scale
    assert!((origin.u - 0.5).abs() < 1e-9);
    assert!((origin.v - 0.5).abs() < 1e-9);
    assert!((shift - 2f64.sqrt()).abs() < 1e-9);
    assert!((offset + 2f64.sqrt()).abs() < 1e-9);
    assert_eq!(segments.len(), 2);
    let sqrt2 = 2f64.sqrt();
    assert!((segments[0] - 0.5 * sqrt2 * 2.0).abs() < 1e-9);
    assert!((segments[0] + segments[1] - sqrt2 * 2.0).abs() < 1e-9);
}

#[test]
fn test_raw_grid_serializes_with_scale_only() {
    let mut config = PatternConfig::new("raw", PatternTarget::Drafting);
    config.scale = 2.0;
    config.flip_u = true;
    let domain = Domain::new(
        Vector2::ZERO,
        Vector2::new(1.0, 1.0),
        config.target,
        false,
    )
    .unwrap();
    let mut pattern = Pattern::new(domain, config);
    pattern.append_raw_grid(RawGrid {
        angle: 0.0,
        origin: Vector2::new(0.5, 0.25),
        offset: 1.0,
        shift: 0.5,
        segments: vec![1.0, 0.25],
    });

    let text = pattern.to_pat_string();
    let grids = grid_lines(&text);
    assert_eq!(grids.len(), 1);

    let (angle, origin, shift, offset, segments) = pat_file::parse_grid_line(grids[0]).unwrap();
    assert_eq!(angle, 0.0);
    assert!((origin.u - 1.0).abs() < 1e-12);
    assert!((origin.v - 0.5).abs() < 1e-12);
    assert!((shift - 1.0).abs() < 1e-12);
    assert!((offset - 2.0).abs() < 1e-12);
    assert_eq!(segments.len(), 2);
    assert!((segments[0] - 2.0).abs() < 1e-12);
    assert!((segments[1] - 0.5).abs() < 1e-12);
}

#[test]
fn test_write_pat_file() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = pure_u_pattern(PatternConfig::new("unit rows", PatternTarget::Drafting));

    let path = pattern.write_pat_file(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "unit rows.pat");

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("*unit rows,exported by patkit\n"));
    assert_eq!(grid_lines(&contents).len(), 1);
}
