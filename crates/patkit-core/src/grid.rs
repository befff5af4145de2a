//! A pattern grid binding one input line to its best-matching lattice.

use std::f64::consts::FRAC_PI_2;

use tracing::debug;

use crate::constants::ZERO_TOL;
use crate::domain::Domain;
use crate::error::{PatternError, Result};
use crate::geometry::{Line2, Vector2};

/// One repeating grid of the pattern: a line snapped exactly onto its
/// nearest safe lattice, plus the lattice's repeat parameters.
#[derive(Debug, Clone)]
pub struct Grid {
    angle: f64,
    span: f64,
    offset: f64,
    shift: f64,
    domain_width: f64,
    segment_lines: Vec<Line2>,
}

impl Grid {
    /// Binds `line` (already in domain coordinates) to the catalogue entry
    /// closest to its angle, expanding the domain's catalogue if allowed.
    ///
    /// The line is rotated about its own center onto the lattice angle, which
    /// absorbs the residual numeric mismatch. Fails with
    /// [`PatternError::InvalidSegmentPair`] when the line is longer than the
    /// matched repeat span.
    pub fn from_line(domain: &mut Domain, line: Line2) -> Result<Self> {
        let best = domain.best_angle(line.angle())?;
        debug!(
            grid_angle = best.grid_angle(),
            line_angle = line.angle(),
            "matched safe angle"
        );

        let angle = best.grid_angle();
        let span = best.span();
        let snapped = line.rotated(angle - line.angle(), line.center());

        let pen = snapped.length();
        if span - pen < -ZERO_TOL {
            return Err(PatternError::InvalidSegmentPair { pen, span });
        }

        Ok(Self {
            angle,
            span,
            offset: best.offset(),
            shift: best.shift(),
            domain_width: domain.u_axis().length(),
            segment_lines: vec![snapped],
        })
    }

    /// The lattice angle, in `[0, PI]`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Full repeat period along the grid axis.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Perpendicular spacing between repeated rows (signed).
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Along-line stagger between successive rows.
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// The snapped segment lines carried by this grid.
    pub fn segment_lines(&self) -> &[Line2] {
        &self.segment_lines
    }

    /// Grid origin: the segment endpoint closest to the domain's lower-left
    /// corner, or to the lower-right corner for back-leaning angles.
    pub fn origin(&self) -> Vector2 {
        let anchor = if self.angle <= FRAC_PI_2 {
            Vector2::ZERO
        } else {
            Vector2::new(self.domain_width, 0.0)
        };
        self.segment_lines
            .iter()
            .flat_map(|line| [line.start(), line.end()])
            .min_by(|a, b| a.distance_to(anchor).total_cmp(&b.distance_to(anchor)))
            .unwrap_or(anchor)
    }

    /// The dash/gap pair: pen-down length followed by the remaining gap to
    /// the end of the repeat span. A gap within tolerance of zero collapses
    /// to exactly 0.0 (solid line).
    pub fn segments(&self) -> Vec<f64> {
        let pen = self
            .segment_lines
            .first()
            .map(Line2::length)
            .unwrap_or(0.0);
        let gap = self.span - pen;
        let gap = if gap.abs() <= ZERO_TOL { 0.0 } else { gap };
        vec![pen, gap]
    }
}

/// Strategy hook for folding a new input line into an existing grid.
///
/// The reference behavior keeps one grid per input line; merging of colinear
/// or overlapping lines is an explicit extension point, not a baked-in
/// assumption.
pub trait LineMerger {
    /// Attempts to absorb `line` into `grid`. Returns true when the line was
    /// adopted and no new grid is needed.
    fn adopt_line(&self, grid: &mut Grid, line: &Line2) -> bool;
}

/// Default strategy: never merges.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMerge;

impl LineMerger for NoMerge {
    fn adopt_line(&self, _grid: &mut Grid, _line: &Line2) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_4;

    use super::*;
    use crate::domain::PatternTarget;

    fn unit_domain() -> Domain {
        Domain::new(
            Vector2::ZERO,
            Vector2::new(1.0, 1.0),
            PatternTarget::Drafting,
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_diagonal_line_solid_fill() {
        let mut domain = unit_domain();
        let line = Line2::new(Vector2::ZERO, Vector2::new(1.0, 1.0));
        let grid = Grid::from_line(&mut domain, line).unwrap();

        let sqrt2 = 2f64.sqrt();
        assert!((grid.angle() - FRAC_PI_4).abs() < 1e-9);
        assert!((grid.span() - sqrt2).abs() < 1e-9);

        let segments = grid.segments();
        assert_eq!(segments.len(), 2);
        assert!((segments[0] - sqrt2).abs() < 1e-9);
        // the full diagonal leaves no gap
        assert_eq!(segments[1], 0.0);
    }

    #[test]
    fn test_pure_u_line() {
        let mut domain = Domain::new(
            Vector2::ZERO,
            Vector2::new(2.0, 1.0),
            PatternTarget::Drafting,
            false,
        )
        .unwrap();
        let line = Line2::new(Vector2::ZERO, Vector2::new(2.0, 0.0));
        let grid = Grid::from_line(&mut domain, line).unwrap();

        assert_eq!(grid.angle(), 0.0);
        assert_eq!(grid.span(), 2.0);
        assert!((grid.offset().abs() - 1.0).abs() < 1e-12);
        assert_eq!(grid.shift(), 0.0);
        assert_eq!(grid.origin(), Vector2::ZERO);
        assert_eq!(grid.segments(), vec![2.0, 0.0]);
    }

    #[test]
    fn test_short_dash_keeps_positive_gap() {
        let mut domain = unit_domain();
        let line = Line2::new(Vector2::ZERO, Vector2::new(0.5, 0.5));
        let grid = Grid::from_line(&mut domain, line).unwrap();

        let segments = grid.segments();
        assert!((segments[0] - 0.5 * 2f64.sqrt()).abs() < 1e-9);
        assert!(segments[1] > 0.0);
        assert!((segments[0] + segments[1] - grid.span()).abs() < 1e-9);
    }

    #[test]
    fn test_overlong_line_rejected() {
        let mut domain = unit_domain();
        // six times the repeat span along the diagonal
        let line = Line2::new(Vector2::ZERO, Vector2::new(6.0, 6.0));
        assert!(matches!(
            Grid::from_line(&mut domain, line),
            Err(PatternError::InvalidSegmentPair { .. })
        ));
    }

    #[test]
    fn test_origin_for_back_leaning_angle() {
        let mut domain = unit_domain();
        // mirrored diagonal: angle 3*PI/4, origin anchors to the lower-right
        let line = Line2::new(Vector2::new(1.0, 0.0), Vector2::new(0.0, 1.0));
        let grid = Grid::from_line(&mut domain, line).unwrap();
        assert!(grid.angle() > FRAC_PI_2);
        assert_eq!(grid.origin(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_no_merge_default() {
        let mut domain = unit_domain();
        let line = Line2::new(Vector2::ZERO, Vector2::new(1.0, 1.0));
        let mut grid = Grid::from_line(&mut domain, line).unwrap();
        assert!(!NoMerge.adopt_line(&mut grid, &line));
    }
}
