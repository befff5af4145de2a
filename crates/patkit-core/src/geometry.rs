//! 2D point and line primitives in repeat-domain coordinates.
//!
//! Coordinates live in the pattern's repeat domain, not in world space.
//! Every component is snapped to a fixed resolution on construction so
//! equality survives the floating-point noise introduced by rotation.

use std::f64::consts::PI;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::constants::{COORD_RESOLUTION, ZERO_TOL};
use crate::error::{PatternError, Result};

/// Clamps near-zero values to zero, then rounds to the coordinate resolution.
fn snap(value: f64) -> f64 {
    let value = if value.abs() <= ZERO_TOL { 0.0 } else { value };
    let factor = 10f64.powi(COORD_RESOLUTION as i32);
    (value * factor).round() / factor
}

/// A 2D point with free U and V coordinates in repeat-domain space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// Coordinate along the domain's U axis.
    pub u: f64,
    /// Coordinate along the domain's V axis.
    pub v: f64,
}

impl Vector2 {
    /// Creates a new point, snapping both components.
    pub fn new(u: f64, v: f64) -> Self {
        Self {
            u: snap(u),
            v: snap(v),
        }
    }

    /// The domain origin.
    pub const ZERO: Vector2 = Vector2 { u: 0.0, v: 0.0 };

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Vector2) -> f64 {
        ((other.u - self.u).powi(2) + (other.v - self.v).powi(2)).sqrt()
    }

    /// Returns this point rotated by `angle` radians about `origin`.
    pub fn rotated(&self, angle: f64, origin: Vector2) -> Vector2 {
        let tu = self.u - origin.u;
        let tv = self.v - origin.v;
        Vector2::new(
            origin.u + (tu * angle.cos() - tv * angle.sin()),
            origin.v + (tu * angle.sin() + tv * angle.cos()),
        )
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.u + rhs.u, self.v + rhs.v)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.u - rhs.u, self.v - rhs.v)
    }
}

/// A line segment with endpoints ordered so `start.v <= end.v`.
///
/// The ordering makes the direction vector point into the upper half-plane,
/// which keeps [`Line2::angle`] inside `[0, PI]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line2 {
    start: Vector2,
    end: Vector2,
}

impl Line2 {
    /// Creates a new line, swapping the endpoints if needed to enforce the
    /// ordering invariant.
    pub fn new(a: Vector2, b: Vector2) -> Self {
        if a.v <= b.v {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Lower endpoint (smallest V).
    pub fn start(&self) -> Vector2 {
        self.start
    }

    /// Upper endpoint (largest V).
    pub fn end(&self) -> Vector2 {
        self.end
    }

    /// Direction vector from start to end.
    pub fn direction(&self) -> Vector2 {
        Vector2::new(self.end.u - self.start.u, self.end.v - self.start.v)
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        let d = self.direction();
        (d.u.powi(2) + d.v.powi(2)).sqrt()
    }

    /// Midpoint of the segment.
    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.start.u + self.end.u) / 2.0,
            (self.start.v + self.end.v) / 2.0,
        )
    }

    /// Unsigned angle to the domain's +U axis, in `[0, PI]`.
    pub fn angle(&self) -> f64 {
        let d = self.direction();
        // the ordering invariant guarantees d.v >= 0, so atan2 already
        // lands in [0, PI]
        let angle = d.v.atan2(d.u);
        if angle < 0.0 {
            angle + PI
        } else {
            angle
        }
    }

    /// Tests whether `point` lies on the infinite line through this segment,
    /// using the signed-area-near-zero test.
    pub fn point_on_line(&self, point: Vector2, tolerance: f64) -> bool {
        let a = self.start;
        let b = self.end;
        let c = point;
        ((a.u - c.u) * (b.v - c.v) - (a.v - c.v) * (b.u - c.u)).abs() <= tolerance
    }

    /// Intersection of the two infinite lines through this segment and
    /// `other`, via the 2x2 determinant method.
    ///
    /// Fails with [`PatternError::DegenerateGeometry`] when the lines are
    /// parallel.
    pub fn intersect(&self, other: &Line2) -> Result<Vector2> {
        fn det(a: Vector2, b: Vector2) -> f64 {
            a.u * b.v - a.v * b.u
        }

        let udiff = Vector2::new(
            self.start.u - self.end.u,
            other.start.u - other.end.u,
        );
        let vdiff = Vector2::new(
            self.start.v - self.end.v,
            other.start.v - other.end.v,
        );

        let div = det(udiff, vdiff);
        if div == 0.0 {
            return Err(PatternError::DegenerateGeometry);
        }

        let d = Vector2::new(det(self.start, self.end), det(other.start, other.end));
        Ok(Vector2::new(det(d, udiff) / div, det(d, vdiff) / div))
    }

    /// Returns this line rotated by `angle` radians about `origin`, freshly
    /// re-normalized.
    pub fn rotated(&self, angle: f64, origin: Vector2) -> Line2 {
        Line2::new(
            self.start.rotated(angle, origin),
            self.end.rotated(angle, origin),
        )
    }

    /// Returns this line translated by `-offset` (into a coordinate frame
    /// whose origin sits at `offset`).
    pub fn relative_to(&self, offset: Vector2) -> Line2 {
        Line2::new(self.start - offset, self.end - offset)
    }
}
