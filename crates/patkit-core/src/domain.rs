//! The rectangular repeat domain and its safe-angle catalogue.
//!
//! The domain normalizes a caller-supplied rectangle into an origin plus
//! extent and enumerates every lattice candidate whose repeat span fits the
//! target budget. Matching a line against the catalogue may grow the budget
//! when the caller opted into expansion.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{
    ANGLE_CORR_RATIO, MAX_DETAIL_DOMAIN, MAX_DOMAIN_MULT, MAX_MODEL_DOMAIN, RATIO_RESOLUTION,
};
use crate::error::{PatternError, Result};
use crate::geometry::{Line2, Vector2};
use crate::safe_grid::SafeGrid;

/// Pattern category.
///
/// Model (coarse) patterns repeat in world units and allow a much larger
/// repeat span than drafting (fine) patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternTarget {
    /// Coarse pattern measured in model units.
    Model,
    /// Fine pattern measured in view/sheet units.
    Drafting,
}

impl Default for PatternTarget {
    fn default() -> Self {
        Self::Drafting
    }
}

impl fmt::Display for PatternTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model => write!(f, "MODEL"),
            Self::Drafting => write!(f, "DRAFTING"),
        }
    }
}

impl PatternTarget {
    /// Maximum repeat span budget for this target, in domain units.
    pub fn max_domain(&self) -> f64 {
        match self {
            Self::Model => MAX_MODEL_DOMAIN,
            Self::Drafting => MAX_DETAIL_DOMAIN,
        }
    }
}

/// Dedup key for a tile ratio rounded to [`RATIO_RESOLUTION`] decimals.
fn ratio_key(ratio: f64) -> i64 {
    let factor = 10f64.powi(RATIO_RESOLUTION);
    (ratio * factor).round() as i64
}

/// The rectangular repeat unit in which pattern geometry is authored.
#[derive(Debug, Clone)]
pub struct Domain {
    origin: Vector2,
    extent: Vector2,
    diagonal: Line2,
    u_axis: Line2,
    v_axis: Line2,
    max_domain: f64,
    target_domain: f64,
    expandable: bool,
    safe_grids: Vec<SafeGrid>,
}

impl Domain {
    /// Normalizes the rectangle spanned by two corner points and computes
    /// the initial safe-angle catalogue.
    ///
    /// Fails with [`PatternError::DegenerateDomain`] when the rectangle has
    /// zero width or zero height.
    pub fn new(
        corner_a: Vector2,
        corner_b: Vector2,
        target: PatternTarget,
        expandable: bool,
    ) -> Result<Self> {
        let origin = Vector2::new(corner_a.u.min(corner_b.u), corner_a.v.min(corner_b.v));
        let corner = Vector2::new(corner_a.u.max(corner_b.u), corner_a.v.max(corner_b.v));
        let extent = corner - origin;
        if extent.u == 0.0 || extent.v == 0.0 {
            return Err(PatternError::DegenerateDomain);
        }

        let u_axis = Line2::new(Vector2::ZERO, Vector2::new(extent.u, 0.0));
        let v_axis = Line2::new(Vector2::ZERO, Vector2::new(0.0, extent.v));
        let diagonal = Line2::new(Vector2::ZERO, Vector2::new(extent.u, extent.v));

        let max_domain = target.max_domain();
        let mut domain = Self {
            origin,
            extent,
            diagonal,
            u_axis,
            v_axis,
            max_domain,
            target_domain: max_domain,
            expandable,
            safe_grids: Vec::new(),
        };
        domain.calculate_safe_angles();
        Ok(domain)
    }

    /// Normalized domain origin (per-axis minimum of the input corners).
    pub fn origin(&self) -> Vector2 {
        self.origin
    }

    /// Domain extent (always positive on both axes).
    pub fn extent(&self) -> Vector2 {
        self.extent
    }

    /// The domain diagonal, dividing U-major from V-major tile orientations.
    pub fn diagonal(&self) -> &Line2 {
        &self.diagonal
    }

    /// The U axis of the domain rectangle.
    pub fn u_axis(&self) -> &Line2 {
        &self.u_axis
    }

    /// The V axis of the domain rectangle.
    pub fn v_axis(&self) -> &Line2 {
        &self.v_axis
    }

    /// The current safe-angle catalogue.
    pub fn safe_grids(&self) -> &[SafeGrid] {
        &self.safe_grids
    }

    /// Current enumeration budget (grows under expansion).
    pub fn target_domain(&self) -> f64 {
        self.target_domain
    }

    /// Rebuilds the catalogue for the current target budget.
    fn calculate_safe_angles(&mut self) {
        self.safe_grids.clear();
        let mut processed_ratios: HashSet<i64> = HashSet::new();
        processed_ratios.insert(ratio_key(1.0));

        // the five seeds guarantee a non-empty catalogue for any domain
        let seeds = [
            (1u32, 0u32, false),
            (1, 0, true),
            (1, 1, false),
            (1, 1, true),
            (0, 1, false),
        ];
        for (u_tiles, v_tiles, mirrored) in seeds {
            match SafeGrid::try_new(self.extent, self.diagonal.angle(), u_tiles, v_tiles, mirrored)
            {
                Ok(grid) => self.safe_grids.push(grid),
                Err(err) => warn!(u_tiles, v_tiles, %err, "skipping seed grid"),
            }
        }

        // traverse the tile space
        let mut u_mult = 1u32;
        while self.extent.u * f64::from(u_mult) <= self.target_domain / 2.0 {
            let mut v_mult = 1u32;
            while self.extent.v * f64::from(v_mult) <= self.target_domain / 2.0 {
                let key = ratio_key(f64::from(v_mult) / f64::from(u_mult));
                if !processed_ratios.contains(&key) {
                    let plain =
                        SafeGrid::try_new(self.extent, self.diagonal.angle(), u_mult, v_mult, false);
                    let mirrored =
                        SafeGrid::try_new(self.extent, self.diagonal.angle(), u_mult, v_mult, true);
                    // keep the pair only when both orientations resolve
                    match (plain, mirrored) {
                        (Ok(grid), Ok(twin)) => {
                            self.safe_grids.push(grid);
                            self.safe_grids.push(twin);
                            processed_ratios.insert(key);
                        }
                        _ => warn!(
                            u_tiles = u_mult,
                            v_tiles = v_mult,
                            "skipping safe angle for unresolvable tile ratio"
                        ),
                    }
                }
                v_mult += 1;
            }
            u_mult += 1;
        }

        debug!(
            count = self.safe_grids.len(),
            target = self.target_domain,
            "safe-angle catalogue rebuilt"
        );
    }

    /// Grows the enumeration budget by half the original target and
    /// recomputes the catalogue. Returns false once the cap is reached.
    fn expand(&mut self) -> bool {
        if self.target_domain > self.max_domain * MAX_DOMAIN_MULT {
            return false;
        }
        self.target_domain += self.max_domain / 2.0;
        self.calculate_safe_angles();
        true
    }

    /// Translates a caller line into domain coordinates.
    pub fn to_domain_coords(&self, line: &Line2) -> Line2 {
        line.relative_to(self.origin)
    }

    /// The catalogue entry whose grid angle is numerically closest to
    /// `line_angle`; ties keep the first-seen entry.
    pub fn best_match(&self, line_angle: f64) -> Result<&SafeGrid> {
        let mut best: Option<&SafeGrid> = None;
        let mut best_diff = f64::INFINITY;
        for grid in &self.safe_grids {
            let diff = (grid.grid_angle() - line_angle).abs();
            // strict comparison keeps the first minimum
            if diff < best_diff {
                best_diff = diff;
                best = Some(grid);
            }
        }
        best.ok_or(PatternError::NoSafeAngleFound)
    }

    /// Angular correction the best match would impose on `line_angle`.
    pub fn required_correction(&self, line_angle: f64) -> Result<f64> {
        Ok((line_angle - self.best_match(line_angle)?.grid_angle()).abs())
    }

    /// Resolves the best grid for `line_angle`, expanding the catalogue as
    /// long as the correction stays above tolerance and the budget allows.
    ///
    /// Once the cap is hit the best available match is returned even if it
    /// remains imprecise.
    pub fn best_angle(&mut self, line_angle: f64) -> Result<SafeGrid> {
        if self.expandable {
            while self.required_correction(line_angle)? >= ANGLE_CORR_RATIO {
                if !self.expand() {
                    break;
                }
            }
        }
        self.best_match(line_angle).cloned()
    }
}
