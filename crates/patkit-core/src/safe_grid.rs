//! Candidate periodic lattices derived from integer tile ratios.
//!
//! A [`SafeGrid`] describes one way of repeating a line across the plane so
//! the repeats land exactly on copies of the domain rectangle: an axis angle
//! fixed by the tile ratio, the repeat span along that axis, the
//! perpendicular offset between adjacent rows, and the along-line shift
//! between successive rows.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::constants::ZERO_TOL;
use crate::error::{PatternError, Result};
use crate::geometry::{Line2, Vector2};

/// A candidate periodic lattice for an integer tile ratio plus mirror flag.
///
/// Construction resolves all derived quantities eagerly; a ratio whose shift
/// cannot be resolved never yields a value.
#[derive(Debug, Clone)]
pub struct SafeGrid {
    u_tiles: u32,
    v_tiles: u32,
    mirrored: bool,
    axis_line: Line2,
    // orientation-dependent parameters; for V-major grids the U/V roles of
    // tile counts and domain extents are swapped
    angle: f64,
    eff_u_tiles: u32,
    eff_v_tiles: u32,
    domain_u: f64,
    domain_v: f64,
    offset_direction: f64,
    shift: f64,
}

impl SafeGrid {
    /// Builds the lattice candidate for `u_tiles : v_tiles` over a domain
    /// with the given extent and diagonal angle.
    ///
    /// Fails with [`PatternError::UnresolvableLattice`] when no lattice
    /// point recurs on the offset axis within the tile bounds.
    pub fn try_new(
        extent: Vector2,
        diag_angle: f64,
        u_tiles: u32,
        v_tiles: u32,
        mirrored: bool,
    ) -> Result<Self> {
        let axis_line = Line2::new(
            Vector2::ZERO,
            Vector2::new(extent.u * u_tiles as f64, extent.v * v_tiles as f64),
        );

        let axis_angle = axis_line.angle();
        let (angle, eff_u_tiles, eff_v_tiles, domain_u, domain_v, offset_direction);
        if axis_angle <= diag_angle {
            // U-major tile orientation
            offset_direction = if mirrored { 1.0 } else { -1.0 };
            angle = axis_angle;
            eff_u_tiles = u_tiles;
            eff_v_tiles = v_tiles;
            domain_u = extent.u;
            domain_v = extent.v;
        } else {
            // V-major: swap the U/V roles
            offset_direction = if mirrored { -1.0 } else { 1.0 };
            angle = if mirrored {
                axis_angle - FRAC_PI_2
            } else {
                FRAC_PI_2 - axis_angle
            };
            eff_u_tiles = v_tiles;
            eff_v_tiles = u_tiles;
            domain_u = extent.v;
            domain_v = extent.u;
        }

        let mut grid = Self {
            u_tiles,
            v_tiles,
            mirrored,
            axis_line,
            angle,
            eff_u_tiles,
            eff_v_tiles,
            domain_u,
            domain_v,
            offset_direction,
            shift: 0.0,
        };
        grid.shift = grid.resolve_shift()?;
        Ok(grid)
    }

    /// Tile count along U.
    pub fn u_tiles(&self) -> u32 {
        self.u_tiles
    }

    /// Tile count along V.
    pub fn v_tiles(&self) -> u32 {
        self.v_tiles
    }

    /// Whether this is the mirrored twin of the ratio.
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// The lattice angle this grid occupies, in `[0, PI]`.
    pub fn grid_angle(&self) -> f64 {
        if self.mirrored {
            PI - self.axis_line.angle()
        } else {
            self.axis_line.angle()
        }
    }

    /// Length of one full repeat period along the grid axis.
    pub fn span(&self) -> f64 {
        self.axis_line.length()
    }

    /// Perpendicular spacing between adjacent repeated rows, signed by the
    /// tile orientation and mirror flag.
    pub fn offset(&self) -> f64 {
        if self.angle == 0.0 {
            self.domain_v * self.offset_direction
        } else {
            (self.domain_u * self.angle.sin() / self.eff_v_tiles as f64).abs()
                * self.offset_direction
        }
    }

    /// Along-line stagger between successive repeated rows.
    pub fn shift(&self) -> f64 {
        self.shift
    }

    fn resolve_shift(&self) -> Result<f64> {
        if self.angle == 0.0 {
            return Ok(0.0);
        }
        if self.eff_u_tiles == 1 && self.eff_v_tiles == 1 {
            return Ok((self.domain_u * self.angle.cos()).abs());
        }

        // translate the idealized tile diagonal sideways by one offset and
        // walk the lattice for the first point that recurs on it
        let offset = self.offset();
        let offset_vector = Vector2::new(
            (offset * self.angle.sin()).abs(),
            -(offset * self.angle.cos()).abs(),
        );
        let axis_end = Vector2::new(
            self.domain_u * self.eff_u_tiles as f64,
            self.domain_v * self.eff_v_tiles as f64,
        );
        let offset_axis = Line2::new(Vector2::ZERO + offset_vector, axis_end + offset_vector);

        for i in 0..self.eff_u_tiles {
            for j in 0..self.eff_v_tiles {
                let lattice_point =
                    Vector2::new(self.domain_u * i as f64, self.domain_v * j as f64);
                if offset_axis.point_on_line(lattice_point, ZERO_TOL) {
                    return Ok(offset_axis.start().distance_to(lattice_point));
                }
            }
        }

        Err(PatternError::UnresolvableLattice {
            u_tiles: self.u_tiles,
            v_tiles: self.v_tiles,
        })
    }
}
