//! Pattern assembly: transform options, host materialization, `.pat` text.
//!
//! A [`Pattern`] accumulates grids derived from input lines (plus optional
//! raw pass-through descriptors) and renders them through two independent
//! sinks: a host collaborator and the text pattern-file format. Patterns are
//! transient; build, render, discard.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Domain, PatternTarget};
use crate::error::Result;
use crate::geometry::{Line2, Vector2};
use crate::grid::{Grid, LineMerger, NoMerge};
use crate::host::{FillGrid, PatternHandle, PatternHost};
use crate::pat_file;

/// A pre-built grid descriptor supplied directly by the caller.
///
/// Raw grids bypass line derivation entirely: they are only ever uniformly
/// rescaled, never recomputed or mirrored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawGrid {
    /// Grid angle in radians.
    pub angle: f64,
    /// Grid origin in domain units.
    pub origin: Vector2,
    /// Perpendicular row spacing.
    pub offset: f64,
    /// Along-line stagger.
    pub shift: f64,
    /// Alternating draw/gap lengths.
    pub segments: Vec<f64>,
}

/// Name, target, and transform options for one pattern build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Pattern name as shown by the host and written to the file.
    pub name: String,
    /// Coarse (model) or fine (drafting) target.
    #[serde(default)]
    pub target: PatternTarget,
    /// Uniform unit multiplier applied to all exported lengths.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Additional rotation in radians, applied after mirroring.
    #[serde(default)]
    pub rotation: f64,
    /// Mirror across the V axis.
    #[serde(default)]
    pub flip_u: bool,
    /// Mirror across the U axis.
    #[serde(default)]
    pub flip_v: bool,
}

fn default_scale() -> f64 {
    1.0
}

impl PatternConfig {
    /// Creates a config with default transforms (scale 1, no rotation, no
    /// flips).
    pub fn new(name: impl Into<String>, target: PatternTarget) -> Self {
        Self {
            name: name.into(),
            target,
            scale: 1.0,
            rotation: 0.0,
            flip_u: false,
            flip_v: false,
        }
    }
}

enum PatternGrid {
    Derived(Grid),
    Raw(RawGrid),
}

/// One pattern build: a domain, accumulated grids, and transform options.
pub struct Pattern {
    domain: Domain,
    config: PatternConfig,
    grids: Vec<PatternGrid>,
    merger: Box<dyn LineMerger + Send + Sync>,
}

impl Pattern {
    /// Creates an empty pattern over `domain` with the default (no-merge)
    /// line strategy.
    pub fn new(domain: Domain, config: PatternConfig) -> Self {
        Self {
            domain,
            config,
            grids: Vec::new(),
            merger: Box::new(NoMerge),
        }
    }

    /// Replaces the line-merge strategy.
    pub fn with_merger(mut self, merger: Box<dyn LineMerger + Send + Sync>) -> Self {
        self.merger = merger;
        self
    }

    /// Pattern name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Pattern target category.
    pub fn target(&self) -> PatternTarget {
        self.config.target
    }

    /// The domain this pattern was authored in.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Number of accumulated grids.
    pub fn grid_count(&self) -> usize {
        self.grids.len()
    }

    /// Adds one input line (in caller coordinates), deriving a new grid
    /// unless an existing grid absorbs it through the merge strategy.
    pub fn append_line(&mut self, line: Line2) -> Result<()> {
        let domain_line = self.domain.to_domain_coords(&line);
        debug!(?domain_line, "appending pattern line");

        for grid in &mut self.grids {
            if let PatternGrid::Derived(grid) = grid {
                if self.merger.adopt_line(grid, &domain_line) {
                    return Ok(());
                }
            }
        }

        let grid = Grid::from_line(&mut self.domain, domain_line)?;
        self.grids.push(PatternGrid::Derived(grid));
        Ok(())
    }

    /// Adds a pre-built grid descriptor to pass through with scaling only.
    pub fn append_raw_grid(&mut self, raw: RawGrid) {
        self.grids.push(PatternGrid::Raw(raw));
    }

    /// Projects every accumulated grid into host export values, applying
    /// scale, rotation, and the mirror sign tables.
    pub fn fill_grids(&self) -> Vec<FillGrid> {
        self.grids
            .iter()
            .map(|grid| match grid {
                PatternGrid::Derived(grid) => self.project_grid(grid),
                PatternGrid::Raw(raw) => self.scale_raw(raw),
            })
            .collect()
    }

    fn project_grid(&self, grid: &Grid) -> FillGrid {
        let scale = self.config.scale;
        // a net mirror reverses rotation handedness
        let rotation = if self.config.flip_u != self.config.flip_v {
            -self.config.rotation
        } else {
            self.config.rotation
        };

        let mut angle = match (self.config.flip_u, self.config.flip_v) {
            (true, true) => PI + grid.angle(),
            (true, false) => PI - grid.angle(),
            (false, true) => -grid.angle(),
            (false, false) => grid.angle(),
        };
        angle += rotation;

        let origin = grid.origin();
        let origin = Vector2::new(
            if self.config.flip_u { -origin.u } else { origin.u },
            if self.config.flip_v { -origin.v } else { origin.v },
        );
        let origin = if rotation != 0.0 {
            origin.rotated(rotation, Vector2::ZERO)
        } else {
            origin
        };

        let offset = if self.config.flip_u != self.config.flip_v {
            -grid.offset()
        } else {
            grid.offset()
        };

        FillGrid {
            angle,
            origin: Vector2::new(origin.u * scale, origin.v * scale),
            offset: offset * scale,
            shift: grid.shift() * scale,
            segments: grid.segments().iter().map(|seg| seg * scale).collect(),
        }
    }

    fn scale_raw(&self, raw: &RawGrid) -> FillGrid {
        let scale = self.config.scale;
        FillGrid {
            angle: raw.angle,
            origin: Vector2::new(raw.origin.u * scale, raw.origin.v * scale),
            offset: raw.offset * scale,
            shift: raw.shift * scale,
            segments: raw.segments.iter().map(|seg| seg * scale).collect(),
        }
    }

    /// Materializes the pattern in the host, replacing any existing pattern
    /// with the same name and target.
    pub fn create_in_host(&self, host: &mut dyn PatternHost) -> Result<PatternHandle> {
        host.create_or_update(&self.config.name, self.config.target, &self.fill_grids())
    }

    /// Renders the pattern-file text blob.
    ///
    /// The text sink applies scale only; flips and rotation belong to the
    /// host projection.
    pub fn to_pat_string(&self) -> String {
        let mut out = pat_file::header(&self.config.name, self.config.target, self.config.scale);
        for grid in &self.grids {
            let line = match grid {
                PatternGrid::Derived(grid) => pat_file::grid_line(
                    grid.angle(),
                    grid.origin(),
                    grid.shift(),
                    grid.offset(),
                    &grid.segments(),
                    self.config.scale,
                ),
                PatternGrid::Raw(raw) => pat_file::grid_line(
                    raw.angle,
                    raw.origin,
                    raw.shift,
                    raw.offset,
                    &raw.segments,
                    self.config.scale,
                ),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    /// Writes `<name>.pat` into `dir` and returns the full path.
    pub fn write_pat_file(&self, dir: &Path) -> Result<PathBuf> {
        let stem = pat_file::sanitize_file_name(&self.config.name);
        let path = dir.join(format!("{stem}.pat"));
        debug!(path = %path.display(), "exporting pattern file");
        std::fs::write(&path, self.to_pat_string())?;
        Ok(path)
    }
}
