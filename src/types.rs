//! Application-level types for the root crate.

use serde::{Deserialize, Serialize};
use tracing::warn;

use patkit_core::{Domain, Line2, Pattern, PatternConfig, PatternTarget, RawGrid, Vector2};

fn default_scale() -> f64 {
    1.0
}

/// A complete pattern build request, as read from a JSON definition file.
///
/// Coordinates are `[u, v]` pairs in domain units; lines are
/// `[[start], [end]]` pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternDefinition {
    /// Pattern name.
    pub name: String,
    /// Coarse (model) or fine (drafting) target.
    #[serde(default)]
    pub target: PatternTarget,
    /// Two opposite corners of the repeat-domain rectangle.
    pub domain: [[f64; 2]; 2],
    /// Line segments to derive grids from.
    #[serde(default)]
    pub lines: Vec<[[f64; 2]; 2]>,
    /// Pre-built grid descriptors passed through with scaling only.
    #[serde(default)]
    pub raw_grids: Vec<RawGrid>,
    /// Uniform export scale.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Additional rotation in radians.
    #[serde(default)]
    pub rotation: f64,
    /// Mirror across the V axis.
    #[serde(default)]
    pub flip_u: bool,
    /// Mirror across the U axis.
    #[serde(default)]
    pub flip_v: bool,
    /// Allow the safe-angle search space to grow for better matches.
    #[serde(default)]
    pub allow_expansion: bool,
    /// Ask the host for a filled-region style referencing the pattern.
    #[serde(default)]
    pub create_filled_region: bool,
}

impl PatternDefinition {
    /// Builds the pattern: normalizes the domain, derives one grid per line,
    /// and attaches the raw pass-through grids.
    ///
    /// Lines that fail to derive a grid are skipped with a warning; they do
    /// not abort their siblings.
    pub fn build(&self) -> patkit_core::Result<Pattern> {
        let domain = Domain::new(
            Vector2::new(self.domain[0][0], self.domain[0][1]),
            Vector2::new(self.domain[1][0], self.domain[1][1]),
            self.target,
            self.allow_expansion,
        )?;

        let config = PatternConfig {
            name: self.name.clone(),
            target: self.target,
            scale: self.scale,
            rotation: self.rotation,
            flip_u: self.flip_u,
            flip_v: self.flip_v,
        };

        let mut pattern = Pattern::new(domain, config);
        for [start, end] in &self.lines {
            let line = Line2::new(
                Vector2::new(start[0], start[1]),
                Vector2::new(end[0], end[1]),
            );
            if let Err(err) = pattern.append_line(line) {
                warn!(?line, %err, "skipping pattern line");
            }
        }
        for raw in &self.raw_grids {
            pattern.append_raw_grid(raw.clone());
        }
        Ok(pattern)
    }
}
