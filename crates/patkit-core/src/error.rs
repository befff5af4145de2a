//! Error types for pattern grid derivation and export.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;

use thiserror::Error;

/// Errors that can occur while deriving or rendering a pattern.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The domain rectangle has zero width or zero height.
    #[error("Degenerate domain: extent is zero along at least one axis")]
    DegenerateDomain,

    /// An intersection was requested for parallel lines.
    #[error("Lines are parallel and do not intersect")]
    DegenerateGeometry,

    /// No lattice point recurs on the offset axis for this tile ratio,
    /// so the candidate grid cannot repeat losslessly.
    #[error("No repeating lattice point for tile ratio {u_tiles}:{v_tiles}")]
    UnresolvableLattice {
        /// Tile count along the U axis.
        u_tiles: u32,
        /// Tile count along the V axis.
        v_tiles: u32,
    },

    /// The safe-angle catalogue is empty; matching cannot proceed.
    #[error("No safe angle available for matching")]
    NoSafeAngleFound,

    /// The derived dash/gap pair has a negative gap.
    #[error("Invalid segment pair: pen length {pen} exceeds grid span {span}")]
    InvalidSegmentPair {
        /// Length of the drawn (pen-down) segment.
        pen: f64,
        /// Full repeat span of the matched grid.
        span: f64,
    },

    /// The host collaborator rejected the pattern.
    #[error("Host materialization failed: {0}")]
    HostMaterialization(String),

    /// I/O error while writing the pattern file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for pattern operations.
pub type Result<T> = std::result::Result<T, PatternError>;
