//! # patkit-core
//!
//! Derives the minimal set of periodic tiling-grid descriptors that
//! reproduce a handful of line segments as an endlessly repeating 2D fill
//! pattern, and serializes the result to the AutoCAD `.pat` format used by
//! mainstream CAD tools.
//!
//! The pipeline: a caller supplies a repeat-domain rectangle plus line
//! segments; [`Domain`] enumerates the catalogue of safe lattice angles;
//! each line is matched against the catalogue to produce a [`Grid`]; grids
//! accumulate into a [`Pattern`] which renders either into a
//! [`PatternHost`] or as pattern-file text.

pub mod constants;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod host;
pub mod pat_file;
pub mod pattern;
pub mod safe_grid;

pub use domain::{Domain, PatternTarget};
pub use error::{PatternError, Result};
pub use geometry::{Line2, Vector2};
pub use grid::{Grid, LineMerger, NoMerge};
pub use host::{FillGrid, InMemoryHost, PatternHandle, PatternHost};
pub use pattern::{Pattern, PatternConfig, RawGrid};
pub use safe_grid::SafeGrid;
