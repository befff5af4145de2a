//! # patkit
//!
//! Builds CAD fill patterns from line segments. A caller describes a
//! rectangular repeat domain and the segments inside it; patkit derives the
//! minimal set of periodic tiling grids that reproduce those segments as an
//! endlessly repeating fill, then materializes the result into a pattern
//! host or exports it as AutoCAD `.pat` text.
//!
//! ## Architecture
//!
//! patkit is organized as a workspace:
//!
//! 1. **patkit-core** - Geometry, safe-angle catalogue, grid derivation,
//!    hosts, pattern-file serialization
//! 2. **patkit** - Binary that reads JSON pattern definitions and drives
//!    the pipeline

// Re-export the full core surface for main.rs and downstream callers
pub use patkit_core::{
    pat_file, Domain, FillGrid, Grid, InMemoryHost, Line2, LineMerger, NoMerge, Pattern,
    PatternConfig, PatternError, PatternHandle, PatternHost, PatternTarget, RawGrid, Result,
    SafeGrid, Vector2,
};

pub mod types;

pub use types::PatternDefinition;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
