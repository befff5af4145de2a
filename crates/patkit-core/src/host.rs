//! Host materialization sink.
//!
//! The CAD host is modeled as an opaque collaborator that owns pattern
//! objects keyed by name and target. [`InMemoryHost`] stands in for a real
//! host in tests and dry runs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::PatternTarget;
use crate::error::Result;
use crate::geometry::Vector2;

/// Final export values for one grid, after scale, rotation, and mirror
/// adjustments have been applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillGrid {
    /// Grid angle in radians.
    pub angle: f64,
    /// Grid origin in export units.
    pub origin: Vector2,
    /// Perpendicular row spacing in export units.
    pub offset: f64,
    /// Along-line stagger in export units.
    pub shift: f64,
    /// Alternating draw/gap lengths in export units.
    pub segments: Vec<f64>,
}

/// Opaque identifier for a host-resident pattern object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternHandle(pub u64);

/// External sink that owns at most one pattern object per (name, target).
pub trait PatternHost {
    /// Creates a pattern under `(name, target)`, or replaces the grid set of
    /// an existing one. Must be idempotent under repeated calls.
    fn create_or_update(
        &mut self,
        name: &str,
        target: PatternTarget,
        grids: &[FillGrid],
    ) -> Result<PatternHandle>;

    /// Host-side convenience: derive a filled-region style referencing the
    /// pattern. Hosts without the concept ignore the call.
    fn create_filled_region(&mut self, _handle: PatternHandle) -> Result<()> {
        Ok(())
    }
}

/// Host stand-in that keeps patterns in memory.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    next_handle: u64,
    patterns: HashMap<(String, PatternTarget), (PatternHandle, Vec<FillGrid>)>,
    filled_regions: Vec<PatternHandle>,
}

impl InMemoryHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the grid set stored under `(name, target)`.
    pub fn get(&self, name: &str, target: PatternTarget) -> Option<&[FillGrid]> {
        self.patterns
            .get(&(name.to_string(), target))
            .map(|(_, grids)| grids.as_slice())
    }

    /// Number of distinct patterns held.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no pattern has been materialized yet.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Handles of the filled regions created so far.
    pub fn filled_regions(&self) -> &[PatternHandle] {
        &self.filled_regions
    }
}

impl PatternHost for InMemoryHost {
    fn create_or_update(
        &mut self,
        name: &str,
        target: PatternTarget,
        grids: &[FillGrid],
    ) -> Result<PatternHandle> {
        let key = (name.to_string(), target);
        if let Some((handle, existing)) = self.patterns.get_mut(&key) {
            *existing = grids.to_vec();
            debug!(name, %target, "updated existing pattern");
            Ok(*handle)
        } else {
            self.next_handle += 1;
            let handle = PatternHandle(self.next_handle);
            self.patterns.insert(key, (handle, grids.to_vec()));
            debug!(name, %target, "created pattern");
            Ok(handle)
        }
    }

    fn create_filled_region(&mut self, handle: PatternHandle) -> Result<()> {
        self.filled_regions.push(handle);
        Ok(())
    }
}
