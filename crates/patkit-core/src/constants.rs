//! Numeric tolerances and search budgets for grid derivation.

/// Values within this tolerance of zero are treated as exact zeros.
pub const ZERO_TOL: f64 = 5e-6;

/// Fractional digits kept on every stored coordinate.
pub const COORD_RESOLUTION: u32 = 16;

/// Largest repeat span for model (coarse) patterns, in domain units.
/// 0.5 < MODEL < 848.5 inches, source: http://hatchkit.com.au/faq.php#Tip7
pub const MAX_MODEL_DOMAIN: f64 = 100.0;

/// Largest repeat span for drafting (fine) patterns.
/// 0.002 < DRAFTING < 84.85 inches
pub const MAX_DETAIL_DOMAIN: f64 = MAX_MODEL_DOMAIN / 10.0;

/// Expansion cap, as a multiple of the initial target span.
pub const MAX_DOMAIN_MULT: f64 = 8.0;

/// Decimal places used when deduplicating tile ratios.
pub const RATIO_RESOLUTION: i32 = 2;

/// Angular correction below which a matched grid is accepted without
/// expanding the search space.
pub const ANGLE_CORR_RATIO: f64 = 0.01;
