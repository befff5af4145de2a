//! Property tests for matching determinism and transform symmetries.

use std::f64::consts::{PI, TAU};

use proptest::prelude::*;

use patkit_core::{Domain, Line2, Pattern, PatternConfig, PatternTarget, Vector2};

fn unit_domain() -> Domain {
    Domain::new(
        Vector2::ZERO,
        Vector2::new(1.0, 1.0),
        PatternTarget::Drafting,
        false,
    )
    .unwrap()
}

/// A short dash through the domain center at the given angle.
fn dash_at(angle: f64) -> Line2 {
    let center = Vector2::new(0.5, 0.5);
    let dir = Vector2::new(0.2 * angle.cos(), 0.2 * angle.sin());
    Line2::new(center - dir, center + dir)
}

fn pattern_with(flip_u: bool, flip_v: bool, angle: f64) -> Pattern {
    let mut config = PatternConfig::new("prop", PatternTarget::Drafting);
    config.flip_u = flip_u;
    config.flip_v = flip_v;
    let mut pattern = Pattern::new(unit_domain(), config);
    pattern.append_line(dash_at(angle)).unwrap();
    pattern
}

proptest! {
    #[test]
    fn best_match_is_deterministic(angle in 0.0..PI) {
        let domain = unit_domain();
        let first = domain.best_match(angle).unwrap().grid_angle();
        let second = domain.best_match(angle).unwrap().grid_angle();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn catalogue_angles_stay_in_range(u in 0.1..5.0f64, v in 0.1..5.0f64) {
        let domain = Domain::new(
            Vector2::ZERO,
            Vector2::new(u, v),
            PatternTarget::Drafting,
            false,
        ).unwrap();
        prop_assert!(!domain.safe_grids().is_empty());
        for grid in domain.safe_grids() {
            prop_assert!(grid.grid_angle() >= 0.0);
            prop_assert!(grid.grid_angle() <= PI + 1e-12);
            prop_assert!(grid.span() > 0.0);
            prop_assert!(grid.shift() >= 0.0);
        }
    }

    #[test]
    fn double_mirror_is_an_involution(angle in 0.05..3.0f64) {
        let plain = pattern_with(false, false, angle).fill_grids();
        let both = pattern_with(true, true, angle).fill_grids();

        // both flips advance the angle by PI; a second application lands
        // back on the unflipped value modulo a full turn
        let twice = (both[0].angle + PI).rem_euclid(TAU);
        let base = plain[0].angle.rem_euclid(TAU);
        prop_assert!((twice - base).abs() < 1e-9 || (twice - base).abs() > TAU - 1e-9);

        // origin and offset are untouched by the double mirror
        prop_assert!((both[0].origin.u - plain[0].origin.u).abs() < 1e-9);
        prop_assert!((both[0].origin.v - plain[0].origin.v).abs() < 1e-9);
        prop_assert!((both[0].offset - plain[0].offset).abs() < 1e-9);
        prop_assert_eq!(both[0].shift, plain[0].shift);
    }

    #[test]
    fn single_flip_negates_offset(angle in 0.05..3.0f64) {
        let plain = pattern_with(false, false, angle).fill_grids();
        let flipped_u = pattern_with(true, false, angle).fill_grids();
        let flipped_v = pattern_with(false, true, angle).fill_grids();

        prop_assert!((flipped_u[0].offset + plain[0].offset).abs() < 1e-9);
        prop_assert!((flipped_v[0].offset + plain[0].offset).abs() < 1e-9);
    }
}
