//! Integration tests for the column projector.

use proptest::prelude::*;

use console_raycaster::core::project;
use console_raycaster::types::{ShadeTier, NEAR_EPSILON};

#[test]
fn touching_wall_fills_the_column() {
    for h in [1u16, 24, 40, 101] {
        let p = project(NEAR_EPSILON / 2.0, h, 16.0);
        assert_eq!(p.ceiling, 0);
        assert_eq!(p.floor, h);
        assert_eq!(p.span(), h);
    }
}

#[test]
fn max_depth_is_a_zero_span_background_column() {
    for h in [1u16, 24, 40, 101] {
        let p = project(16.0, h, 16.0);
        assert_eq!(p.ceiling, h / 2);
        assert_eq!(p.floor, h / 2);
        assert_eq!(p.tier, ShadeTier::Background);
        assert_eq!(p.span(), 0);
        assert!((0..h).all(|y| p.glyph_at(y) == ' '));
    }
}

#[test]
fn tier_bands_follow_depth_fractions() {
    let tiers: Vec<_> = [1.0, 4.5, 6.0, 12.0]
        .into_iter()
        .map(|d| project(d, 40, 16.0).tier)
        .collect();
    assert_eq!(
        tiers,
        vec![
            ShadeTier::Full,
            ShadeTier::Dark,
            ShadeTier::Medium,
            ShadeTier::Light
        ]
    );
}

proptest! {
    #[test]
    fn farther_walls_never_get_a_denser_tier(
        a in 0.0f32..16.0,
        b in 0.0f32..16.0,
    ) {
        let (near, far) = if a <= b { (a, b) } else { (b, a) };
        let pn = project(near, 40, 16.0);
        let pf = project(far, 40, 16.0);
        prop_assert!(pn.tier <= pf.tier);
        prop_assert!(pn.span() >= pf.span());
    }

    #[test]
    fn rows_stay_on_screen(d in -4.0f32..40.0, h in 1u16..400) {
        let p = project(d, h, 16.0);
        prop_assert!(p.ceiling <= p.floor);
        prop_assert!(p.floor <= h);
        if d < 16.0 {
            prop_assert_eq!(p.ceiling, h - p.floor);
        }
    }
}
