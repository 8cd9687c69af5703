//! Integration scenario: a straight pen-down sweep across the canvas.
//!
//! Drives the default brush (72px, 96 bristles, 153k ink) through 100
//! samples from (0,0) to (500,0) on a 500×500 canvas and checks the
//! contract the board relies on: every sample draws, the pot never runs
//! dry mid-sweep, and the smoothing state stays finite.

use rand::SeedableRng;
use rand::rngs::StdRng;
use sg_core::{Brush, BrushConfig};

#[test]
fn straight_sweep_draws_every_sample_without_exhaustion() {
    let config = BrushConfig::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut brush = Brush::with_rng(&config, 500.0, 500.0, &mut rng);

    brush.down();

    let mut spent_total = 0.0;
    for i in 0..100 {
        let x = 500.0 * i as f32 / 99.0;
        let frame = brush.advance(x, 0.0);

        // Convention: a pen-down, in-bounds sample always yields a frame,
        // including the first one, whose displacement is zero.
        let frame = frame.unwrap_or_else(|| panic!("sample {i} did not draw"));
        spent_total += frame.ink_spent;

        assert!(frame.to.0.is_finite() && frame.to.1.is_finite());
        assert!(!brush.is_exhausted(), "ran dry at sample {i}");
    }

    assert!(spent_total > 0.0, "sweep laid down no ink at all");
    assert!(spent_total < config.ink);
    assert!((brush.remaining_ink() - (config.ink - spent_total)).abs() < 1.0);
}

#[test]
fn sweep_width_reflects_speed_band() {
    // At cruising speed the lift factor sits below zero, so only the most
    // center-weighted bristles paint; early low-speed samples are instead
    // suppressed by the start ramp. Widths therefore peak late in the sweep.
    let mut rng = StdRng::seed_from_u64(42);
    let mut brush = Brush::with_rng(&BrushConfig::default(), 500.0, 500.0, &mut rng);
    brush.down();

    let mut late_painted = 0usize;
    let mut early_painted = 0usize;
    for i in 0..100 {
        let x = 500.0 * i as f32 / 99.0;
        let frame = brush.advance(x, 0.0).expect("pen down, in bounds");
        if i < 20 {
            early_painted += frame.segments.len();
        }
        if i >= 80 {
            late_painted += frame.segments.len();
        }
    }
    assert!(
        late_painted > early_painted,
        "expected the ramped-in tail to paint more bristles ({late_painted} vs {early_painted})"
    );
}
