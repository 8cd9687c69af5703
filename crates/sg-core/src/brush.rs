//! The bristle-brush simulation.
//!
//! A brush is a fixed fan of weighted bristle offsets plus three exponential
//! smoothing filters: one on the pointer path, one on a frame-to-frame
//! velocity proxy (the "lift"), and one decaying ramp that fades the stroke
//! in after pen-down. Each pointer sample yields at most one [`StrokeFrame`]:
//! a bundle of per-bristle line segments for the renderer, plus the ink that
//! stroke cost. The brush never touches pixels itself.

use crate::model::BrushConfig;
use crate::sampler::centered_sample;
use rand::Rng;
use std::f32::consts::PI;

/// Speed band mapped onto the lift factor. Speeds are post-compression
/// (double square root), so the usable band is narrow.
const MIN_SPEED: f32 = 1.0;
const MAX_SPEED: f32 = 2.7;

/// The stroke thickens as ink runs out, ramping toward `INK_FADE_CEILING`
/// extra units over the last `INK_FADE_WINDOW` ink units.
const INK_FADE_WINDOW: f32 = 3000.0;
const INK_FADE_CEILING: f32 = 1.5;

/// The start ramp counts double against stroke width while it decays.
const START_RAMP_GAIN: f32 = 2.0;

/// One bristle: an offset from the brush center and a signed width weight.
/// Fixed at construction. Bristles with weights near the tails can go
/// negative; they only show up once the lift/fade terms lift them above zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BristlePoint {
    pub dx: f32,
    pub dy: f32,
    pub weight: f32,
}

/// One round-capped line segment to draw, already offset by its bristle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BristleSegment {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub width: f32,
}

/// The drawable output of one `advance` call.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeFrame {
    /// Smoothed stroke endpoints (brush center).
    pub from: (f32, f32),
    pub to: (f32, f32),
    /// Segments for the bristles whose effective width came out positive.
    /// May be empty: the sample still counted as drawn, just invisibly.
    pub segments: Vec<BristleSegment>,
    /// Ink consumed by this frame.
    pub ink_spent: f32,
}

/// A simulated paintbrush bound to a canvas rectangle.
pub struct Brush {
    bristles: Vec<BristlePoint>,
    color: crate::model::Color,

    /// Canvas bounds; segments with an endpoint outside are dropped.
    width: f32,
    height: f32,

    // Smoothing factors and their complements.
    path_mix: f32,
    path_keep: f32,
    lift_mix: f32,
    lift_keep: f32,
    ramp_keep: f32,

    prev_pos: (f32, f32),
    prev_vel: (f32, f32),
    is_down: bool,
    start_ramp: f32,
    ink: f32,
    ink_budget: f32,
}

impl Brush {
    /// Build a brush with the thread RNG. See [`Brush::with_rng`].
    pub fn new(config: &BrushConfig, width: f32, height: f32) -> Self {
        Self::with_rng(config, width, height, &mut rand::thread_rng())
    }

    /// Build a brush for a `width` × `height` canvas, generating
    /// `config.bristles` bristle points from `rng`.
    ///
    /// Each bristle sits at a radial distance `centered_sample * diameter/2`
    /// from the center, at a uniform angle over a half turn (the half turn is
    /// intentional: it fans the bristles instead of ringing them). Its weight
    /// is `((1 - |sample|) - 0.5) * 2`, so center-heavy bristles paint wide
    /// and tail bristles start below zero.
    pub fn with_rng<R: Rng + ?Sized>(
        config: &BrushConfig,
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Self {
        let half = config.diameter / 2.0;
        let mut bristles = Vec::with_capacity(config.bristles as usize);
        for _ in 0..config.bristles {
            let central = centered_sample(rng, config.centered);
            let ang = rng.r#gen::<f32>() * PI;
            let mut weight = ((1.0 - central.abs()) - 0.5) * 2.0;
            if config.weight_jitter > 0.0 {
                weight *= 1.0 + config.weight_jitter * (rng.r#gen::<f32>() * 2.0 - 1.0);
            }
            bristles.push(BristlePoint {
                dx: ang.cos() * central * half,
                dy: ang.sin() * central * half,
                weight,
            });
        }
        log::debug!(
            "brush: {} bristles over {}px, ink {}",
            bristles.len(),
            config.diameter,
            config.ink
        );

        Self {
            bristles,
            color: config.color,
            width,
            height,
            path_mix: config.smoothing,
            path_keep: 1.0 - config.smoothing,
            lift_mix: config.lift_smoothing,
            lift_keep: 1.0 - config.lift_smoothing,
            ramp_keep: 1.0 - config.start_smoothing,
            prev_pos: (0.0, 0.0),
            prev_vel: (0.0, 0.0),
            is_down: false,
            start_ramp: 0.0,
            ink: config.ink,
            ink_budget: config.ink,
        }
    }

    /// Pen down. The start ramp resets to 1, so the stroke fades in from
    /// nothing instead of landing at full width.
    pub fn down(&mut self) {
        self.is_down = true;
        self.start_ramp = 1.0;
    }

    /// Pen up. The transition sample itself draws nothing.
    pub fn up(&mut self) {
        self.is_down = false;
    }

    /// Feed one pointer sample in canvas coordinates.
    ///
    /// The smoothed position and velocity update on every call, pen up or
    /// down, so a gesture resumed mid-motion stays continuous. A frame comes
    /// back only when the pen is down, ink remains, and both smoothed
    /// endpoints are inside the canvas; otherwise `None`, with no ink spent.
    ///
    /// A pen-down call with zero displacement still returns a frame (the
    /// round caps render as dots), including the first sample of a stroke.
    pub fn advance(&mut self, x: f32, y: f32) -> Option<StrokeFrame> {
        let (px, py) = self.prev_pos;
        let nx = px * self.path_keep + x * self.path_mix;
        let ny = py * self.path_keep + y * self.path_mix;

        // Frame displacement stands in for velocity; there is no dt, so the
        // feel is frame-rate dependent on purpose.
        let vx = self.prev_vel.0 * self.lift_keep + (nx - px) * self.lift_mix;
        let vy = self.prev_vel.1 * self.lift_keep + (ny - py) * self.lift_mix;

        self.prev_vel = (vx, vy);
        self.prev_pos = (nx, ny);

        if !self.is_down || self.ink <= 0.0 {
            return None;
        }

        // Either endpoint off-canvas drops the whole sample before any ink
        // is spent. Smoothing state above already advanced.
        for ex in [nx, px] {
            if ex < 0.0 || ex > self.width {
                return None;
            }
        }
        for ey in [ny, py] {
            if ey < 0.0 || ey > self.height {
                return None;
            }
        }

        // Compress speed hard, then map the band onto the lift factor.
        // Slow motion maps to 1 (thick); fast motion goes negative without a
        // lower clamp and can thin the stroke to nothing.
        let spd = (vx * vx + vy * vy).sqrt().sqrt();
        let lift = (((spd - MIN_SPEED) / (MAX_SPEED - MIN_SPEED)) * -2.0 + 1.0).min(1.0);

        self.start_ramp *= self.ramp_keep;
        let mut fade = self.start_ramp * START_RAMP_GAIN;
        fade += INK_FADE_CEILING - (self.ink / INK_FADE_WINDOW).min(INK_FADE_CEILING);

        let size_factor = lift - fade;

        let dx = nx - px;
        let dy = ny - py;
        let len = (dx * dx + dy * dy).sqrt();

        let mut segments = Vec::with_capacity(self.bristles.len());
        let mut spent = 0.0;
        for pt in &self.bristles {
            let w = pt.weight + size_factor;
            if w <= 0.0 {
                continue;
            }
            segments.push(BristleSegment {
                x0: pt.dx + px,
                y0: pt.dy + py,
                x1: pt.dx + nx,
                y1: pt.dy + ny,
                width: w,
            });
            spent += len * w;
        }

        self.ink -= spent;
        if self.ink <= 0.0 {
            log::debug!("brush ink exhausted");
        }

        Some(StrokeFrame {
            from: (px, py),
            to: (nx, ny),
            segments,
            ink_spent: spent,
        })
    }

    pub fn bristles(&self) -> &[BristlePoint] {
        &self.bristles
    }

    pub fn color(&self) -> crate::model::Color {
        self.color
    }

    pub fn is_down(&self) -> bool {
        self.is_down
    }

    /// Remaining ink. Goes negative on the exhausting frame; negative means
    /// exhausted, not an error.
    pub fn remaining_ink(&self) -> f32 {
        self.ink
    }

    pub fn ink_budget(&self) -> f32 {
        self.ink_budget
    }

    pub fn is_exhausted(&self) -> bool {
        self.ink <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BrushConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn test_brush(seed: u64) -> Brush {
        let mut rng = StdRng::seed_from_u64(seed);
        Brush::with_rng(&BrushConfig::default(), 500.0, 500.0, &mut rng)
    }

    #[test]
    fn bristle_count_and_radius_honor_config() {
        let config = BrushConfig::default();
        let brush = test_brush(1);
        assert_eq!(brush.bristles().len(), config.bristles as usize);

        let half = config.diameter / 2.0;
        for pt in brush.bristles() {
            let r = (pt.dx * pt.dx + pt.dy * pt.dy).sqrt();
            assert!(r <= half + 1e-3, "bristle at radius {r} exceeds {half}");
            assert!(pt.weight >= -1.0 && pt.weight <= 1.0);
        }
    }

    #[test]
    fn bristles_fan_over_a_half_turn() {
        // Angles are drawn from [0, π), so offset.dy keeps the sign of the
        // radial sample: positive-sample bristles sit at or below center.
        let brush = test_brush(2);
        assert!(brush.bristles().iter().any(|pt| pt.dy > 0.0));
        assert!(brush.bristles().iter().any(|pt| pt.dy < 0.0));
    }

    #[test]
    fn weight_jitter_perturbs_weights() {
        let config = BrushConfig {
            weight_jitter: 0.10,
            ..BrushConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let brush = Brush::with_rng(&config, 500.0, 500.0, &mut rng);
        for pt in brush.bristles() {
            assert!(pt.weight.abs() <= 1.10 + 1e-3);
        }
    }

    #[test]
    fn ink_never_increases_while_down_and_never_moves_while_up() {
        let mut brush = test_brush(3);

        // Pen up: smoothing state moves, ink does not.
        let budget = brush.remaining_ink();
        for i in 0..20 {
            assert!(brush.advance(100.0 + i as f32, 100.0).is_none());
        }
        assert_eq!(brush.remaining_ink(), budget);

        brush.down();
        let mut last = brush.remaining_ink();
        for i in 0..200 {
            let t = i as f32 * 0.1;
            brush.advance(250.0 + 80.0 * t.cos(), 250.0 + 80.0 * t.sin());
            let now = brush.remaining_ink();
            assert!(now <= last, "ink went up: {last} -> {now}");
            last = now;
        }
    }

    #[test]
    fn out_of_bounds_sample_draws_nothing_and_spends_nothing() {
        let mut brush = test_brush(4);
        brush.down();
        let before = brush.remaining_ink();

        // Smoothed position chases a far-out-of-bounds target, so the new
        // endpoint leaves the canvas immediately.
        assert!(brush.advance(-4000.0, 250.0).is_none());
        assert!(brush.advance(-4000.0, 250.0).is_none());
        assert_eq!(brush.remaining_ink(), before);

        // Smoothing stayed live through the dropped samples.
        assert!(brush.prev_pos.0 < 0.0);
        assert!(brush.prev_pos.0.is_finite() && brush.prev_vel.0.is_finite());
    }

    #[test]
    fn start_ramp_widens_the_stroke_monotonically() {
        let mut brush = test_brush(6);
        brush.down();

        // Constant input: lift pins at its clamp and the ink fade term is
        // negligible against a full pot, so width growth isolates the ramp.
        let mut widest_so_far = f32::MIN;
        for _ in 0..60 {
            let frame = brush.advance(250.0, 250.0).expect("in bounds, pen down");
            let widest = frame
                .segments
                .iter()
                .map(|s| s.width)
                .fold(f32::MIN, f32::max);
            assert!(
                widest >= widest_so_far - 1e-4,
                "taper-in went backwards: {widest_so_far} -> {widest}"
            );
            widest_so_far = widest;
        }
        assert!(widest_so_far > 0.0, "ramp never lifted any bristle");
    }

    #[test]
    fn exhaustion_is_terminal_for_drawing_but_not_for_state() {
        let config = BrushConfig {
            ink: 2_000.0,
            ..BrushConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut brush = Brush::with_rng(&config, 500.0, 500.0, &mut rng);
        brush.down();

        // Creep around a circle: slow motion keeps the lift factor at its
        // clamp, so almost every bristle paints and the pot drains fast.
        let mut draws = 0;
        for i in 0..10_000 {
            let t = i as f32 * 0.01;
            let drew = brush
                .advance(250.0 + 100.0 * t.cos(), 250.0 + 100.0 * t.sin())
                .is_some();
            if brush.is_exhausted() {
                // The exhausting call itself drew; everything after must not.
                if drew {
                    draws += 1;
                }
                break;
            }
            assert!(drew);
            draws += 1;
        }
        assert!(brush.is_exhausted(), "never ran out of {} ink", config.ink);
        assert!(draws > 1);

        for i in 0..10 {
            assert!(brush.advance(250.0 + i as f32, 250.0).is_none());
        }
        assert!(brush.prev_pos.0.is_finite());
    }

    #[test]
    fn smoothed_state_stays_finite() {
        let mut brush = test_brush(8);
        brush.down();
        for i in 0..1_000 {
            brush.advance((i % 499) as f32, ((i * 7) % 499) as f32);
            assert!(brush.prev_pos.0.is_finite() && brush.prev_pos.1.is_finite());
            assert!(brush.prev_vel.0.is_finite() && brush.prev_vel.1.is_finite());
        }
    }
}
