//! Random distributions used to shape the brush.
//!
//! Bristle placement wants a cheap bounded bell curve: the mean of `n`
//! uniform draws concentrates toward the middle as `n` grows, and never
//! leaves (-1, 1). Both samplers are pure in the passed `Rng`, so tests
//! can pin them with a seeded generator.

use rand::Rng;

/// Mean of `n` uniform [0, 1) draws, rescaled to [-1, 1].
///
/// `n = 1` is flat; larger `n` concentrates mass near zero. Values of
/// `n` below 1 are treated as 1.
pub fn centered_sample<R: Rng + ?Sized>(rng: &mut R, n: u32) -> f32 {
    let n = n.max(1);
    let mut v = 0.0f32;
    for _ in 0..n {
        v += rng.r#gen::<f32>();
    }
    v /= n as f32;
    v * 2.0 - 1.0
}

/// Box–Muller standard normal draw.
///
/// Unbounded, unlike [`centered_sample`]. Not used by the brush itself;
/// kept as a general sampling utility.
pub fn normal_sample<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let mut u = 0.0f32;
    while u == 0.0 {
        u = rng.r#gen();
    }
    let mut v = 0.0f32;
    while v == 0.0 {
        v = rng.r#gen();
    }
    (-2.0 * u.ln()).sqrt() * (std::f32::consts::TAU * v).cos()
}
