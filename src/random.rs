//! Uniform and normal variates drawn from a caller-supplied generator.
//!
//! Normals use the Box-Muller transform so that a zero standard deviation returns the
//! mean exactly.

use rand::Rng;
use std::f64::consts::PI;

/// Draws from `Uniform[min, max)`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.gen::<f64>() * (max - min)
}

/// Draws from `Normal(mean, std)` via Box-Muller.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std: f64) -> f64 {
    let mut u1 = 0.0;
    let mut u2 = 0.0;
    // ln(0) is -inf
    while u1 == 0.0 {
        u1 = rng.gen::<f64>();
    }
    while u2 == 0.0 {
        u2 = rng.gen::<f64>();
    }
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    z * std + mean
}
