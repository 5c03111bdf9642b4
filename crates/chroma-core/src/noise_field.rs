//! Seeded 2D coherent noise normalized to `[0, 1]`.
//!
//! Backed by OpenSimplex. Raw output lies in roughly `[-1, 1]`; it is shifted
//! to `(v + 1) / 2` and clamped so callers can rely on the unit range.
//! The generator accepts any real coordinate, which the echo pass depends on:
//! its offsets sample well outside the visible canvas.
use noise::{NoiseFn, OpenSimplex};

pub struct NoiseField {
    pub seed: i64,
    noise: OpenSimplex,
}

impl NoiseField {
    /// Construct a field for `seed`. The provider takes a `u32` seed, so the
    /// two halves of the `i64` are folded together first.
    pub fn new(seed: i64) -> Self {
        Self { seed, noise: OpenSimplex::new(fold_seed(seed)) }
    }

    /// Evaluate the field at `(x, y)` in noise space. Always in `[0, 1]`.
    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        ((self.noise.get([x, y]) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

#[inline]
fn fold_seed(seed: i64) -> u32 {
    let bits = seed as u64;
    (bits ^ (bits >> 32)) as u32
}
