//! Per-pixel blend primitives over equally sized rasters.
//!
//! * `dissolve` — each output pixel is taken whole from `a` or `b`, each with
//!   probability 0.5. Choices come from a `StdRng` reseeded per row from
//!   `(seed, row)`, so the result depends only on the inputs and the seed and
//!   is the same whether rows run sequentially or in parallel.
//! * `subtract` — per-channel saturating `a − b`; alpha stays opaque.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{PaintError, PaintResult};
use crate::raster::{for_each_row, Raster, OPAQUE};

/// Probability that a dissolved pixel is taken from the second raster.
pub const DISSOLVE_PROBABILITY: f64 = 0.5;

fn check_same_size(a: &Raster, b: &Raster) -> PaintResult<()> {
    if a.same_size(b) {
        Ok(())
    } else {
        Err(PaintError::DimensionMismatch {
            left_width: a.width,
            left_height: a.height,
            right_width: b.width,
            right_height: b.height,
        })
    }
}

/// Decorrelate per-row streams with a Weyl increment.
#[inline]
fn row_seed(seed: u64, row: usize) -> u64 {
    seed ^ (row as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

pub fn dissolve(a: &Raster, b: &Raster, seed: u64) -> PaintResult<Raster> {
    check_same_size(a, b)?;
    let mut out = Raster::new(a.width, a.height);
    let stride = out.stride();

    for_each_row(&mut out.data, stride, |y, row| {
        let mut rng = StdRng::seed_from_u64(row_seed(seed, y));
        let span = y * stride..(y + 1) * stride;
        let pixels = a.data[span.clone()].chunks_exact(4).zip(b.data[span].chunks_exact(4));
        for (dst, (pa, pb)) in row.chunks_exact_mut(4).zip(pixels) {
            let src = if rng.gen_bool(DISSOLVE_PROBABILITY) { pb } else { pa };
            dst.copy_from_slice(src);
        }
    });

    Ok(out)
}

pub fn subtract(a: &Raster, b: &Raster) -> PaintResult<Raster> {
    check_same_size(a, b)?;
    let mut out = Raster::new(a.width, a.height);
    let stride = out.stride();

    for_each_row(&mut out.data, stride, |y, row| {
        let span = y * stride..(y + 1) * stride;
        let pixels = a.data[span.clone()].chunks_exact(4).zip(b.data[span].chunks_exact(4));
        for (dst, (pa, pb)) in row.chunks_exact_mut(4).zip(pixels) {
            for c in 0..3 {
                dst[c] = pa[c].saturating_sub(pb[c]);
            }
            dst[3] = OPAQUE;
        }
    });

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> Raster {
        let mut r = Raster::new(w, h);
        r.fill_with(|_, _| rgb);
        r
    }

    fn gradient(w: u32, h: u32) -> Raster {
        let mut r = Raster::new(w, h);
        r.fill_with(|x, y| [(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8]);
        r
    }

    #[test]
    fn dissolve_picks_whole_pixels_from_either_input() {
        let a = solid(16, 16, [200, 10, 10]);
        let b = solid(16, 16, [10, 200, 10]);
        let out = dissolve(&a, &b, 99).unwrap();
        for px in out.pixels() {
            assert!(
                px == [200, 10, 10, OPAQUE] || px == [10, 200, 10, OPAQUE],
                "pixel {px:?} is not from either input"
            );
        }
    }

    #[test]
    fn dissolve_mixes_roughly_evenly() {
        let a = solid(64, 64, [0, 0, 0]);
        let b = solid(64, 64, [255, 255, 255]);
        let out = dissolve(&a, &b, 7).unwrap();
        let from_b = out.pixels().filter(|px| px[0] == 255).count();
        let frac = from_b as f64 / (64.0 * 64.0);
        assert!((0.4..0.6).contains(&frac), "fraction from b = {frac:.3}, expected ≈ 0.5");
    }

    #[test]
    fn dissolve_is_deterministic_per_seed() {
        let a = gradient(12, 9);
        let b = solid(12, 9, [1, 2, 3]);
        assert_eq!(dissolve(&a, &b, 5).unwrap(), dissolve(&a, &b, 5).unwrap());
        assert_ne!(dissolve(&a, &b, 5).unwrap(), dissolve(&a, &b, 6).unwrap());
    }

    #[test]
    fn dissolve_of_identical_inputs_is_identity() {
        let a = gradient(8, 8);
        assert_eq!(dissolve(&a, &a, 1234).unwrap(), a);
    }

    #[test]
    fn subtract_saturates_at_zero() {
        let a = solid(2, 2, [100, 50, 255]);
        let b = solid(2, 2, [30, 80, 255]);
        let out = subtract(&a, &b).unwrap();
        assert!(out.pixels().all(|px| px == [70, 0, 0, OPAQUE]));
    }

    #[test]
    fn subtract_is_not_commutative() {
        let a = solid(2, 2, [100, 50, 0]);
        let b = solid(2, 2, [30, 80, 0]);
        let ab = subtract(&a, &b).unwrap();
        let ba = subtract(&b, &a).unwrap();
        assert_eq!(ab.get(0, 0), [70, 0, 0, OPAQUE]);
        assert_eq!(ba.get(0, 0), [0, 30, 0, OPAQUE]);
    }

    #[test]
    fn subtract_self_is_black() {
        let a = gradient(6, 4);
        assert!(subtract(&a, &a).unwrap().pixels().all(|px| px == [0, 0, 0, OPAQUE]));
    }

    #[test]
    fn mismatched_sizes_are_rejected() {
        let a = Raster::new(4, 4);
        let b = Raster::new(4, 5);
        assert!(matches!(dissolve(&a, &b, 0), Err(PaintError::DimensionMismatch { .. })));
        assert!(matches!(subtract(&a, &b), Err(PaintError::DimensionMismatch { .. })));
    }

    #[cfg(feature = "threading")]
    #[test]
    fn parallel_dissolve_matches_sequential_rows() {
        let (w, h) = (37u32, 29u32);
        let a = gradient(w, h);
        let b = solid(w, h, [9, 99, 199]);
        let seed = 0xDEAD_BEEF;
        let out = dissolve(&a, &b, seed).unwrap();

        let mut expected = Raster::new(w, h);
        for y in 0..h {
            let mut rng = StdRng::seed_from_u64(row_seed(seed, y as usize));
            for x in 0..w {
                let from_b = rng.gen_bool(DISSOLVE_PROBABILITY);
                let src = if from_b { b.get(x, y) } else { a.get(x, y) };
                expected.set_rgb(x, y, [src[0], src[1], src[2]]);
            }
        }
        assert_eq!(out, expected, "row-parallel dissolve must match a sequential replay");
    }
}
