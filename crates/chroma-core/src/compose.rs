//! Three-layer composition.
//!
//! Layers are rendered from the three cyclic rotations of the noise fields,
//! `(N1, N2, N3)`, `(N2, N3, N1)`, `(N3, N1, N2)`, each tuple read as
//! `(saturation, lightness, hue)`. The result is
//! `dissolve(subtract(L1, L2), L3)`.
use rand::Rng;
use tracing::{debug, info_span};

use crate::blend::{dissolve, subtract};
use crate::config::Dimensions;
use crate::error::PaintResult;
use crate::layer::{render_layer, render_passes, FieldTriple, LayerDraws, LayerPasses};
use crate::noise_field::NoiseField;
use crate::raster::Raster;

/// Final image plus every random parameter that shaped it.
#[derive(Debug, Clone)]
pub struct Composition {
    pub image: Raster,
    pub noise_seeds: [i64; 3],
    pub layers: [LayerDraws; 3],
    pub final_dissolve_seed: u64,
}

/// Every intermediate raster of a composition, for diagnostics.
#[derive(Debug, Clone)]
pub struct CompositionStages {
    pub layers: [LayerPasses; 3],
    /// `subtract(L1, L2)`.
    pub difference: Raster,
    pub image: Raster,
    pub final_dissolve_seed: u64,
}

/// The three field rotations, in render order.
pub fn rotations(fields: &[NoiseField; 3]) -> [FieldTriple<'_>; 3] {
    let [n1, n2, n3] = fields;
    [
        FieldTriple::new(n1, n2, n3),
        FieldTriple::new(n2, n3, n1),
        FieldTriple::new(n3, n1, n2),
    ]
}

pub fn compose<R: Rng + ?Sized>(
    dims: &Dimensions,
    fields: &[NoiseField; 3],
    rng: &mut R,
) -> PaintResult<Composition> {
    let [t1, t2, t3] = rotations(fields);

    let (l1, d1) = {
        let _span = info_span!("layer", index = 1).entered();
        render_layer(dims, t1, rng)?
    };
    let (l2, d2) = {
        let _span = info_span!("layer", index = 2).entered();
        render_layer(dims, t2, rng)?
    };
    let (l3, d3) = {
        let _span = info_span!("layer", index = 3).entered();
        render_layer(dims, t3, rng)?
    };

    let final_dissolve_seed = rng.gen::<u64>();
    debug!(final_dissolve_seed, "blending layers");
    let difference = subtract(&l1, &l2)?;
    let image = dissolve(&difference, &l3, final_dissolve_seed)?;

    Ok(Composition {
        image,
        noise_seeds: [fields[0].seed, fields[1].seed, fields[2].seed],
        layers: [d1, d2, d3],
        final_dissolve_seed,
    })
}

/// Same draws and output as [`compose`], keeping every intermediate raster.
pub fn compose_stages<R: Rng + ?Sized>(
    dims: &Dimensions,
    fields: &[NoiseField; 3],
    rng: &mut R,
) -> PaintResult<CompositionStages> {
    let [t1, t2, t3] = rotations(fields);
    let p1 = render_passes(dims, t1, rng)?;
    let p2 = render_passes(dims, t2, rng)?;
    let p3 = render_passes(dims, t3, rng)?;

    let final_dissolve_seed = rng.gen::<u64>();
    let difference = subtract(&p1.composed, &p2.composed)?;
    let image = dissolve(&difference, &p3.composed, final_dissolve_seed)?;

    Ok(CompositionStages { layers: [p1, p2, p3], difference, image, final_dissolve_seed })
}
