//! Pipeline driver: seeds the noise fields, renders and composes the layers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::compose::{compose, compose_stages, Composition, CompositionStages};
use crate::config::{Dimensions, GenerationConfig};
use crate::error::PaintResult;
use crate::layer::LayerDraws;
use crate::noise_field::NoiseField;

// ── Random source ────────────────────────────────────────────────────────────

/// Build the run's random source.
///
/// Without a configured seed one is drawn from entropy, so every run still
/// has a concrete master seed that can be logged and replayed.
pub fn master_rng(seed: Option<u64>) -> (u64, StdRng) {
    let seed = seed.unwrap_or_else(|| StdRng::from_entropy().gen());
    (seed, StdRng::seed_from_u64(seed))
}

/// Draw the three independent noise-field seeds.
pub fn draw_noise_seeds<R: Rng + ?Sized>(rng: &mut R) -> [i64; 3] {
    [rng.gen(), rng.gen(), rng.gen()]
}

// ── Manifest ─────────────────────────────────────────────────────────────────

/// Everything needed to reproduce a run, written next to the image on request.
#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub config: GenerationConfig,
    pub master_seed: u64,
    pub noise_seeds: [i64; 3],
    pub layers: [LayerDraws; 3],
    pub final_dissolve_seed: u64,
}

impl RunManifest {
    pub fn new(config: &GenerationConfig, master_seed: u64, composition: &Composition) -> Self {
        Self {
            config: GenerationConfig { seed: Some(master_seed), ..config.clone() },
            master_seed,
            noise_seeds: composition.noise_seeds,
            layers: composition.layers,
            final_dissolve_seed: composition.final_dissolve_seed,
        }
    }

    pub fn to_json(&self) -> PaintResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| anyhow::Error::new(e).into())
    }
}

// ── Orchestrator ─────────────────────────────────────────────────────────────

pub struct PaintGenerator;

impl PaintGenerator {
    pub fn new() -> Self { Self }

    /// Run the full pipeline.
    ///
    /// Draw order: three noise seeds, then per layer the [`LayerDraws`], then
    /// the final dissolve seed. A given `rng` state therefore fixes the image.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        dims: &Dimensions,
        rng: &mut R,
    ) -> PaintResult<Composition> {
        let fields = Self::seed_fields(rng);
        self.generate_with_fields(dims, &fields, rng)
    }

    /// Run the pipeline over caller-supplied noise fields.
    pub fn generate_with_fields<R: Rng + ?Sized>(
        &self,
        dims: &Dimensions,
        fields: &[NoiseField; 3],
        rng: &mut R,
    ) -> PaintResult<Composition> {
        info!(
            width = dims.width(),
            height = dims.height(),
            scale = dims.scale(),
            "generating composition"
        );
        compose(dims, fields, rng)
    }

    /// Like [`PaintGenerator::generate`] but keeps every intermediate raster.
    pub fn generate_stages<R: Rng + ?Sized>(
        &self,
        dims: &Dimensions,
        rng: &mut R,
    ) -> PaintResult<(CompositionStages, [i64; 3])> {
        let fields = Self::seed_fields(rng);
        let stages = compose_stages(dims, &fields, rng)?;
        Ok((stages, [fields[0].seed, fields[1].seed, fields[2].seed]))
    }

    /// Validate `config`, seed the master source and generate.
    pub fn run(&self, config: &GenerationConfig) -> PaintResult<(Composition, RunManifest)> {
        let dims = config.dimensions()?;
        let (master_seed, mut rng) = master_rng(config.seed);
        info!(master_seed, "seeded random source");

        let composition = self.generate(&dims, &mut rng)?;
        let manifest = RunManifest::new(config, master_seed, &composition);
        Ok((composition, manifest))
    }

    fn seed_fields<R: Rng + ?Sized>(rng: &mut R) -> [NoiseField; 3] {
        let seeds = draw_noise_seeds(rng);
        debug!(?seeds, "noise seeds");
        seeds.map(NoiseField::new)
    }
}

impl Default for PaintGenerator {
    fn default() -> Self { Self::new() }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
