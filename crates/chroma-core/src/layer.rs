//! Single-layer renderer: a direct noise pass plus a displaced "echo" pass,
//! dissolved together.
//!
//! Per pixel the three fields play fixed roles:
//!   * `hue`        — hue offset around the pass's initial hue, and the
//!                    per-column echo perturbation.
//!   * `saturation` — saturation in `[0.5, 1]`.
//!   * `lightness`  — lightness, pushed toward the extremes.
//!
//! Saturation and lightness are sampled on sheared coordinates
//! `((lx·x + ly·y) / scale, y / scale)`; hue on plain `(x / scale, y / scale)`.
//!
//! All random draws for a layer happen up front in [`LayerDraws::draw`], so the
//! pixel loops are pure and may run in parallel.
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::blend::dissolve;
use crate::color::{hsl_to_rgb, push_to_edges, wrap_hue};
use crate::config::Dimensions;
use crate::error::PaintResult;
use crate::noise_field::NoiseField;
use crate::raster::Raster;

/// Width of the hue band, in degrees, a layer spreads across.
pub const HUE_RANGE: f64 = 150.0;
/// Shear coefficients are drawn from `[-SHEAR_LIMIT, SHEAR_LIMIT)`.
pub const SHEAR_LIMIT: f64 = 1.5;

/// The three noise fields a layer samples, by role.
#[derive(Debug, Clone, Copy)]
pub struct FieldTriple<'a> {
    pub saturation: &'a NoiseField,
    pub lightness: &'a NoiseField,
    pub hue: &'a NoiseField,
}

impl<'a> FieldTriple<'a> {
    pub fn new(saturation: &'a NoiseField, lightness: &'a NoiseField, hue: &'a NoiseField) -> Self {
        Self { saturation, lightness, hue }
    }
}

/// Everything random about one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerDraws {
    /// Initial hue of the direct pass, degrees.
    pub direct_hue: f64,
    pub shear_x: f64,
    pub shear_y: f64,
    /// Initial hue of the echo pass, degrees.
    pub echo_hue: f64,
    /// Global coordinate of the echo pass's top-left pixel.
    pub x_offset: i64,
    pub y_offset: i64,
    pub dissolve_seed: u64,
}

impl LayerDraws {
    /// Draw in pipeline order: direct hue, shear x, shear y, echo hue,
    /// x offset, y offset, dissolve seed.
    pub fn draw<R: Rng + ?Sized>(dims: &Dimensions, rng: &mut R) -> Self {
        let width = dims.width() as f64;
        let height = dims.height() as f64;

        let direct_hue = rng.gen::<f64>() * 360.0;
        let shear_x = rng.gen::<f64>() * 2.0 * SHEAR_LIMIT - SHEAR_LIMIT;
        let shear_y = rng.gen::<f64>() * 2.0 * SHEAR_LIMIT - SHEAR_LIMIT;

        let echo_hue = rng.gen::<f64>() * 360.0;
        let x_offset = (rng.gen::<f64>() * width - width / 2.0).floor() as i64;
        let y_offset = (rng.gen::<f64>() * height - height / 2.0).floor() as i64;

        let dissolve_seed = rng.gen::<u64>();

        Self { direct_hue, shear_x, shear_y, echo_hue, x_offset, y_offset, dissolve_seed }
    }
}

/// Parameters of one sampling pass over the canvas.
#[derive(Debug, Clone, Copy)]
struct Pass {
    initial_hue: f64,
    shear_x: f64,
    shear_y: f64,
    x_offset: i64,
    y_offset: i64,
    echo: bool,
}

fn paint_pass(dims: &Dimensions, fields: FieldTriple<'_>, pass: Pass) -> Raster {
    let width = dims.width() as f64;
    let scale = dims.scale() as f64;

    // Echo displacement depends only on the global column.
    let echoes: Vec<f64> = (0..dims.width() as i64)
        .map(|x| {
            if !pass.echo {
                return 0.0;
            }
            let gx = (x + pass.x_offset) as f64;
            fields.hue.sample(gx / scale, gx / scale) * (width / 10.0) - width / 20.0
        })
        .collect();

    let mut raster = Raster::new(dims.width(), dims.height());
    raster.fill_with(|x, y| {
        let gx = (x as i64 + pass.x_offset) as f64;
        let gy = (y as i64 + pass.y_offset) as f64;
        let echo = echoes[x as usize];

        let hue = wrap_hue(
            pass.initial_hue + HUE_RANGE * fields.hue.sample(gx / scale, gy / scale)
                - HUE_RANGE / 20.0,
        );

        let sx = (pass.shear_x * gx + pass.shear_y * gy + echo) / scale;
        let sy = gy / scale;
        let saturation = 0.5 + 0.5 * fields.saturation.sample(sx, sy);
        let lightness = push_to_edges(fields.lightness.sample(sx, sy), 0.0);

        hsl_to_rgb(hue, saturation, lightness)
    });
    raster
}

/// Direct pass: canvas pixel `(x, y)` samples global coordinate `(x, y)`.
pub fn render_direct(dims: &Dimensions, fields: FieldTriple<'_>, draws: &LayerDraws) -> Raster {
    paint_pass(
        dims,
        fields,
        Pass {
            initial_hue: draws.direct_hue,
            shear_x: draws.shear_x,
            shear_y: draws.shear_y,
            x_offset: 0,
            y_offset: 0,
            echo: false,
        },
    )
}

/// Echo pass: canvas pixel `(x, y)` samples global coordinate
/// `(x + x_offset, y + y_offset)`, with the per-column echo added to the
/// saturation/lightness x-term.
pub fn render_echo(dims: &Dimensions, fields: FieldTriple<'_>, draws: &LayerDraws) -> Raster {
    paint_pass(
        dims,
        fields,
        Pass {
            initial_hue: draws.echo_hue,
            shear_x: draws.shear_x,
            shear_y: draws.shear_y,
            x_offset: draws.x_offset,
            y_offset: draws.y_offset,
            echo: true,
        },
    )
}

/// Both passes of a layer, before and after dissolving.
#[derive(Debug, Clone)]
pub struct LayerPasses {
    pub direct: Raster,
    pub echo: Raster,
    pub composed: Raster,
    pub draws: LayerDraws,
}

/// Render one layer keeping the intermediate passes.
#[tracing::instrument(level = "debug", skip_all)]
pub fn render_passes<R: Rng + ?Sized>(
    dims: &Dimensions,
    fields: FieldTriple<'_>,
    rng: &mut R,
) -> PaintResult<LayerPasses> {
    let draws = LayerDraws::draw(dims, rng);
    debug!(?draws, "layer draws");

    let direct = render_direct(dims, fields, &draws);
    let echo = render_echo(dims, fields, &draws);
    let composed = dissolve(&direct, &echo, draws.dissolve_seed)?;

    Ok(LayerPasses { direct, echo, composed, draws })
}

/// Render one composed layer.
pub fn render_layer<R: Rng + ?Sized>(
    dims: &Dimensions,
    fields: FieldTriple<'_>,
    rng: &mut R,
) -> PaintResult<(Raster, LayerDraws)> {
    let passes = render_passes(dims, fields, rng)?;
    Ok((passes.composed, passes.draws))
}
