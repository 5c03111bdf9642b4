//! Run configuration: canvas dimensions, noise scale and the master seed.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PaintError, PaintResult};

pub const DEFAULT_WIDTH: i64 = 1800;
pub const DEFAULT_HEIGHT: i64 = 1200;
pub const DEFAULT_SCALE: i64 = 500;

/// Validated canvas size plus the noise divisor.
///
/// Only constructible through [`Dimensions::new`], so every value in a
/// `Dimensions` is strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    width: u32,
    height: u32,
    /// Pixel coordinates are divided by this before sampling noise.
    /// Larger values give smoother texture.
    scale: u32,
}

impl Dimensions {
    pub fn new(width: i64, height: i64, scale: i64) -> PaintResult<Self> {
        Ok(Self {
            width: positive("width", width)?,
            height: positive("height", height)?,
            scale: positive("scale", scale)?,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

fn positive(name: &str, value: i64) -> PaintResult<u32> {
    if value <= 0 {
        return Err(PaintError::configuration(format!(
            "{name} must be a positive integer, got {value}"
        )));
    }
    u32::try_from(value).map_err(|_| {
        PaintError::configuration(format!("{name} {value} exceeds {}", u32::MAX))
    })
}

/// User-facing generation parameters, as read from flags or a JSON file.
///
/// Fields are signed so that non-positive input survives parsing and is
/// rejected with a proper configuration error by [`GenerationConfig::dimensions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: i64,
    pub height: i64,
    pub scale: i64,
    /// Master seed for the run's random source. `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
            seed: None,
        }
    }
}

impl GenerationConfig {
    pub fn dimensions(&self) -> PaintResult<Dimensions> {
        Dimensions::new(self.width, self.height, self.scale)
    }

    pub fn from_json(text: &str) -> PaintResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| PaintError::configuration(format!("invalid config: {e}")))
    }

    pub fn load(path: &Path) -> PaintResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            PaintError::configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&text)
    }
}
