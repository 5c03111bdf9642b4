//! Procedural noise painting.
//!
//! Three seeded coherent-noise fields are mapped through HSL into RGB layers;
//! each layer dissolves a direct pass with a displaced echo pass, and three
//! layers are combined as `dissolve(subtract(L1, L2), L3)`.

pub mod blend;
pub mod color;
pub mod compose;
pub mod config;
pub mod encode;
pub mod error;
pub mod generator;
pub mod layer;
pub mod noise_field;
pub mod raster;

pub use compose::Composition;
pub use config::{Dimensions, GenerationConfig};
pub use error::{PaintError, PaintResult};
pub use generator::{PaintGenerator, RunManifest};
pub use noise_field::NoiseField;
pub use raster::Raster;
