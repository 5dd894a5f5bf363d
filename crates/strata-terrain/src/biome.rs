//! Biome system: climate field, the temperature/humidity classifier, and the
//! per-biome material and decoration tables.

mod def;
mod diagram;
mod registry;
mod sampler;

pub use def::{BiomeProfile, Decoration, DecorationKind};
pub use diagram::{BiomeTag, classify};
pub use registry::BiomeTable;
pub use sampler::{ClimateField, ClimateSample, FeaturePoint};
