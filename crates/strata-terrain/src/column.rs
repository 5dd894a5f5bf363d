//! Column fill: material layers from the surface down, default fill to the
//! floor, flooding below sea level, and the biome surface override.

use strata_config::GeneratorConfig;
use strata_voxel::{Chunk, Material};

use crate::biome::{BiomeProfile, BiomeTag};

/// One resolved material layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layer {
    pub depth: u32,
    pub material: Material,
}

/// Writes the material stack of single columns into a chunk.
#[derive(Clone, Debug)]
pub struct TerrainColumnBuilder {
    layers: Vec<Layer>,
    fill: Material,
    fluid: Material,
    sea_level: i32,
}

impl TerrainColumnBuilder {
    /// Resolve layer materials from the configuration.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let layers = config
            .layers
            .iter()
            .map(|layer| Layer {
                depth: layer.depth,
                material: Material::resolve(&layer.block),
            })
            .collect();
        Self {
            layers,
            fill: Material::resolve(&config.default_fill),
            fluid: Material::Water,
            sea_level: config.world.sea_level,
        }
    }

    /// The resolved layer stack, top first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Sea level of the columns this builder writes.
    pub fn sea_level(&self) -> i32 {
        self.sea_level
    }

    /// Fill column `(local_x, local_z)` for a surface at `height`.
    ///
    /// Layers are written top-down starting at `height`; whatever depth remains
    /// down to `y = 0` gets the default fill. Air cells in
    /// `height + 1 ..= sea_level` are then flooded.
    pub fn fill_column(&self, chunk: &mut Chunk, local_x: i32, local_z: i32, height: i32) {
        let mut y = height;

        'layers: for layer in &self.layers {
            for _ in 0..layer.depth {
                if y < 0 {
                    break 'layers;
                }
                chunk.set(local_x, y, local_z, layer.material);
                y -= 1;
            }
        }

        while y >= 0 {
            chunk.set(local_x, y, local_z, self.fill);
            y -= 1;
        }

        if height < self.sea_level {
            for y in height + 1..=self.sea_level {
                if chunk.is_empty(local_x, y, local_z) {
                    chunk.set(local_x, y, local_z, self.fluid);
                }
            }
        }
    }

    /// Overwrite the topmost occupied cell and the one below it with the
    /// biome's surface and subsurface, and record `tag` in the overlay.
    ///
    /// An empty column only records the overlay.
    pub fn apply_biome(
        &self,
        chunk: &mut Chunk,
        local_x: i32,
        local_z: i32,
        tag: BiomeTag,
        profile: &BiomeProfile,
    ) {
        match chunk.surface_y(local_x, local_z) {
            Some(surface) => {
                chunk.set(local_x, surface, local_z, profile.surface);
                chunk.set(local_x, surface - 1, local_z, profile.subsurface);
            }
            None => {
                tracing::trace!("No surface in column ({}, {})", local_x, local_z);
            }
        }
        chunk.set_biome_id(local_x, local_z, tag.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_config::LayerConfig;

    fn builder(layers: &[(u32, &str)], sea_level: i32) -> TerrainColumnBuilder {
        let mut config = GeneratorConfig::default();
        config.layers = layers
            .iter()
            .map(|&(depth, block)| LayerConfig {
                depth,
                block: block.to_string(),
            })
            .collect();
        config.world.sea_level = sea_level;
        TerrainColumnBuilder::from_config(&config)
    }

    #[test]
    fn test_layers_then_default_fill() {
        let builder = builder(&[(1, "dirt"), (2, "stone")], 0);
        let mut chunk = Chunk::new();
        builder.fill_column(&mut chunk, 0, 0, 10);

        assert_eq!(chunk.get(0, 10, 0), Material::Dirt);
        assert_eq!(chunk.get(0, 9, 0), Material::Stone);
        assert_eq!(chunk.get(0, 8, 0), Material::Stone);
        for y in 0..8 {
            assert_eq!(chunk.get(0, y, 0), Material::Stone, "default fill at y={y}");
        }
        for y in 11..128 {
            assert_eq!(chunk.get(0, y, 0), Material::Air, "above surface at y={y}");
        }
    }

    #[test]
    fn test_default_fill_is_configurable() {
        let mut config = GeneratorConfig::default();
        config.default_fill = "sandstone".to_string();
        let builder = TerrainColumnBuilder::from_config(&config);
        let mut chunk = Chunk::new();
        builder.fill_column(&mut chunk, 2, 3, 70);

        assert_eq!(chunk.get(2, 70, 3), Material::Grass);
        assert_eq!(chunk.get(2, 69, 3), Material::Dirt);
        assert_eq!(chunk.get(2, 67, 3), Material::Dirt);
        assert_eq!(chunk.get(2, 66, 3), Material::Sandstone);
        assert_eq!(chunk.get(2, 0, 3), Material::Sandstone);
    }

    #[test]
    fn test_layers_deeper_than_surface_stop_at_floor() {
        let builder = builder(&[(5, "sand")], 0);
        let mut chunk = Chunk::new();
        builder.fill_column(&mut chunk, 1, 1, 2);
        for y in 0..=2 {
            assert_eq!(chunk.get(1, y, 1), Material::Sand);
        }
        assert_eq!(chunk.get(1, 3, 1), Material::Air);
    }

    #[test]
    fn test_water_fills_up_to_sea_level() {
        let builder = builder(&[(1, "grass")], 62);
        let mut chunk = Chunk::new();
        builder.fill_column(&mut chunk, 4, 4, 50);

        assert_eq!(chunk.get(4, 50, 4), Material::Grass);
        for y in 51..=62 {
            assert_eq!(chunk.get(4, y, 4), Material::Water, "water at y={y}");
        }
        assert_eq!(chunk.get(4, 63, 4), Material::Air);
    }

    #[test]
    fn test_no_water_at_or_above_sea_level() {
        let builder = builder(&[(1, "grass")], 62);
        let mut chunk = Chunk::new();
        builder.fill_column(&mut chunk, 0, 0, 62);
        builder.fill_column(&mut chunk, 1, 0, 90);
        assert_eq!(chunk.count(Material::Water), 0);
    }

    #[test]
    fn test_water_does_not_replace_existing_cells() {
        let builder = builder(&[(1, "grass")], 62);
        let mut chunk = Chunk::new();
        chunk.set(0, 55, 0, Material::Cobblestone);
        builder.fill_column(&mut chunk, 0, 0, 50);
        assert_eq!(chunk.get(0, 55, 0), Material::Cobblestone);
        assert_eq!(chunk.get(0, 54, 0), Material::Water);
    }

    #[test]
    fn test_apply_biome_overrides_top_two_cells() {
        let builder = builder(&[(1, "grass"), (3, "dirt")], 0);
        let mut chunk = Chunk::new();
        builder.fill_column(&mut chunk, 3, 5, 40);

        let desert = BiomeProfile {
            tag: BiomeTag::Desert,
            surface: Material::Sand,
            subsurface: Material::Sandstone,
            decorations: Vec::new(),
        };
        builder.apply_biome(&mut chunk, 3, 5, BiomeTag::Desert, &desert);

        assert_eq!(chunk.get(3, 40, 5), Material::Sand);
        assert_eq!(chunk.get(3, 39, 5), Material::Sandstone);
        assert_eq!(chunk.get(3, 38, 5), Material::Dirt);
        assert_eq!(chunk.biome_id(3, 5), Some(BiomeTag::Desert.id()));
    }

    #[test]
    fn test_apply_biome_treats_water_as_occupied() {
        let builder = builder(&[(1, "grass")], 62);
        let mut chunk = Chunk::new();
        builder.fill_column(&mut chunk, 0, 0, 40);
        builder.apply_biome(&mut chunk, 0, 0, BiomeTag::Ocean, &BiomeProfile::bare(BiomeTag::Ocean));
        assert_eq!(chunk.get(0, 62, 0), Material::Grass);
        assert_eq!(chunk.get(0, 61, 0), Material::Dirt);
        assert_eq!(chunk.get(0, 60, 0), Material::Water);
    }

    #[test]
    fn test_apply_biome_on_empty_column_records_overlay_only() {
        let builder = builder(&[(1, "grass")], 0);
        let mut chunk = Chunk::new();
        builder.apply_biome(&mut chunk, 7, 7, BiomeTag::Forest, &BiomeProfile::bare(BiomeTag::Forest));
        assert_eq!(chunk.count(Material::Air), strata_voxel::CHUNK_VOLUME);
        assert_eq!(chunk.biome_id(7, 7), Some(BiomeTag::Forest.id()));
    }

    #[test]
    fn test_apply_biome_at_floor_clips_subsurface() {
        let builder = builder(&[(1, "grass")], 0);
        let mut chunk = Chunk::new();
        chunk.set(0, 0, 0, Material::Stone);
        builder.apply_biome(&mut chunk, 0, 0, BiomeTag::Plains, &BiomeProfile::bare(BiomeTag::Plains));
        assert_eq!(chunk.get(0, 0, 0), Material::Grass);
    }
}
