//! Biome tags and the fixed temperature/humidity decision diagram.

use std::fmt;

/// One of the five biome kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BiomeTag {
    Plains,
    Forest,
    Desert,
    Mountains,
    Ocean,
}

impl BiomeTag {
    /// Every tag, in feature-point draw order.
    pub const ALL: [BiomeTag; 5] = [
        BiomeTag::Plains,
        BiomeTag::Forest,
        BiomeTag::Desert,
        BiomeTag::Mountains,
        BiomeTag::Ocean,
    ];

    /// Overlay ID written into a chunk's biome map.
    pub fn id(self) -> u8 {
        match self {
            BiomeTag::Ocean => 0,
            BiomeTag::Plains => 1,
            BiomeTag::Desert => 2,
            BiomeTag::Mountains => 3,
            BiomeTag::Forest => 4,
        }
    }

    /// Tag for an overlay ID.
    pub fn from_id(id: u8) -> Option<BiomeTag> {
        Self::ALL.into_iter().find(|tag| tag.id() == id)
    }

    /// Lowercase configuration name.
    pub fn name(self) -> &'static str {
        match self {
            BiomeTag::Plains => "plains",
            BiomeTag::Forest => "forest",
            BiomeTag::Desert => "desert",
            BiomeTag::Mountains => "mountains",
            BiomeTag::Ocean => "ocean",
        }
    }

    /// Lookup by configuration name (case-insensitive).
    pub fn from_name(name: &str) -> Option<BiomeTag> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for BiomeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a climate into a biome. Both inputs are nominally in `[0, 1]`.
///
/// Thresholds are strict, so `temperature == 0.8` lands in the temperate
/// branch. NaN fails every comparison and ends up as ocean.
pub fn classify(temperature: f64, humidity: f64) -> BiomeTag {
    if temperature > 0.8 {
        if humidity < 0.3 {
            BiomeTag::Desert
        } else if humidity < 0.6 {
            BiomeTag::Plains
        } else {
            BiomeTag::Forest
        }
    } else if temperature > 0.5 {
        if humidity < 0.4 {
            BiomeTag::Plains
        } else {
            BiomeTag::Forest
        }
    } else if humidity < 0.5 {
        BiomeTag::Mountains
    } else {
        BiomeTag::Ocean
    }
}
