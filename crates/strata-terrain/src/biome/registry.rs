//! Biome table: resolves configured biome entries into [`BiomeProfile`]s once,
//! with a plains fallback for the surface materials of tags that have no entry.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use strata_config::BiomeConfig;
use strata_voxel::Material;

use super::{BiomeProfile, BiomeTag, Decoration, DecorationKind};

/// Read-only lookup from [`BiomeTag`] to its resolved profile.
#[derive(Clone, Debug)]
pub struct BiomeTable {
    profiles: HashMap<BiomeTag, BiomeProfile>,
    fallback: BiomeProfile,
}

impl BiomeTable {
    /// Resolve the configured biome entries.
    ///
    /// Entries whose key is not a biome name, and decorations whose kind is
    /// unknown, are dropped with a warning. Material names resolve through
    /// [`Material::resolve`].
    pub fn from_config(biomes: &BTreeMap<String, BiomeConfig>) -> Self {
        let mut profiles = HashMap::new();

        for (name, entry) in biomes {
            let Some(tag) = BiomeTag::from_name(name) else {
                tracing::warn!("Ignoring biome table entry for unknown biome {:?}", name);
                continue;
            };

            let decorations = entry
                .decorations
                .iter()
                .filter_map(|decoration| match DecorationKind::from_name(&decoration.kind) {
                    Some(kind) => Some(Decoration {
                        kind,
                        density: decoration.density,
                    }),
                    None => {
                        tracing::warn!(
                            "Dropping unknown decoration {:?} from biome {}",
                            decoration.kind,
                            tag
                        );
                        None
                    }
                })
                .collect();

            profiles.insert(
                tag,
                BiomeProfile {
                    tag,
                    surface: Material::resolve(&entry.surface),
                    subsurface: Material::resolve(&entry.subsurface),
                    decorations,
                },
            );
        }

        let fallback = profiles
            .get(&BiomeTag::Plains)
            .cloned()
            .unwrap_or_else(|| BiomeProfile::bare(BiomeTag::Plains));

        Self { profiles, fallback }
    }

    /// Profile for `tag`, or the plains profile when `tag` has no entry.
    pub fn profile(&self, tag: BiomeTag) -> &BiomeProfile {
        self.profiles.get(&tag).unwrap_or(&self.fallback)
    }

    /// Decorations configured for `tag`. Empty when `tag` has no entry; the
    /// plains fallback covers surface materials only.
    pub fn decorations(&self, tag: BiomeTag) -> &[Decoration] {
        self.profiles
            .get(&tag)
            .map(|profile| profile.decorations.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if `tag` has its own entry.
    pub fn contains(&self, tag: BiomeTag) -> bool {
        self.profiles.contains_key(&tag)
    }

    /// Number of explicitly configured biomes.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` if no biome has an explicit entry.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
