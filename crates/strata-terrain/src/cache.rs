//! Per-column memo cache for surface heights and biome tags.
//!
//! Both maps are pure memoizations keyed by world column. Concurrent inserts
//! of the same key can only race to store the same value.

use dashmap::DashMap;

use crate::biome::BiomeTag;

/// Concurrent `(x, z)` → height and `(x, z)` → biome memo maps.
#[derive(Debug, Default)]
pub struct ColumnCache {
    heights: DashMap<(i32, i32), i32>,
    biomes: DashMap<(i32, i32), BiomeTag>,
}

impl ColumnCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached height of `(x, z)`, computing and storing it on a miss.
    pub fn height_or_insert_with(&self, x: i32, z: i32, compute: impl FnOnce() -> i32) -> i32 {
        if let Some(height) = self.heights.get(&(x, z)) {
            return *height;
        }
        let height = compute();
        self.heights.insert((x, z), height);
        height
    }

    /// Cached biome of `(x, z)`, computing and storing it on a miss.
    pub fn biome_or_insert_with(
        &self,
        x: i32,
        z: i32,
        compute: impl FnOnce() -> BiomeTag,
    ) -> BiomeTag {
        if let Some(tag) = self.biomes.get(&(x, z)) {
            return *tag;
        }
        let tag = compute();
        self.biomes.insert((x, z), tag);
        tag
    }

    /// Cached height of `(x, z)` without computing.
    pub fn height(&self, x: i32, z: i32) -> Option<i32> {
        self.heights.get(&(x, z)).map(|h| *h)
    }

    /// Cached biome of `(x, z)` without computing.
    pub fn biome(&self, x: i32, z: i32) -> Option<BiomeTag> {
        self.biomes.get(&(x, z)).map(|t| *t)
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.heights.clear();
        self.biomes.clear();
    }

    /// Number of cached entries across both maps.
    pub fn len(&self) -> usize {
        self.heights.len() + self.biomes.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty() && self.biomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_miss_then_hit() {
        let cache = ColumnCache::new();
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::Relaxed);
            57
        };

        assert_eq!(cache.height_or_insert_with(3, -4, compute), 57);
        assert_eq!(cache.height_or_insert_with(3, -4, || unreachable!()), 57);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
        assert_eq!(cache.height(3, -4), Some(57));
        assert_eq!(cache.height(-4, 3), None);
    }

    #[test]
    fn test_biome_memo() {
        let cache = ColumnCache::new();
        assert_eq!(cache.biome_or_insert_with(0, 0, || BiomeTag::Desert), BiomeTag::Desert);
        assert_eq!(cache.biome_or_insert_with(0, 0, || BiomeTag::Ocean), BiomeTag::Desert);
        assert_eq!(cache.biome(0, 0), Some(BiomeTag::Desert));
    }

    #[test]
    fn test_clear_empties_both_maps() {
        let cache = ColumnCache::new();
        cache.height_or_insert_with(1, 1, || 10);
        cache.biome_or_insert_with(1, 1, || BiomeTag::Forest);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.height(1, 1), None);
        assert_eq!(cache.biome(1, 1), None);
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(ColumnCache::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let h = cache.height_or_insert_with(i, t, move || i * 2 + t);
                        assert_eq!(h, i * 2 + t);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(cache.len(), 400);
    }
}
