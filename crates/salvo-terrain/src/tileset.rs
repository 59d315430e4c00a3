//! Tilesets and the terrain classification cache.
//!
//! A map stores raw tile ids; the tileset says what kind of terrain each id
//! is. The per-cell classification is cached in a [`TerrainCache`] owned by
//! the map, keyed by tileset name and rebuilt whenever the tileset changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use salvo_core::enums::TerrainKind;

/// Mapping from tile ids to terrain classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tileset {
    pub name: String,
    #[serde(default)]
    pub kinds: BTreeMap<u16, TerrainKind>,
    /// Classification of tile ids the tileset does not list.
    #[serde(default)]
    pub fallback: TerrainKind,
}

impl Tileset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style helper to classify a tile id.
    pub fn with_kind(mut self, tile: u16, kind: TerrainKind) -> Self {
        self.kinds.insert(tile, kind);
        self
    }

    pub fn kind_of(&self, tile: u16) -> TerrainKind {
        self.kinds.get(&tile).copied().unwrap_or(self.fallback)
    }
}

/// Per-cell terrain classification for one tileset.
#[derive(Debug, Clone, Default)]
pub struct TerrainCache {
    tileset: Option<String>,
    kinds: Vec<TerrainKind>,
}

impl TerrainCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the tileset the cache was built for, if it is populated.
    pub fn tileset(&self) -> Option<&str> {
        self.tileset.as_deref()
    }

    pub fn is_valid_for(&self, tileset: &Tileset) -> bool {
        self.tileset.as_deref() == Some(tileset.name.as_str())
    }

    /// Drop all cached classifications.
    pub fn invalidate(&mut self) {
        self.tileset = None;
        self.kinds.clear();
    }

    /// Classify every tile against `tileset`.
    pub fn rebuild(&mut self, tiles: &[u16], tileset: &Tileset) {
        self.kinds = tiles.iter().map(|&t| tileset.kind_of(t)).collect();
        self.tileset = Some(tileset.name.clone());
    }

    /// Reclassify a single tile after an edit.
    pub fn update(&mut self, index: usize, tile: u16, tileset: &Tileset) {
        if let Some(kind) = self.kinds.get_mut(index) {
            *kind = tileset.kind_of(tile);
        }
    }

    pub fn get(&self, index: usize) -> Option<TerrainKind> {
        self.kinds.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tileset_fallback() {
        let ts = Tileset::new("temperate").with_kind(7, TerrainKind::Water);
        assert_eq!(ts.kind_of(7), TerrainKind::Water);
        assert_eq!(ts.kind_of(8), TerrainKind::Clear);
    }

    #[test]
    fn test_cache_rebuild_and_invalidate() {
        let ts = Tileset::new("snow").with_kind(1, TerrainKind::Rock);
        let mut cache = TerrainCache::new();
        assert!(!cache.is_valid_for(&ts));

        cache.rebuild(&[0, 1, 1], &ts);
        assert!(cache.is_valid_for(&ts));
        assert_eq!(cache.get(1), Some(TerrainKind::Rock));

        cache.invalidate();
        assert_eq!(cache.tileset(), None);
        assert_eq!(cache.get(1), None);
    }
}
