//! MapGrid: playable map with terrain classification and impact layers.

use std::collections::BTreeMap;

use salvo_core::enums::TerrainKind;
use salvo_core::{CPos, WPos};

use crate::cells;
use crate::layers::{ResourceLayer, SmudgeLayer};
use crate::tileset::{TerrainCache, Tileset};

/// The playable map as seen by the combat core.
#[derive(Debug, Clone)]
pub struct MapGrid {
    /// Number of columns (west to east).
    width: i32,
    /// Number of rows (south to north).
    height: i32,
    /// Tile ids, row-major from the south-west corner.
    tiles: Vec<u16>,
    tileset: Tileset,
    cache: TerrainCache,
    smudges: BTreeMap<String, SmudgeLayer>,
    resources: Option<ResourceLayer>,
}

impl MapGrid {
    /// Create a map filled with tile id 0.
    pub fn new(width: i32, height: i32, tileset: Tileset) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let tiles = vec![0; (width * height) as usize];
        let mut cache = TerrainCache::new();
        cache.rebuild(&tiles, &tileset);
        Self {
            width,
            height,
            tiles,
            tileset,
            cache,
            smudges: BTreeMap::new(),
            resources: None,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the cell lies inside the playable area.
    pub fn contains(&self, cell: CPos) -> bool {
        cell.x() >= 0 && cell.y() >= 0 && cell.x() < self.width && cell.y() < self.height
    }

    pub fn contains_pos(&self, pos: WPos) -> bool {
        self.contains(pos.cell())
    }

    fn index(&self, cell: CPos) -> Option<usize> {
        if self.contains(cell) {
            Some((cell.y() * self.width + cell.x()) as usize)
        } else {
            None
        }
    }

    pub fn tile_at(&self, cell: CPos) -> Option<u16> {
        self.index(cell).map(|i| self.tiles[i])
    }

    /// Replace the tile id of one cell. Out-of-map cells are ignored.
    pub fn set_tile(&mut self, cell: CPos, tile: u16) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = tile;
            self.cache.update(i, tile, &self.tileset);
        }
    }

    pub fn tileset(&self) -> &Tileset {
        &self.tileset
    }

    /// Swap the tileset. Cached classifications are thrown away and rebuilt.
    pub fn set_tileset(&mut self, tileset: Tileset) {
        self.cache.invalidate();
        self.tileset = tileset;
        self.cache.rebuild(&self.tiles, &self.tileset);
    }

    /// Terrain classification of a cell, `None` outside the map.
    pub fn terrain_at(&self, cell: CPos) -> Option<TerrainKind> {
        let i = self.index(cell)?;
        if self.cache.is_valid_for(&self.tileset) {
            self.cache.get(i)
        } else {
            Some(self.tileset.kind_of(self.tiles[i]))
        }
    }

    pub fn is_water(&self, cell: CPos) -> bool {
        self.terrain_at(cell).is_some_and(TerrainKind::is_water)
    }

    /// Cells of a circular footprint that lie on the map.
    pub fn cells_in_circle(&self, center: CPos, radius: i32) -> Vec<CPos> {
        cells::cells_in_circle(center, radius)
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }

    /// Cells of an annular footprint that lie on the map.
    pub fn cells_in_annulus(&self, center: CPos, inner: i32, outer: i32) -> Vec<CPos> {
        cells::cells_in_annulus(center, inner, outer)
            .into_iter()
            .filter(|c| self.contains(*c))
            .collect()
    }

    // --- Smudges ---

    pub fn add_smudge_layer(&mut self, kind: impl Into<String>) {
        let kind = kind.into();
        self.smudges
            .entry(kind.clone())
            .or_insert_with(|| SmudgeLayer::new(kind));
    }

    pub fn has_smudge_layer(&self, kind: &str) -> bool {
        self.smudges.contains_key(kind)
    }

    pub fn smudge_layer(&self, kind: &str) -> Option<&SmudgeLayer> {
        self.smudges.get(kind)
    }

    /// Stamp a smudge of `kind`. Returns false if the map has no such layer.
    pub fn add_smudge(&mut self, kind: &str, cell: CPos) -> bool {
        if !self.contains(cell) {
            return false;
        }
        match self.smudges.get_mut(kind) {
            Some(layer) => {
                layer.add_smudge(cell);
                true
            }
            None => false,
        }
    }

    // --- Resources ---

    pub fn enable_resources(&mut self) {
        if self.resources.is_none() {
            self.resources = Some(ResourceLayer::new());
        }
    }

    pub fn has_resource_layer(&self) -> bool {
        self.resources.is_some()
    }

    pub fn resources(&self) -> Option<&ResourceLayer> {
        self.resources.as_ref()
    }

    pub fn resources_mut(&mut self) -> Option<&mut ResourceLayer> {
        self.resources.as_mut()
    }

    /// Remove resources in a cell. Returns whether anything was removed.
    pub fn destroy_resource(&mut self, cell: CPos) -> bool {
        self.resources
            .as_mut()
            .is_some_and(|layer| layer.destroy(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 6x4 map with a water column at x = 5.
    fn make_test_map() -> MapGrid {
        let tileset = Tileset::new("temperate").with_kind(9, TerrainKind::Water);
        let mut map = MapGrid::new(6, 4, tileset);
        for y in 0..4 {
            map.set_tile(CPos::new(5, y), 9);
        }
        map
    }

    #[test]
    fn test_bounds() {
        let map = make_test_map();
        assert!(map.contains(CPos::new(0, 0)));
        assert!(map.contains(CPos::new(5, 3)));
        assert!(!map.contains(CPos::new(6, 0)));
        assert!(!map.contains(CPos::new(0, -1)));
        assert!(!map.contains_pos(WPos::new(-1, 0, 0)));
        assert_eq!(map.terrain_at(CPos::new(9, 9)), None);
    }

    #[test]
    fn test_terrain_classification() {
        let map = make_test_map();
        assert!(map.is_water(CPos::new(5, 2)));
        assert!(!map.is_water(CPos::new(4, 2)));
        assert_eq!(map.terrain_at(CPos::new(0, 0)), Some(TerrainKind::Clear));
    }

    #[test]
    fn test_tileset_change_invalidates_cache() {
        let mut map = make_test_map();
        assert!(map.is_water(CPos::new(5, 0)));

        // Same tile ids, different tileset: tile 9 is now rock.
        map.set_tileset(Tileset::new("desert").with_kind(9, TerrainKind::Rock));
        assert!(!map.is_water(CPos::new(5, 0)));
        assert_eq!(map.terrain_at(CPos::new(5, 0)), Some(TerrainKind::Rock));
    }

    #[test]
    fn test_footprints_are_clipped_to_map() {
        let map = make_test_map();
        let cells = map.cells_in_circle(CPos::new(0, 0), 1);
        assert_eq!(cells, vec![CPos::new(0, 0), CPos::new(1, 0), CPos::new(0, 1)]);
        let ring = map.cells_in_annulus(CPos::new(0, 0), 0, 1);
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_smudge_requires_layer() {
        let mut map = make_test_map();
        assert!(!map.add_smudge("crater", CPos::new(1, 1)));
        map.add_smudge_layer("crater");
        assert!(map.add_smudge("crater", CPos::new(1, 1)));
        assert!(!map.add_smudge("crater", CPos::new(-1, 1)));
        assert_eq!(
            map.smudge_layer("crater").map(|l| l.depth_at(CPos::new(1, 1))),
            Some(1)
        );
    }

    #[test]
    fn test_resource_layer() {
        let mut map = make_test_map();
        assert!(!map.destroy_resource(CPos::new(2, 2)));
        map.enable_resources();
        if let Some(layer) = map.resources_mut() {
            layer.add(CPos::new(2, 2), "ore", 5);
        }
        assert!(map.destroy_resource(CPos::new(2, 2)));
        assert!(map.resources().is_some_and(|r| r.is_empty()));
    }
}
