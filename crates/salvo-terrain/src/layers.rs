//! Smudge and resource layers stamped by impacts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use salvo_core::constants::MAX_SMUDGE_DEPTH;
use salvo_core::CPos;

/// Scorch marks or craters of one smudge type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmudgeLayer {
    pub kind: String,
    /// Stack depth per cell, 1..=MAX_SMUDGE_DEPTH.
    depths: BTreeMap<CPos, u8>,
}

impl SmudgeLayer {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            depths: BTreeMap::new(),
        }
    }

    /// Stamp a smudge on `cell`, deepening an existing one up to the cap.
    pub fn add_smudge(&mut self, cell: CPos) {
        let depth = self.depths.entry(cell).or_insert(0);
        *depth = (*depth + 1).min(MAX_SMUDGE_DEPTH);
    }

    pub fn depth_at(&self, cell: CPos) -> u8 {
        self.depths.get(&cell).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CPos, u8)> + '_ {
        self.depths.iter().map(|(c, d)| (*c, *d))
    }
}

/// Harvestable resource in a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceCell {
    pub kind: String,
    pub density: u8,
}

/// Harvestable resources on the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLayer {
    cells: BTreeMap<CPos, ResourceCell>,
}

impl ResourceLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, cell: CPos, kind: impl Into<String>, density: u8) {
        self.cells.insert(
            cell,
            ResourceCell {
                kind: kind.into(),
                density,
            },
        );
    }

    pub fn get(&self, cell: CPos) -> Option<&ResourceCell> {
        self.cells.get(&cell)
    }

    /// Remove all resources in `cell`. Returns whether anything was there.
    pub fn destroy(&mut self, cell: CPos) -> bool {
        self.cells.remove(&cell).is_some()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smudge_depth_is_capped() {
        let mut layer = SmudgeLayer::new("crater");
        let cell = CPos::new(1, 1);
        for _ in 0..5 {
            layer.add_smudge(cell);
        }
        assert_eq!(layer.depth_at(cell), MAX_SMUDGE_DEPTH);
        assert_eq!(layer.depth_at(CPos::new(0, 0)), 0);
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_resource_destroy() {
        let mut ore = ResourceLayer::new();
        ore.add(CPos::new(2, 3), "ore", 9);
        assert!(ore.destroy(CPos::new(2, 3)));
        assert!(!ore.destroy(CPos::new(2, 3)));
        assert!(ore.is_empty());
    }
}
