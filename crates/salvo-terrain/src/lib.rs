//! Map collaborator for the salvo combat core.
//!
//! Map bounds, tileset-driven terrain classification,
//! cell footprints, smudge layers and the resource layer.

pub use salvo_core as core;

pub mod cells;
pub mod grid;
pub mod layers;
pub mod tileset;

// Re-export key types for convenience.
pub use cells::{cells_in_annulus, cells_in_circle};
pub use grid::MapGrid;
pub use layers::{ResourceLayer, SmudgeLayer};
pub use tileset::{TerrainCache, Tileset};
