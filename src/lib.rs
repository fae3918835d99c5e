//! Per-cell map generation library
//!
//! Builds the 24x24 tile grid of one world-map cell from its type, its four neighbors
//! and the cell above it. Re-exports the pieces binaries and tools need.

pub mod builder;
pub mod config;
pub mod connectivity;
pub mod entities;
pub mod error;
pub mod extras;
pub mod generate;
pub mod generators;
pub mod geometry;
pub mod grid;
pub mod items;
pub mod overmap;
pub mod postprocess;
pub mod rooms;
pub mod rotation;
pub mod seeds;
pub mod shapes;
pub mod stitching;
pub mod terrain;
pub mod tilemap;

pub use config::GenConfig;
pub use error::{GenError, Result};
pub use generate::{CellRequest, MapGenerator};
pub use grid::TileGrid;
pub use items::ItemCatalog;
pub use overmap::{CellContext, CellType, Neighbors};
