//! Map layer for the ant-mission simulation.
//!
//! The cell grid (terrain, overlays, occupancy, visibility), line of sight,
//! fog of war, and A* pathfinding.

pub use antwar_core as core;

pub mod fog;
pub mod grid;
pub mod los;
pub mod pathfind;

// Re-export key types for convenience.
pub use fog::Viewer;
pub use grid::WorldMap;
pub use los::has_line_of_sight;
pub use pathfind::{find_path, find_path_with, OccupancyRule, PathQuery};
