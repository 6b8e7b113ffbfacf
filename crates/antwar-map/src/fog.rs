//! Fog of war.
//!
//! Cells are SHROUD until first seen, VISIBLE while a friendly unit sees them,
//! and FOG afterwards. Only the cells revealed by the previous pass are
//! downgraded, so the cost scales with what units see rather than the map size.

use antwar_core::enums::Visibility;
use antwar_core::types::CellCoord;

use crate::grid::WorldMap;
use crate::los::line_clear;

/// A friendly unit that reveals cells around itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub cell: CellCoord,
    /// Sight radius in cells.
    pub sight: i32,
}

impl WorldMap {
    /// Recompute visibility from the given viewers.
    pub fn update_fog_of_war(&mut self, viewers: &[Viewer]) {
        let bounds = self.bounds();
        let terrain = &self.terrain;
        let visibility = &mut self.visibility;
        let revealed = &mut self.visible_cells;

        for idx in revealed.drain(..) {
            if visibility[idx] == Visibility::Visible {
                visibility[idx] = Visibility::Fog;
            }
        }

        for viewer in viewers {
            let r = viewer.sight.max(0);
            for dy in -r..=r {
                for dx in -r..=r {
                    if dx * dx + dy * dy > r * r {
                        continue;
                    }
                    let cell = viewer.cell.offset(dx, dy);
                    if !bounds.contains(cell) {
                        continue;
                    }
                    let Some(idx) = cell.index() else {
                        continue;
                    };
                    if visibility[idx] == Visibility::Visible {
                        continue;
                    }
                    if line_clear(terrain, viewer.cell, cell) {
                        visibility[idx] = Visibility::Visible;
                        revealed.push(idx);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antwar_core::enums::Terrain;

    #[test]
    fn test_reveal_then_fog() {
        let mut map = WorldMap::default();
        let viewer = Viewer {
            cell: CellCoord::new(20, 20),
            sight: 3,
        };
        map.update_fog_of_war(&[viewer]);
        assert_eq!(map.visibility(CellCoord::new(20, 20)), Visibility::Visible);
        assert_eq!(map.visibility(CellCoord::new(23, 20)), Visibility::Visible);
        assert_eq!(map.visibility(CellCoord::new(23, 23)), Visibility::Shroud, "outside the circle");

        let moved = Viewer {
            cell: CellCoord::new(40, 40),
            sight: 3,
        };
        map.update_fog_of_war(&[moved]);
        assert_eq!(map.visibility(CellCoord::new(20, 20)), Visibility::Fog);
        assert_eq!(map.visibility(CellCoord::new(40, 40)), Visibility::Visible);
    }

    #[test]
    fn test_fog_never_returns_to_shroud() {
        let mut map = WorldMap::default();
        let cell = CellCoord::new(10, 10);
        map.update_fog_of_war(&[Viewer { cell, sight: 1 }]);
        map.update_fog_of_war(&[]);
        map.update_fog_of_war(&[]);
        assert_eq!(map.visibility(cell), Visibility::Fog);
        assert_eq!(map.visible_count(), 0);
    }

    #[test]
    fn test_wall_shadows_cells_behind() {
        let mut map = WorldMap::default();
        map.set_terrain(CellCoord::new(12, 10), Terrain::Wall);
        map.update_fog_of_war(&[Viewer {
            cell: CellCoord::new(10, 10),
            sight: 5,
        }]);
        assert_eq!(map.visibility(CellCoord::new(12, 10)), Visibility::Visible, "the wall itself is seen");
        assert_eq!(map.visibility(CellCoord::new(14, 10)), Visibility::Shroud);
    }

    #[test]
    fn test_overlapping_viewers_count_cells_once() {
        let mut map = WorldMap::default();
        let a = Viewer {
            cell: CellCoord::new(30, 30),
            sight: 2,
        };
        map.update_fog_of_war(&[a]);
        let single = map.visible_count();
        map.update_fog_of_war(&[a, a]);
        assert_eq!(map.visible_count(), single);
    }
}
