//! Cell-to-cell line of sight.
//!
//! Walks the Bresenham line between two cells. Only rock and wall cells block;
//! the endpoints themselves never do.

use antwar_core::enums::Terrain;
use antwar_core::types::CellCoord;

use crate::grid::WorldMap;

/// Check line of sight between two cells on a map.
pub fn has_line_of_sight(map: &WorldMap, from: CellCoord, to: CellCoord) -> bool {
    line_clear(&map.terrain, from, to)
}

/// Bresenham walk over a raw terrain buffer. Off-grid intermediate cells block.
pub(crate) fn line_clear(terrain: &[Terrain], from: CellCoord, to: CellCoord) -> bool {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);

    loop {
        if x == to.x && y == to.y {
            return true;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
        if x == to.x && y == to.y {
            return true;
        }
        match CellCoord::new(x, y).index() {
            Some(i) if !terrain[i].is_opaque() => {}
            _ => return false,
        }
    }
}

impl WorldMap {
    pub fn has_line_of_sight(&self, from: CellCoord, to: CellCoord) -> bool {
        has_line_of_sight(self, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_map_has_los() {
        let map = WorldMap::default();
        assert!(has_line_of_sight(&map, CellCoord::new(0, 0), CellCoord::new(30, 17)));
        assert!(has_line_of_sight(&map, CellCoord::new(5, 5), CellCoord::new(5, 5)));
    }

    #[test]
    fn test_rock_between_blocks() {
        let mut map = WorldMap::default();
        map.set_terrain(CellCoord::new(5, 0), Terrain::Rock);
        assert!(!map.has_line_of_sight(CellCoord::new(0, 0), CellCoord::new(10, 0)));
    }

    #[test]
    fn test_endpoints_never_block() {
        let mut map = WorldMap::default();
        map.set_terrain(CellCoord::new(0, 0), Terrain::Wall);
        map.set_terrain(CellCoord::new(4, 4), Terrain::Rock);
        assert!(map.has_line_of_sight(CellCoord::new(0, 0), CellCoord::new(4, 4)));
    }

    #[test]
    fn test_trees_and_water_do_not_block() {
        let mut map = WorldMap::default();
        map.set_terrain(CellCoord::new(3, 3), Terrain::Tree);
        map.set_terrain(CellCoord::new(2, 2), Terrain::Water);
        assert!(map.has_line_of_sight(CellCoord::new(0, 0), CellCoord::new(6, 6)));
    }

    #[test]
    fn test_los_is_symmetric_for_straight_lines() {
        let mut map = WorldMap::default();
        map.set_terrain(CellCoord::new(8, 4), Terrain::Wall);
        let a = CellCoord::new(8, 0);
        let b = CellCoord::new(8, 9);
        assert!(!map.has_line_of_sight(a, b));
        assert!(!map.has_line_of_sight(b, a));
    }
}
