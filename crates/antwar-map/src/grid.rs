//! WorldMap: terrain, overlay, occupancy and visibility grids.

use antwar_core::constants::*;
use antwar_core::enums::{SpeedClass, Terrain, Visibility};
use antwar_core::types::{CellCoord, MapBounds, UnitId};

/// Template id meaning "no template" (plain clear ground).
pub const TEMPLATE_NONE: u16 = 0xFFFF;

/// Overlay byte meaning "no overlay".
pub const OVERLAY_NONE: u8 = 0xFF;

/// Water templates (open water).
pub const WATER_TEMPLATES: std::ops::RangeInclusive<u16> = 1..=2;

/// Rough ground templates.
pub const ROUGH_TEMPLATES: std::ops::RangeInclusive<u16> = 97..=110;

/// Road templates.
pub const ROAD_TEMPLATES: std::ops::RangeInclusive<u16> = 173..=215;

/// Bridge templates. Passable until destroyed.
pub const BRIDGE_TEMPLATES: std::ops::RangeInclusive<u16> = 235..=244;

/// Wall overlays (sandbag, chain link, concrete, barbed wire, wood fence).
pub const WALL_OVERLAYS: std::ops::RangeInclusive<u8> = 0..=4;

/// Gold ore overlays, thinnest tier first.
pub const GOLD_OVERLAYS: std::ops::RangeInclusive<u8> = 5..=8;

/// Gem overlays, thinnest tier first.
pub const GEM_OVERLAYS: std::ops::RangeInclusive<u8> = 9..=12;

/// The simulation's cell grid.
///
/// All buffers are dense and row-major over the full 128×128 grid; only cells
/// inside `bounds` are playable.
#[derive(Debug, Clone)]
pub struct WorldMap {
    bounds: MapBounds,
    pub(crate) terrain: Vec<Terrain>,
    templates: Vec<u16>,
    icons: Vec<u8>,
    overlay: Vec<u8>,
    /// Unit id per cell, 0 when empty. Rebuilt from scratch every tick.
    occupancy: Vec<u32>,
    pub(crate) visibility: Vec<Visibility>,
    /// Cells marked visible during the last fog pass.
    pub(crate) visible_cells: Vec<usize>,
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::new(MapBounds::default())
    }
}

impl WorldMap {
    /// All-clear map with the given playable bounds.
    pub fn new(bounds: MapBounds) -> Self {
        Self {
            bounds,
            terrain: vec![Terrain::Clear; MAP_CELL_COUNT],
            templates: vec![TEMPLATE_NONE; MAP_CELL_COUNT],
            icons: vec![0; MAP_CELL_COUNT],
            overlay: vec![OVERLAY_NONE; MAP_CELL_COUNT],
            occupancy: vec![0; MAP_CELL_COUNT],
            visibility: vec![Visibility::Shroud; MAP_CELL_COUNT],
            visible_cells: Vec::new(),
        }
    }

    pub fn bounds(&self) -> MapBounds {
        self.bounds
    }

    pub fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.on_grid() && self.bounds.contains(cell)
    }

    // --- Terrain ---

    /// Terrain at a cell. Off-grid cells read as rock.
    pub fn terrain(&self, cell: CellCoord) -> Terrain {
        cell.index()
            .map(|i| self.terrain[i])
            .unwrap_or(Terrain::Rock)
    }

    pub fn set_terrain(&mut self, cell: CellCoord, terrain: Terrain) {
        if let Some(i) = cell.index() {
            self.terrain[i] = terrain;
        }
    }

    /// Terrain-only passability. Out-of-bounds is impassable.
    pub fn is_passable(&self, cell: CellCoord) -> bool {
        self.in_bounds(cell) && !matches!(self.terrain(cell), Terrain::Rock | Terrain::Wall)
    }

    /// Passability for a given locomotion: naval movers stay on water, land movers off it.
    pub fn is_traversable(&self, cell: CellCoord, is_naval: bool, speed_class: SpeedClass) -> bool {
        if !self.is_passable(cell) {
            return false;
        }
        if speed_class == SpeedClass::Winged {
            return true;
        }
        let water = self.terrain(cell) == Terrain::Water;
        if is_naval {
            water
        } else {
            !water
        }
    }

    pub fn template(&self, cell: CellCoord) -> u16 {
        cell.index()
            .map(|i| self.templates[i])
            .unwrap_or(TEMPLATE_NONE)
    }

    pub fn icon(&self, cell: CellCoord) -> u8 {
        cell.index().map(|i| self.icons[i]).unwrap_or(0)
    }

    /// Store a template/icon pair and derive the terrain class it implies.
    pub fn set_template(&mut self, cell: CellCoord, template: u16, icon: u8) {
        let Some(i) = cell.index() else {
            return;
        };
        self.templates[i] = template;
        self.icons[i] = icon;
        if WATER_TEMPLATES.contains(&template) {
            self.terrain[i] = Terrain::Water;
        }
    }

    pub fn overlay(&self, cell: CellCoord) -> u8 {
        cell.index()
            .map(|i| self.overlay[i])
            .unwrap_or(OVERLAY_NONE)
    }

    /// Store an overlay byte. Wall overlays also turn the cell into wall terrain.
    pub fn set_overlay(&mut self, cell: CellCoord, overlay: u8) {
        let Some(i) = cell.index() else {
            return;
        };
        self.overlay[i] = overlay;
        if WALL_OVERLAYS.contains(&overlay) {
            self.terrain[i] = Terrain::Wall;
        }
    }

    /// Movement speed multiplier for a locomotion class on a cell.
    ///
    /// Returns 0.0 where the class cannot move at all. Land classes on water get a
    /// small non-zero factor: water is impassable for them but not "infinitely slow".
    pub fn speed_multiplier(&self, cell: CellCoord, speed_class: SpeedClass) -> f32 {
        if !self.in_bounds(cell) {
            return 0.0;
        }
        let terrain = self.terrain(cell);
        match speed_class {
            SpeedClass::Winged => 1.0,
            SpeedClass::Float => match terrain {
                Terrain::Water => 1.0,
                _ => 0.0,
            },
            SpeedClass::Foot | SpeedClass::Wheel => match terrain {
                Terrain::Rock | Terrain::Wall => 0.0,
                Terrain::Water => WATER_LAND_SPEED_FACTOR,
                Terrain::Tree => TREE_SPEED_FACTOR,
                Terrain::Clear => {
                    let template = self.template(cell);
                    if ROAD_TEMPLATES.contains(&template) {
                        ROAD_SPEED_FACTOR
                    } else if ROUGH_TEMPLATES.contains(&template) {
                        ROUGH_SPEED_FACTOR
                    } else {
                        1.0
                    }
                }
            },
        }
    }

    // --- Scenario overlay mutations ---

    /// Reclassify every bridge template within `radius` cells of `center` as water.
    /// Returns the number of cells changed.
    pub fn destroy_bridge(&mut self, center: CellCoord, radius: i32) -> usize {
        let mut changed = 0;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let cell = center.offset(dx, dy);
                let Some(i) = cell.index() else {
                    continue;
                };
                if BRIDGE_TEMPLATES.contains(&self.templates[i]) {
                    self.templates[i] = *WATER_TEMPLATES.start();
                    self.icons[i] = 0;
                    self.terrain[i] = Terrain::Water;
                    changed += 1;
                }
            }
        }
        changed
    }

    /// Harvest one step of ore from a cell. Returns the credit yield, 0 when empty.
    pub fn deplete_ore(&mut self, cell: CellCoord) -> u32 {
        let Some(i) = cell.index() else {
            return 0;
        };
        let value = self.overlay[i];
        let (first, credits) = if GOLD_OVERLAYS.contains(&value) {
            (*GOLD_OVERLAYS.start(), GOLD_YIELD)
        } else if GEM_OVERLAYS.contains(&value) {
            (*GEM_OVERLAYS.start(), GEM_YIELD)
        } else {
            return 0;
        };
        self.overlay[i] = if value > first { value - 1 } else { OVERLAY_NONE };
        credits
    }

    // --- Occupancy ---

    /// Forget every occupant. Called once per tick before the rebuild.
    pub fn clear_occupancy(&mut self) {
        self.occupancy.fill(0);
    }

    pub fn set_occupancy(&mut self, cell: CellCoord, unit: UnitId) {
        if let Some(i) = cell.index() {
            self.occupancy[i] = unit.0;
        }
    }

    /// Unit occupying a cell, if any.
    pub fn occupant(&self, cell: CellCoord) -> Option<UnitId> {
        cell.index()
            .map(|i| self.occupancy[i])
            .filter(|&id| id != 0)
            .map(UnitId)
    }

    // --- Visibility ---

    pub fn visibility(&self, cell: CellCoord) -> Visibility {
        cell.index()
            .map(|i| self.visibility[i])
            .unwrap_or(Visibility::Shroud)
    }

    /// Raw visibility bytes (0 shroud, 1 fog, 2 visible), row-major.
    pub fn visibility_bytes(&self) -> Vec<u8> {
        self.visibility.iter().map(|v| *v as u8).collect()
    }

    /// Number of cells currently visible.
    pub fn visible_count(&self) -> usize {
        self.visible_cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> WorldMap {
        WorldMap::new(MapBounds {
            x: 0,
            y: 0,
            width: 20,
            height: 20,
        })
    }

    #[test]
    fn test_out_of_bounds_impassable() {
        let map = small_map();
        assert!(map.is_passable(CellCoord::new(0, 0)));
        assert!(!map.is_passable(CellCoord::new(20, 5)));
        assert!(!map.is_passable(CellCoord::new(-1, 5)));
    }

    #[test]
    fn test_rock_and_wall_block() {
        let mut map = small_map();
        map.set_terrain(CellCoord::new(3, 3), Terrain::Rock);
        map.set_overlay(CellCoord::new(4, 4), 2);
        assert!(!map.is_passable(CellCoord::new(3, 3)));
        assert!(!map.is_passable(CellCoord::new(4, 4)));
        assert_eq!(map.terrain(CellCoord::new(4, 4)), Terrain::Wall);
    }

    #[test]
    fn test_speed_multipliers() {
        let mut map = small_map();
        let road = CellCoord::new(1, 1);
        let rough = CellCoord::new(2, 1);
        let tree = CellCoord::new(3, 1);
        let water = CellCoord::new(4, 1);
        map.set_template(road, 180, 0);
        map.set_template(rough, 100, 0);
        map.set_terrain(tree, Terrain::Tree);
        map.set_template(water, 1, 0);

        assert_eq!(map.speed_multiplier(road, SpeedClass::Wheel), ROAD_SPEED_FACTOR);
        assert_eq!(map.speed_multiplier(rough, SpeedClass::Foot), ROUGH_SPEED_FACTOR);
        assert_eq!(map.speed_multiplier(tree, SpeedClass::Wheel), TREE_SPEED_FACTOR);
        assert_eq!(map.speed_multiplier(water, SpeedClass::Foot), WATER_LAND_SPEED_FACTOR);
        assert_eq!(map.speed_multiplier(water, SpeedClass::Float), 1.0);
        assert_eq!(map.speed_multiplier(road, SpeedClass::Float), 0.0);
    }

    #[test]
    fn test_naval_traversal() {
        let mut map = small_map();
        let water = CellCoord::new(5, 5);
        map.set_template(water, 2, 3);
        assert!(map.is_traversable(water, true, SpeedClass::Float));
        assert!(!map.is_traversable(water, false, SpeedClass::Wheel));
        assert!(!map.is_traversable(CellCoord::new(6, 6), true, SpeedClass::Float));
    }

    #[test]
    fn test_destroy_bridge_counts_cells() {
        let mut map = small_map();
        for x in 5..=8 {
            map.set_template(CellCoord::new(x, 10), 236, 0);
        }
        let changed = map.destroy_bridge(CellCoord::new(6, 10), 1);
        assert_eq!(changed, 3, "cells 5, 6 and 7 are within radius 1");
        assert_eq!(map.terrain(CellCoord::new(6, 10)), Terrain::Water);
        assert_eq!(map.terrain(CellCoord::new(8, 10)), Terrain::Clear);
        assert_eq!(map.destroy_bridge(CellCoord::new(6, 10), 1), 0);
    }

    #[test]
    fn test_deplete_ore_tiers() {
        let mut map = small_map();
        let cell = CellCoord::new(2, 2);
        map.set_overlay(cell, 6);
        assert_eq!(map.deplete_ore(cell), GOLD_YIELD);
        assert_eq!(map.overlay(cell), 5);
        assert_eq!(map.deplete_ore(cell), GOLD_YIELD);
        assert_eq!(map.overlay(cell), OVERLAY_NONE);
        assert_eq!(map.deplete_ore(cell), 0);

        let gems = CellCoord::new(3, 2);
        map.set_overlay(gems, 9);
        assert_eq!(map.deplete_ore(gems), GEM_YIELD);
        assert_eq!(map.deplete_ore(gems), 0);
    }

    #[test]
    fn test_occupancy_rebuild() {
        let mut map = small_map();
        let cell = CellCoord::new(7, 7);
        map.set_occupancy(cell, UnitId(12));
        assert_eq!(map.occupant(cell), Some(UnitId(12)));
        map.clear_occupancy();
        assert_eq!(map.occupant(cell), None);
    }
}
