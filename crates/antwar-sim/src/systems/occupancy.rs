//! Occupancy rebuild and infantry sub-cell assignment.
//!
//! The grid is cleared and refilled from live unit positions every tick. The
//! first unit found in a cell (in spawn order) is its occupant. Infantry
//! sharing a cell take sub-cell slots round-robin in the same order.

use std::collections::HashMap;

use hecs::{Entity, World};

use antwar_core::components::{Health, InfantrySlot};
use antwar_core::constants::INFANTRY_SUBCELLS;
use antwar_core::types::{CellCoord, Position, UnitId};
use antwar_map::WorldMap;

pub fn run(world: &mut World, map: &mut WorldMap, roster: &[(UnitId, Entity)]) {
    map.clear_occupancy();
    let mut infantry_per_cell: HashMap<CellCoord, u8> = HashMap::new();

    for &(id, entity) in roster {
        let Ok((pos, health, slot)) =
            world.query_one_mut::<(&Position, &Health, Option<&mut InfantrySlot>)>(entity)
        else {
            continue;
        };
        if !health.alive {
            continue;
        }
        let cell = pos.cell();
        if map.occupant(cell).is_none() {
            map.set_occupancy(cell, id);
        }
        if let Some(slot) = slot {
            let count = infantry_per_cell.entry(cell).or_insert(0);
            slot.0 = *count % INFANTRY_SUBCELLS;
            *count = count.wrapping_add(1);
        }
    }
}
