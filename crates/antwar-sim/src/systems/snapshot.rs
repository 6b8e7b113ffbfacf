//! Snapshot system: builds the renderer-facing `EngineSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use std::collections::BTreeSet;

use glam::Vec2;
use hecs::{Entity, World};

use antwar_core::components::*;
use antwar_core::constants::SUBCELL_OFFSET;
use antwar_core::enums::EngineState;
use antwar_core::events::EffectRecord;
use antwar_core::state::{EngineSnapshot, ScoreView, UnitView};
use antwar_core::types::{Position, SimTime, UnitId};

/// Everything a snapshot is built from besides the world itself.
pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub state: EngineState,
    pub roster: &'a [(UnitId, Entity)],
    pub effects: &'a [EffectRecord],
    pub score: ScoreView,
    pub globals: &'a BTreeSet<u16>,
}

/// Build a complete snapshot. Units appear in spawn order.
pub fn build_snapshot(world: &World, inputs: SnapshotInputs) -> EngineSnapshot {
    let units: Vec<UnitView> = inputs
        .roster
        .iter()
        .filter_map(|&(_, entity)| unit_view(world, entity))
        .collect();
    let selection = inputs
        .roster
        .iter()
        .filter(|&&(_, e)| world.get::<&Selected>(e).is_ok())
        .map(|&(id, _)| id)
        .collect();

    EngineSnapshot {
        time: inputs.time,
        state: inputs.state,
        units,
        effects: inputs.effects.to_vec(),
        score: inputs.score,
        globals: inputs.globals.iter().copied().collect(),
        selection,
    }
}

fn unit_view(world: &World, entity: Entity) -> Option<UnitView> {
    let mut query = world
        .query_one::<(
            &Identity,
            &Position,
            &Health,
            &Orders,
            &Heading,
            Option<&Cloak>,
            Option<&InfantrySlot>,
        )>(entity)
        .ok()?;
    let (identity, pos, health, orders, heading, cloak, slot) = query.get()?;

    let sub_cell = slot.map(|s| s.0);
    Some(UnitView {
        id: identity.id,
        kind: identity.kind,
        house: identity.house,
        position: pos.0 + sub_cell.map_or(Vec2::ZERO, sub_cell_offset),
        cell: pos.cell(),
        hp: health.hp,
        max_hp: health.max_hp,
        alive: health.alive,
        death_ticks: health.death_ticks,
        mission: orders.mission,
        target: orders.target,
        facing: heading.body.0,
        turret_facing: heading.turret.0,
        cloak: cloak.map(|c| c.state),
        sub_cell,
    })
}

/// Slot 0 is the cell centre; 1-4 are the quadrants.
fn sub_cell_offset(slot: u8) -> Vec2 {
    let d = SUBCELL_OFFSET;
    match slot {
        1 => Vec2::new(-d, -d),
        2 => Vec2::new(d, -d),
        3 => Vec2::new(-d, d),
        4 => Vec2::new(d, d),
        _ => Vec2::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_cell_offsets() {
        assert_eq!(sub_cell_offset(0), Vec2::ZERO);
        assert_eq!(sub_cell_offset(1), Vec2::new(-6.0, -6.0));
        assert_eq!(sub_cell_offset(4), Vec2::new(6.0, 6.0));
    }
}
