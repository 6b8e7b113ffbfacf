//! Cleanup system: despawns units whose death linger has run out.

use std::collections::HashMap;

use hecs::{Entity, World};

use antwar_core::components::Health;
use antwar_core::constants::DEATH_LINGER_TICKS;
use antwar_core::types::UnitId;

/// Despawn expired corpses and drop them from the roster and index.
/// Uses a caller-owned buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    roster: &mut Vec<(UnitId, Entity)>,
    index: &mut HashMap<UnitId, Entity>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    for (entity, health) in world.query_mut::<&Health>() {
        if !health.alive && health.death_ticks > DEATH_LINGER_TICKS {
            despawn_buffer.push(entity);
        }
    }
    if despawn_buffer.is_empty() {
        return;
    }

    roster.retain(|(_, e)| !despawn_buffer.contains(e));
    index.retain(|_, e| !despawn_buffer.contains(e));

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
