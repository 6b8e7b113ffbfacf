//! End-of-mission check.

use hecs::World;

use antwar_core::components::{Health, Identity};
use antwar_core::enums::{EngineState, House};

use crate::scripting::ScriptState;

/// `Lost` when the player has no live units, `Won` when no hostile unit is
/// alive and no armed trigger can still spawn one. `None` otherwise.
pub fn check(world: &World, script: &ScriptState, player: House) -> Option<EngineState> {
    let mut player_alive = false;
    let mut hostile_alive = false;
    for (_, (identity, health)) in world.query::<(&Identity, &Health)>().iter() {
        if !health.alive {
            continue;
        }
        if identity.house == player {
            player_alive = true;
        } else if identity.house.is_hostile_to(player) {
            hostile_alive = true;
        }
    }

    if !player_alive {
        Some(EngineState::Lost)
    } else if !hostile_alive && !script.hostile_spawn_pending(player) {
        Some(EngineState::Won)
    } else {
        None
    }
}
