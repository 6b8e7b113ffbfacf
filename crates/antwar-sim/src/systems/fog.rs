//! Fog-of-war pass: player units reveal what they can see.

use hecs::World;

use antwar_core::components::{Health, Identity};
use antwar_core::enums::House;
use antwar_core::types::Position;
use antwar_map::{Viewer, WorldMap};
use antwar_unit_ai::profiles::get_profile;

pub fn run(world: &World, map: &mut WorldMap, player: House) {
    let viewers: Vec<Viewer> = world
        .query::<(&Identity, &Position, &Health)>()
        .iter()
        .filter(|(_, (identity, _, health))| health.alive && identity.house == player)
        .map(|(_, (identity, pos, _))| Viewer {
            cell: pos.cell(),
            sight: get_profile(identity.kind).sight,
        })
        .collect();
    map.update_fog_of_war(&viewers);
}
