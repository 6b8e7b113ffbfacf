//! Mission setup: map construction and unit spawn factories.

use glam::Vec2;
use hecs::{Entity, EntityBuilder, World};

use antwar_core::components::*;
use antwar_core::enums::{CloakState, House, Mission, UnitKind};
use antwar_core::types::{CellCoord, Facing, Position, UnitId};
use antwar_map::WorldMap;
use antwar_scenario::ScenarioData;
use antwar_unit_ai::profiles::get_profile;

/// Build the world map from decoded scenario layers.
///
/// Missing layers leave the map all-clear; terrain features are applied last.
pub fn build_map(data: &ScenarioData) -> WorldMap {
    let mut map = WorldMap::new(data.bounds);

    if let Some(layers) = &data.map_layers {
        for (i, (&template, &icon)) in layers.templates.iter().zip(&layers.icons).enumerate() {
            map.set_template(CellCoord::from_index(i), template, icon);
        }
    }
    if let Some(overlay) = &data.overlay {
        for (i, &value) in overlay.iter().enumerate() {
            map.set_overlay(CellCoord::from_index(i), value);
        }
    }
    for feature in &data.terrain {
        map.set_terrain(feature.cell, feature.terrain);
    }
    map
}

/// What to spawn.
#[derive(Debug, Clone, Copy)]
pub struct UnitSpawn {
    pub kind: UnitKind,
    pub house: House,
    pub position: Vec2,
    pub facing: Facing,
    pub mission: Mission,
    /// Health out of 256.
    pub strength: u32,
}

impl UnitSpawn {
    /// Full-strength unit at a cell centre, facing north.
    pub fn at_cell(kind: UnitKind, house: House, cell: CellCoord, mission: Mission) -> Self {
        Self {
            kind,
            house,
            position: cell.center(),
            facing: Facing::default(),
            mission,
            strength: 256,
        }
    }
}

/// Spawn one unit with every component its profile calls for.
pub fn spawn_unit(world: &mut World, id: UnitId, spawn: UnitSpawn) -> Entity {
    let profile = get_profile(spawn.kind);
    let hp = (profile.max_hp * spawn.strength.min(256) / 256).max(1);

    let mut builder = EntityBuilder::new();
    builder
        .add(Identity {
            id,
            kind: spawn.kind,
            house: spawn.house,
        })
        .add(Position(spawn.position))
        .add(Health {
            hp,
            max_hp: profile.max_hp,
            alive: true,
            death_ticks: 0,
        })
        .add(Orders {
            mission: spawn.mission,
            ..Default::default()
        })
        .add(Mobility::default())
        .add(Armament::default())
        .add(Heading {
            body: spawn.facing,
            turret: spawn.facing,
        });

    if profile.is_infantry() {
        builder.add(InfantrySlot::default());
    }
    if profile.can_cloak {
        // Submarines start submerged.
        builder.add(Cloak {
            state: CloakState::Cloaked,
            ..Default::default()
        });
    }
    world.spawn(builder.build())
}

/// Attach a team script to a freshly spawned unit.
pub fn attach_team_script(world: &mut World, entity: Entity, team: usize) {
    let _ = world.insert_one(
        entity,
        TeamScript {
            team,
            ..Default::default()
        },
    );
}
