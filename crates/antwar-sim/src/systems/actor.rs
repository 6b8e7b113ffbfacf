//! Shared per-tick context and unit read/write helpers for the unit systems.
//!
//! A unit being updated is copied out of the world as an [`Actor`], mutated,
//! and stored back. Other units are only ever seen through [`Contact`]s, and
//! outcomes against them (damage, kills) are written straight to the world so
//! that later units in the same tick observe them.

use std::collections::HashMap;

use glam::Vec2;
use hecs::{Entity, World};

use antwar_core::components::*;
use antwar_core::constants::CELL_SIZE;
use antwar_core::enums::{House, Mission, UnitCategory, UnitKind};
use antwar_core::events::EffectRecord;
use antwar_core::state::ScoreView;
use antwar_core::types::{CellCoord, Position, UnitId};
use antwar_map::{find_path_with, OccupancyRule, PathQuery, WorldMap};
use antwar_unit_ai::cloak::is_hidden;
use antwar_unit_ai::combat::{select_weapon, TargetTraits};
use antwar_unit_ai::fsm::{transition, MissionEvent};
use antwar_unit_ai::profiles::{get_profile, UnitProfile};

/// Everything the unit systems touch besides the unit itself.
pub struct UnitContext<'a> {
    pub world: &'a mut World,
    pub map: &'a mut WorldMap,
    pub index: &'a HashMap<UnitId, Entity>,
    pub effects: &'a mut Vec<EffectRecord>,
    pub score: &'a mut ScoreView,
    pub player: House,
    pub tick: u64,
    pub occupancy_penalty: u32,
}

/// A detached copy of one unit's components.
#[derive(Debug, Clone)]
pub struct Actor {
    pub entity: Entity,
    pub identity: Identity,
    pub profile: UnitProfile,
    pub pos: Vec2,
    pub health: Health,
    pub orders: Orders,
    pub mobility: Mobility,
    pub armament: Armament,
    pub heading: Heading,
    pub cloak: Option<Cloak>,
}

impl Actor {
    pub fn load(world: &World, entity: Entity) -> Option<Self> {
        let mut query = world
            .query_one::<(
                &Identity,
                &Position,
                &Health,
                &Orders,
                &Mobility,
                &Armament,
                &Heading,
                Option<&Cloak>,
            )>(entity)
            .ok()?;
        let (identity, pos, health, orders, mobility, armament, heading, cloak) = query.get()?;
        Some(Self {
            entity,
            identity: *identity,
            profile: get_profile(identity.kind),
            pos: pos.0,
            health: *health,
            orders: *orders,
            mobility: mobility.clone(),
            armament: *armament,
            heading: *heading,
            cloak: cloak.copied(),
        })
    }

    pub fn store(self, world: &mut World) {
        let Ok((pos, orders, mobility, armament, heading, cloak)) = world.query_one_mut::<(
            &mut Position,
            &mut Orders,
            &mut Mobility,
            &mut Armament,
            &mut Heading,
            Option<&mut Cloak>,
        )>(self.entity) else {
            return;
        };
        pos.0 = self.pos;
        *orders = self.orders;
        *mobility = self.mobility;
        *armament = self.armament;
        *heading = self.heading;
        if let (Some(c), Some(mine)) = (cloak, self.cloak) {
            *c = mine;
        }
    }

    pub fn id(&self) -> UnitId {
        self.identity.id
    }

    pub fn cell(&self) -> CellCoord {
        CellCoord::from_world(self.pos)
    }

    /// Apply a mission event through the transition table.
    pub fn observe(&mut self, event: MissionEvent) -> bool {
        match transition(self.orders.mission, event) {
            Some(next) => {
                self.orders.mission = next;
                true
            }
            None => false,
        }
    }

    pub fn clear_path(&mut self) {
        self.mobility = Mobility::default();
    }

    /// Drop the target and any path, then fall back through `TargetLost`.
    pub fn lose_target(&mut self) {
        self.orders.target = None;
        self.clear_path();
        self.observe(MissionEvent::TargetLost);
    }
}

/// Read-only view of another unit.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub entity: Entity,
    pub id: UnitId,
    pub kind: UnitKind,
    pub house: House,
    pub pos: Vec2,
    pub alive: bool,
    pub category: UnitCategory,
    pub crushable: bool,
    pub hidden: bool,
}

impl Contact {
    pub fn cell(&self) -> CellCoord {
        CellCoord::from_world(self.pos)
    }

    pub fn traits(&self) -> TargetTraits {
        TargetTraits {
            category: self.category,
            hidden: self.hidden,
        }
    }

    fn read(entity: Entity, identity: &Identity, pos: &Position, health: &Health, cloak: Option<&Cloak>) -> Self {
        let profile = get_profile(identity.kind);
        Self {
            entity,
            id: identity.id,
            kind: identity.kind,
            house: identity.house,
            pos: pos.0,
            alive: health.alive,
            category: profile.category,
            crushable: profile.crushable,
            hidden: cloak.is_some_and(is_hidden),
        }
    }
}

/// Resolve a unit id to a contact.
pub fn lookup(world: &World, index: &HashMap<UnitId, Entity>, id: UnitId) -> Option<Contact> {
    let entity = *index.get(&id)?;
    let mut query = world
        .query_one::<(&Identity, &Position, &Health, Option<&Cloak>)>(entity)
        .ok()?;
    let (identity, pos, health, cloak) = query.get()?;
    Some(Contact::read(entity, identity, pos, health, cloak))
}

/// Nearest live enemy of `actor` that one of its weapons can engage.
///
/// Distance is measured from `center` in cells; `radius` of `None` searches the
/// whole map. Ties go to the lower unit id so the result never depends on
/// archetype iteration order.
pub fn nearest_enemy(
    world: &World,
    actor: &Actor,
    player: House,
    center: Vec2,
    radius: Option<f32>,
) -> Option<Contact> {
    let mut best: Option<(f32, Contact)> = None;
    for (entity, (identity, pos, health, cloak)) in world
        .query::<(&Identity, &Position, &Health, Option<&Cloak>)>()
        .iter()
    {
        if !health.alive
            || identity.id == actor.id()
            || !identity.house.is_enemy_of(actor.identity.house, player)
        {
            continue;
        }
        let contact = Contact::read(entity, identity, pos, health, cloak);
        if select_weapon(&actor.profile, contact.traits()).is_none() {
            continue;
        }
        let dist = center.distance(contact.pos) / CELL_SIZE;
        if radius.is_some_and(|r| dist > r) {
            continue;
        }
        let closer = match &best {
            None => true,
            Some((d, c)) => dist < *d || (dist == *d && contact.id < c.id),
        };
        if closer {
            best = Some((dist, contact));
        }
    }
    best.map(|(_, c)| c)
}

/// Plan a path for `actor` to `goal` and switch it to MOVE.
///
/// Returns false (and leaves the actor untouched) when no path exists.
pub fn order_move(ctx: &UnitContext, actor: &mut Actor, goal: CellCoord) -> bool {
    if !actor.profile.is_mobile() {
        return false;
    }
    let path = plan_path(ctx, actor, goal, OccupancyRule::Soft { penalty: ctx.occupancy_penalty });
    if path.is_empty() {
        return false;
    }
    actor.orders.mission = Mission::Move;
    actor.orders.target = None;
    actor.mobility = Mobility {
        path,
        cursor: 0,
        goal: Some(goal),
    };
    true
}

pub fn plan_path(ctx: &UnitContext, actor: &Actor, goal: CellCoord, occupancy: OccupancyRule) -> Vec<CellCoord> {
    let mut query = PathQuery::new(
        actor.cell(),
        goal,
        actor.profile.is_naval(),
        actor.profile.speed_class,
    );
    query.occupancy = occupancy;
    find_path_with(ctx.map, &query)
}
