//! Player input: selection and orders for the selected units.
//!
//! Simulation-control inputs (pause, resume, turbo) are handled by the engine.

use hecs::Entity;

use antwar_core::commands::InputEvent;
use antwar_core::components::{Health, Identity, Selected};
use antwar_core::enums::Mission;
use antwar_core::types::{Position, UnitId};
use antwar_unit_ai::combat::select_weapon;
use antwar_unit_ai::fsm::{MissionEvent, Order};

use super::actor::{lookup, order_move, Actor, UnitContext};

pub fn apply(ctx: &mut UnitContext, roster: &[(UnitId, Entity)], event: &InputEvent) {
    match event {
        InputEvent::Select { units } => {
            let chosen: Vec<Entity> = units
                .iter()
                .filter_map(|id| ctx.index.get(id).copied())
                .filter(|&e| is_selectable(ctx, e))
                .collect();
            replace_selection(ctx, chosen);
        }
        InputEvent::SelectArea { min, max } => {
            let lo = min.min(*max);
            let hi = min.max(*max);
            let chosen: Vec<Entity> = roster
                .iter()
                .map(|&(_, e)| e)
                .filter(|&e| is_selectable(ctx, e))
                .filter(|&e| {
                    ctx.world.get::<&Position>(e).is_ok_and(|p| {
                        p.0.x >= lo.x && p.0.y >= lo.y && p.0.x <= hi.x && p.0.y <= hi.y
                    })
                })
                .collect();
            replace_selection(ctx, chosen);
        }
        InputEvent::MoveTo { cell } => {
            for entity in selection(ctx, roster) {
                let Some(mut actor) = Actor::load(ctx.world, entity) else {
                    continue;
                };
                if !order_move(ctx, &mut actor, *cell) {
                    actor.observe(MissionEvent::Ordered(Order::Stop));
                    actor.clear_path();
                }
                actor.store(ctx.world);
            }
        }
        InputEvent::AttackUnit { target } => {
            let Some(contact) = lookup(ctx.world, ctx.index, *target).filter(|c| c.alive) else {
                return;
            };
            for entity in selection(ctx, roster) {
                let Some(mut actor) = Actor::load(ctx.world, entity) else {
                    continue;
                };
                if !contact.house.is_enemy_of(actor.identity.house, ctx.player)
                    || select_weapon(&actor.profile, contact.traits()).is_none()
                {
                    continue;
                }
                actor.clear_path();
                actor.orders.target = Some(contact.id);
                actor.observe(MissionEvent::Ordered(Order::Attack));
                actor.store(ctx.world);
            }
        }
        InputEvent::Stop => {
            for entity in selection(ctx, roster) {
                let Some(mut actor) = Actor::load(ctx.world, entity) else {
                    continue;
                };
                actor.clear_path();
                actor.orders.target = None;
                actor.orders.mission = Mission::Guard;
                actor.store(ctx.world);
            }
        }
        InputEvent::Pause | InputEvent::Resume | InputEvent::SetTurbo { .. } => {}
    }
}

/// Live units owned by the player.
fn is_selectable(ctx: &UnitContext, entity: Entity) -> bool {
    let Ok(mut query) = ctx.world.query_one::<(&Identity, &Health)>(entity) else {
        return false;
    };
    query
        .get()
        .is_some_and(|(identity, health)| health.alive && identity.house == ctx.player)
}

fn replace_selection(ctx: &mut UnitContext, chosen: Vec<Entity>) {
    let previous: Vec<Entity> = ctx
        .world
        .query::<&Selected>()
        .iter()
        .map(|(e, _)| e)
        .collect();
    for entity in previous {
        let _ = ctx.world.remove_one::<Selected>(entity);
    }
    for entity in chosen {
        let _ = ctx.world.insert_one(entity, Selected);
    }
}

/// Selected units that can still take orders, in roster order.
fn selection(ctx: &UnitContext, roster: &[(UnitId, Entity)]) -> Vec<Entity> {
    roster
        .iter()
        .map(|&(_, e)| e)
        .filter(|&e| ctx.world.get::<&Selected>(e).is_ok() && is_selectable(ctx, e))
        .collect()
}
