//! Per-unit update: mission behaviour, movement, weapons and cloak.
//!
//! Units are updated one at a time in spawn order. Each sees the world as
//! left by the units before it.

use hecs::Entity;
use tracing::debug;

use antwar_core::components::Health;
use antwar_core::constants::*;
use antwar_core::enums::Mission;
use antwar_core::types::{Facing, UnitId};
use antwar_unit_ai::cloak;
use antwar_unit_ai::combat::select_weapon;
use antwar_unit_ai::fsm::MissionEvent;
use antwar_unit_ai::profiles::get_weapon;

use super::actor::{lookup, nearest_enemy, plan_path, Actor, Contact, UnitContext};
use super::combat;
use super::movement::{self, Step};
use antwar_map::OccupancyRule;

/// Update every unit in `roster` order.
pub fn run(ctx: &mut UnitContext, roster: &[(UnitId, Entity)]) {
    for &(_, entity) in roster {
        let Some(mut actor) = Actor::load(ctx.world, entity) else {
            continue;
        };
        if !actor.health.alive {
            if let Ok(mut health) = ctx.world.get::<&mut Health>(entity) {
                health.death_ticks = health.death_ticks.saturating_add(1);
            }
            continue;
        }

        actor.armament.cooldown = actor.armament.cooldown.saturating_sub(1);
        let engaged = run_mission(ctx, &mut actor);
        if let Some(state) = actor.cloak.as_mut().and_then(|c| cloak::tick(c, engaged)) {
            debug!(unit = actor.id().0, ?state, "cloak transition");
        }
        actor.store(ctx.world);
    }
}

/// Returns true when the unit wants to fire this tick.
fn run_mission(ctx: &mut UnitContext, actor: &mut Actor) -> bool {
    match actor.orders.mission {
        Mission::Guard | Mission::AreaGuard => guard(ctx, actor),
        Mission::Move => {
            move_along(ctx, actor);
            false
        }
        Mission::Attack => attack(ctx, actor),
        Mission::Hunt => hunt(ctx, actor),
        Mission::Sleep | Mission::Die => false,
    }
}

fn guard(ctx: &mut UnitContext, actor: &mut Actor) -> bool {
    if ctx.tick.saturating_sub(actor.orders.last_scan_tick) < GUARD_SCAN_INTERVAL {
        return false;
    }
    actor.orders.last_scan_tick = ctx.tick;

    let mut radius = if actor.profile.is_mobile() {
        actor.profile.sight as f32
    } else {
        actor.profile.max_range()
    };
    if actor.orders.mission == Mission::AreaGuard {
        radius += AREA_GUARD_BONUS_CELLS;
    }

    let Some(found) = nearest_enemy(ctx.world, actor, ctx.player, actor.pos, Some(radius)) else {
        return false;
    };
    actor.orders.target = Some(found.id);
    actor.observe(MissionEvent::HostileSighted);
    attack(ctx, actor)
}

fn move_along(ctx: &mut UnitContext, actor: &mut Actor) {
    match movement::advance(ctx, actor) {
        Step::ReachedGoal | Step::Idle => {
            actor.clear_path();
            actor.observe(MissionEvent::Arrived);
        }
        Step::Moving | Step::Blocked | Step::ReachedCell => {}
    }
}

/// Resolve the current target, if it is still alive.
fn current_target(ctx: &UnitContext, actor: &Actor) -> Option<Contact> {
    actor
        .orders
        .target
        .and_then(|id| lookup(ctx.world, ctx.index, id))
        .filter(|t| t.alive)
}

fn attack(ctx: &mut UnitContext, actor: &mut Actor) -> bool {
    let Some(target) = current_target(ctx, actor) else {
        actor.lose_target();
        return false;
    };
    let Some(weapon) = select_weapon(&actor.profile, target.traits()) else {
        actor.lose_target();
        return false;
    };

    let dist = actor.pos.distance(target.pos) / CELL_SIZE;
    if dist > get_weapon(weapon).range {
        let mobile = actor.profile.is_mobile();
        if !mobile {
            actor.orders.target = None;
        }
        actor.observe(MissionEvent::TargetOutOfRange { mobile });
        return false;
    }

    actor.clear_path();
    let aligned = match Facing::toward(actor.pos, target.pos) {
        None => true,
        Some(desired) if actor.profile.turreted => actor.heading.turret.rotate_toward(desired),
        Some(desired) => actor.heading.body.rotate_toward(desired),
    };
    if actor.profile.no_moving_fire && !aligned {
        return true;
    }
    if actor.cloak.as_ref().is_some_and(|c| !cloak::can_fire(c)) {
        return true;
    }
    if actor.armament.cooldown == 0 {
        combat::fire(ctx, actor, weapon, &target);
    }
    true
}

fn hunt(ctx: &mut UnitContext, actor: &mut Actor) -> bool {
    let target = match current_target(ctx, actor) {
        Some(t) => t,
        None => match nearest_enemy(ctx.world, actor, ctx.player, actor.pos, None) {
            Some(t) => {
                actor.orders.target = Some(t.id);
                t
            }
            None => {
                actor.lose_target();
                return false;
            }
        },
    };
    let Some(weapon) = select_weapon(&actor.profile, target.traits()) else {
        actor.lose_target();
        return false;
    };

    let dist = actor.pos.distance(target.pos) / CELL_SIZE;
    if dist <= get_weapon(weapon).range {
        actor.observe(MissionEvent::TargetInRange);
        return attack(ctx, actor);
    }
    if !actor.profile.is_mobile() {
        return false;
    }

    let goal = target.cell();
    let stale = actor.mobility.goal != Some(goal) || actor.mobility.path.is_empty();
    if stale && ctx.tick >= actor.orders.next_repath_tick {
        actor.orders.next_repath_tick = ctx.tick + HUNT_REPATH_INTERVAL;
        let path = plan_path(ctx, actor, goal, OccupancyRule::Soft { penalty: ctx.occupancy_penalty });
        if path.is_empty() {
            // Unreachable for now; hold and retry after the interval.
            actor.observe(MissionEvent::PathFailed);
        } else {
            actor.mobility.path = path;
            actor.mobility.cursor = 0;
            actor.mobility.goal = Some(goal);
        }
    }
    movement::advance(ctx, actor);
    false
}
