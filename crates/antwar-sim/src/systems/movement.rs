//! Path following: one step toward the next path cell per tick.

use antwar_core::constants::REPATH_COOLDOWN_TICKS;
use antwar_core::enums::UnitCategory;
use antwar_core::types::{CellCoord, Facing};
use antwar_map::OccupancyRule;

use super::actor::{lookup, plan_path, Actor, UnitContext};
use super::combat;

/// Result of one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// No path to follow.
    Idle,
    Moving,
    /// The next cell is held by another unit.
    Blocked,
    /// Reached the centre of an intermediate path cell.
    ReachedCell,
    /// Reached the final path cell; the path has been cleared.
    ReachedGoal,
}

/// Advance `actor` along its path.
pub fn advance(ctx: &mut UnitContext, actor: &mut Actor) -> Step {
    let Some(&next) = actor.mobility.path.get(actor.mobility.cursor) else {
        return Step::Idle;
    };

    if actor.cell() != next {
        if is_blocked(ctx, actor, next) {
            repath_around(ctx, actor);
            return Step::Blocked;
        }
        if ctx.map.occupant(next).is_none() {
            ctx.map.set_occupancy(next, actor.id());
        }
    }

    let target = next.center();
    if let Some(desired) = Facing::toward(actor.pos, target) {
        if turns_before_moving(actor) {
            if !actor.heading.body.rotate_toward(desired) {
                return Step::Moving;
            }
        } else {
            actor.heading.body = desired;
        }
        if !actor.profile.turreted || actor.orders.target.is_none() {
            actor.heading.turret.rotate_toward(actor.heading.body);
        }
    }

    let speed = actor.profile.speed * ctx.map.speed_multiplier(next, actor.profile.speed_class);
    if speed <= 0.0 {
        return Step::Blocked;
    }

    let to = target - actor.pos;
    let dist = to.length();
    if dist > speed {
        actor.pos += to / dist * speed;
        return Step::Moving;
    }

    actor.pos = target;
    actor.mobility.cursor += 1;
    combat::crush(ctx, actor, next);
    if actor.mobility.cursor >= actor.mobility.path.len() {
        actor.clear_path();
        Step::ReachedGoal
    } else {
        Step::ReachedCell
    }
}

/// Vehicles and vessels turn in place before driving; infantry and ants pivot instantly.
fn turns_before_moving(actor: &Actor) -> bool {
    matches!(actor.profile.category, UnitCategory::Vehicle | UnitCategory::Vessel)
}

fn is_blocked(ctx: &UnitContext, actor: &Actor, cell: CellCoord) -> bool {
    let Some(occupant) = ctx.map.occupant(cell) else {
        return false;
    };
    if occupant == actor.id() {
        return false;
    }
    let Some(other) = lookup(ctx.world, ctx.index, occupant) else {
        return false;
    };
    if !other.alive {
        return false;
    }
    if actor.profile.is_infantry()
        && other.category == UnitCategory::Infantry
        && other.house == actor.identity.house
    {
        return false;
    }
    let crushes = actor.profile.crusher
        && other.crushable
        && other.house.is_enemy_of(actor.identity.house, ctx.player);
    !crushes
}

/// Recompute a strict path around the blocker once the cooldown allows it.
/// An empty result keeps the old path and the unit waits.
fn repath_around(ctx: &UnitContext, actor: &mut Actor) {
    if ctx.tick < actor.orders.next_repath_tick {
        return;
    }
    actor.orders.next_repath_tick = ctx.tick + REPATH_COOLDOWN_TICKS;
    let Some(goal) = actor.mobility.goal else {
        return;
    };
    let path = plan_path(ctx, actor, goal, OccupancyRule::Strict);
    if !path.is_empty() {
        actor.mobility.path = path;
        actor.mobility.cursor = 0;
    }
}
