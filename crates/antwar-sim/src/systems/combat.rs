//! Weapon fire, damage application, kills and crushing.

use hecs::Entity;
use tracing::debug;

use antwar_core::components::{Cloak, Health, Identity, Orders};
use antwar_core::constants::*;
use antwar_core::enums::{Warhead, WeaponKind};
use antwar_core::events::{EffectKind, EffectRecord};
use antwar_core::types::{CellCoord, Position, UnitId};
use antwar_unit_ai::cloak;
use antwar_unit_ai::combat::compute_damage;
use antwar_unit_ai::fsm::{transition, MissionEvent};
use antwar_unit_ai::profiles::{get_profile, get_weapon};

use super::actor::{Actor, Contact, UnitContext};

/// One hit as it reaches the target.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub source: Option<UnitId>,
    pub damage: u32,
    pub warhead: Warhead,
    pub anti_sub: bool,
}

/// Fire `weapon` at `target`: reset the cooldown, emit effects, apply damage.
pub fn fire(ctx: &mut UnitContext, actor: &mut Actor, weapon: WeaponKind, target: &Contact) {
    let stats = get_weapon(weapon);
    actor.armament.cooldown = stats.rate_of_fire;
    actor.armament.last_fired_tick = Some(ctx.tick);

    let source = Some(actor.id());
    let travel = (actor.pos.distance(target.pos) / PROJECTILE_SPEED).ceil() as u32;
    ctx.effects.push(EffectRecord::new(
        EffectKind::Muzzle { weapon },
        source,
        actor.pos,
        actor.pos,
        MUZZLE_LIFETIME_TICKS,
    ));
    ctx.effects.push(EffectRecord::new(
        EffectKind::Projectile { weapon },
        source,
        actor.pos,
        target.pos,
        travel,
    ));
    ctx.effects.push(EffectRecord::new(
        EffectKind::Explosion { weapon },
        source,
        target.pos,
        target.pos,
        EXPLOSION_LIFETIME_TICKS,
    ));

    apply_hit(
        ctx,
        target.entity,
        Hit {
            source,
            damage: stats.damage,
            warhead: stats.warhead,
            anti_sub: stats.anti_sub,
        },
    );
}

/// Apply one hit to a live unit. Returns true when it killed the unit.
pub fn apply_hit(ctx: &mut UnitContext, entity: Entity, hit: Hit) -> bool {
    let Ok((identity, health, orders, pos, cloak)) = ctx
        .world
        .query_one_mut::<(&Identity, &mut Health, &mut Orders, &Position, Option<&mut Cloak>)>(entity)
    else {
        return false;
    };
    if !health.alive {
        return false;
    }

    let armor = get_profile(identity.kind).armor;
    let damage = compute_damage(hit.damage, hit.warhead, armor, health.hp);
    health.hp -= damage;

    if let Some(cloak) = cloak {
        if hit.anti_sub {
            cloak::on_sonar_pulse(cloak);
        }
        if cloak::on_damage(cloak) {
            debug!(unit = identity.id.0, "forced uncloak");
        }
    }

    if health.hp > 0 {
        return false;
    }
    let victim = *identity;
    let at = pos.0;
    mark_dead(health, orders);
    record_kill(ctx, victim, at, hit.source);
    true
}

/// Crushers destroy non-allied crushable units in the cell they just entered.
pub fn crush(ctx: &mut UnitContext, actor: &Actor, cell: CellCoord) {
    if !actor.profile.crusher {
        return;
    }
    let mut victims = Vec::new();
    for (entity, (identity, pos, health)) in ctx.world.query_mut::<(&Identity, &Position, &Health)>() {
        if health.alive
            && pos.cell() == cell
            && get_profile(identity.kind).crushable
            && identity.house.is_enemy_of(actor.identity.house, ctx.player)
        {
            victims.push(entity);
        }
    }

    for entity in victims {
        let Ok((identity, health, orders, pos)) = ctx
            .world
            .query_one_mut::<(&Identity, &mut Health, &mut Orders, &Position)>(entity)
        else {
            continue;
        };
        let victim = *identity;
        let at = pos.0;
        health.hp = 0;
        mark_dead(health, orders);
        ctx.effects.push(EffectRecord::new(
            EffectKind::Crush,
            Some(actor.id()),
            at,
            at,
            EXPLOSION_LIFETIME_TICKS,
        ));
        record_kill(ctx, victim, at, Some(actor.id()));
    }
}

fn mark_dead(health: &mut Health, orders: &mut Orders) {
    health.alive = false;
    health.death_ticks = 0;
    if let Some(next) = transition(orders.mission, MissionEvent::Killed) {
        orders.mission = next;
    }
    orders.target = None;
}

fn record_kill(ctx: &mut UnitContext, victim: Identity, at: glam::Vec2, source: Option<UnitId>) {
    if victim.house.is_hostile_to(ctx.player) {
        ctx.score.kills += 1;
    } else if victim.house == ctx.player {
        ctx.score.losses += 1;
    }
    ctx.effects.push(EffectRecord::new(
        EffectKind::Death { kind: victim.kind },
        source,
        at,
        at,
        DEATH_LINGER_TICKS,
    ));
    debug!(unit = victim.id.0, kind = victim.kind.code(), house = victim.house.name(), "unit destroyed");
}
