//! TeamType script execution for spawned squad members.
//!
//! Runs every `TEAM_MISSION_INTERVAL` ticks, before the per-unit update. Each
//! member walks the team's script on its own cursor. Instant steps (LOOP,
//! SET_GLOBAL, UNLOAD, skipped steps) chain within one evaluation; a unit that
//! runs off the end of its script switches to HUNT.

use hecs::Entity;

use antwar_core::components::TeamScript;
use antwar_core::constants::*;
use antwar_core::enums::Mission;
use antwar_core::types::{CellCoord, UnitId};
use antwar_scenario::data::TeamMissionOp;

use super::actor::{lookup, nearest_enemy, order_move, Actor, UnitContext};
use crate::scripting::ScriptState;

/// Advance every live team member's script. Returns the global flags set.
pub fn run(ctx: &mut UnitContext, script: &ScriptState, roster: &[(UnitId, Entity)]) -> Vec<i32> {
    let mut globals = Vec::new();

    for &(_, entity) in roster {
        let Some(mut team_script) = ctx.world.get::<&TeamScript>(entity).ok().map(|s| *s) else {
            continue;
        };
        if team_script.finished {
            continue;
        }
        let Some(mut actor) = Actor::load(ctx.world, entity) else {
            continue;
        };
        if !actor.health.alive {
            continue;
        }

        step(ctx, script, &mut actor, &mut team_script, &mut globals);

        actor.store(ctx.world);
        if let Ok(mut stored) = ctx.world.get::<&mut TeamScript>(entity) {
            *stored = team_script;
        }
    }
    globals
}

fn step(
    ctx: &mut UnitContext,
    script: &ScriptState,
    actor: &mut Actor,
    team_script: &mut TeamScript,
    globals: &mut Vec<i32>,
) {
    let Some(team) = script.team_types.get(team_script.team) else {
        finish(actor, team_script);
        return;
    };
    // Bounds instant-step chains; a script of only LOOPs must not spin forever.
    let mut budget = team.missions.len() + 1;

    while budget > 0 {
        budget -= 1;
        let Some(mission) = team.missions.get(team_script.cursor).copied() else {
            finish(actor, team_script);
            return;
        };

        match mission.op {
            TeamMissionOp::Loop => team_script.cursor = 0,
            TeamMissionOp::SetGlobal => {
                globals.push(mission.param);
                team_script.cursor += 1;
            }
            TeamMissionOp::Unload => team_script.cursor += 1,
            TeamMissionOp::Move => {
                if is_fighting(ctx, actor) {
                    return;
                }
                let Some(cell) = script.waypoint(mission.param) else {
                    team_script.cursor += 1;
                    continue;
                };
                team_script.waypoint = Some(cell);
                if arrived(actor, cell) || !head_for(ctx, actor, cell) {
                    team_script.cursor += 1;
                    continue;
                }
                return;
            }
            TeamMissionOp::Attack | TeamMissionOp::AttackAtWaypoint => {
                if is_fighting(ctx, actor) {
                    return;
                }
                let center = script.waypoint(mission.param).unwrap_or_else(|| actor.cell());
                team_script.waypoint = Some(center);
                if let Some(enemy) = nearest_enemy(
                    ctx.world,
                    actor,
                    ctx.player,
                    center.center(),
                    Some(TEAM_ATTACK_SEARCH_CELLS),
                ) {
                    actor.clear_path();
                    actor.orders.mission = Mission::Attack;
                    actor.orders.target = Some(enemy.id);
                    return;
                }
                if arrived(actor, center) || !head_for(ctx, actor, center) {
                    team_script.cursor += 1;
                    continue;
                }
                return;
            }
            TeamMissionOp::Guard => match team_script.guard_ticks_left {
                None => {
                    team_script.guard_ticks_left =
                        Some(u64::try_from(mission.param).unwrap_or(0) * SCENARIO_TIME_UNIT_TICKS);
                    if actor.orders.mission == Mission::Move {
                        actor.clear_path();
                        actor.orders.mission = Mission::Guard;
                    }
                    return;
                }
                Some(left) if left > TEAM_MISSION_INTERVAL => {
                    team_script.guard_ticks_left = Some(left - TEAM_MISSION_INTERVAL);
                    return;
                }
                Some(_) => {
                    team_script.guard_ticks_left = None;
                    team_script.cursor += 1;
                }
            },
        }
    }
}

/// Busy with a live target; the script waits.
fn is_fighting(ctx: &UnitContext, actor: &Actor) -> bool {
    matches!(actor.orders.mission, Mission::Attack | Mission::Hunt)
        && actor
            .orders
            .target
            .and_then(|id| lookup(ctx.world, ctx.index, id))
            .is_some_and(|t| t.alive)
}

/// Within a cell of the waypoint; squads cannot all stand on it.
fn arrived(actor: &Actor, cell: CellCoord) -> bool {
    actor.cell().chebyshev(cell) <= 1
}

/// Keep or issue a move toward `cell`. False when it cannot be reached.
fn head_for(ctx: &UnitContext, actor: &mut Actor, cell: CellCoord) -> bool {
    if actor.orders.mission == Mission::Move && actor.mobility.goal == Some(cell) {
        return true;
    }
    order_move(ctx, actor, cell)
}

fn finish(actor: &mut Actor, team_script: &mut TeamScript) {
    team_script.finished = true;
    actor.clear_path();
    actor.orders.target = None;
    actor.orders.mission = Mission::Hunt;
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hecs::World;

    use antwar_core::enums::{House, UnitKind};
    use antwar_core::events::EffectRecord;
    use antwar_core::state::ScoreView;
    use antwar_map::WorldMap;
    use antwar_scenario::data::{TeamMember, TeamMission, TeamType};

    use super::*;
    use crate::world_setup::{attach_team_script, spawn_unit, UnitSpawn};

    struct Fixture {
        world: World,
        map: WorldMap,
        index: HashMap<UnitId, Entity>,
        effects: Vec<EffectRecord>,
        score: ScoreView,
        roster: Vec<(UnitId, Entity)>,
        script: ScriptState,
    }

    impl Fixture {
        fn new(missions: Vec<TeamMission>) -> Self {
            let mut script = ScriptState::default();
            script.waypoints.insert(0, CellCoord::new(10, 10));
            script.waypoints.insert(1, CellCoord::new(20, 10));
            script.team_types.push(TeamType {
                name: "ants".to_string(),
                house: House::USSR,
                origin_waypoint: 0,
                members: vec![TeamMember {
                    kind: UnitKind::WarriorAnt,
                    count: 1,
                }],
                missions,
            });

            let mut world = World::new();
            let id = UnitId(1);
            let entity = spawn_unit(
                &mut world,
                id,
                UnitSpawn::at_cell(UnitKind::WarriorAnt, House::USSR, CellCoord::new(10, 10), Mission::Guard),
            );
            attach_team_script(&mut world, entity, 0);

            Self {
                world,
                map: WorldMap::default(),
                index: HashMap::from([(id, entity)]),
                effects: Vec::new(),
                score: ScoreView::default(),
                roster: vec![(id, entity)],
                script,
            }
        }

        fn step(&mut self) -> Vec<i32> {
            let mut ctx = UnitContext {
                world: &mut self.world,
                map: &mut self.map,
                index: &self.index,
                effects: &mut self.effects,
                score: &mut self.score,
                player: House::Greece,
                tick: 0,
                occupancy_penalty: OCCUPANCY_PENALTY,
            };
            run(&mut ctx, &self.script, &self.roster)
        }

        fn state(&self) -> (TeamScript, Mission) {
            let entity = self.roster[0].1;
            let script = *self.world.get::<&TeamScript>(entity).unwrap();
            let mission = self.world.get::<&antwar_core::components::Orders>(entity).unwrap().mission;
            (script, mission)
        }
    }

    fn op(op: TeamMissionOp, param: i32) -> TeamMission {
        TeamMission { op, param }
    }

    #[test]
    fn test_move_issues_path_to_waypoint() {
        let mut f = Fixture::new(vec![op(TeamMissionOp::Move, 1)]);
        f.step();
        let (script, mission) = f.state();
        assert_eq!(mission, Mission::Move);
        assert_eq!(script.cursor, 0);
        assert_eq!(script.waypoint, Some(CellCoord::new(20, 10)));
    }

    #[test]
    fn test_instant_steps_chain_then_hunt() {
        let mut f = Fixture::new(vec![
            op(TeamMissionOp::SetGlobal, 4),
            op(TeamMissionOp::Unload, 0),
            op(TeamMissionOp::Move, 0),
        ]);
        let globals = f.step();
        assert_eq!(globals, vec![4]);
        let (script, mission) = f.state();
        // Already standing on waypoint 0, so the move completes at once.
        assert!(script.finished);
        assert_eq!(mission, Mission::Hunt);
    }

    #[test]
    fn test_missing_waypoint_is_skipped() {
        let mut f = Fixture::new(vec![op(TeamMissionOp::Move, 9), op(TeamMissionOp::Guard, 1)]);
        f.step();
        let (script, _) = f.state();
        assert_eq!(script.cursor, 1);
        assert_eq!(script.guard_ticks_left, Some(SCENARIO_TIME_UNIT_TICKS));
    }

    #[test]
    fn test_guard_counts_down_then_advances() {
        let mut f = Fixture::new(vec![op(TeamMissionOp::Guard, 1), op(TeamMissionOp::Move, 1)]);
        f.step();
        let steps = SCENARIO_TIME_UNIT_TICKS.div_ceil(TEAM_MISSION_INTERVAL);
        for _ in 0..steps {
            f.step();
        }
        let (script, mission) = f.state();
        assert_eq!(script.cursor, 1);
        assert_eq!(mission, Mission::Move);
    }

    #[test]
    fn test_loop_only_script_terminates() {
        let mut f = Fixture::new(vec![op(TeamMissionOp::Loop, 0)]);
        f.step();
        let (script, _) = f.state();
        assert!(!script.finished);
        assert_eq!(script.cursor, 0);
    }
}
