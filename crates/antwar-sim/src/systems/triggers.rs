//! Trigger evaluation and the PLAYER_ENTERED latch.

use hecs::World;
use tracing::debug;

use antwar_core::components::{Health, Identity};
use antwar_core::constants::SCENARIO_TIME_UNIT_TICKS;
use antwar_core::enums::House;
use antwar_core::types::Position;
use antwar_scenario::data::{
    ActionKind, EventControl, EventKind, Persistence, TriggerAction, TriggerEvent,
};

use crate::scripting::{ScriptCommand, ScriptState, TriggerRuntime};

/// Latch PLAYER_ENTERED for every trigger cell a live player unit stands on.
pub fn scan_player_entered(world: &World, script: &mut ScriptState, player: House) {
    if script.cell_triggers.is_empty() {
        return;
    }
    for (_, (identity, pos, health)) in world.query::<(&Identity, &Position, &Health)>().iter() {
        if health.alive && identity.house == player {
            script.mark_player_entered(pos.cell());
        }
    }
}

/// Evaluate every trigger once, in definition order.
///
/// Script-internal actions (SET_GLOBAL, FORCE_TRIGGER) are applied here; the
/// rest come back as commands for the engine.
pub fn run(script: &mut ScriptState, tick: u64) -> Vec<ScriptCommand> {
    let mut commands = Vec::new();

    for i in 0..script.triggers.len() {
        let trigger = &script.triggers[i];
        if !trigger.is_armed() || !conditions_met(script, trigger, tick) {
            continue;
        }

        let trigger = &mut script.triggers[i];
        trigger.fired = true;
        // Persistent triggers restart their own TIME window; the others keep
        // the original one if FORCE_TRIGGER re-arms them.
        if trigger.def.persistence == Persistence::Persistent {
            trigger.timer_tick = tick;
        }
        debug!(trigger = trigger.def.name.as_str(), tick, "trigger fired");

        let house = trigger.def.house;
        let actions: Vec<TriggerAction> = trigger.def.actions().copied().collect();
        for action in actions {
            apply_action(script, house, action, &mut commands);
        }
    }
    commands
}

fn conditions_met(script: &ScriptState, trigger: &TriggerRuntime, tick: u64) -> bool {
    let e1 = || event_met(script, trigger, &trigger.def.event1, tick);
    let e2 = || event_met(script, trigger, &trigger.def.event2, tick);
    match trigger.def.event_control {
        EventControl::Only => e1(),
        EventControl::And => e1() && e2(),
        EventControl::Or => e1() || e2(),
    }
}

fn event_met(script: &ScriptState, trigger: &TriggerRuntime, event: &TriggerEvent, tick: u64) -> bool {
    match event.kind {
        EventKind::None => true,
        EventKind::Time => {
            let units = u64::try_from(event.data).unwrap_or(0);
            tick.saturating_sub(trigger.timer_tick) >= units * SCENARIO_TIME_UNIT_TICKS
        }
        EventKind::GlobalSet => script.is_global_set(event.data),
        EventKind::PlayerEntered => trigger.player_entered,
    }
}

fn apply_action(script: &mut ScriptState, house: House, action: TriggerAction, commands: &mut Vec<ScriptCommand>) {
    match action.kind {
        ActionKind::None => {}
        ActionKind::Win => commands.push(ScriptCommand::Win),
        ActionKind::Lose => commands.push(ScriptCommand::Lose),
        ActionKind::CreateTeam | ActionKind::Reinforcements => {
            if script.team(action.team).is_some() {
                if let Ok(team) = usize::try_from(action.team) {
                    commands.push(ScriptCommand::SpawnTeam(team));
                }
            }
        }
        ActionKind::AllHunt => commands.push(ScriptCommand::AllHunt(house)),
        ActionKind::SetGlobal => script.set_global(action.data),
        ActionKind::ForceTrigger => {
            if let Some(target) = usize::try_from(action.trigger)
                .ok()
                .and_then(|i| script.triggers.get_mut(i))
            {
                target.fired = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antwar_scenario::data::{ActionControl, TeamMember, TeamType, Trigger};
    use antwar_core::enums::UnitKind;

    fn trigger(name: &str, persistence: Persistence, event1: TriggerEvent, action1: TriggerAction) -> TriggerRuntime {
        TriggerRuntime::new(Trigger {
            name: name.to_string(),
            persistence,
            house: House::USSR,
            event_control: EventControl::Only,
            action_control: ActionControl::Only,
            event1,
            event2: TriggerEvent::default(),
            action1,
            action2: TriggerAction::default(),
        })
    }

    fn event(kind: EventKind, data: i32) -> TriggerEvent {
        TriggerEvent { kind, team: -1, data }
    }

    fn action(kind: ActionKind, team: i32, trigger: i32, data: i32) -> TriggerAction {
        TriggerAction {
            kind,
            team,
            trigger,
            data,
        }
    }

    fn ant_team() -> TeamType {
        TeamType {
            name: "ants".to_string(),
            house: House::USSR,
            origin_waypoint: 0,
            members: vec![TeamMember {
                kind: UnitKind::WarriorAnt,
                count: 2,
            }],
            missions: Vec::new(),
        }
    }

    #[test]
    fn test_volatile_fires_once() {
        let mut script = ScriptState {
            team_types: vec![ant_team()],
            ..Default::default()
        };
        script.triggers.push(trigger(
            "wave",
            Persistence::Volatile,
            event(EventKind::None, 0),
            action(ActionKind::CreateTeam, 0, -1, 0),
        ));

        assert_eq!(run(&mut script, 0), vec![ScriptCommand::SpawnTeam(0)]);
        for tick in (15..600).step_by(15) {
            assert!(run(&mut script, tick).is_empty(), "refired at {tick}");
        }
    }

    #[test]
    fn test_time_event_threshold() {
        let mut script = ScriptState::default();
        script.triggers.push(trigger(
            "timer",
            Persistence::Volatile,
            event(EventKind::Time, 10),
            action(ActionKind::SetGlobal, -1, -1, 3),
        ));
        for tick in (0..900).step_by(15) {
            run(&mut script, tick);
            assert!(script.globals.is_empty(), "fired early at {tick}");
        }
        run(&mut script, 900);
        assert!(script.globals.contains(&3));
    }

    #[test]
    fn test_persistent_restarts_timer() {
        let mut script = ScriptState {
            team_types: vec![ant_team()],
            ..Default::default()
        };
        script.triggers.push(trigger(
            "waves",
            Persistence::Persistent,
            event(EventKind::Time, 1),
            action(ActionKind::Reinforcements, 0, -1, 0),
        ));
        let fired_at: Vec<u64> = (0..=400)
            .step_by(15)
            .filter(|&t| !run(&mut script, t).is_empty())
            .collect();
        assert_eq!(fired_at, vec![90, 180, 270, 360]);
    }

    #[test]
    fn test_and_or_controls() {
        let mut script = ScriptState::default();
        let mut both = trigger(
            "both",
            Persistence::Volatile,
            event(EventKind::GlobalSet, 1),
            action(ActionKind::Win, -1, -1, 0),
        );
        both.def.event_control = EventControl::And;
        both.def.event2 = event(EventKind::GlobalSet, 2);
        let mut either = both.clone();
        either.def.name = "either".to_string();
        either.def.event_control = EventControl::Or;
        either.def.action1 = action(ActionKind::Lose, -1, -1, 0);
        script.triggers = vec![both, either];

        script.globals.insert(2);
        assert_eq!(run(&mut script, 15), vec![ScriptCommand::Lose]);
        script.globals.insert(1);
        assert_eq!(run(&mut script, 30), vec![ScriptCommand::Win]);
    }

    #[test]
    fn test_force_trigger_rearms() {
        let mut script = ScriptState::default();
        script.triggers.push(trigger(
            "flag",
            Persistence::Volatile,
            event(EventKind::None, 0),
            action(ActionKind::SetGlobal, -1, -1, 7),
        ));
        let mut rearm = trigger(
            "rearm",
            Persistence::Volatile,
            event(EventKind::GlobalSet, 7),
            action(ActionKind::ForceTrigger, -1, 0, 0),
        );
        rearm.def.action_control = ActionControl::And;
        rearm.def.action2 = action(ActionKind::ForceTrigger, -1, 99, 0);
        script.triggers.push(rearm);

        run(&mut script, 0);
        assert!(!script.triggers[0].fired, "forced back to unfired");
        assert!(script.triggers[1].fired);
        run(&mut script, 15);
        assert!(script.triggers[0].fired);
    }

    #[test]
    fn test_rearmed_volatile_keeps_time_window() {
        let mut script = ScriptState::default();
        script.triggers.push(trigger(
            "timer",
            Persistence::Volatile,
            event(EventKind::Time, 1),
            action(ActionKind::Win, -1, -1, 0),
        ));

        assert_eq!(run(&mut script, 90), vec![ScriptCommand::Win]);
        assert_eq!(script.triggers[0].timer_tick, 0);

        script.triggers[0].fired = false;
        assert_eq!(run(&mut script, 105), vec![ScriptCommand::Win]);
    }

    #[test]
    fn test_dangling_team_is_noop() {
        let mut script = ScriptState::default();
        script.triggers.push(trigger(
            "ghost",
            Persistence::Volatile,
            event(EventKind::None, 0),
            action(ActionKind::CreateTeam, 5, -1, 0),
        ));
        assert!(run(&mut script, 0).is_empty());
        assert!(script.triggers[0].fired);
    }

    #[test]
    fn test_player_entered_latches() {
        let mut script = ScriptState::default();
        script.triggers.push(trigger(
            "gate",
            Persistence::Volatile,
            event(EventKind::PlayerEntered, 0),
            action(ActionKind::AllHunt, -1, -1, 0),
        ));
        let cell = antwar_core::types::CellCoord::new(3, 3);
        script.cell_triggers.insert(cell, vec![0]);

        assert!(run(&mut script, 0).is_empty());
        script.mark_player_entered(cell);
        assert_eq!(run(&mut script, 15), vec![ScriptCommand::AllHunt(House::USSR)]);
    }

    #[test]
    fn test_pending_spawn_ignores_fired_volatile() {
        let mut script = ScriptState {
            team_types: vec![ant_team()],
            ..Default::default()
        };
        script.triggers.push(trigger(
            "wave",
            Persistence::Volatile,
            event(EventKind::Time, 1),
            action(ActionKind::CreateTeam, 0, -1, 0),
        ));
        assert!(script.hostile_spawn_pending(House::Greece));
        run(&mut script, 90);
        assert!(!script.hostile_spawn_pending(House::Greece));
    }
}
