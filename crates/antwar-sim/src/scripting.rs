//! Runtime state of the scenario scripting engine.
//!
//! TeamTypes and trigger definitions are read-only after load. The mutable
//! parts are each trigger's `fired` flag, its timer start and PLAYER_ENTERED
//! latch, and the mission-scoped global flag set. Every cross-reference
//! (team index, trigger index, waypoint id) is resolved by lookup and a miss
//! is a no-op.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use antwar_core::enums::House;
use antwar_core::types::CellCoord;
use antwar_scenario::data::{Persistence, TeamType, Trigger};
use antwar_scenario::ScenarioData;

/// A trigger definition plus its per-mission state.
#[derive(Debug, Clone)]
pub struct TriggerRuntime {
    pub def: Trigger,
    pub fired: bool,
    /// Start of this trigger's TIME window.
    pub timer_tick: u64,
    /// Latched once a player unit stepped on one of its cells.
    pub player_entered: bool,
}

impl TriggerRuntime {
    pub fn new(def: Trigger) -> Self {
        Self {
            def,
            fired: false,
            timer_tick: 0,
            player_entered: false,
        }
    }

    /// Whether evaluation should consider this trigger at all.
    pub fn is_armed(&self) -> bool {
        self.def.persistence == Persistence::Persistent || !self.fired
    }
}

/// Something a trigger asked the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    Win,
    Lose,
    SpawnTeam(usize),
    AllHunt(House),
}

#[derive(Debug, Clone, Default)]
pub struct ScriptState {
    pub team_types: Vec<TeamType>,
    pub triggers: Vec<TriggerRuntime>,
    pub globals: BTreeSet<u16>,
    pub waypoints: BTreeMap<u32, CellCoord>,
    /// Cell -> indices of the triggers it latches.
    pub cell_triggers: HashMap<CellCoord, Vec<usize>>,
}

impl ScriptState {
    pub fn from_scenario(data: &ScenarioData) -> Self {
        let mut cell_triggers: HashMap<CellCoord, Vec<usize>> = HashMap::new();
        for ct in &data.cell_triggers {
            if let Some(index) = data.trigger_index(&ct.trigger) {
                cell_triggers.entry(ct.cell).or_default().push(index);
            }
        }
        Self {
            team_types: data.team_types.clone(),
            triggers: data.triggers.iter().cloned().map(TriggerRuntime::new).collect(),
            globals: BTreeSet::new(),
            waypoints: data.waypoints.clone(),
            cell_triggers,
        }
    }

    pub fn waypoint(&self, id: i32) -> Option<CellCoord> {
        u32::try_from(id).ok().and_then(|id| self.waypoints.get(&id).copied())
    }

    pub fn team(&self, index: i32) -> Option<&TeamType> {
        usize::try_from(index).ok().and_then(|i| self.team_types.get(i))
    }

    pub fn set_global(&mut self, flag: i32) {
        if let Ok(flag) = u16::try_from(flag) {
            self.globals.insert(flag);
        }
    }

    pub fn is_global_set(&self, flag: i32) -> bool {
        u16::try_from(flag).is_ok_and(|f| self.globals.contains(&f))
    }

    /// Latch PLAYER_ENTERED on every trigger tagged on `cell`.
    pub fn mark_player_entered(&mut self, cell: CellCoord) {
        let Some(indices) = self.cell_triggers.get(&cell) else {
            return;
        };
        for &i in indices {
            if let Some(t) = self.triggers.get_mut(i) {
                t.player_entered = true;
            }
        }
    }

    /// True while some armed trigger could still spawn a team of a house hostile
    /// to the player. FORCE_TRIGGER chains are not followed.
    pub fn hostile_spawn_pending(&self, player: House) -> bool {
        self.triggers.iter().filter(|t| t.is_armed()).any(|t| {
            t.def.actions().any(|a| {
                a.kind.spawns_team()
                    && self
                        .team(a.team)
                        .is_some_and(|team| team.house.is_hostile_to(player) && !team.members.is_empty())
            })
        })
    }
}
