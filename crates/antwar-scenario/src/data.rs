//! Decoded scenario model handed to the simulation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use antwar_core::enums::{House, Mission, Terrain, UnitCategory, UnitKind};
use antwar_core::types::{CellCoord, Facing, MapBounds};

/// Everything the simulation needs to start a mission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioData {
    pub name: String,
    pub player_house: House,
    pub theater: String,
    pub bounds: MapBounds,
    /// Units, ships, infantry and structures in file order.
    pub units: Vec<UnitPlacement>,
    pub terrain: Vec<TerrainFeature>,
    pub waypoints: BTreeMap<u32, CellCoord>,
    pub team_types: Vec<TeamType>,
    pub triggers: Vec<Trigger>,
    /// Cells that latch PLAYER_ENTERED for the named trigger.
    pub cell_triggers: Vec<CellTrigger>,
    /// Template layers, `None` when absent or undecodable.
    pub map_layers: Option<MapLayers>,
    /// Overlay bytes, `None` when absent or undecodable.
    pub overlay: Option<Vec<u8>>,
}

impl ScenarioData {
    pub fn waypoint(&self, id: i32) -> Option<CellCoord> {
        u32::try_from(id).ok().and_then(|id| self.waypoints.get(&id).copied())
    }

    pub fn trigger_index(&self, name: &str) -> Option<usize> {
        self.triggers
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// One placed unit, ship, infantry squad member or structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPlacement {
    pub house: House,
    pub kind: UnitKind,
    /// The section it came from.
    pub category: UnitCategory,
    /// Health out of 256.
    pub strength: u32,
    pub cell: CellCoord,
    pub facing: Facing,
    pub mission: Mission,
    /// Infantry sub-cell slot from the scenario, if any.
    pub sub_cell: Option<u8>,
    pub trigger: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainFeature {
    pub cell: CellCoord,
    pub terrain: Terrain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTrigger {
    pub cell: CellCoord,
    pub trigger: String,
}

/// Decoded `[MapPack]` layers, one entry per grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayers {
    pub templates: Vec<u16>,
    pub icons: Vec<u8>,
}

// --- TeamTypes ---

/// Reusable squad template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamType {
    pub name: String,
    pub house: House,
    pub origin_waypoint: i32,
    pub members: Vec<TeamMember>,
    pub missions: Vec<TeamMission>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub kind: UnitKind,
    pub count: u32,
}

/// Team script opcodes understood by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamMissionOp {
    Attack,
    AttackAtWaypoint,
    Move,
    Guard,
    Loop,
    Unload,
    SetGlobal,
}

impl TeamMissionOp {
    pub fn from_id(id: i64) -> Option<Self> {
        Some(match id {
            0 => TeamMissionOp::Attack,
            1 => TeamMissionOp::AttackAtWaypoint,
            3 => TeamMissionOp::Move,
            5 => TeamMissionOp::Guard,
            6 => TeamMissionOp::Loop,
            8 => TeamMissionOp::Unload,
            12 => TeamMissionOp::SetGlobal,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMission {
    pub op: TeamMissionOp,
    /// Waypoint id, duration in time units, or global id depending on `op`.
    pub param: i32,
}

// --- Triggers ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persistence {
    #[default]
    Volatile,
    SemiPersistent,
    Persistent,
}

impl Persistence {
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => Persistence::SemiPersistent,
            2 => Persistence::Persistent,
            _ => Persistence::Volatile,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventControl {
    #[default]
    Only,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionControl {
    #[default]
    Only,
    And,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[default]
    None,
    PlayerEntered,
    Time,
    GlobalSet,
}

impl EventKind {
    pub fn from_id(id: i64) -> Option<Self> {
        Some(match id {
            0 => EventKind::None,
            1 => EventKind::PlayerEntered,
            13 => EventKind::Time,
            27 => EventKind::GlobalSet,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    #[default]
    None,
    Win,
    Lose,
    CreateTeam,
    AllHunt,
    Reinforcements,
    ForceTrigger,
    SetGlobal,
}

impl ActionKind {
    /// Unsupported action ids read as `None`.
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => ActionKind::Win,
            2 => ActionKind::Lose,
            4 => ActionKind::CreateTeam,
            6 => ActionKind::AllHunt,
            7 => ActionKind::Reinforcements,
            22 => ActionKind::ForceTrigger,
            28 => ActionKind::SetGlobal,
            _ => ActionKind::None,
        }
    }

    /// Whether the action instantiates a TeamType.
    pub fn spawns_team(self) -> bool {
        matches!(self, ActionKind::CreateTeam | ActionKind::Reinforcements)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub kind: EventKind,
    pub team: i32,
    pub data: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerAction {
    pub kind: ActionKind,
    /// TeamType index, -1 for none.
    pub team: i32,
    /// Trigger index, -1 for none.
    pub trigger: i32,
    pub data: i32,
}

/// A scenario rule: one or two events gating one or two actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub name: String,
    pub persistence: Persistence,
    pub house: House,
    pub event_control: EventControl,
    pub action_control: ActionControl,
    pub event1: TriggerEvent,
    pub event2: TriggerEvent,
    pub action1: TriggerAction,
    pub action2: TriggerAction,
}

impl Trigger {
    /// The actions that run when the trigger fires.
    pub fn actions(&self) -> impl Iterator<Item = &TriggerAction> {
        let second = (self.action_control == ActionControl::And).then_some(&self.action2);
        std::iter::once(&self.action1).chain(second)
    }
}
