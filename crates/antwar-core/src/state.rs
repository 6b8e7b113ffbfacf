//! Engine snapshot: the read-only state handed to the renderer each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::EffectRecord;
use crate::types::{CellCoord, SimTime, UnitId};

/// Complete public simulation state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub time: SimTime,
    pub state: EngineState,
    pub units: Vec<UnitView>,
    pub effects: Vec<EffectRecord>,
    pub score: ScoreView,
    /// Global flags currently set, ascending.
    pub globals: Vec<u16>,
    pub selection: Vec<UnitId>,
}

/// One unit as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub kind: UnitKind,
    pub house: House,
    /// World position including the infantry sub-cell offset.
    pub position: Vec2,
    pub cell: CellCoord,
    pub hp: u32,
    pub max_hp: u32,
    pub alive: bool,
    pub death_ticks: u32,
    pub mission: Mission,
    pub target: Option<UnitId>,
    pub facing: u8,
    pub turret_facing: u8,
    pub cloak: Option<CloakState>,
    pub sub_cell: Option<u8>,
}

/// Running score for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreView {
    /// Hostile units destroyed.
    pub kills: u32,
    /// Player units lost.
    pub losses: u32,
}
