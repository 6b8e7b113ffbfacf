//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{CellCoord, Facing, UnitId};

/// Who a unit is. Every unit entity carries one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Identity {
    pub id: UnitId,
    pub kind: UnitKind,
    pub house: House,
}

/// Hit points and death bookkeeping.
///
/// Invariant: `hp <= max_hp`; `hp == 0` exactly when `alive == false`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: u32,
    pub max_hp: u32,
    pub alive: bool,
    /// Ticks spent dead; the unit is removed once this passes the linger window.
    pub death_ticks: u32,
}

/// Current mission and target. Targets are ids, resolved by lookup each tick.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Orders {
    pub mission: Mission,
    pub target: Option<UnitId>,
    /// Tick of the last hostile scan (guard missions are rate limited).
    pub last_scan_tick: u64,
    /// Earliest tick at which the path may be recomputed.
    pub next_repath_tick: u64,
}

/// Path state for units that can move.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mobility {
    /// Ordered cells to walk, excluding the start cell.
    pub path: Vec<CellCoord>,
    /// Index of the next cell in `path`.
    pub cursor: usize,
    /// Final destination of the current path.
    pub goal: Option<CellCoord>,
}

/// Weapon timing. Weapon choice itself comes from the unit profile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Armament {
    /// Ticks until the next shot may be fired.
    pub cooldown: u32,
    /// Tick of the last shot, if any.
    pub last_fired_tick: Option<u64>,
}

/// Body and turret orientation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Heading {
    pub body: Facing,
    pub turret: Facing,
}

/// Stealth state for cloak-capable vessels only.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cloak {
    pub state: CloakState,
    /// Ticks left in the current CLOAKING/UNCLOAKING transition.
    pub timer: u32,
    /// Ticks left before a sonar pulse stops blocking re-cloaking.
    pub sonar_timer: u32,
    /// Ticks spent uncloaked without firing.
    pub idle_ticks: u32,
}

/// Scripted team membership for units spawned from a TeamType.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TeamScript {
    /// Index of the TeamType this unit belongs to.
    pub team: usize,
    /// Index of the current mission in the team's script.
    pub cursor: usize,
    /// Remaining ticks of a GUARD-for-duration step.
    pub guard_ticks_left: Option<u64>,
    /// Waypoint the current or last step refers to.
    pub waypoint: Option<CellCoord>,
    /// Set once the script ran off its end.
    pub finished: bool,
}

/// Infantry sub-cell slot (0 = centre, 1..=4 = quadrants).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfantrySlot(pub u8);

/// Marks a unit the player currently has selected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Selected;
