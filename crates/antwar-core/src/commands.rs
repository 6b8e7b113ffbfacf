//! One-shot input events sent from the host input collector to the simulation.
//!
//! Events are queued and drained exactly once at the start of the next tick.
//! Anything not consumed in that tick is gone; stale clicks never repeat.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::{CellCoord, UnitId};

/// All possible player inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputEvent {
    // --- Selection ---
    /// Replace the selection with the given units.
    Select { units: Vec<UnitId> },
    /// Replace the selection with every player unit inside a world-space box.
    SelectArea { min: Vec2, max: Vec2 },

    // --- Orders for the current selection ---
    /// Move the selection to a cell.
    MoveTo { cell: CellCoord },
    /// Attack a specific unit.
    AttackUnit { target: UnitId },
    /// Stop and guard in place.
    Stop,

    // --- Simulation control ---
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Change the turbo multiplier used by the fixed-step driver.
    SetTurbo { multiplier: f32 },
}
