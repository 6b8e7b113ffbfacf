//! Systems that operate on the simulation world each tick.
//!
//! Systems are free functions over the world and the map. They keep no state
//! of their own; everything lives in components or on the engine.

pub mod actor;
pub mod cleanup;
pub mod combat;
pub mod effects;
pub mod fog;
pub mod input;
pub mod movement;
pub mod occupancy;
pub mod snapshot;
pub mod team_mission;
pub mod triggers;
pub mod units;
pub mod victory;
