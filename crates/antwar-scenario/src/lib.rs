//! Scenario decoding for the ant-mission simulation.
//!
//! Reads the INI-style mission format: placements, waypoints, TeamTypes,
//! Triggers, cell triggers, and the compressed `[MapPack]`/`[OverlayPack]`
//! layers. Produces a `ScenarioData` value; never touches the simulation.

pub mod data;
pub mod error;
pub mod ini;
pub mod mappack;
pub mod parse;

pub use data::ScenarioData;
pub use error::{MapPackError, ScenarioError};
pub use parse::{load_scenario, parse_scenario};
