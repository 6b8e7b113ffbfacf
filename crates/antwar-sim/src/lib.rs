//! Simulation engine for the ant missions.
//!
//! Owns the hecs ECS world and the `WorldMap`, runs systems at a fixed
//! 15 Hz tick rate, executes the scenario scripting engine, and produces
//! `EngineSnapshot`s for an external renderer.

pub mod driver;
pub mod engine;
pub mod error;
pub mod hooks;
pub mod scripting;
pub mod systems;
pub mod world_setup;

pub use antwar_core as core;
pub use driver::FixedStepDriver;
pub use engine::{SimConfig, SimulationEngine};
pub use error::SimError;
pub use hooks::{AutoPlayer, HuntingAutoPlayer, SimObserver};
