//! Headless host for the ant missions.
//!
//! Drives `SimulationEngine` through the fixed-step driver with the built-in
//! auto-player, keeps the missions-completed counter on disk, and renders
//! scenario summaries for inspection.

pub mod config;
pub mod error;
pub mod inspect;
pub mod progress;
pub mod runner;

pub use antwar_sim::core;
pub use error::AppError;
