//! Unit behaviour for the ant-mission simulation.
//!
//! Stat tables, the mission state machine, the vessel cloak machine and
//! damage resolution. Pure functions over plain data; the ECS systems in
//! `antwar-sim` call into this crate.

pub mod cloak;
pub mod combat;
pub mod fsm;
pub mod profiles;

pub use antwar_core as core;

#[cfg(test)]
mod tests;
