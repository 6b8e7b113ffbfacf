//! Host-facing hooks: engine observers and the auto-player used by headless runs.

use glam::Vec2;

use antwar_core::commands::InputEvent;
use antwar_core::components::{Health, Identity, Orders};
use antwar_core::enums::{EngineState, Mission};
use antwar_core::types::{Position, UnitId};
use antwar_unit_ai::profiles::get_profile;

use crate::engine::SimulationEngine;

/// Receives engine notifications. Every method defaults to a no-op.
pub trait SimObserver {
    /// Called once after every completed tick.
    fn on_tick(&mut self, _engine: &SimulationEngine) {}

    fn on_state_change(&mut self, _state: EngineState) {}

    fn on_load_progress(&mut self, _loaded: usize, _total: usize) {}
}

/// Supplies input events in place of a human player.
///
/// Consulted at the start of each playing tick, before queued input is drained.
pub trait AutoPlayer {
    fn next_inputs(&mut self, engine: &SimulationEngine) -> Vec<InputEvent>;
}

/// Sends idle player units after the hostile nearest to them.
#[derive(Debug, Clone)]
pub struct HuntingAutoPlayer {
    interval: u64,
}

impl HuntingAutoPlayer {
    pub const DEFAULT_INTERVAL: u64 = 45;

    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Default for HuntingAutoPlayer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

impl AutoPlayer for HuntingAutoPlayer {
    fn next_inputs(&mut self, engine: &SimulationEngine) -> Vec<InputEvent> {
        if engine.time().tick % self.interval != 0 {
            return Vec::new();
        }
        let player = engine.player();
        let world = engine.world();

        let mut idle: Vec<(UnitId, Vec2)> = Vec::new();
        let mut hostiles: Vec<(UnitId, Vec2)> = Vec::new();
        for (_, (identity, pos, health, orders)) in
            world.query::<(&Identity, &Position, &Health, &Orders)>().iter()
        {
            if !health.alive {
                continue;
            }
            if identity.house == player {
                let profile = get_profile(identity.kind);
                let armed = profile.primary.is_some() || profile.secondary.is_some();
                if armed
                    && profile.is_mobile()
                    && matches!(orders.mission, Mission::Guard | Mission::AreaGuard)
                {
                    idle.push((identity.id, pos.0));
                }
            } else if identity.house.is_hostile_to(player) {
                hostiles.push((identity.id, pos.0));
            }
        }
        if idle.is_empty() || hostiles.is_empty() {
            return Vec::new();
        }

        // Query order is not stable across archetypes; sort for determinism.
        idle.sort_by_key(|(id, _)| *id);
        hostiles.sort_by_key(|(id, _)| *id);

        let centroid = idle.iter().map(|(_, p)| *p).sum::<Vec2>() / idle.len() as f32;
        let target = hostiles
            .iter()
            .min_by(|a, b| {
                a.1.distance_squared(centroid)
                    .total_cmp(&b.1.distance_squared(centroid))
                    .then(a.0.cmp(&b.0))
            })
            .map(|(id, _)| *id);

        let Some(target) = target else {
            return Vec::new();
        };
        vec![
            InputEvent::Select {
                units: idle.into_iter().map(|(id, _)| id).collect(),
            },
            InputEvent::AttackUnit { target },
        ]
    }
}
