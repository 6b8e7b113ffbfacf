//! Simulation engine: the core of the ant missions.
//!
//! `SimulationEngine` owns the hecs ECS world and the `WorldMap`, consumes
//! one-shot input events, runs all systems in a fixed order, and produces
//! `EngineSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use glam::Vec2;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use antwar_core::commands::InputEvent;
use antwar_core::components::{Health, Identity, Orders};
use antwar_core::constants::*;
use antwar_core::enums::{EngineState, House, Mission};
use antwar_core::events::EffectRecord;
use antwar_core::state::{EngineSnapshot, ScoreView};
use antwar_core::types::{SimTime, UnitId};
use antwar_map::WorldMap;
use antwar_scenario::ScenarioData;

use crate::error::SimError;
use crate::hooks::{AutoPlayer, SimObserver};
use crate::scripting::{ScriptCommand, ScriptState};
use crate::systems;
use crate::systems::actor::UnitContext;
use crate::systems::snapshot::SnapshotInputs;
use crate::world_setup::{self, UnitSpawn};

/// Configuration for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and inputs = same simulation.
    pub seed: u64,
    /// Fixed-step driver speed-up; 1.0 is real time.
    pub turbo: f32,
    /// Longest host frame delta the driver accepts at turbo 1.
    pub max_frame_delta_secs: f32,
    /// Ticks after start before victory or defeat is checked.
    pub victory_grace_ticks: u64,
    /// Pathfinder cost for routing through an occupied cell.
    pub occupancy_penalty: u32,
    /// Overrides the scenario's player house.
    pub player_house: Option<House>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            turbo: 1.0,
            max_frame_delta_secs: MAX_FRAME_DELTA_SECS,
            victory_grace_ticks: VICTORY_GRACE_TICKS,
            occupancy_penalty: OCCUPANCY_PENALTY,
            player_house: None,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    map: WorldMap,
    time: SimTime,
    state: EngineState,
    config: SimConfig,
    player: House,
    rng: ChaCha8Rng,
    input_queue: VecDeque<InputEvent>,
    effects: Vec<EffectRecord>,
    script: ScriptState,
    /// Live and lingering units in spawn order.
    roster: Vec<(UnitId, Entity)>,
    index: HashMap<UnitId, Entity>,
    next_unit_id: u32,
    score: ScoreView,
    despawn_buffer: Vec<Entity>,
    observers: Vec<Box<dyn SimObserver>>,
    auto_player: Option<Box<dyn AutoPlayer>>,
}

impl SimulationEngine {
    /// Create an engine in the `Loading` state.
    pub fn new(mut config: SimConfig) -> Self {
        config.turbo = config.turbo.clamp(1.0, MAX_TURBO);
        Self {
            world: World::new(),
            map: WorldMap::default(),
            time: SimTime::default(),
            state: EngineState::Loading,
            player: config.player_house.unwrap_or(House::Greece),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            input_queue: VecDeque::new(),
            effects: Vec::new(),
            script: ScriptState::default(),
            roster: Vec::new(),
            index: HashMap::new(),
            next_unit_id: 1,
            score: ScoreView::default(),
            despawn_buffer: Vec::new(),
            observers: Vec::new(),
            auto_player: None,
        }
    }

    /// Load a scenario file and start the mission.
    ///
    /// A load failure leaves the engine in `Loading`.
    pub fn start(&mut self, path: &Path) -> Result<(), SimError> {
        self.ensure_state("start", EngineState::Loading)?;
        let data = antwar_scenario::load_scenario(path)?;
        for observer in &mut self.observers {
            observer.on_load_progress(1, 1);
        }
        self.initialize_from_scenario(&data)
    }

    /// Build the world from decoded scenario data and switch to `Playing`.
    pub fn initialize_from_scenario(&mut self, data: &ScenarioData) -> Result<(), SimError> {
        self.ensure_state("initialize_from_scenario", EngineState::Loading)?;

        self.map = world_setup::build_map(data);
        self.player = self.config.player_house.unwrap_or(data.player_house);
        for placement in &data.units {
            self.spawn_unit(UnitSpawn {
                kind: placement.kind,
                house: placement.house,
                position: placement.cell.center(),
                facing: placement.facing,
                mission: placement.mission,
                strength: placement.strength,
            });
        }
        self.script = ScriptState::from_scenario(data);

        info!(
            scenario = data.name.as_str(),
            player = ?self.player,
            units = self.roster.len(),
            teams = self.script.team_types.len(),
            triggers = self.script.triggers.len(),
            "mission initialized"
        );
        self.set_state(EngineState::Playing);
        Ok(())
    }

    /// Queue an input event for the next tick. Events live for exactly one tick.
    pub fn queue_input(&mut self, event: InputEvent) {
        self.input_queue.push_back(event);
    }

    /// Queue multiple input events.
    pub fn queue_inputs(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.input_queue.extend(events);
    }

    /// Register an observer notified of ticks, state changes and load progress.
    pub fn add_observer(&mut self, observer: Box<dyn SimObserver>) {
        self.observers.push(observer);
    }

    /// Install the hook consulted at the start of every playing tick.
    pub fn set_auto_player(&mut self, auto_player: Box<dyn AutoPlayer>) {
        self.auto_player = Some(auto_player);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> EngineSnapshot {
        // 1. External hook sees the state before any input is consumed
        if self.state == EngineState::Playing {
            if let Some(mut auto_player) = self.auto_player.take() {
                let events = auto_player.next_inputs(self);
                self.input_queue.extend(events);
                self.auto_player = Some(auto_player);
            }
        }

        // 2. One-shot inputs
        self.process_inputs();

        if self.state == EngineState::Playing {
            self.run_systems();
            self.time.advance();

            let mut observers = std::mem::take(&mut self.observers);
            for observer in &mut observers {
                observer.on_tick(self);
            }
            self.observers = observers;
        }

        self.snapshot()
    }

    /// Build a snapshot of the current state without advancing.
    pub fn snapshot(&self) -> EngineSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                state: self.state,
                roster: &self.roster,
                effects: &self.effects,
                score: self.score,
                globals: &self.script.globals,
            },
        )
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current turbo multiplier, always within `1..=MAX_TURBO`.
    pub fn turbo(&self) -> f32 {
        self.config.turbo
    }

    pub fn player(&self) -> House {
        self.player
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn score(&self) -> ScoreView {
        self.score
    }

    pub fn script(&self) -> &ScriptState {
        &self.script
    }

    /// Units in spawn order, including dead units still lingering.
    pub fn roster(&self) -> &[(UnitId, Entity)] {
        &self.roster
    }

    pub fn entity(&self, id: UnitId) -> Option<Entity> {
        self.index.get(&id).copied()
    }

    /// Spawn a unit with the next free id.
    pub fn spawn_unit(&mut self, spawn: UnitSpawn) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        let entity = world_setup::spawn_unit(&mut self.world, id, spawn);
        self.roster.push((id, entity));
        self.index.insert(id, entity);
        id
    }

    /// Kill a unit outright (for tests exercising death handling).
    #[cfg(test)]
    pub fn kill_unit(&mut self, id: UnitId) {
        let Some(entity) = self.entity(id) else {
            return;
        };
        if let Ok(mut health) = self.world.get::<&mut Health>(entity) {
            health.hp = 0;
            health.alive = false;
            health.death_ticks = 0;
        }
        if let Ok(mut orders) = self.world.get::<&mut Orders>(entity) {
            orders.mission = Mission::Die;
            orders.target = None;
        }
    }

    fn ensure_state(&self, operation: &'static str, expected: EngineState) -> Result<(), SimError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SimError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn set_state(&mut self, state: EngineState) {
        if self.state == state {
            return;
        }
        info!(from = ?self.state, to = ?state, tick = self.time.tick, "engine state changed");
        self.state = state;
        for observer in &mut self.observers {
            observer.on_state_change(state);
        }
    }

    /// Drain the input queue. Orders are only applied while playing.
    fn process_inputs(&mut self) {
        while let Some(event) = self.input_queue.pop_front() {
            match event {
                InputEvent::Pause => {
                    if self.state == EngineState::Playing {
                        self.set_state(EngineState::Paused);
                    }
                }
                InputEvent::Resume => {
                    if self.state == EngineState::Paused {
                        self.set_state(EngineState::Playing);
                    }
                }
                InputEvent::SetTurbo { multiplier } => {
                    self.config.turbo = multiplier.clamp(1.0, MAX_TURBO);
                }
                event if self.state == EngineState::Playing => {
                    let mut ctx = UnitContext {
                        world: &mut self.world,
                        map: &mut self.map,
                        index: &self.index,
                        effects: &mut self.effects,
                        score: &mut self.score,
                        player: self.player,
                        tick: self.time.tick,
                        occupancy_penalty: self.config.occupancy_penalty,
                    };
                    systems::input::apply(&mut ctx, &self.roster, &event);
                }
                _ => {}
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let tick = self.time.tick;

        // 3. Fog of war
        systems::fog::run(&self.world, &mut self.map, self.player);
        // 4. Occupancy and infantry sub-cells
        systems::occupancy::run(&mut self.world, &mut self.map, &self.roster);
        // 5. Team scripts, then every unit's mission, movement and weapons
        {
            let mut ctx = UnitContext {
                world: &mut self.world,
                map: &mut self.map,
                index: &self.index,
                effects: &mut self.effects,
                score: &mut self.score,
                player: self.player,
                tick,
                occupancy_penalty: self.config.occupancy_penalty,
            };
            if tick % TEAM_MISSION_INTERVAL == 0 {
                for flag in systems::team_mission::run(&mut ctx, &self.script, &self.roster) {
                    self.script.set_global(flag);
                }
            }
            systems::units::run(&mut ctx, &self.roster);
        }
        // 6. Effect aging
        systems::effects::run(&mut self.effects);
        // 7. PLAYER_ENTERED latches
        systems::triggers::scan_player_entered(&self.world, &mut self.script, self.player);
        // 8. Triggers
        if tick % TRIGGER_EVAL_INTERVAL == 0 {
            for command in systems::triggers::run(&mut self.script, tick) {
                self.apply_script_command(command);
            }
        }
        // 9. Cleanup of expired corpses
        systems::cleanup::run(
            &mut self.world,
            &mut self.roster,
            &mut self.index,
            &mut self.despawn_buffer,
        );
        // 10. Victory / defeat
        if tick >= self.config.victory_grace_ticks && self.state == EngineState::Playing {
            if let Some(outcome) = systems::victory::check(&self.world, &self.script, self.player) {
                self.set_state(outcome);
            }
        }
    }

    fn apply_script_command(&mut self, command: ScriptCommand) {
        match command {
            ScriptCommand::Win => self.set_state(EngineState::Won),
            ScriptCommand::Lose => self.set_state(EngineState::Lost),
            ScriptCommand::SpawnTeam(team) => self.spawn_team(team),
            ScriptCommand::AllHunt(house) => {
                for (_, (identity, health, orders)) in
                    self.world.query_mut::<(&Identity, &Health, &mut Orders)>()
                {
                    if health.alive && identity.house == house {
                        orders.mission = Mission::Hunt;
                        orders.target = None;
                    }
                }
            }
        }
    }

    /// Instantiate a TeamType at its origin waypoint.
    fn spawn_team(&mut self, team: usize) {
        let Some(team_type) = self.script.team_types.get(team) else {
            return;
        };
        let Some(origin) = self.script.waypoint(team_type.origin_waypoint) else {
            debug!(team = team_type.name.as_str(), "team origin waypoint missing, spawn skipped");
            return;
        };
        let house = team_type.house;
        let name = team_type.name.clone();
        let members: Vec<_> = team_type
            .members
            .iter()
            .flat_map(|m| std::iter::repeat(m.kind).take(m.count as usize))
            .collect();

        for kind in &members {
            let jitter = Vec2::new(
                self.rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
                self.rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER),
            );
            let mut spawn = UnitSpawn::at_cell(*kind, house, origin, Mission::Guard);
            spawn.position += jitter;
            let id = self.spawn_unit(spawn);
            if let Some(entity) = self.entity(id) {
                world_setup::attach_team_script(&mut self.world, entity, team);
            }
        }
        debug!(team = name.as_str(), members = members.len(), tick = self.time.tick, "team spawned");
    }
}
