//! Headless mission runner.
//!
//! Feeds the fixed-step driver synthetic 60 Hz frames as fast as the host
//! allows, with the hunting auto-player standing in for a human.

use std::path::Path;

use tracing::{debug, info};

use antwar_core::enums::EngineState;
use antwar_core::state::ScoreView;
use antwar_scenario::ScenarioData;
use antwar_sim::{
    FixedStepDriver, HuntingAutoPlayer, SimConfig, SimError, SimObserver, SimulationEngine,
};

/// Host frame length fed to the driver.
pub const FRAME_SECS: f32 = 1.0 / 60.0;

/// Ticks between progress log lines.
const LOG_INTERVAL_TICKS: u64 = 900;

/// How a headless mission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionOutcome {
    /// `Won`, `Lost`, or `Playing` when the tick limit ran out.
    pub state: EngineState,
    pub ticks: u64,
    pub score: ScoreView,
}

impl MissionOutcome {
    pub fn is_win(&self) -> bool {
        self.state == EngineState::Won
    }
}

/// Logs engine progress for long unattended runs.
struct TickLogger;

impl SimObserver for TickLogger {
    fn on_tick(&mut self, engine: &SimulationEngine) {
        let tick = engine.time().tick;
        if tick % LOG_INTERVAL_TICKS == 0 {
            let score = engine.score();
            debug!(
                tick,
                units = engine.roster().len(),
                kills = score.kills,
                losses = score.losses,
                "mission progress"
            );
        }
    }

    fn on_load_progress(&mut self, loaded: usize, total: usize) {
        debug!(loaded, total, "scenario loading");
    }
}

/// Load `path` and play it to the end or until `max_ticks`.
pub fn run_file(path: &Path, config: SimConfig, max_ticks: u64) -> Result<MissionOutcome, SimError> {
    let mut driver = FixedStepDriver::new();
    let mut engine = new_engine(config);

    driver.begin_load();
    engine.start(path)?;
    if !driver.finish_load() {
        return Ok(outcome(&engine));
    }
    Ok(drive(&mut driver, &mut engine, max_ticks))
}

/// Play already-decoded scenario data to the end or until `max_ticks`.
pub fn run_scenario(
    data: &ScenarioData,
    config: SimConfig,
    max_ticks: u64,
) -> Result<MissionOutcome, SimError> {
    let mut driver = FixedStepDriver::new();
    let mut engine = new_engine(config);

    driver.begin_load();
    engine.initialize_from_scenario(data)?;
    if !driver.finish_load() {
        return Ok(outcome(&engine));
    }
    Ok(drive(&mut driver, &mut engine, max_ticks))
}

fn new_engine(config: SimConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config);
    engine.set_auto_player(Box::new(HuntingAutoPlayer::default()));
    engine.add_observer(Box::new(TickLogger));
    engine
}

fn drive(driver: &mut FixedStepDriver, engine: &mut SimulationEngine, max_ticks: u64) -> MissionOutcome {
    while driver.is_running() {
        if engine.time().tick >= max_ticks {
            driver.stop();
            info!(max_ticks, "tick limit reached");
            break;
        }
        driver.advance(engine, FRAME_SECS);
    }
    outcome(engine)
}

fn outcome(engine: &SimulationEngine) -> MissionOutcome {
    MissionOutcome {
        state: engine.state(),
        ticks: engine.time().tick,
        score: engine.score(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antwar_core::enums::{House, Mission, UnitCategory, UnitKind};
    use antwar_core::types::{CellCoord, Facing};
    use antwar_scenario::data::UnitPlacement;

    fn place(
        kind: UnitKind,
        category: UnitCategory,
        house: House,
        x: i32,
        y: i32,
        mission: Mission,
    ) -> UnitPlacement {
        UnitPlacement {
            house,
            kind,
            category,
            strength: 256,
            cell: CellCoord::new(x, y),
            facing: Facing::default(),
            mission,
            sub_cell: None,
            trigger: None,
        }
    }

    #[test]
    fn auto_player_clears_a_small_mission() {
        let data = ScenarioData {
            units: vec![
                place(UnitKind::HeavyTank, UnitCategory::Vehicle, House::Greece, 10, 10, Mission::Guard),
                place(UnitKind::MediumTank, UnitCategory::Vehicle, House::Greece, 11, 11, Mission::Guard),
                place(UnitKind::ScoutAnt, UnitCategory::Ant, House::USSR, 22, 10, Mission::Sleep),
            ],
            ..Default::default()
        };
        let outcome = run_scenario(&data, SimConfig::default(), 3_000).unwrap();
        assert!(outcome.is_win(), "outcome {outcome:?}");
        assert_eq!(outcome.score.kills, 1);
    }

    #[test]
    fn tick_limit_stops_the_run() {
        let data = ScenarioData {
            units: vec![
                place(UnitKind::E1, UnitCategory::Infantry, House::Greece, 10, 10, Mission::Sleep),
                place(UnitKind::Building, UnitCategory::Structure, House::USSR, 60, 60, Mission::Sleep),
            ],
            ..Default::default()
        };
        let outcome = run_scenario(&data, SimConfig::default(), 200).unwrap();
        assert_eq!(outcome.state, EngineState::Playing);
        assert_eq!(outcome.ticks, 200);
    }

    #[test]
    fn missing_scenario_file_fails() {
        let result = run_file(Path::new("/nonexistent/antwar/mission.ini"), SimConfig::default(), 10);
        assert!(result.is_err());
    }
}
