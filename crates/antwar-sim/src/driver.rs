//! Fixed-timestep driver: turns host frame deltas into whole simulation ticks.
//!
//! The host calls [`FixedStepDriver::advance`] once per frame from its own
//! timer callback, so control returns to the host between frames. Ticks always
//! run to completion; stopping takes effect between ticks.

use antwar_core::constants::TICK_RATE;

use crate::engine::SimulationEngine;

/// Duration of one tick in seconds.
pub const TICK_SECS: f64 = 1.0 / TICK_RATE as f64;

#[derive(Debug, Default)]
pub struct FixedStepDriver {
    accumulator: f64,
    loading: bool,
    running: bool,
    stopped: bool,
}

impl FixedStepDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a scenario load as in flight.
    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// The load resolved. Returns false, and stays idle, if `stop` was called
    /// in the meantime.
    pub fn finish_load(&mut self) -> bool {
        self.loading = false;
        if self.stopped {
            return false;
        }
        self.running = true;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.stopped = true;
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Feed one host frame and run every whole tick it covers.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, engine: &mut SimulationEngine, frame_delta_secs: f32) -> u32 {
        if !self.running {
            return 0;
        }
        let turbo = f64::from(engine.turbo());
        let cap = f64::from(engine.config().max_frame_delta_secs) * turbo;
        let scaled = f64::from(frame_delta_secs.max(0.0)) * turbo;
        self.accumulator += scaled.min(cap);

        let mut ticks = 0;
        while self.accumulator >= TICK_SECS {
            self.accumulator -= TICK_SECS;
            engine.tick();
            ticks += 1;
            if engine.state().is_finished() {
                self.running = false;
                self.accumulator = 0.0;
                break;
            }
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimConfig;
    use antwar_scenario::ScenarioData;

    fn playing_engine(turbo: f32) -> SimulationEngine {
        let mut engine = SimulationEngine::new(SimConfig {
            turbo,
            ..Default::default()
        });
        engine
            .initialize_from_scenario(&ScenarioData::default())
            .unwrap();
        engine
    }

    #[test]
    fn test_idle_until_load_finishes() {
        let mut engine = playing_engine(1.0);
        let mut driver = FixedStepDriver::new();
        driver.begin_load();
        assert!(driver.is_loading());
        assert_eq!(driver.advance(&mut engine, 1.0), 0);
        assert!(driver.finish_load());
        assert!(driver.is_running());
    }

    #[test]
    fn test_stop_during_load_blocks_start() {
        let mut driver = FixedStepDriver::new();
        driver.begin_load();
        driver.stop();
        assert!(!driver.finish_load());
        assert!(!driver.is_running());
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut engine = playing_engine(1.0);
        let mut driver = FixedStepDriver::new();
        driver.finish_load();

        // Half a tick per frame: one tick every second frame.
        let half = (TICK_SECS / 2.0) as f32 + 1e-4;
        let ran: u32 = (0..10).map(|_| driver.advance(&mut engine, half)).sum();
        assert_eq!(ran, 5);
        assert_eq!(engine.time().tick, 5);
    }

    #[test]
    fn test_frame_delta_is_capped() {
        let mut engine = playing_engine(1.0);
        let mut driver = FixedStepDriver::new();
        driver.finish_load();
        // A 10 s stall runs at most 0.25 s worth of ticks.
        let ran = driver.advance(&mut engine, 10.0);
        assert!(ran <= 4, "ran {ran} ticks");
    }

    #[test]
    fn test_turbo_scales_ticks_per_frame() {
        let mut engine = playing_engine(8.0);
        let mut driver = FixedStepDriver::new();
        driver.finish_load();
        let ran = driver.advance(&mut engine, 0.2);
        assert!((23..=24).contains(&ran), "ran {ran} ticks");
    }
}
