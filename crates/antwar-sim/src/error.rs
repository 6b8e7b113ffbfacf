//! Errors surfaced by the simulation engine's public operations.

use antwar_core::enums::EngineState;
use antwar_scenario::ScenarioError;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The scenario could not be read or decoded. The engine stays in `Loading`.
    #[error("scenario load failed: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("{operation} is not allowed while the engine is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: EngineState,
    },
}
