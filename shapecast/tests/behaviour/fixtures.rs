//! Shared fixtures for the behavioural scenarios.

use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use shapecast::Value;

/// Scenario state shared between mapping steps.
#[derive(Debug, Default, ScenarioState)]
pub struct MappingState {
    /// Extraction (or pipe input) template.
    pub template: Slot<Value>,
    /// Pipe output template.
    pub output: Slot<Value>,
    /// Snapshot of the template taken before the engine ran.
    pub pristine: Slot<Value>,
    /// Outcome of the last extraction or pipe.
    pub result: Slot<Value>,
}

/// Creates an empty mapping state for each scenario.
#[fixture]
pub fn mapping_state() -> MappingState {
    MappingState::default()
}
