//! Deal scenario inputs and saved-scenario loading

mod inputs;
mod library;
pub mod loader;

pub use inputs::{ScenarioInputs, TYPICAL_EXIT_CAP_RATE, TYPICAL_INTEREST_RATE, TYPICAL_RENT_GROWTH};
pub use library::{SavedScenario, ScenarioLibrary};
pub use loader::{load_scenarios, load_scenarios_from_reader};
