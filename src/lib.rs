//! Underwriting System - Deal scenario projections for private-equity real estate
//!
//! This library provides:
//! - Seven-year NOI, cash flow and valuation projections from deal assumptions
//! - Hold-period return metrics (equity multiple, IRR estimate, cash-flow IRR)
//! - A heuristic exit cap / interest rate sensitivity grid
//! - Saved-scenario library, CSV loading and parallel batch evaluation
//! - An isolated boundary for optional AI risk commentary

pub mod assumptions;
pub mod commentary;
pub mod deal;
pub mod error;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::UnderwritingAssumptions;
pub use deal::{SavedScenario, ScenarioInputs, ScenarioLibrary};
pub use error::{Result, ScenarioError};
pub use projection::{
    project, sensitivity_cell, summarize_returns, ProjectionConfig, ProjectionEngine,
    ReturnSummary, SensitivityGrid, YearProjection,
};
pub use scenario::{BatchOutcome, ScenarioResult, ScenarioRunner};
