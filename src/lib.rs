//! Pension Projection - retirement pension engine for a defined-contribution
//! public pension system
//!
//! This library provides:
//! - Career timelines with employment periods, gaps and sick leave
//! - Year-by-year capital accumulation with valorization
//! - Annuitization against life expectancy, real-value deflation
//! - Retire-later scenarios and the years-needed solver
//! - Batch and prognosis-variant runs

pub mod error;
pub mod career;
pub mod assumptions;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{PensionError, Result};
pub use career::{CareerTimeline, ContractType, Sex, SimulationInputs, TimelineItem};
pub use assumptions::{Assumptions, LifeExpectancyTable, PrognosisTable, PrognosisVariant, YearRateTable};
pub use projection::{EngineConfig, PensionEngine, SimulationResults};
pub use scenario::ScenarioRunner;
