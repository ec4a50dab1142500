//! Pension projection: salary path, capital accumulation, annuitization and
//! the retire-later scenarios built on top of them

mod annuity;
mod capital;
mod deferral;
mod engine;
mod programs;
mod results;
mod salary;
mod solver;

pub use annuity::{monthly_pension, percent_change, real_value, replacement_rate, round1, DEFAULT_INFLATION};
pub use capital::{AccountBalances, CapitalAccumulator, CapitalEntry, CapitalPath};
pub use deferral::{
    scenario, sweep, DeferralBasis, DeferralScenario, DeferralTables, DeferredPension, DEFERRAL_HORIZON_YEARS,
};
pub use engine::{EngineConfig, PensionEngine, DEFAULT_WAGE_GROWTH};
pub use programs::{boost, ProgramBoost, ProgramContribution, ProgramKind, PROGRAM_ANNUITY_MONTHS, PROGRAM_BOOST_SHARE};
pub use results::{AveragePensionComparison, ResultSummary, SickLeaveImpact, SimulationResults};
pub use salary::{build_salary_path, reduction_multiplier, SalaryPathEntry};
pub use solver::years_needed;
