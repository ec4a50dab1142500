//! Output structures handed back to the calling layer

use serde::{Deserialize, Serialize};

use super::capital::CapitalEntry;
use super::deferral::DeferralScenario;
use super::programs::ProgramBoost;
use super::salary::SalaryPathEntry;

/// Projected pension against the projected national average
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragePensionComparison {
    /// Average pension projected to the retirement year
    pub average_pension: f64,
    /// Nominal pension minus the average
    pub difference: f64,
    /// Nominal pension as a percentage of the average
    pub ratio_pct: Option<f64>,
}

/// Effect of statistical short sick leave on the core pension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SickLeaveImpact {
    pub avg_days_per_year: f64,
    pub pension_without_sick_leave: f64,
    pub pension_with_sick_leave: f64,
    pub difference: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    pub retirement_age: u32,
    pub retirement_year: i32,

    // Headline figures
    pub nominal_pension: f64,
    pub real_pension: f64,
    /// Pension from the accounts alone, before programs
    pub core_pension: f64,
    pub annuity_divisor: f64,
    pub replacement_rate: Option<f64>,
    pub last_monthly_salary: f64,

    // Capital
    pub total_capital: f64,
    pub programs: ProgramBoost,

    // Comparisons
    pub average: AveragePensionComparison,
    pub sick_leave: SickLeaveImpact,
    pub expected_pension: Option<f64>,
    /// Expected minus projected nominal pension
    pub expected_gap: Option<f64>,
    pub deferral_scenarios: Vec<DeferralScenario>,
    pub years_needed: Option<u32>,

    // Chart data
    pub capital_path: Vec<CapitalEntry>,
    pub salary_path: Vec<SalaryPathEntry>,
}

impl SimulationResults {
    pub fn total_contributions(&self) -> f64 {
        self.capital_path.iter().map(|e| e.contribution).sum()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ResultSummary {
        ResultSummary {
            career_years: self.salary_path.len() as u32,
            retirement_age: self.retirement_age,
            retirement_year: self.retirement_year,
            total_capital: self.total_capital,
            boosted_capital: self.programs.total_capital,
            total_contributions: self.total_contributions(),
            nominal_pension: self.nominal_pension,
            real_pension: self.real_pension,
            replacement_rate: self.replacement_rate,
            years_needed: self.years_needed,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub career_years: u32,
    pub retirement_age: u32,
    pub retirement_year: i32,
    pub total_capital: f64,
    pub boosted_capital: f64,
    pub total_contributions: f64,
    pub nominal_pension: f64,
    pub real_pension: f64,
    pub replacement_rate: Option<f64>,
    pub years_needed: Option<u32>,
}
