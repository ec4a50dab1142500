//! Supplementary savings programs layered on top of the base capital

use serde::{Deserialize, Serialize};

use crate::career::RetirementPrograms;

/// Extra capital each enabled program adds, as a share of base capital
pub const PROGRAM_BOOST_SHARE: f64 = 0.10;

/// Programs pay out over a fixed 20-year window
pub const PROGRAM_ANNUITY_MONTHS: f64 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramKind {
    EmployeePlan,
    IndividualAccount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramContribution {
    pub program: ProgramKind,
    pub capital: f64,
    pub monthly_pension: f64,
}

/// Base capital plus whatever the enabled programs contribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramBoost {
    pub base_capital: f64,
    pub contributions: Vec<ProgramContribution>,
    pub total_capital: f64,
    /// Combined monthly pension paid by the programs
    pub monthly_pension: f64,
}

impl ProgramBoost {
    pub fn program_capital(&self) -> f64 {
        self.total_capital - self.base_capital
    }
}

/// Apply the enabled programs to `base_capital`
pub fn boost(base_capital: f64, programs: RetirementPrograms, annuity_months: f64) -> ProgramBoost {
    let enabled = [
        (ProgramKind::EmployeePlan, programs.employee_plan),
        (ProgramKind::IndividualAccount, programs.individual_account),
    ];

    let contributions: Vec<ProgramContribution> = enabled
        .into_iter()
        .filter(|&(_, on)| on)
        .map(|(program, _)| {
            let capital = base_capital * PROGRAM_BOOST_SHARE;
            ProgramContribution {
                program,
                capital,
                monthly_pension: capital / annuity_months,
            }
        })
        .collect();

    ProgramBoost {
        base_capital,
        total_capital: base_capital + contributions.iter().map(|c| c.capital).sum::<f64>(),
        monthly_pension: contributions.iter().map(|c| c.monthly_pension).sum(),
        contributions,
    }
}
