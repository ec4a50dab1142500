//! What-if scenarios for retiring additional years later
//!
//! Each offset adds `years × last annual salary × contribution rate` to the
//! base capital (before program boosts) and re-annuitizes at the older age.
//! The program pension is paid on top of every offset unchanged, so deferred
//! pensions are comparable with the reported one. Increases are always
//! measured against the base pension, not the previous offset.

use serde::{Deserialize, Serialize};

use super::annuity::{percent_change, real_value};
use crate::assumptions::{LifeExpectancyTable, YearRateTable};
use crate::career::Sex;
use crate::error::Result;

/// Largest deferral offset considered, in years
pub const DEFERRAL_HORIZON_YEARS: u32 = 15;

/// The base case every deferral offset starts from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferralBasis {
    /// Accumulated capital before program boosts
    pub base_capital: f64,
    /// Reported nominal pension: `base_capital` annuitized plus `program_pension`
    pub base_pension: f64,
    /// Monthly pension paid by supplementary programs
    pub program_pension: f64,
    pub retirement_age: u32,
    pub retirement_year: i32,
    pub last_annual_salary: f64,
    pub contribution_rate: f64,
    pub sex: Sex,
}

/// Nominal outcome of working `additional_years` longer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeferredPension {
    pub additional_capital: f64,
    pub total_capital: f64,
    pub divisor: f64,
    pub nominal_pension: f64,
}

impl DeferralBasis {
    pub fn additional_capital(&self, additional_years: u32) -> f64 {
        additional_years as f64 * self.last_annual_salary * self.contribution_rate
    }

    /// Capital and nominal pension after `additional_years` more years of work
    pub fn pension_after(&self, additional_years: u32, table: &LifeExpectancyTable) -> Result<DeferredPension> {
        let additional_capital = self.additional_capital(additional_years);
        let total_capital = self.base_capital + additional_capital;
        let divisor = table.divisor(self.retirement_age + additional_years, self.sex)?;

        Ok(DeferredPension {
            additional_capital,
            total_capital,
            divisor,
            nominal_pension: total_capital / divisor + self.program_pension,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferralScenario {
    pub additional_years: u32,
    pub retirement_age: u32,
    pub retirement_year: i32,
    pub additional_capital: f64,
    pub total_capital: f64,
    pub divisor: f64,
    pub nominal_pension: f64,
    pub real_pension: f64,
    /// Absolute increase over the base pension
    pub increase: f64,
    /// Percentage increase over the base pension, `None` when the base is zero
    pub increase_pct: Option<f64>,
}

/// Tables a sweep reads
pub struct DeferralTables<'a> {
    pub life_expectancy: &'a LifeExpectancyTable,
    pub cpi: &'a YearRateTable,
    pub current_year: i32,
    pub default_inflation: f64,
}

/// Scenario for a single offset
pub fn scenario(basis: &DeferralBasis, additional_years: u32, tables: &DeferralTables) -> Result<DeferralScenario> {
    let deferred = basis.pension_after(additional_years, tables.life_expectancy)?;
    let retirement_year = basis.retirement_year + additional_years as i32;

    Ok(DeferralScenario {
        additional_years,
        retirement_age: basis.retirement_age + additional_years,
        retirement_year,
        additional_capital: deferred.additional_capital,
        total_capital: deferred.total_capital,
        divisor: deferred.divisor,
        nominal_pension: deferred.nominal_pension,
        real_pension: real_value(
            deferred.nominal_pension,
            retirement_year,
            tables.current_year,
            tables.cpi,
            tables.default_inflation,
        ),
        increase: deferred.nominal_pension - basis.base_pension,
        increase_pct: percent_change(deferred.nominal_pension, basis.base_pension),
    })
}

/// Scenarios for offsets `1..=horizon`, ordered by retirement age
pub fn sweep(basis: &DeferralBasis, horizon: u32, tables: &DeferralTables) -> Result<Vec<DeferralScenario>> {
    (1..=horizon).map(|years| scenario(basis, years, tables)).collect()
}
