//! Core projection engine: salary path → capital → pension → scenarios

use chrono::Datelike;
use log::info;

use super::annuity::{real_value, replacement_rate, round1, DEFAULT_INFLATION};
use super::capital::{AccountBalances, CapitalAccumulator, CapitalPath};
use super::deferral::{sweep, DeferralBasis, DeferralTables, DEFERRAL_HORIZON_YEARS};
use super::programs::{boost, PROGRAM_ANNUITY_MONTHS};
use super::results::{AveragePensionComparison, SickLeaveImpact, SimulationResults};
use super::salary::{build_salary_path, SalaryPathEntry};
use super::solver::years_needed;
use crate::assumptions::Assumptions;
use crate::career::SimulationInputs;
use crate::error::Result;

/// Default wage growth assumed beyond the last wage-growth table year
pub const DEFAULT_WAGE_GROWTH: f64 = 0.03;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Year the inputs describe; real values are expressed in its money
    pub current_year: i32,

    /// Number of deferral offsets swept and searched
    pub deferral_years: u32,

    /// Annual inflation beyond the CPI table
    pub default_inflation: f64,

    /// Annual wage growth beyond the wage-growth table
    pub default_wage_growth: f64,

    /// Payout window for supplementary programs
    pub program_annuity_months: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_year(chrono::Local::now().year())
    }
}

impl EngineConfig {
    pub fn for_year(current_year: i32) -> Self {
        Self {
            current_year,
            deferral_years: DEFERRAL_HORIZON_YEARS,
            default_inflation: DEFAULT_INFLATION,
            default_wage_growth: DEFAULT_WAGE_GROWTH,
            program_annuity_months: PROGRAM_ANNUITY_MONTHS,
        }
    }
}

/// Main projection engine
pub struct PensionEngine {
    assumptions: Assumptions,
    config: EngineConfig,
}

impl PensionEngine {
    /// Create a new projection engine with given tables and config
    pub fn new(assumptions: Assumptions, config: EngineConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full projection for one set of inputs
    pub fn project(&self, inputs: &SimulationInputs) -> Result<SimulationResults> {
        inputs.validate()?;
        let timeline = inputs.timeline()?;

        let current_year = self.config.current_year;
        let birth_year = current_year - inputs.age as i32;
        let retirement_year = inputs.work_end_year;
        let retirement_age = (inputs.age as i32 + retirement_year - current_year).max(0) as u32;

        info!(
            "Projecting {:?}, age {}, {}-{}, retiring at {} in {}",
            inputs.sex, inputs.age, inputs.work_start_year, inputs.work_end_year, retirement_age, retirement_year
        );

        let penalties = &self.assumptions.gap_penalties;
        let sick_leave = self.assumptions.sick_leave.for_sex(inputs.sex);
        let path_without_sick_leave = build_salary_path(&timeline, birth_year, penalties, None);
        let path_with_sick_leave = build_salary_path(&timeline, birth_year, penalties, Some(sick_leave));

        let opening = AccountBalances::new(
            inputs.main_account_balance.unwrap_or(0.0),
            inputs.sub_account_balance.unwrap_or(0.0),
        );
        let accumulator = CapitalAccumulator::new(&self.assumptions.valorization, &self.assumptions.contributions);
        let capital_without = accumulator.accumulate(&path_without_sick_leave, opening)?;
        let capital_with = accumulator.accumulate(&path_with_sick_leave, opening)?;

        let life = &self.assumptions.life_expectancy;
        let divisor = life.divisor(retirement_age, inputs.sex)?;
        let pension_without = capital_without.total_capital() / divisor;
        let pension_with = capital_with.total_capital() / divisor;

        let (salary_path, capital, core_pension): (Vec<SalaryPathEntry>, CapitalPath, f64) =
            if inputs.include_sick_leave {
                (path_with_sick_leave, capital_with, pension_with)
            } else {
                (path_without_sick_leave, capital_without, pension_without)
            };

        let total_capital = capital.total_capital();
        let programs = boost(total_capital, inputs.programs(), self.config.program_annuity_months);
        let nominal_pension = core_pension + programs.monthly_pension;
        let real_pension = real_value(
            nominal_pension,
            retirement_year,
            current_year,
            &self.assumptions.cpi,
            self.config.default_inflation,
        );

        let last_salary = salary_path.last();
        let last_monthly_salary = last_salary.map(|s| s.monthly_gross).unwrap_or(0.0);

        let basis = DeferralBasis {
            base_capital: total_capital,
            base_pension: nominal_pension,
            program_pension: programs.monthly_pension,
            retirement_age,
            retirement_year,
            last_annual_salary: last_salary.map(|s| s.annual_gross).unwrap_or(0.0),
            contribution_rate: self.assumptions.contributions.rate(inputs.contract_type),
            sex: inputs.sex,
        };
        let tables = DeferralTables {
            life_expectancy: life,
            cpi: &self.assumptions.cpi,
            current_year,
            default_inflation: self.config.default_inflation,
        };
        let deferral_scenarios = sweep(&basis, self.config.deferral_years, &tables)?;

        let years_needed = match inputs.expected_pension {
            Some(expected) => years_needed(expected, &basis, life, self.config.deferral_years)?,
            None => None,
        };

        let results = SimulationResults {
            retirement_age,
            retirement_year,
            nominal_pension,
            real_pension,
            core_pension,
            annuity_divisor: divisor,
            replacement_rate: replacement_rate(nominal_pension, last_monthly_salary),
            last_monthly_salary,
            total_capital,
            average: self.compare_with_average(nominal_pension, retirement_year),
            sick_leave: SickLeaveImpact {
                avg_days_per_year: sick_leave.avg_days_per_year,
                pension_without_sick_leave: pension_without,
                pension_with_sick_leave: pension_with,
                difference: pension_without - pension_with,
            },
            expected_pension: inputs.expected_pension,
            expected_gap: inputs.expected_pension.map(|expected| expected - nominal_pension),
            deferral_scenarios,
            years_needed,
            programs,
            capital_path: capital.entries,
            salary_path,
        };

        info!(
            "Capital {:.2}, pension {:.2} nominal / {:.2} real, replacement {:?}%",
            results.total_capital, results.nominal_pension, results.real_pension, results.replacement_rate
        );

        Ok(results)
    }

    fn compare_with_average(&self, nominal_pension: f64, retirement_year: i32) -> AveragePensionComparison {
        let benchmark = self.assumptions.average_pension;
        let average_pension = benchmark.amount
            * self.assumptions.wage_growth.cumulative(
                benchmark.base_year,
                retirement_year,
                self.config.default_wage_growth,
            );

        AveragePensionComparison {
            average_pension,
            difference: nominal_pension - average_pension,
            ratio_pct: (average_pension > 0.0).then(|| round1(nominal_pension / average_pension * 100.0)),
        }
    }
}
