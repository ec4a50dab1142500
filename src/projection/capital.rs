//! Yearly capital accumulation on the main account and sub-account

use log::debug;
use serde::{Deserialize, Serialize};

use super::salary::SalaryPathEntry;
use crate::assumptions::{ContributionRates, YearRateTable, MAIN_ACCOUNT_SHARE, SUB_ACCOUNT_SHARE};
use crate::error::Result;

/// Running balances of the two accounts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountBalances {
    pub main: f64,
    pub sub: f64,
}

impl AccountBalances {
    pub fn new(main: f64, sub: f64) -> Self {
        Self { main, sub }
    }

    pub fn total(&self) -> f64 {
        self.main + self.sub
    }
}

/// One year of accumulation, kept for auditability and charting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalEntry {
    pub year: i32,
    pub age: u32,

    // Opening balances
    pub main_before: f64,
    pub sub_before: f64,

    // Valorization applied before new contributions
    pub valorization_rate: f64,
    pub main_valorization: f64,
    pub sub_valorization: f64,

    // Contributions
    pub contribution_base: f64,
    pub contribution_rate: f64,
    pub contribution: f64,
    pub main_contribution: f64,
    pub sub_contribution: f64,

    // Closing balances
    pub main_after: f64,
    pub sub_after: f64,
    pub total_capital: f64,
}

/// Complete accumulation result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapitalPath {
    pub entries: Vec<CapitalEntry>,
    pub opening: AccountBalances,
    pub closing: AccountBalances,
}

impl CapitalPath {
    /// Final combined capital, the input to annuitization
    pub fn total_capital(&self) -> f64 {
        self.closing.total()
    }

    pub fn total_contributions(&self) -> f64 {
        self.entries.iter().map(|e| e.contribution).sum()
    }

    pub fn total_valorization(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.main_valorization + e.sub_valorization)
            .sum()
    }
}

/// Walks the salary path applying valorization then contributions
pub struct CapitalAccumulator<'a> {
    valorization: &'a YearRateTable,
    rates: &'a ContributionRates,
}

impl<'a> CapitalAccumulator<'a> {
    pub fn new(valorization: &'a YearRateTable, rates: &'a ContributionRates) -> Self {
        Self { valorization, rates }
    }

    /// Accumulate capital over `path` (ascending by year) starting from `opening`.
    ///
    /// Every year of the path must have a valorization rate.
    pub fn accumulate(&self, path: &[SalaryPathEntry], opening: AccountBalances) -> Result<CapitalPath> {
        let mut balances = opening;
        let mut entries = Vec::with_capacity(path.len());

        for salary in path {
            let entry = self.accumulate_year(salary, &mut balances)?;
            debug!(
                "{}: valorization {:.4}, contribution {:.2}, capital {:.2}",
                entry.year, entry.valorization_rate, entry.contribution, entry.total_capital
            );
            entries.push(entry);
        }

        Ok(CapitalPath {
            entries,
            opening,
            closing: balances,
        })
    }

    fn accumulate_year(&self, salary: &SalaryPathEntry, balances: &mut AccountBalances) -> Result<CapitalEntry> {
        let rate = self.valorization.require(salary.year)?;

        let main_before = balances.main;
        let sub_before = balances.sub;

        // Valorize what is already on the accounts
        balances.main *= rate;
        balances.sub *= rate;
        let main_valorization = balances.main - main_before;
        let sub_valorization = balances.sub - sub_before;

        let contribution_base = salary.effective_annual();
        let contribution_rate = salary
            .contract_type
            .map(|contract| self.rates.rate(contract))
            .unwrap_or(0.0);
        let contribution = contribution_base * contribution_rate;
        let main_contribution = contribution * MAIN_ACCOUNT_SHARE;
        let sub_contribution = contribution * SUB_ACCOUNT_SHARE;

        balances.main += main_contribution;
        balances.sub += sub_contribution;

        Ok(CapitalEntry {
            year: salary.year,
            age: salary.age,
            main_before,
            sub_before,
            valorization_rate: rate,
            main_valorization,
            sub_valorization,
            contribution_base,
            contribution_rate,
            contribution,
            main_contribution,
            sub_contribution,
            main_after: balances.main,
            sub_after: balances.sub,
            total_capital: balances.total(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::ContractType;
    use crate::error::PensionError;
    use approx::assert_relative_eq;

    fn salary(year: i32, monthly: f64, contract: Option<ContractType>) -> SalaryPathEntry {
        SalaryPathEntry {
            year,
            age: 30,
            monthly_gross: monthly,
            annual_gross: monthly * 12.0,
            reduction_factor: 1.0,
            effective_salary: monthly,
            contract_type: contract,
        }
    }

    #[test]
    fn test_contribution_split_between_accounts() {
        let valorization = YearRateTable::flat("valorization", 2020..=2020, 1.0);
        let rates = ContributionRates::default();
        let accumulator = CapitalAccumulator::new(&valorization, &rates);

        let path = accumulator
            .accumulate(&[salary(2020, 5000.0, Some(ContractType::Uop))], AccountBalances::default())
            .unwrap();
        let entry = &path.entries[0];

        // 60,000 * 19.52% = 11,712
        assert_relative_eq!(entry.contribution, 11_712.0, epsilon = 1e-9);
        assert_relative_eq!(entry.main_contribution, 11_712.0 * 0.7616, epsilon = 1e-9);
        assert_relative_eq!(entry.sub_contribution, 11_712.0 * 0.2384, epsilon = 1e-9);
        assert_relative_eq!(path.total_capital(), 11_712.0, epsilon = 1e-9);
    }

    #[test]
    fn test_valorization_applies_before_contribution() {
        let valorization = YearRateTable::from_pairs("valorization", [(2020, 1.10), (2021, 1.05)]);
        let rates = ContributionRates::default();
        let accumulator = CapitalAccumulator::new(&valorization, &rates);

        let path = accumulator
            .accumulate(
                &[salary(2020, 0.0, None), salary(2021, 0.0, None)],
                AccountBalances::new(1000.0, 100.0),
            )
            .unwrap();

        assert_relative_eq!(path.entries[0].main_valorization, 100.0, epsilon = 1e-9);
        assert_relative_eq!(path.entries[0].sub_valorization, 10.0, epsilon = 1e-9);
        assert_relative_eq!(path.closing.main, 1000.0 * 1.10 * 1.05, epsilon = 1e-9);
        assert_relative_eq!(path.closing.sub, 100.0 * 1.10 * 1.05, epsilon = 1e-9);
        assert_eq!(path.total_contributions(), 0.0);
    }

    #[test]
    fn test_capital_non_decreasing() {
        let valorization = YearRateTable::flat("valorization", 2000..=2030, 1.03);
        let rates = ContributionRates::default();
        let accumulator = CapitalAccumulator::new(&valorization, &rates);

        let years: Vec<_> = (2000..=2030)
            .map(|y| salary(y, if y % 5 == 0 { 0.0 } else { 4000.0 }, Some(ContractType::Uop)))
            .collect();
        let path = accumulator.accumulate(&years, AccountBalances::default()).unwrap();

        for pair in path.entries.windows(2) {
            assert!(pair[1].total_capital >= pair[0].total_capital);
        }
    }

    #[test]
    fn test_missing_valorization_year_fails() {
        let valorization = YearRateTable::flat("valorization", 2020..=2021, 1.0);
        let rates = ContributionRates::default();
        let accumulator = CapitalAccumulator::new(&valorization, &rates);

        let path = [
            salary(2021, 5000.0, Some(ContractType::Uop)),
            salary(2022, 5000.0, Some(ContractType::Uop)),
        ];
        let err = accumulator.accumulate(&path, AccountBalances::default()).unwrap_err();
        assert!(matches!(
            err,
            PensionError::MissingTableEntry { table: "valorization", ref key } if key == "2022"
        ));
    }

    #[test]
    fn test_specific_work_contract_contributes_nothing() {
        let valorization = YearRateTable::flat("valorization", 2020..=2020, 1.0);
        let rates = ContributionRates::default();
        let accumulator = CapitalAccumulator::new(&valorization, &rates);

        let path = accumulator
            .accumulate(&[salary(2020, 8000.0, Some(ContractType::SpecificWork))], AccountBalances::default())
            .unwrap();
        assert_eq!(path.total_capital(), 0.0);
    }
}
