//! Projection tables: valorization, inflation, life expectancy, contribution rates

mod contribution;
mod life_expectancy;
mod prognosis;
mod rates;
mod sick_leave;
pub mod loader;

pub use contribution::{
    ContributionRates, GapPenalties, CONTRIBUTION_RATE, MAIN_ACCOUNT_SHARE, SICK_PAY_RETAINED,
    SUB_ACCOUNT_SHARE,
};
pub use life_expectancy::{LifeExpectancyTable, MIN_DIVISOR_MONTHS};
pub use loader::LoadedTables;
pub use prognosis::{PrognosisRow, PrognosisTable, PrognosisVariant};
pub use rates::YearRateTable;
pub use sick_leave::{SickLeaveConfig, SickLeaveStats};

use std::path::Path;

use log::info;

use crate::career::Sex;
use crate::error::{PensionError, Result};

/// Average monthly pension paid in `base_year`, projected forward with wage growth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragePensionBenchmark {
    pub base_year: i32,
    pub amount: f64,
}

impl Default for AveragePensionBenchmark {
    fn default() -> Self {
        Self {
            base_year: 2024,
            amount: 3_810.0,
        }
    }
}

/// Container for all tables the engine reads
#[derive(Debug, Clone)]
pub struct Assumptions {
    pub valorization: YearRateTable,
    pub cpi: YearRateTable,
    pub wage_growth: YearRateTable,
    pub life_expectancy: LifeExpectancyTable,
    pub contributions: ContributionRates,
    pub gap_penalties: GapPenalties,
    pub sick_leave: SickLeaveStats,
    pub average_pension: AveragePensionBenchmark,
}

impl Assumptions {
    /// Built-in tables: historical valorization and CPI, extended with the
    /// moderate prognosis through 2100
    pub fn default_tables() -> Self {
        Self::historical_tables().with_prognosis(&PrognosisTable::default_variant(PrognosisVariant::Moderate))
    }

    /// Built-in historical tables only, 2000-2024
    pub fn historical_tables() -> Self {
        Self {
            valorization: YearRateTable::from_pairs("valorization", historical_valorization()),
            cpi: YearRateTable::from_pairs("cpi", historical_cpi()),
            wage_growth: YearRateTable::from_pairs("wage_growth", historical_wage_growth()),
            life_expectancy: LifeExpectancyTable::default_table(),
            contributions: ContributionRates::default(),
            gap_penalties: GapPenalties::default(),
            sick_leave: SickLeaveStats::default(),
            average_pension: AveragePensionBenchmark::default(),
        }
    }

    /// Load tables from CSV files in the default location (data/tables/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TABLES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedTables::load_from(path)?;
        Self::from_loaded(loaded)
    }

    pub fn from_loaded(loaded: LoadedTables) -> Result<Self> {
        let config_for = |sex: Sex| {
            loaded
                .sick_leave
                .iter()
                .find(|(row_sex, _, _)| *row_sex == sex)
                .map(|&(_, avg_days_per_year, reduction_coefficient)| SickLeaveConfig {
                    avg_days_per_year,
                    reduction_coefficient,
                })
                .ok_or_else(|| PensionError::missing("sick_leave", format!("{:?}", sex)))
        };
        let sick_leave = SickLeaveStats {
            female: config_for(Sex::Female)?,
            male: config_for(Sex::Male)?,
        };

        let (base_year, amount) = loaded.average_pension;

        Ok(Self {
            valorization: loaded.valorization,
            cpi: loaded.cpi,
            wage_growth: loaded.wage_growth,
            life_expectancy: LifeExpectancyTable::from_rows(loaded.life_expectancy),
            contributions: ContributionRates::default(),
            gap_penalties: GapPenalties::default(),
            sick_leave,
            average_pension: AveragePensionBenchmark { base_year, amount },
        })
    }

    pub fn with_prognosis(mut self, prognosis: &PrognosisTable) -> Self {
        self.extend_with_prognosis(prognosis);
        self
    }

    /// Fill years the historical tables do not cover from a prognosis.
    ///
    /// Valorization and wage growth follow the projected wage growth, CPI
    /// follows projected inflation. Existing entries are kept.
    pub fn extend_with_prognosis(&mut self, prognosis: &PrognosisTable) {
        let valorization = self.valorization.extend_missing(prognosis.wage_growth());
        let wage_growth = self.wage_growth.extend_missing(prognosis.wage_growth());
        let cpi = self.cpi.extend_missing(prognosis.inflation());
        info!(
            "Extended tables with {} prognosis: {} valorization, {} wage growth, {} CPI years",
            prognosis.variant.as_str(),
            valorization,
            wage_growth,
            cpi
        );
    }
}

/// Annual valorization indices of the main account, 2000-2024
fn historical_valorization() -> Vec<(i32, f64)> {
    vec![
        (2000, 1.1272), (2001, 1.0668), (2002, 1.0190), (2003, 1.0200),
        (2004, 1.0363), (2005, 1.0555), (2006, 1.0690), (2007, 1.1285),
        (2008, 1.1600), (2009, 1.0787), (2010, 1.0798), (2011, 1.0451),
        (2012, 1.0498), (2013, 1.0450), (2014, 1.0602), (2015, 1.0537),
        (2016, 1.0637), (2017, 1.0868), (2018, 1.0920), (2019, 1.0894),
        (2020, 1.0541), (2021, 1.0933), (2022, 1.1446), (2023, 1.1487),
        (2024, 1.1441),
    ]
}

/// Year-over-year consumer price multipliers, 2000-2024
fn historical_cpi() -> Vec<(i32, f64)> {
    vec![
        (2000, 1.101), (2001, 1.055), (2002, 1.019), (2003, 1.008),
        (2004, 1.035), (2005, 1.021), (2006, 1.010), (2007, 1.025),
        (2008, 1.042), (2009, 1.035), (2010, 1.026), (2011, 1.043),
        (2012, 1.037), (2013, 1.009), (2014, 1.000), (2015, 0.991),
        (2016, 0.994), (2017, 1.020), (2018, 1.016), (2019, 1.023),
        (2020, 1.034), (2021, 1.051), (2022, 1.144), (2023, 1.114),
        (2024, 1.036),
    ]
}

/// Year-over-year average wage multipliers, 2000-2024
fn historical_wage_growth() -> Vec<(i32, f64)> {
    vec![
        (2000, 1.113), (2001, 1.081), (2002, 1.034), (2003, 1.031),
        (2004, 1.044), (2005, 1.032), (2006, 1.049), (2007, 1.084),
        (2008, 1.101), (2009, 1.052), (2010, 1.039), (2011, 1.050),
        (2012, 1.037), (2013, 1.037), (2014, 1.037), (2015, 1.035),
        (2016, 1.038), (2017, 1.056), (2018, 1.071), (2019, 1.072),
        (2020, 1.048), (2021, 1.087), (2022, 1.121), (2023, 1.128),
        (2024, 1.142),
    ]
}
