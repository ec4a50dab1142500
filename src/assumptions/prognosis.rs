//! Long-term macroeconomic prognosis in three variants
//!
//! Prognosis files are semicolon-delimited with a header row:
//! `year;inflation;wage_growth;unemployment;gdp_growth`. Inflation, wage
//! growth and GDP growth are annual multipliers (1.025 = 2.5%), unemployment
//! is a percentage. Decimal commas are accepted.

use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PensionError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PrognosisVariant {
    Moderate,
    Pessimistic,
    Optimistic,
}

impl PrognosisVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrognosisVariant::Moderate => "moderate",
            PrognosisVariant::Pessimistic => "pessimistic",
            PrognosisVariant::Optimistic => "optimistic",
        }
    }

    pub fn file_name(&self) -> String {
        format!("prognosis_{}.csv", self.as_str())
    }
}

impl FromStr for PrognosisVariant {
    type Err = PensionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "moderate" => Ok(PrognosisVariant::Moderate),
            "pessimistic" => Ok(PrognosisVariant::Pessimistic),
            "optimistic" => Ok(PrognosisVariant::Optimistic),
            other => Err(PensionError::invalid("prognosis_variant", format!("unknown variant: {}", other))),
        }
    }
}

/// One projected year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrognosisRow {
    pub year: i32,
    pub inflation: f64,
    pub wage_growth: f64,
    pub unemployment: f64,
    pub gdp_growth: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrognosisTable {
    pub variant: PrognosisVariant,
    rows: Vec<PrognosisRow>,
}

impl PrognosisTable {
    /// Built-in flat prognosis for 2025-2100
    pub fn default_variant(variant: PrognosisVariant) -> Self {
        let (inflation, wage_growth, unemployment, gdp_growth) = match variant {
            PrognosisVariant::Moderate => (1.025, 1.035, 5.0, 1.025),
            PrognosisVariant::Pessimistic => (1.035, 1.025, 8.0, 1.012),
            PrognosisVariant::Optimistic => (1.020, 1.045, 3.5, 1.035),
        };
        let rows = (2025..=2100)
            .map(|year| PrognosisRow {
                year,
                inflation,
                wage_growth,
                unemployment,
                gdp_growth,
            })
            .collect();
        Self { variant, rows }
    }

    pub fn from_rows(variant: PrognosisVariant, mut rows: Vec<PrognosisRow>) -> Self {
        rows.sort_by_key(|row| row.year);
        Self { variant, rows }
    }

    /// Load `prognosis_<variant>.csv` from a tables directory
    pub fn load(dir: &Path, variant: PrognosisVariant) -> Result<Self> {
        let file_name = variant.file_name();
        let file = File::open(dir.join(&file_name))?;
        Self::from_reader(variant, file, &file_name)
    }

    pub fn from_reader<R: std::io::Read>(variant: PrognosisVariant, reader: R, source: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let parse_error = |reason: String| PensionError::TableParse {
                file: source.to_string(),
                line,
                reason,
            };
            let field = |idx: usize, name: &str| -> Result<f64> {
                let raw = record
                    .get(idx)
                    .ok_or_else(|| parse_error(format!("missing column {}", name)))?;
                parse_decimal(raw).ok_or_else(|| parse_error(format!("{} is not a number: {:?}", name, raw)))
            };
            let raw_year = record
                .get(0)
                .ok_or_else(|| parse_error("missing column year".to_string()))?;
            let year: i32 = raw_year
                .parse()
                .map_err(|_| parse_error(format!("year is not a whole number: {:?}", raw_year)))?;

            rows.push(PrognosisRow {
                year,
                inflation: field(1, "inflation")?,
                wage_growth: field(2, "wage_growth")?,
                unemployment: field(3, "unemployment")?,
                gdp_growth: field(4, "gdp_growth")?,
            });
        }

        Ok(Self::from_rows(variant, rows))
    }

    pub fn rows(&self) -> &[PrognosisRow] {
        &self.rows
    }

    pub fn get(&self, year: i32) -> Option<&PrognosisRow> {
        self.rows
            .binary_search_by_key(&year, |row| row.year)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn inflation(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.rows.iter().map(|row| (row.year, row.inflation))
    }

    pub fn wage_growth(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.rows.iter().map(|row| (row.year, row.wage_growth))
    }
}

/// Parse a number written with either a decimal point or a decimal comma
fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}
