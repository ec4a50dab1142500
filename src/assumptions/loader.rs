//! CSV-based table loader
//!
//! Loads projection tables from CSV files in data/tables/

use std::fs::File;
use std::path::Path;

use log::debug;

use super::rates::YearRateTable;
use crate::career::Sex;
use crate::error::{PensionError, Result};

/// Default path to tables directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

fn open(path: &Path, file_name: &str) -> Result<csv::Reader<File>> {
    let file = File::open(path.join(file_name))?;
    Ok(csv::Reader::from_reader(file))
}

fn parse_field<T: std::str::FromStr>(record: &csv::StringRecord, idx: usize, file_name: &str) -> Result<T> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let raw = record.get(idx).ok_or_else(|| PensionError::TableParse {
        file: file_name.to_string(),
        line,
        reason: format!("missing column {}", idx),
    })?;
    raw.trim().parse().map_err(|_| PensionError::TableParse {
        file: file_name.to_string(),
        line,
        reason: format!("cannot parse {:?}", raw),
    })
}

/// Load a `year,rate` table
pub fn load_year_rates(path: &Path, file_name: &str, name: &'static str) -> Result<YearRateTable> {
    let mut reader = open(path, file_name)?;
    let mut table = YearRateTable::new(name);

    for result in reader.records() {
        let record = result?;
        let year: i32 = parse_field(&record, 0, file_name)?;
        let rate: f64 = parse_field(&record, 1, file_name)?;
        table.insert(year, rate);
    }

    debug!("Loaded {} rows from {}", table.len(), file_name);
    Ok(table)
}

/// Load life expectancy rows
/// Returns Vec<(age, female_months, male_months)>
pub fn load_life_expectancy(path: &Path) -> Result<Vec<(u32, f64, f64)>> {
    let file_name = "life_expectancy.csv";
    let mut reader = open(path, file_name)?;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        rows.push((
            parse_field(&record, 0, file_name)?,
            parse_field(&record, 1, file_name)?,
            parse_field(&record, 2, file_name)?,
        ));
    }

    Ok(rows)
}

/// Load sick leave statistics
/// Returns Vec<(sex, avg_days_per_year, reduction_coefficient)>
pub fn load_sick_leave(path: &Path) -> Result<Vec<(Sex, f64, f64)>> {
    let file_name = "sick_leave.csv";
    let mut reader = open(path, file_name)?;
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        let sex = Sex::from_code(record.get(0).unwrap_or_default())?;
        rows.push((sex, parse_field(&record, 1, file_name)?, parse_field(&record, 2, file_name)?));
    }

    Ok(rows)
}

/// Load the average pension benchmark
/// Returns (base_year, monthly_amount) from the first data row
pub fn load_average_pension(path: &Path) -> Result<(i32, f64)> {
    let file_name = "average_pension.csv";
    let mut reader = open(path, file_name)?;

    match reader.records().next() {
        Some(result) => {
            let record = result?;
            Ok((parse_field(&record, 0, file_name)?, parse_field(&record, 1, file_name)?))
        }
        None => Err(PensionError::missing("average_pension", "base year")),
    }
}

/// All tables read from one directory
#[derive(Debug)]
pub struct LoadedTables {
    pub valorization: YearRateTable,
    pub cpi: YearRateTable,
    pub wage_growth: YearRateTable,
    pub life_expectancy: Vec<(u32, f64, f64)>,
    pub sick_leave: Vec<(Sex, f64, f64)>,
    pub average_pension: (i32, f64),
}

impl LoadedTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            valorization: load_year_rates(path, "valorization.csv", "valorization")?,
            cpi: load_year_rates(path, "cpi.csv", "cpi")?,
            wage_growth: load_year_rates(path, "wage_growth.csv", "wage_growth")?,
            life_expectancy: load_life_expectancy(path)?,
            sick_leave: load_sick_leave(path)?,
            average_pension: load_average_pension(path)?,
        })
    }
}
