//! Load career timelines from CSV and simulation inputs from JSON

use super::{
    ContractType, EmploymentGapPeriod, EmploymentPeriod, GapKind, LifeEvent, Sex, SimulationInputs,
    TimelineItem, YearMonth,
};
use crate::error::{PensionError, Result};
use csv::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Raw CSV row; which columns are required depends on `kind`
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    kind: String,
    start_year: i32,
    start_month: u32,
    #[serde(default)]
    end_year: Option<i32>,
    #[serde(default)]
    end_month: Option<u32>,
    #[serde(default)]
    monthly_gross: Option<f64>,
    #[serde(default)]
    contract: Option<String>,
    #[serde(default)]
    annual_raise_pct: Option<f64>,
    #[serde(default)]
    duration_months: Option<u32>,
    #[serde(default)]
    duration_years: Option<f64>,
    #[serde(default)]
    description: Option<String>,
}

fn required<T>(value: Option<T>, field: &str, kind: &str) -> Result<T> {
    value.ok_or_else(|| PensionError::invalid(field, format!("required for {} rows", kind)))
}

impl CsvRow {
    fn to_item(self) -> Result<TimelineItem> {
        let start = YearMonth::new(self.start_year, self.start_month)?;

        let item = match self.kind.trim() {
            "employment" => {
                let end = YearMonth::new(
                    required(self.end_year, "end_year", "employment")?,
                    required(self.end_month, "end_month", "employment")?,
                )?;
                let contract = required(self.contract, "contract", "employment")?;
                TimelineItem::Employment(EmploymentPeriod {
                    start,
                    end,
                    monthly_gross: required(self.monthly_gross, "monthly_gross", "employment")?,
                    contract_type: ContractType::from_code(&contract)?,
                    annual_raise_pct: self.annual_raise_pct,
                    description: self.description.filter(|d| !d.is_empty()),
                })
            }
            "sick_leave" => TimelineItem::Event(LifeEvent::sick_leave(
                start,
                required(self.duration_years, "duration_years", "sick_leave")?,
            )),
            gap => TimelineItem::Gap(EmploymentGapPeriod::new(
                GapKind::from_code(gap)?,
                start,
                required(self.duration_months, "duration_months", gap)?,
            )),
        };

        Ok(item)
    }
}

/// Load timeline items from a CSV file
pub fn load_timeline<P: AsRef<Path>>(path: P) -> Result<Vec<TimelineItem>> {
    let reader = Reader::from_path(path)?;
    read_items(reader)
}

/// Load timeline items from any reader (e.g. string buffer, upload body)
pub fn load_timeline_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<TimelineItem>> {
    read_items(Reader::from_reader(reader))
}

fn read_items<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<TimelineItem>> {
    let mut items = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        items.push(row.to_item()?);
    }

    Ok(items)
}

/// One person per row of a batch file
#[derive(Debug, serde::Deserialize)]
struct BatchRow {
    age: u32,
    sex: String,
    monthly_gross: f64,
    work_start_year: i32,
    work_end_year: i32,
    #[serde(default)]
    contract: Option<String>,
    #[serde(default)]
    main_account_balance: Option<f64>,
    #[serde(default)]
    sub_account_balance: Option<f64>,
    #[serde(default)]
    include_sick_leave: Option<bool>,
    #[serde(default)]
    expected_pension: Option<f64>,
}

impl BatchRow {
    fn to_inputs(self) -> Result<SimulationInputs> {
        let mut inputs = SimulationInputs::new(
            self.age,
            Sex::from_code(&self.sex)?,
            self.monthly_gross,
            self.work_start_year,
            self.work_end_year,
        );
        if let Some(contract) = self.contract.filter(|c| !c.trim().is_empty()) {
            inputs.contract_type = ContractType::from_code(&contract)?;
        }
        inputs.main_account_balance = self.main_account_balance;
        inputs.sub_account_balance = self.sub_account_balance;
        inputs.include_sick_leave = self.include_sick_leave.unwrap_or(false);
        inputs.expected_pension = self.expected_pension;
        Ok(inputs)
    }
}

/// Load a batch of simulation inputs, one person per CSV row
pub fn load_batch<P: AsRef<Path>>(path: P) -> Result<Vec<SimulationInputs>> {
    load_batch_from_reader(File::open(path)?)
}

pub fn load_batch_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<SimulationInputs>> {
    let mut reader = Reader::from_reader(reader);
    let mut batch = Vec::new();

    for result in reader.deserialize() {
        let row: BatchRow = result?;
        batch.push(row.to_inputs()?);
    }

    Ok(batch)
}

/// Load a JSON-encoded `SimulationInputs`
pub fn load_inputs<P: AsRef<Path>>(path: P) -> Result<SimulationInputs> {
    let file = File::open(path)?;
    let inputs: SimulationInputs = serde_json::from_reader(BufReader::new(file))?;
    inputs.validate()?;
    Ok(inputs)
}
