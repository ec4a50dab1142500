//! Pension Projection CLI
//!
//! Projects one person's pension from a JSON input file or command-line flags

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use pension_projection::assumptions::PrognosisVariant;
use pension_projection::career::{load_inputs, load_timeline, ContractType, RetirementPrograms, Sex};
use pension_projection::{EngineConfig, ScenarioRunner, SimulationInputs, SimulationResults};

#[derive(Parser)]
#[command(name = "pension-projection", version, about = "Project a retirement pension")]
struct Cli {
    /// JSON file holding the full simulation inputs
    #[arg(long, conflicts_with_all = ["age", "sex", "gross", "start", "end"])]
    input: Option<PathBuf>,

    /// Current age
    #[arg(long)]
    age: Option<u32>,

    /// Sex: female/male (or F/M)
    #[arg(long, value_parser = parse_sex)]
    sex: Option<Sex>,

    /// Current monthly gross salary
    #[arg(long)]
    gross: Option<f64>,

    /// First year of work
    #[arg(long)]
    start: Option<i32>,

    /// Last year of work, which is also the retirement year
    #[arg(long)]
    end: Option<i32>,

    /// Contract type: uop, mandate, b2b, specific_work
    #[arg(long, value_parser = parse_contract, default_value = "uop")]
    contract: ContractType,

    /// Opening main account balance
    #[arg(long)]
    main_balance: Option<f64>,

    /// Opening sub-account balance
    #[arg(long)]
    sub_balance: Option<f64>,

    /// Apply statistical sick leave
    #[arg(long)]
    sick_leave: bool,

    /// Enrolled in an employee capital plan
    #[arg(long)]
    employee_plan: bool,

    /// Holds an individual retirement account
    #[arg(long)]
    individual_account: bool,

    /// Target monthly pension for the years-needed search
    #[arg(long)]
    expected: Option<f64>,

    /// CSV career timeline replacing the synthesized one
    #[arg(long)]
    career: Option<PathBuf>,

    /// Directory of table CSV files; built-in tables when omitted
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Macroeconomic prognosis used beyond the historical tables
    #[arg(long, value_enum, default_value = "moderate")]
    prognosis: PrognosisVariant,

    /// Year the inputs describe, defaults to this year
    #[arg(long)]
    current_year: Option<i32>,

    /// Print the full results as JSON
    #[arg(long)]
    json: bool,
}

fn parse_sex(s: &str) -> Result<Sex, String> {
    Sex::from_code(s).map_err(|e| e.to_string())
}

fn parse_contract(s: &str) -> Result<ContractType, String> {
    ContractType::from_code(s).map_err(|e| e.to_string())
}

impl Cli {
    fn inputs(&self) -> Result<SimulationInputs> {
        let mut inputs = match &self.input {
            Some(path) => {
                load_inputs(path).with_context(|| format!("Failed to load inputs from {}", path.display()))?
            }
            None => {
                let (Some(age), Some(sex), Some(gross), Some(start), Some(end)) =
                    (self.age, self.sex, self.gross, self.start, self.end)
                else {
                    bail!("either --input or all of --age, --sex, --gross, --start, --end are required");
                };
                let mut inputs = SimulationInputs::new(age, sex, gross, start, end);
                inputs.contract_type = self.contract;
                inputs.main_account_balance = self.main_balance;
                inputs.sub_account_balance = self.sub_balance;
                inputs.include_sick_leave = self.sick_leave;
                inputs.expected_pension = self.expected;
                if self.employee_plan || self.individual_account {
                    inputs.programs = Some(RetirementPrograms {
                        employee_plan: self.employee_plan,
                        individual_account: self.individual_account,
                    });
                }
                inputs
            }
        };

        if let Some(path) = &self.career {
            let items =
                load_timeline(path).with_context(|| format!("Failed to load career from {}", path.display()))?;
            inputs.career = Some(items);
        }
        Ok(inputs)
    }

    fn runner(&self) -> Result<ScenarioRunner> {
        let config = match self.current_year {
            Some(year) => EngineConfig::for_year(year),
            None => EngineConfig::default(),
        };
        match &self.tables {
            Some(dir) => ScenarioRunner::from_csv_path(dir, self.prognosis, config)
                .with_context(|| format!("Failed to load tables from {}", dir.display())),
            None => {
                let historical = pension_projection::Assumptions::historical_tables();
                let prognosis = pension_projection::PrognosisTable::default_variant(self.prognosis);
                Ok(ScenarioRunner::with_assumptions(historical.with_prognosis(&prognosis), config))
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let inputs = cli.inputs()?;
    let runner = cli.runner()?;
    let results = runner.run(&inputs).context("Projection failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_report(&inputs, &results);
    }
    Ok(())
}

fn print_report(inputs: &SimulationInputs, results: &SimulationResults) {
    println!("Pension Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("========================\n");

    println!("Inputs:");
    println!("  Age: {}  Sex: {:?}  Contract: {}", inputs.age, inputs.sex, inputs.contract_type.as_str());
    println!("  Monthly gross: {:.2}", inputs.monthly_gross);
    println!("  Work: {}-{}", inputs.work_start_year, inputs.work_end_year);
    println!();

    println!("{:>6} {:>4} {:>12} {:>8} {:>12} {:>14}", "Year", "Age", "Gross", "Factor", "Contrib", "Capital");
    println!("{}", "-".repeat(62));
    for (salary, capital) in results.salary_path.iter().zip(&results.capital_path) {
        println!(
            "{:>6} {:>4} {:>12.2} {:>8.4} {:>12.2} {:>14.2}",
            salary.year, salary.age, salary.monthly_gross, salary.reduction_factor, capital.contribution, capital.total_capital
        );
    }

    let summary = results.summary();
    println!("\nSummary:");
    println!("  Retirement: age {} in {}", summary.retirement_age, summary.retirement_year);
    println!("  Total capital: {:.2}", summary.total_capital);
    if results.programs.program_capital() > 0.0 {
        println!("  With programs: {:.2}", summary.boosted_capital);
    }
    println!("  Total contributions: {:.2}", summary.total_contributions);
    println!("  Annuity divisor: {:.1} months", results.annuity_divisor);
    println!("  Nominal pension: {:.2}", summary.nominal_pension);
    println!("  Real pension: {:.2}", summary.real_pension);
    match summary.replacement_rate {
        Some(rate) => println!("  Replacement rate: {:.1}%", rate),
        None => println!("  Replacement rate: n/a"),
    }
    println!(
        "  Average pension: {:.2} (difference {:+.2})",
        results.average.average_pension, results.average.difference
    );
    println!(
        "  Sick leave impact: {:.2} ({:.1} days/year)",
        results.sick_leave.difference, results.sick_leave.avg_days_per_year
    );

    if let (Some(expected), Some(gap)) = (results.expected_pension, results.expected_gap) {
        println!("  Expected pension: {:.2} (gap {:+.2})", expected, gap);
        match results.years_needed {
            Some(0) => println!("  Expected pension already reached"),
            Some(years) => println!("  Years needed: {}", years),
            None => println!("  Expected pension not reachable within {} years", results.deferral_scenarios.len()),
        }
    }

    println!("\nRetire later:");
    println!("{:>6} {:>4} {:>6} {:>12} {:>12} {:>10}", "+Years", "Age", "Year", "Nominal", "Real", "Increase");
    for scenario in &results.deferral_scenarios {
        let pct = scenario
            .increase_pct
            .map(|p| format!("{:.1}%", p))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{:>6} {:>4} {:>6} {:>12.2} {:>12.2} {:>10}",
            scenario.additional_years,
            scenario.retirement_age,
            scenario.retirement_year,
            scenario.nominal_pension,
            scenario.real_pension,
            pct
        );
    }
}
