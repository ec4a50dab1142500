//! End-to-end properties of the projection engine

use approx::assert_relative_eq;
use pension_projection::career::{
    ContractType, EmploymentGapPeriod, EmploymentPeriod, GapKind, RetirementPrograms, Sex, SimulationInputs,
    TimelineItem, YearMonth,
};
use pension_projection::projection::{real_value, replacement_rate, SimulationResults, PROGRAM_ANNUITY_MONTHS};
use pension_projection::{Assumptions, EngineConfig, PensionEngine};

const CURRENT_YEAR: i32 = 2026;

fn engine() -> PensionEngine {
    PensionEngine::new(Assumptions::default_tables(), EngineConfig::for_year(CURRENT_YEAR))
}

fn baseline() -> SimulationInputs {
    SimulationInputs::new(30, Sex::Female, 7000.0, 2015, 2060)
}

fn project(inputs: &SimulationInputs) -> SimulationResults {
    engine().project(inputs).expect("projection failed")
}

fn ym(year: i32, month: u32) -> YearMonth {
    YearMonth::new(year, month).unwrap()
}

fn with_gap(months: u32) -> SimulationInputs {
    let mut inputs = baseline();
    inputs.career = Some(vec![
        TimelineItem::Employment(EmploymentPeriod::new(ym(2015, 1), ym(2060, 12), 7000.0, ContractType::Uop)),
        TimelineItem::Gap(EmploymentGapPeriod::new(GapKind::UnpaidLeave, ym(2030, 1), months)),
    ]);
    inputs
}

#[test]
fn test_idempotent() {
    let mut inputs = baseline();
    inputs.include_sick_leave = true;
    inputs.expected_pension = Some(9_000.0);

    let first = project(&inputs);
    let second = project(&inputs);
    assert_eq!(first, second);
}

#[test]
fn test_baseline_scenario_higher_salary_higher_pension() {
    let base = project(&baseline());
    let mut doubled = baseline();
    doubled.monthly_gross = 14_000.0;
    let doubled = project(&doubled);

    assert!(base.nominal_pension > 0.0);
    assert!(base.nominal_pension < doubled.nominal_pension);
}

#[test]
fn test_salary_monotonic() {
    let pensions: Vec<f64> = [3_000.0, 5_000.0, 8_000.0, 12_000.0]
        .iter()
        .map(|&gross| {
            let mut inputs = baseline();
            inputs.monthly_gross = gross;
            project(&inputs).nominal_pension
        })
        .collect();

    for pair in pensions.windows(2) {
        assert!(pair[1] > pair[0]);
    }
}

#[test]
fn test_gap_removes_one_year_of_contributions() {
    let base = project(&baseline());
    let gapped = project(&with_gap(12));

    assert!(gapped.total_capital < base.total_capital);

    let year_2030 = gapped.capital_path.iter().find(|e| e.year == 2030).unwrap();
    assert_eq!(year_2030.contribution, 0.0);
    assert_relative_eq!(
        base.total_contributions() - gapped.total_contributions(),
        7000.0 * 12.0 * 0.1952,
        epsilon = 1e-6
    );
}

#[test]
fn test_longer_gap_never_increases_pension() {
    let pensions: Vec<f64> = [0, 3, 6, 12, 24, 36]
        .iter()
        .map(|&months| if months == 0 { project(&baseline()) } else { project(&with_gap(months)) })
        .map(|results| results.nominal_pension)
        .collect();

    for pair in pensions.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
}

#[test]
fn test_program_boost_scenario() {
    let base = project(&baseline());
    let mut inputs = baseline();
    inputs.programs = Some(RetirementPrograms {
        employee_plan: true,
        individual_account: true,
    });
    let boosted = project(&inputs);

    assert_relative_eq!(boosted.total_capital, base.total_capital, epsilon = 1e-9);
    assert_relative_eq!(boosted.programs.total_capital, base.total_capital * 1.20, epsilon = 1e-6);
    assert_relative_eq!(
        boosted.programs.monthly_pension,
        boosted.programs.program_capital() / PROGRAM_ANNUITY_MONTHS,
        epsilon = 1e-9
    );
    assert!(boosted.nominal_pension > base.nominal_pension);
}

#[test]
fn test_deferral_ordering_for_contributing_contracts() {
    for contract in [ContractType::Uop, ContractType::Mandate, ContractType::B2b] {
        let mut inputs = baseline();
        inputs.contract_type = contract;
        let results = project(&inputs);

        assert_eq!(results.deferral_scenarios.len(), 15);
        for pair in results.deferral_scenarios.windows(2) {
            assert!(pair[1].retirement_age > pair[0].retirement_age);
            assert!(pair[1].nominal_pension >= pair[0].nominal_pension);
        }
    }
}

fn with_programs(mut inputs: SimulationInputs) -> SimulationInputs {
    inputs.programs = Some(RetirementPrograms {
        employee_plan: true,
        individual_account: true,
    });
    inputs
}

#[test]
fn test_years_needed_consistent_with_scenarios() {
    for start in [baseline(), with_programs(baseline())] {
        let base = project(&start);

        for bump in [100.0, 400.0, 1_000.0, 2_500.0] {
            let expected = base.nominal_pension + bump;
            let mut inputs = start.clone();
            inputs.expected_pension = Some(expected);
            let results = project(&inputs);
            let scenarios = &results.deferral_scenarios;

            match results.years_needed {
                Some(0) => panic!("target above the base pension cannot already be met"),
                Some(k) => {
                    let k = k as usize;
                    assert!(scenarios[k - 1].nominal_pension >= expected);
                    if k > 1 {
                        assert!(scenarios[k - 2].nominal_pension < expected);
                    }
                }
                None => assert!(scenarios.iter().all(|s| s.nominal_pension < expected)),
            }
        }
    }
}

#[test]
fn test_years_needed_zero_when_already_met() {
    for start in [baseline(), with_programs(baseline())] {
        let base = project(&start);
        let mut inputs = start;
        inputs.expected_pension = Some(base.nominal_pension - 1.0);

        let results = project(&inputs);
        assert_eq!(results.years_needed, Some(0));
        assert!(results.expected_gap.unwrap() < 0.0);
    }
}

#[test]
fn test_deferral_scenarios_never_below_reported_pension() {
    let results = project(&with_programs(baseline()));

    assert!(results.programs.monthly_pension > 0.0);
    for scenario in &results.deferral_scenarios {
        assert!(scenario.nominal_pension >= results.nominal_pension);
        assert!(scenario.increase >= 0.0);
        assert!(scenario.increase_pct.unwrap() >= 0.0);
    }
}

#[test]
fn test_years_needed_unreachable() {
    let base = project(&baseline());
    let best = base
        .deferral_scenarios
        .iter()
        .map(|s| s.nominal_pension)
        .fold(base.nominal_pension, f64::max);

    let mut inputs = baseline();
    inputs.expected_pension = Some(best * 10.0);
    assert_eq!(project(&inputs).years_needed, None);
}

#[test]
fn test_real_value_noop_for_past_retirement() {
    let cpi = Assumptions::default_tables().cpi;
    assert_eq!(real_value(1234.5, 2020, CURRENT_YEAR, &cpi, 0.025), 1234.5);
    assert_eq!(real_value(1234.5, CURRENT_YEAR, CURRENT_YEAR, &cpi, 0.025), 1234.5);
}

#[test]
fn test_replacement_rate_boundary() {
    assert_eq!(replacement_rate(5_000.0, 5_000.0), Some(100.0));
}

#[test]
fn test_json_month_out_of_range_rejected() {
    for (start_month, end_month) in [(13, 12), (1, 0)] {
        let json = format!(
            r#"{{"type": "employment", "start": {{"year": 2015, "month": {}}}, "end": {{"year": 2060, "month": {}}},
                "monthly_gross": 7000.0, "contract_type": "uop"}}"#,
            start_month, end_month
        );
        assert!(serde_json::from_str::<TimelineItem>(&json).is_err());
    }
}

#[test]
fn test_json_inputs_with_tagged_career() {
    let json = r#"{
        "age": 30,
        "sex": "female",
        "monthly_gross": 7000.0,
        "work_start_year": 2015,
        "work_end_year": 2060,
        "contract_type": "uop",
        "career": [
            {"type": "employment", "start": {"year": 2015, "month": 1}, "end": {"year": 2060, "month": 12},
             "monthly_gross": 7000.0, "contract_type": "uop"},
            {"type": "gap", "kind": "unpaid_leave", "start": {"year": 2030, "month": 1}, "duration_months": 12}
        ]
    }"#;
    let inputs: SimulationInputs = serde_json::from_str(json).unwrap();

    assert_eq!(project(&inputs), project(&with_gap(12)));
}
