//! Per-year salary path derived from the career timeline
//!
//! Each calendar year between the first period start and the last period end
//! gets one entry. The nominal salary comes from the first period (in input
//! order) with any month inside the year; years no period touches are kept
//! as zero-salary years. Gap and sick-leave reductions multiply together.

use serde::{Deserialize, Serialize};

use crate::assumptions::{GapPenalties, SickLeaveConfig};
use crate::career::{CareerTimeline, ContractType};

/// One calendar year of the career
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryPathEntry {
    pub year: i32,
    pub age: u32,
    /// Nominal monthly gross salary
    pub monthly_gross: f64,
    pub annual_gross: f64,
    /// Combined gap / sick-leave multiplier applied to the salary
    pub reduction_factor: f64,
    /// Monthly salary after reductions; this is the contribution base
    pub effective_salary: f64,
    /// Contract of the period that set the salary, `None` in a zero-salary year
    pub contract_type: Option<ContractType>,
}

impl SalaryPathEntry {
    pub fn effective_annual(&self) -> f64 {
        self.effective_salary * 12.0
    }
}

/// Combined reduction multiplier for `year` from gaps and long-term sick leave
pub fn reduction_multiplier(timeline: &CareerTimeline, year: i32, penalties: &GapPenalties) -> f64 {
    let gaps = timeline
        .gaps
        .iter()
        .filter_map(|gap| match gap.overlap_months(year) {
            0 => None,
            months => Some(penalties.factor(gap.kind, months as f64 / 12.0)),
        });

    let sick_leave = timeline
        .events
        .iter()
        .filter_map(|event| match event.overlap_months(year) {
            0 => None,
            months => Some(GapPenalties::sick_leave_factor(months as f64 / 12.0)),
        });

    gaps.chain(sick_leave).product()
}

/// Build the salary path for every year the timeline spans.
///
/// `statistical_sick_leave`, when set, applies its flat reduction coefficient
/// to every year on top of the discrete events.
pub fn build_salary_path(
    timeline: &CareerTimeline,
    birth_year: i32,
    penalties: &GapPenalties,
    statistical_sick_leave: Option<SickLeaveConfig>,
) -> Vec<SalaryPathEntry> {
    let (first_year, last_year) = match (timeline.first_year(), timeline.last_year()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Vec::new(),
    };

    let statistical_factor = statistical_sick_leave
        .map(|config| 1.0 - config.reduction_coefficient)
        .unwrap_or(1.0);

    (first_year..=last_year)
        .map(|year| {
            let period = timeline.period_for_year(year);
            let monthly_gross = period.map(|p| p.monthly_salary_in(year)).unwrap_or(0.0);
            let reduction_factor = reduction_multiplier(timeline, year, penalties) * statistical_factor;

            SalaryPathEntry {
                year,
                age: (year - birth_year).max(0) as u32,
                monthly_gross,
                annual_gross: monthly_gross * 12.0,
                reduction_factor,
                effective_salary: monthly_gross * reduction_factor,
                contract_type: period.map(|p| p.contract_type),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::{EmploymentGapPeriod, EmploymentPeriod, GapKind, LifeEvent, YearMonth};
    use approx::assert_relative_eq;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    fn single_period(start: i32, end: i32, salary: f64) -> CareerTimeline {
        CareerTimeline {
            periods: vec![EmploymentPeriod::new(ym(start, 1), ym(end, 12), salary, ContractType::Uop)],
            ..Default::default()
        }
    }

    #[test]
    fn test_one_entry_per_year_with_age() {
        let path = build_salary_path(&single_period(2015, 2020, 7000.0), 1996, &GapPenalties::default(), None);

        assert_eq!(path.len(), 6);
        assert_eq!(path[0].year, 2015);
        assert_eq!(path[0].age, 19);
        assert_eq!(path[5].year, 2020);
        assert_eq!(path[0].annual_gross, 84_000.0);
        assert_eq!(path[0].effective_salary, 7000.0);
        assert_eq!(path[0].contract_type, Some(ContractType::Uop));
    }

    #[test]
    fn test_unpaid_leave_removes_overlapping_fraction() {
        let mut timeline = single_period(2015, 2020, 6000.0);
        timeline.gaps.push(EmploymentGapPeriod::new(GapKind::UnpaidLeave, ym(2017, 7), 6));

        let path = build_salary_path(&timeline, 1990, &GapPenalties::default(), None);
        let year_2017 = &path[2];
        assert_relative_eq!(year_2017.reduction_factor, 0.5);
        assert_relative_eq!(year_2017.effective_salary, 3000.0);
        // Nominal salary untouched
        assert_eq!(year_2017.monthly_gross, 6000.0);
    }

    #[test]
    fn test_parental_leave_keeps_seventy_percent() {
        let mut timeline = single_period(2015, 2020, 5000.0);
        timeline.gaps.push(EmploymentGapPeriod::new(GapKind::ParentalLeave, ym(2018, 1), 12));

        let path = build_salary_path(&timeline, 1990, &GapPenalties::default(), None);
        assert_relative_eq!(path[3].effective_salary, 3500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_stacked_gaps_multiply() {
        let mut timeline = single_period(2015, 2020, 10_000.0);
        timeline.gaps.push(EmploymentGapPeriod::new(GapKind::ParentalLeave, ym(2016, 1), 6));
        timeline.gaps.push(EmploymentGapPeriod::new(GapKind::Unemployment, ym(2016, 7), 3));
        timeline.events.push(LifeEvent::sick_leave(ym(2016, 10), 0.25));

        let path = build_salary_path(&timeline, 1990, &GapPenalties::default(), None);
        // parental: 1 - 0.5 + 0.5*0.7 = 0.85, unemployment: 0.75, sick: 1 - 0.25*0.3 = 0.925
        let expected = 0.85 * 0.75 * 0.925;
        assert_relative_eq!(path[1].reduction_factor, expected, epsilon = 1e-12);
        assert!(path[1].effective_salary > 0.0);
    }

    #[test]
    fn test_year_without_period_is_zero_salary() {
        let timeline = CareerTimeline {
            periods: vec![
                EmploymentPeriod::new(ym(2010, 1), ym(2011, 12), 4000.0, ContractType::Uop),
                EmploymentPeriod::new(ym(2013, 1), ym(2014, 12), 5000.0, ContractType::Mandate),
            ],
            ..Default::default()
        };

        let path = build_salary_path(&timeline, 1985, &GapPenalties::default(), None);
        assert_eq!(path.len(), 5);
        assert_eq!(path[2].year, 2012);
        assert_eq!(path[2].effective_salary, 0.0);
        assert_eq!(path[2].contract_type, None);
        assert_eq!(path[3].contract_type, Some(ContractType::Mandate));
    }

    #[test]
    fn test_statistical_sick_leave_applies_every_year() {
        let config = SickLeaveConfig {
            avg_days_per_year: 36.5,
            reduction_coefficient: 0.02,
        };
        let path = build_salary_path(&single_period(2015, 2017, 5000.0), 1990, &GapPenalties::default(), Some(config));
        for entry in &path {
            assert_relative_eq!(entry.effective_salary, 4900.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_empty_timeline_has_no_path() {
        let path = build_salary_path(&CareerTimeline::default(), 1990, &GapPenalties::default(), None);
        assert!(path.is_empty());
    }
}
