//! Annuitization of capital into a monthly pension, inflation adjustment and
//! the ratio helpers reported alongside it

use log::warn;

use crate::assumptions::{LifeExpectancyTable, YearRateTable};
use crate::career::Sex;
use crate::error::Result;

/// Default annual inflation assumed beyond the last CPI table year
pub const DEFAULT_INFLATION: f64 = 0.025;

/// Nominal monthly pension from total capital at the given retirement age
pub fn monthly_pension(total_capital: f64, retirement_age: u32, sex: Sex, table: &LifeExpectancyTable) -> Result<f64> {
    let divisor = table.divisor(retirement_age, sex)?;
    Ok(total_capital / divisor)
}

/// Express a pension paid in `retirement_year` in `current_year` money.
///
/// CPI multipliers compound over `(current_year, retirement_year]`, taken
/// from the table up to its largest year and at `default_inflation` after.
/// A retirement that is not in the future returns `nominal` unchanged.
pub fn real_value(
    nominal: f64,
    retirement_year: i32,
    current_year: i32,
    cpi: &YearRateTable,
    default_inflation: f64,
) -> f64 {
    if retirement_year <= current_year {
        return nominal;
    }

    if cpi.max_year().map_or(true, |last| last < retirement_year) {
        warn!(
            "CPI table ends at {:?}, assuming {:.1}% inflation through {}",
            cpi.max_year(),
            default_inflation * 100.0,
            retirement_year
        );
    }

    nominal / cpi.cumulative(current_year, retirement_year, default_inflation)
}

/// Round to one decimal place, halves away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Pension as a percentage of the last monthly salary, `None` without a salary
pub fn replacement_rate(pension: f64, last_monthly_salary: f64) -> Option<f64> {
    if last_monthly_salary > 0.0 {
        Some(round1(pension / last_monthly_salary * 100.0))
    } else {
        None
    }
}

/// Relative change of `value` against `base` in percent, `None` for a zero base
pub fn percent_change(value: f64, base: f64) -> Option<f64> {
    if base == 0.0 || !base.is_finite() {
        None
    } else {
        Some((value - base) / base * 100.0)
    }
}
