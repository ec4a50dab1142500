//! Minimum additional working years needed to reach a target pension

use log::debug;

use super::deferral::DeferralBasis;
use crate::assumptions::LifeExpectancyTable;
use crate::error::Result;

/// Search offsets `1..=max_years` for the first whose pension reaches `expected`.
///
/// Returns `Some(0)` when the base pension already meets the target and
/// `None` when no offset inside the horizon does.
pub fn years_needed(
    expected_pension: f64,
    basis: &DeferralBasis,
    table: &LifeExpectancyTable,
    max_years: u32,
) -> Result<Option<u32>> {
    if basis.base_pension >= expected_pension {
        return Ok(Some(0));
    }

    for years in 1..=max_years {
        let deferred = basis.pension_after(years, table)?;
        if deferred.nominal_pension >= expected_pension {
            debug!(
                "Target {:.2} reached after {} additional years ({:.2})",
                expected_pension, years, deferred.nominal_pension
            );
            return Ok(Some(years));
        }
    }

    debug!(
        "Target {:.2} not reachable within {} additional years",
        expected_pension, max_years
    );
    Ok(None)
}
