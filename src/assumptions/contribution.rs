//! Contribution rates by contract type and capital-reduction factors for career gaps

use std::collections::HashMap;

use crate::career::{ContractType, GapKind};

/// Pension contribution as a fraction of gross salary
pub const CONTRIBUTION_RATE: f64 = 0.1952;

/// Share of each contribution booked to the main account
pub const MAIN_ACCOUNT_SHARE: f64 = 0.7616;

/// Share of each contribution booked to the sub-account
pub const SUB_ACCOUNT_SHARE: f64 = 0.2384;

/// Fraction of salary still paid during long-term sick leave
pub const SICK_PAY_RETAINED: f64 = 0.7;

/// Self-employed contributions are assessed on a reduced declared base (60%)
const B2B_DECLARED_BASE_SHARE: f64 = 0.6;

/// Contribution rate per contract type
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionRates {
    rates: HashMap<ContractType, f64>,
}

impl Default for ContributionRates {
    fn default() -> Self {
        let mut rates = HashMap::new();
        rates.insert(ContractType::Uop, CONTRIBUTION_RATE);
        rates.insert(ContractType::Mandate, CONTRIBUTION_RATE);
        rates.insert(ContractType::B2b, CONTRIBUTION_RATE * B2B_DECLARED_BASE_SHARE);
        rates.insert(ContractType::SpecificWork, 0.0);
        Self { rates }
    }
}

impl ContributionRates {
    pub fn rate(&self, contract: ContractType) -> f64 {
        self.rates.get(&contract).copied().unwrap_or(0.0)
    }

    pub fn set_rate(&mut self, contract: ContractType, rate: f64) {
        self.rates.insert(contract, rate);
    }
}

/// Share of salary still contributed during each kind of gap
#[derive(Debug, Clone, PartialEq)]
pub struct GapPenalties {
    retained: HashMap<GapKind, f64>,
}

impl Default for GapPenalties {
    fn default() -> Self {
        let mut retained = HashMap::new();
        // Contributions partly continue during parental leave
        retained.insert(GapKind::ParentalLeave, 0.7);
        retained.insert(GapKind::UnpaidLeave, 0.0);
        retained.insert(GapKind::Unemployment, 0.0);
        Self { retained }
    }
}

impl GapPenalties {
    pub fn retained_share(&self, kind: GapKind) -> f64 {
        self.retained.get(&kind).copied().unwrap_or(0.0)
    }

    /// Multiplier for a gap covering `overlap_fraction` of a year:
    /// `1 - f + f * retained`
    pub fn factor(&self, kind: GapKind, overlap_fraction: f64) -> f64 {
        1.0 - overlap_fraction + overlap_fraction * self.retained_share(kind)
    }

    /// Multiplier for long-term sick leave covering `overlap_fraction` of a year
    pub fn sick_leave_factor(overlap_fraction: f64) -> f64 {
        1.0 - overlap_fraction * (1.0 - SICK_PAY_RETAINED)
    }
}
