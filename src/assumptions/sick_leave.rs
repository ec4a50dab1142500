//! Statistical short-term sick leave by sex

use crate::career::Sex;

/// Average yearly sick leave and the salary reduction it implies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SickLeaveConfig {
    pub avg_days_per_year: f64,
    /// Fraction of the yearly contribution base lost to sick leave
    pub reduction_coefficient: f64,
}

impl SickLeaveConfig {
    /// Sick pay replaces 80% of salary, so 20% of each sick day's pay is lost
    pub fn from_days(avg_days_per_year: f64) -> Self {
        Self {
            avg_days_per_year,
            reduction_coefficient: avg_days_per_year / 365.0 * 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SickLeaveStats {
    pub female: SickLeaveConfig,
    pub male: SickLeaveConfig,
}

impl Default for SickLeaveStats {
    fn default() -> Self {
        Self {
            female: SickLeaveConfig::from_days(16.3),
            male: SickLeaveConfig::from_days(11.2),
        }
    }
}

impl SickLeaveStats {
    pub fn for_sex(&self, sex: Sex) -> SickLeaveConfig {
        match sex {
            Sex::Female => self.female,
            Sex::Male => self.male,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficient_from_days() {
        let config = SickLeaveConfig::from_days(36.5);
        assert!((config.reduction_coefficient - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_female_reduction_exceeds_male() {
        let stats = SickLeaveStats::default();
        assert!(stats.for_sex(Sex::Female).reduction_coefficient > stats.for_sex(Sex::Male).reduction_coefficient);
    }
}
