//! Year-indexed multiplier tables (valorization, CPI, wage growth)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PensionError, Result};

/// Annual multipliers keyed by calendar year, e.g. 1.035 for 3.5% growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRateTable {
    name: &'static str,
    rates: BTreeMap<i32, f64>,
}

impl YearRateTable {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rates: BTreeMap::new(),
        }
    }

    pub fn from_pairs(name: &'static str, pairs: impl IntoIterator<Item = (i32, f64)>) -> Self {
        Self {
            name,
            rates: pairs.into_iter().collect(),
        }
    }

    /// Every year in `years` gets the same multiplier
    pub fn flat(name: &'static str, years: std::ops::RangeInclusive<i32>, rate: f64) -> Self {
        Self::from_pairs(name, years.map(|year| (year, rate)))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn insert(&mut self, year: i32, rate: f64) {
        self.rates.insert(year, rate);
    }

    pub fn get(&self, year: i32) -> Option<f64> {
        self.rates.get(&year).copied()
    }

    /// Multiplier for `year`, or a missing-entry error naming the table
    pub fn require(&self, year: i32) -> Result<f64> {
        self.get(year).ok_or_else(|| PensionError::missing(self.name, year))
    }

    pub fn min_year(&self) -> Option<i32> {
        self.rates.keys().next().copied()
    }

    pub fn max_year(&self) -> Option<i32> {
        self.rates.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.rates.iter().map(|(&year, &rate)| (year, rate))
    }

    /// Compounded multiplier over the years `(from_exclusive, to_inclusive]`.
    ///
    /// Table values are used up to the largest year key; any year after it,
    /// or missing inside the covered range, compounds at `1 + default_rate`.
    pub fn cumulative(&self, from_exclusive: i32, to_inclusive: i32, default_rate: f64) -> f64 {
        let last_known = self.max_year().unwrap_or(i32::MIN);
        ((from_exclusive + 1)..=to_inclusive)
            .map(|year| {
                if year > last_known {
                    1.0 + default_rate
                } else {
                    self.get(year).unwrap_or(1.0 + default_rate)
                }
            })
            .product()
    }

    /// Add entries for years not already present; returns how many were added
    pub fn extend_missing(&mut self, pairs: impl IntoIterator<Item = (i32, f64)>) -> usize {
        let mut added = 0;
        for (year, rate) in pairs {
            if let std::collections::btree_map::Entry::Vacant(slot) = self.rates.entry(year) {
                slot.insert(rate);
                added += 1;
            }
        }
        added
    }
}
