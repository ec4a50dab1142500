//! Career data structures supplied by the calling layer

use serde::{Deserialize, Serialize};

use crate::error::{PensionError, Result};

/// Sex of the insured person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    /// Parse the single-letter or full-word code used in input files
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "f" | "female" => Ok(Sex::Female),
            "m" | "male" => Ok(Sex::Male),
            other => Err(PensionError::invalid("sex", format!("unknown code: {}", other))),
        }
    }
}

/// Employment contract category, drives the contribution rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Employment contract (UOP)
    Uop,
    /// Mandate contract
    Mandate,
    /// Self-employment / business-to-business
    B2b,
    /// Contract for specific work, no pension contributions
    SpecificWork,
}

impl ContractType {
    pub const ALL: [ContractType; 4] = [
        ContractType::Uop,
        ContractType::Mandate,
        ContractType::B2b,
        ContractType::SpecificWork,
    ];

    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "uop" => Ok(ContractType::Uop),
            "mandate" | "uz" => Ok(ContractType::Mandate),
            "b2b" => Ok(ContractType::B2b),
            "specific_work" | "uod" => Ok(ContractType::SpecificWork),
            other => Err(PensionError::invalid(
                "contract_type",
                format!("unknown code: {}", other),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractType::Uop => "uop",
            ContractType::Mandate => "mandate",
            ContractType::B2b => "b2b",
            ContractType::SpecificWork => "specific_work",
        }
    }
}

/// Kind of career interruption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    ParentalLeave,
    UnpaidLeave,
    Unemployment,
}

impl GapKind {
    pub fn from_code(code: &str) -> Result<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "parental_leave" | "maternity_leave" => Ok(GapKind::ParentalLeave),
            "unpaid_leave" => Ok(GapKind::UnpaidLeave),
            "unemployment" => Ok(GapKind::Unemployment),
            other => Err(PensionError::invalid("gap_kind", format!("unknown code: {}", other))),
        }
    }
}

/// Calendar month, compared at month granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawYearMonth")]
pub struct YearMonth {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

/// Unchecked wire form; deserialization goes through `YearMonth::new`
#[derive(Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = PensionError;

    fn try_from(raw: RawYearMonth) -> Result<Self> {
        YearMonth::new(raw.year, raw.month)
    }
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(PensionError::invalid("month", format!("{} is outside 1..=12", month)));
        }
        Ok(Self { year, month })
    }

    /// Months since year 0, January
    pub fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn from_index(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn plus_months(&self, months: i64) -> Self {
        Self::from_index(self.index() + months)
    }
}

/// Months of the inclusive span `[start, end]` falling inside `year`, in 0..=12
pub fn overlap_months(start: YearMonth, end: YearMonth, year: i32) -> u32 {
    let year_start = year as i64 * 12;
    let year_end = year_start + 11;
    let overlap = end.index().min(year_end) - start.index().max(year_start) + 1;
    overlap.clamp(0, 12) as u32
}

/// A contiguous span of paid employment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentPeriod {
    pub start: YearMonth,
    pub end: YearMonth,
    /// Monthly gross salary in the first year of the period
    pub monthly_gross: f64,
    pub contract_type: ContractType,
    /// Yearly raise in percent, compounded from the start year
    #[serde(default)]
    pub annual_raise_pct: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EmploymentPeriod {
    pub fn new(start: YearMonth, end: YearMonth, monthly_gross: f64, contract_type: ContractType) -> Self {
        Self {
            start,
            end,
            monthly_gross,
            contract_type,
            annual_raise_pct: None,
            description: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(PensionError::invalid(
                "employment_period",
                format!(
                    "end {}-{:02} precedes start {}-{:02}",
                    self.end.year, self.end.month, self.start.year, self.start.month
                ),
            ));
        }
        if !self.monthly_gross.is_finite() || self.monthly_gross < 0.0 {
            return Err(PensionError::invalid(
                "monthly_gross",
                format!("{} is not a non-negative amount", self.monthly_gross),
            ));
        }
        Ok(())
    }

    pub fn overlap_months(&self, year: i32) -> u32 {
        overlap_months(self.start, self.end, year)
    }

    /// Nominal monthly salary paid in `year`, raise compounded per full year since start
    pub fn monthly_salary_in(&self, year: i32) -> f64 {
        match self.annual_raise_pct {
            Some(pct) if year > self.start.year => {
                self.monthly_gross * (1.0 + pct / 100.0).powi(year - self.start.year)
            }
            _ => self.monthly_gross,
        }
    }
}

/// A career interruption starting at `start` and lasting `duration_months`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentGapPeriod {
    pub kind: GapKind,
    pub start: YearMonth,
    pub duration_months: u32,
}

impl EmploymentGapPeriod {
    pub fn new(kind: GapKind, start: YearMonth, duration_months: u32) -> Self {
        Self {
            kind,
            start,
            duration_months,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration_months == 0 {
            return Err(PensionError::invalid("duration_months", "a gap lasts at least one month"));
        }
        Ok(())
    }

    /// Last month covered by the gap
    pub fn end(&self) -> YearMonth {
        self.start.plus_months(self.duration_months as i64 - 1)
    }

    pub fn overlap_months(&self, year: i32) -> u32 {
        overlap_months(self.start, self.end(), year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEventKind {
    /// Long-term sick leave, paid at a reduced base
    SickLeave,
}

/// A discrete health-related interruption lasting a (fractional) number of years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeEvent {
    pub kind: LifeEventKind,
    pub start: YearMonth,
    pub duration_years: f64,
}

impl LifeEvent {
    pub fn sick_leave(start: YearMonth, duration_years: f64) -> Self {
        Self {
            kind: LifeEventKind::SickLeave,
            start,
            duration_years,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.duration_years > 0.0 && self.duration_years <= 3.0) {
            return Err(PensionError::invalid(
                "duration_years",
                format!("{} is outside (0, 3]", self.duration_years),
            ));
        }
        Ok(())
    }

    pub fn duration_months(&self) -> u32 {
        (self.duration_years * 12.0).round().max(1.0) as u32
    }

    pub fn end(&self) -> YearMonth {
        self.start.plus_months(self.duration_months() as i64 - 1)
    }

    pub fn overlap_months(&self, year: i32) -> u32 {
        overlap_months(self.start, self.end(), year)
    }
}

/// One user-edited timeline entry, discriminated by its `type` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineItem {
    Employment(EmploymentPeriod),
    Gap(EmploymentGapPeriod),
    Event(LifeEvent),
}

/// Employment history with its interruptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerTimeline {
    pub periods: Vec<EmploymentPeriod>,
    pub gaps: Vec<EmploymentGapPeriod>,
    pub events: Vec<LifeEvent>,
}

impl CareerTimeline {
    /// Split tagged items into their collections, preserving input order
    pub fn from_items(items: impl IntoIterator<Item = TimelineItem>) -> Self {
        let mut timeline = Self::default();
        for item in items {
            match item {
                TimelineItem::Employment(period) => timeline.periods.push(period),
                TimelineItem::Gap(gap) => timeline.gaps.push(gap),
                TimelineItem::Event(event) => timeline.events.push(event),
            }
        }
        timeline
    }

    /// Single employment period spanning the declared work years
    pub fn synthesize(inputs: &SimulationInputs) -> Result<Self> {
        let period = EmploymentPeriod::new(
            YearMonth::new(inputs.work_start_year, 1)?,
            YearMonth::new(inputs.work_end_year, 12)?,
            inputs.monthly_gross,
            inputs.contract_type,
        );
        Ok(Self {
            periods: vec![period],
            gaps: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.periods.iter().try_for_each(EmploymentPeriod::validate)?;
        self.gaps.iter().try_for_each(EmploymentGapPeriod::validate)?;
        self.events.iter().try_for_each(LifeEvent::validate)
    }

    pub fn first_year(&self) -> Option<i32> {
        self.periods.iter().map(|p| p.start.year).min()
    }

    pub fn last_year(&self) -> Option<i32> {
        self.periods.iter().map(|p| p.end.year).max()
    }

    /// First period in input order with at least one month inside `year`
    pub fn period_for_year(&self, year: i32) -> Option<&EmploymentPeriod> {
        self.periods.iter().find(|p| p.overlap_months(year) > 0)
    }
}

/// Optional supplementary savings programs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetirementPrograms {
    /// Employer-sponsored capital plan
    #[serde(default)]
    pub employee_plan: bool,
    /// Individual retirement account
    #[serde(default)]
    pub individual_account: bool,
}

/// Snapshot of everything the engine needs for one projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    pub age: u32,
    pub sex: Sex,
    /// Current monthly gross salary
    pub monthly_gross: f64,
    pub work_start_year: i32,
    pub work_end_year: i32,
    #[serde(default)]
    pub main_account_balance: Option<f64>,
    #[serde(default)]
    pub sub_account_balance: Option<f64>,
    #[serde(default)]
    pub include_sick_leave: bool,
    pub contract_type: ContractType,
    #[serde(default)]
    pub programs: Option<RetirementPrograms>,
    /// Target monthly pension for the years-needed search
    #[serde(default)]
    pub expected_pension: Option<f64>,
    /// Detailed timeline overriding the single synthesized period
    #[serde(default)]
    pub career: Option<Vec<TimelineItem>>,
}

impl SimulationInputs {
    pub fn new(age: u32, sex: Sex, monthly_gross: f64, work_start_year: i32, work_end_year: i32) -> Self {
        Self {
            age,
            sex,
            monthly_gross,
            work_start_year,
            work_end_year,
            main_account_balance: None,
            sub_account_balance: None,
            include_sick_leave: false,
            contract_type: ContractType::Uop,
            programs: None,
            expected_pension: None,
            career: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.work_end_year < self.work_start_year {
            return Err(PensionError::invalid(
                "work_end_year",
                format!("{} precedes work start {}", self.work_end_year, self.work_start_year),
            ));
        }
        if !self.monthly_gross.is_finite() || self.monthly_gross < 0.0 {
            return Err(PensionError::invalid(
                "monthly_gross",
                format!("{} is not a non-negative amount", self.monthly_gross),
            ));
        }
        for (field, balance) in [
            ("main_account_balance", self.main_account_balance),
            ("sub_account_balance", self.sub_account_balance),
        ] {
            if let Some(value) = balance {
                if !value.is_finite() || value < 0.0 {
                    return Err(PensionError::invalid(field, format!("{} is not a non-negative amount", value)));
                }
            }
        }
        Ok(())
    }

    /// Timeline to project: the override when present, otherwise one synthesized period
    pub fn timeline(&self) -> Result<CareerTimeline> {
        let timeline = match &self.career {
            Some(items) if !items.is_empty() => CareerTimeline::from_items(items.iter().cloned()),
            _ => CareerTimeline::synthesize(self)?,
        };
        timeline.validate()?;
        Ok(timeline)
    }

    pub fn programs(&self) -> RetirementPrograms {
        self.programs.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn test_overlap_months_clamped_to_year() {
        // Span Jul 2020 - Mar 2022
        let (start, end) = (ym(2020, 7), ym(2022, 3));
        assert_eq!(overlap_months(start, end, 2019), 0);
        assert_eq!(overlap_months(start, end, 2020), 6);
        assert_eq!(overlap_months(start, end, 2021), 12);
        assert_eq!(overlap_months(start, end, 2022), 3);
        assert_eq!(overlap_months(start, end, 2023), 0);
    }

    #[test]
    fn test_gap_end_crosses_year() {
        let gap = EmploymentGapPeriod::new(GapKind::UnpaidLeave, ym(2020, 11), 4);
        assert_eq!(gap.end(), ym(2021, 2));
        assert_eq!(gap.overlap_months(2020), 2);
        assert_eq!(gap.overlap_months(2021), 2);
    }

    #[test]
    fn test_sick_leave_duration_in_months() {
        let event = LifeEvent::sick_leave(ym(2030, 1), 1.5);
        assert_eq!(event.duration_months(), 18);
        assert_eq!(event.overlap_months(2030), 12);
        assert_eq!(event.overlap_months(2031), 6);
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(YearMonth::new(2020, 0).is_err());
        assert!(YearMonth::new(2020, 13).is_err());
    }

    #[test]
    fn test_invalid_month_rejected_from_json() {
        assert!(serde_json::from_str::<YearMonth>(r#"{"year": 2020, "month": 13}"#).is_err());
        assert!(serde_json::from_str::<YearMonth>(r#"{"year": 2020, "month": 0}"#).is_err());
        assert_eq!(
            serde_json::from_str::<YearMonth>(r#"{"year": 2020, "month": 12}"#).unwrap(),
            ym(2020, 12)
        );

        let gap = r#"{"type": "gap", "kind": "unemployment", "start": {"year": 2030, "month": 13}, "duration_months": 6}"#;
        assert!(serde_json::from_str::<TimelineItem>(gap).is_err());
    }

    #[test]
    fn test_period_end_before_start_rejected() {
        let period = EmploymentPeriod::new(ym(2021, 5), ym(2021, 4), 5000.0, ContractType::Uop);
        assert!(period.validate().is_err());
    }

    #[test]
    fn test_zero_length_gap_rejected() {
        let gap = EmploymentGapPeriod::new(GapKind::Unemployment, ym(2021, 5), 0);
        assert!(gap.validate().is_err());
    }

    #[test]
    fn test_raise_compounds_per_year() {
        let mut period = EmploymentPeriod::new(ym(2020, 1), ym(2030, 12), 5000.0, ContractType::Uop);
        period.annual_raise_pct = Some(10.0);
        assert_eq!(period.monthly_salary_in(2020), 5000.0);
        assert!((period.monthly_salary_in(2022) - 6050.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_matching_period_wins() {
        let timeline = CareerTimeline {
            periods: vec![
                EmploymentPeriod::new(ym(2020, 1), ym(2020, 6), 4000.0, ContractType::Uop),
                EmploymentPeriod::new(ym(2020, 7), ym(2021, 12), 9000.0, ContractType::B2b),
            ],
            ..Default::default()
        };
        assert_eq!(timeline.period_for_year(2020).unwrap().monthly_gross, 4000.0);
        assert_eq!(timeline.period_for_year(2021).unwrap().monthly_gross, 9000.0);
        assert!(timeline.period_for_year(2022).is_none());
    }

    #[test]
    fn test_timeline_items_deserialize_by_tag() {
        let json = r#"[
            {"type": "employment", "start": {"year": 2015, "month": 1}, "end": {"year": 2060, "month": 12},
             "monthly_gross": 7000.0, "contract_type": "uop"},
            {"type": "gap", "kind": "unpaid_leave", "start": {"year": 2030, "month": 1}, "duration_months": 12},
            {"type": "event", "kind": "sick_leave", "start": {"year": 2040, "month": 3}, "duration_years": 0.5}
        ]"#;
        let items: Vec<TimelineItem> = serde_json::from_str(json).unwrap();
        let timeline = CareerTimeline::from_items(items);

        assert_eq!(timeline.periods.len(), 1);
        assert_eq!(timeline.gaps[0].kind, GapKind::UnpaidLeave);
        assert_eq!(timeline.events[0].duration_months(), 6);
    }

    #[test]
    fn test_synthesized_timeline_covers_work_years() {
        let inputs = SimulationInputs::new(30, Sex::Female, 7000.0, 2015, 2060);
        let timeline = inputs.timeline().unwrap();

        assert_eq!(timeline.first_year(), Some(2015));
        assert_eq!(timeline.last_year(), Some(2060));
        assert_eq!(timeline.periods[0].contract_type, ContractType::Uop);
    }
}
