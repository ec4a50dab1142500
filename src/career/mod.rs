//! Career data structures and input loading

mod data;
pub mod loader;

pub use data::{
    overlap_months, CareerTimeline, ContractType, EmploymentGapPeriod, EmploymentPeriod, GapKind,
    LifeEvent, LifeEventKind, RetirementPrograms, Sex, SimulationInputs, TimelineItem, YearMonth,
};
pub use loader::{load_batch, load_batch_from_reader, load_inputs, load_timeline, load_timeline_from_reader};
