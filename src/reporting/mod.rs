pub mod aggregator;
pub mod formatter;

pub use aggregator::{aggregate, AssessmentSummary, ControlOutcome};
