//! Statistics module - descriptive stats, correlations and quality checks

mod calculator;
mod correlation;
mod quality;

pub use calculator::{
    CrossTab, CrossTabRow, GroupSummary, PivotRow, PivotTable, StatsCalculator,
};
pub use correlation::{correlation_matrix, CorrelationMatrix, SIGNIFICANCE_THRESHOLD};
pub use quality::{assess_dataset, QualityNote};
