//! Dataset Merger Module
//! Joins the two cleaned datasets on their shared `work_type` key.
//!
//! The surveys have no common respondent id, so the join happens at the
//! group level: one mean profile per work setting from each dataset,
//! inner-joined into a single combined row per work setting.

use polars::prelude::*;
use thiserror::Error;

use crate::stats::StatsCalculator;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("No '{0}' groups to merge on")]
    EmptyProfile(String),
}

/// Per-work-type means of selected columns, as a small DataFrame with a
/// `work_type` key and one `mean_<col>` column per input.
pub fn mean_profile(df: &DataFrame, columns: &[&str]) -> Result<DataFrame, MergeError> {
    let rows = StatsCalculator::mean_by_group(df, "work_type", columns)?;
    if rows.is_empty() {
        return Err(MergeError::EmptyProfile("work_type".to_string()));
    }

    let labels: Vec<String> = rows.iter().map(|(g, _)| g.clone()).collect();
    let mut out: Vec<Column> = vec![Column::new("work_type".into(), labels)];
    for (idx, name) in columns.iter().enumerate() {
        let means: Vec<f64> = rows.iter().map(|(_, m)| m[idx]).collect();
        out.push(Column::new(format!("mean_{name}").into(), means));
    }
    Ok(DataFrame::new(out)?)
}

/// Merge per-work-type profiles from the productivity and mental-health
/// datasets. Work settings present in only one dataset are dropped by the
/// inner join.
pub fn merge_work_type_profiles(
    productivity: &DataFrame,
    mental_health: &DataFrame,
    productivity_cols: &[&str],
    mental_health_cols: &[&str],
) -> Result<DataFrame, MergeError> {
    let left = mean_profile(productivity, productivity_cols)?;
    let right = mean_profile(mental_health, mental_health_cols)?;

    let merged = left
        .lazy()
        .join(
            right.lazy(),
            [col("work_type")],
            [col("work_type")],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()?;

    Ok(merged)
}
