//! Data module - CSV loading, cleaning and merging

mod cleaner;
mod loader;
mod merger;

pub use cleaner::{CleanError, CleanSummary, DataCleaner};
pub use loader::{DataLoader, LoadError, SchemaError};
pub use merger::{merge_work_type_profiles, MergeError};

use polars::prelude::*;

/// Fixed display order for the work-setting category.
pub const WORK_TYPE_ORDER: [&str; 3] = ["Remote", "Hybrid", "Onsite"];

/// Extract a column as `Option<f64>` per row, casting numerics as needed.
pub fn f64_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let casted = df.column(name)?.cast(&DataType::Float64)?;
    let ca = casted.f64()?;
    Ok(ca.into_iter().collect())
}

/// Extract a column as `Option<String>` per row.
pub fn str_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let col = df.column(name)?;
    (0..col.len())
        .map(|i| {
            let val = col.get(i)?;
            if val.is_null() {
                Ok(None)
            } else {
                Ok(Some(val.to_string().trim_matches('"').to_string()))
            }
        })
        .collect()
}

/// Sort group labels into the fixed work-type order, anything else after,
/// alphabetically. Keeps every aggregate output deterministic.
pub fn ordered_groups(groups: &[String]) -> Vec<String> {
    let mut sorted: Vec<String> = groups.to_vec();
    sorted.sort_by_key(|g| {
        let rank = WORK_TYPE_ORDER
            .iter()
            .position(|w| w == g)
            .unwrap_or(WORK_TYPE_ORDER.len());
        (rank, g.clone())
    });
    sorted.dedup();
    sorted
}
