//! Statistics Calculator Module
//! Descriptive statistics, grouped summaries, pivots and cross-tabulations.

use polars::prelude::*;
use rayon::prelude::*;
use std::collections::BTreeMap;

use crate::data::{f64_values, ordered_groups, str_values};

/// Descriptive statistics for one group of values.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub group: String,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub q3: f64,
}

impl Default for GroupSummary {
    fn default() -> Self {
        Self {
            group: String::new(),
            count: 0,
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
            q1: f64::NAN,
            q3: f64::NAN,
        }
    }
}

/// Mean/median pivot over several metrics, one row per group.
#[derive(Debug, Clone)]
pub struct PivotTable {
    pub metrics: Vec<String>,
    pub rows: Vec<PivotRow>,
}

#[derive(Debug, Clone)]
pub struct PivotRow {
    pub group: String,
    pub means: Vec<f64>,
    pub medians: Vec<f64>,
}

/// Row-normalized percentage cross-tabulation with a Total column.
#[derive(Debug, Clone)]
pub struct CrossTab {
    pub row_dimension: String,
    pub col_labels: Vec<String>,
    pub rows: Vec<CrossTabRow>,
}

#[derive(Debug, Clone)]
pub struct CrossTabRow {
    pub label: String,
    pub shares: Vec<f64>,
    pub total: f64,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn summarize(values: &[f64]) -> GroupSummary {
        let n = values.len();
        if n == 0 {
            return GroupSummary::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        GroupSummary {
            group: String::new(),
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
            q1: Self::percentile(&sorted, 25.0),
            q3: Self::percentile(&sorted, 75.0),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Collect a numeric column keyed by a categorical one. Missing entries
    /// on either side are skipped.
    pub fn group_values(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
    ) -> PolarsResult<BTreeMap<String, Vec<f64>>> {
        let groups = str_values(df, group_col)?;
        let values = f64_values(df, value_col)?;

        let mut by_group: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for (group, value) in groups.into_iter().zip(values) {
            if let (Some(group), Some(value)) = (group, value) {
                if !value.is_nan() {
                    by_group.entry(group).or_default().push(value);
                }
            }
        }
        Ok(by_group)
    }

    /// Frequency of each category, in fixed group order.
    pub fn counts_by(df: &DataFrame, column: &str) -> PolarsResult<Vec<(String, usize)>> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for value in str_values(df, column)?.into_iter().flatten() {
            *counts.entry(value).or_default() += 1;
        }
        let labels: Vec<String> = counts.keys().cloned().collect();
        Ok(ordered_groups(&labels)
            .into_iter()
            .map(|label| {
                let count = counts[&label];
                (label, count)
            })
            .collect())
    }

    /// Per-group descriptive statistics for one metric, in fixed group order.
    pub fn summarize_by_group(
        df: &DataFrame,
        group_col: &str,
        value_col: &str,
    ) -> PolarsResult<Vec<GroupSummary>> {
        let by_group = Self::group_values(df, group_col, value_col)?;
        let labels: Vec<String> = by_group.keys().cloned().collect();
        Ok(ordered_groups(&labels)
            .into_iter()
            .map(|group| {
                let mut summary = Self::summarize(&by_group[&group]);
                summary.group = group;
                summary
            })
            .collect())
    }

    /// Per-group statistics for many metrics, fanned out with rayon.
    /// Result order follows the metric list, so output is deterministic.
    pub fn summarize_metrics_parallel(
        df: &DataFrame,
        group_col: &str,
        metrics: &[&str],
    ) -> PolarsResult<Vec<(String, Vec<GroupSummary>)>> {
        let mut extracted: Vec<(String, BTreeMap<String, Vec<f64>>)> = Vec::new();
        for &metric in metrics {
            extracted.push((metric.to_string(), Self::group_values(df, group_col, metric)?));
        }

        Ok(extracted
            .into_par_iter()
            .map(|(metric, by_group)| {
                let labels: Vec<String> = by_group.keys().cloned().collect();
                let summaries = ordered_groups(&labels)
                    .into_iter()
                    .map(|group| {
                        let mut summary = Self::summarize(&by_group[&group]);
                        summary.group = group;
                        summary
                    })
                    .collect();
                (metric, summaries)
            })
            .collect())
    }

    /// Group means for several metrics: one row per group, one value per
    /// metric, in fixed group order.
    pub fn mean_by_group(
        df: &DataFrame,
        group_col: &str,
        value_cols: &[&str],
    ) -> PolarsResult<Vec<(String, Vec<f64>)>> {
        let mut per_metric: Vec<BTreeMap<String, Vec<f64>>> = Vec::new();
        for &value_col in value_cols {
            per_metric.push(Self::group_values(df, group_col, value_col)?);
        }

        let mut labels: Vec<String> = Vec::new();
        for by_group in &per_metric {
            labels.extend(by_group.keys().cloned());
        }

        Ok(ordered_groups(&labels)
            .into_iter()
            .map(|group| {
                let means = per_metric
                    .iter()
                    .map(|by_group| {
                        by_group
                            .get(&group)
                            .filter(|v| !v.is_empty())
                            .map(|v| v.iter().sum::<f64>() / v.len() as f64)
                            .unwrap_or(f64::NAN)
                    })
                    .collect();
                (group, means)
            })
            .collect())
    }

    /// Mean and median per group for several metrics.
    pub fn mean_median_pivot(
        df: &DataFrame,
        group_col: &str,
        value_cols: &[&str],
    ) -> PolarsResult<PivotTable> {
        let mut per_metric: Vec<BTreeMap<String, Vec<f64>>> = Vec::new();
        for &value_col in value_cols {
            per_metric.push(Self::group_values(df, group_col, value_col)?);
        }

        let mut labels: Vec<String> = Vec::new();
        for by_group in &per_metric {
            labels.extend(by_group.keys().cloned());
        }

        let rows = ordered_groups(&labels)
            .into_iter()
            .map(|group| {
                let mut means = Vec::new();
                let mut medians = Vec::new();
                for by_group in &per_metric {
                    match by_group.get(&group) {
                        Some(values) if !values.is_empty() => {
                            let summary = Self::summarize(values);
                            means.push(summary.mean);
                            medians.push(summary.median);
                        }
                        _ => {
                            means.push(f64::NAN);
                            medians.push(f64::NAN);
                        }
                    }
                }
                PivotRow { group, means, medians }
            })
            .collect();

        Ok(PivotTable {
            metrics: value_cols.iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }

    /// Row-normalized percentage cross-tab: within each row category, the
    /// percentage split across column categories, plus a Total column.
    pub fn crosstab_percent(
        df: &DataFrame,
        row_col: &str,
        col_col: &str,
        row_order: &[&str],
    ) -> PolarsResult<CrossTab> {
        let rows = str_values(df, row_col)?;
        let cols = str_values(df, col_col)?;

        let mut counts: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for (row, col) in rows.into_iter().zip(cols) {
            if let (Some(row), Some(col)) = (row, col) {
                *counts.entry(row).or_default().entry(col).or_default() += 1;
            }
        }

        let mut col_labels: Vec<String> = Vec::new();
        for per_row in counts.values() {
            col_labels.extend(per_row.keys().cloned());
        }
        let col_labels = ordered_groups(&col_labels);

        let mut ordered_rows: Vec<String> = row_order
            .iter()
            .filter(|r| counts.contains_key(**r))
            .map(|r| r.to_string())
            .collect();
        for label in counts.keys() {
            if !ordered_rows.contains(label) {
                ordered_rows.push(label.clone());
            }
        }

        let table_rows = ordered_rows
            .into_iter()
            .map(|label| {
                let per_row = &counts[&label];
                let row_total: usize = per_row.values().sum();
                let shares: Vec<f64> = col_labels
                    .iter()
                    .map(|col| {
                        let count = per_row.get(col).copied().unwrap_or(0);
                        round2(count as f64 / row_total as f64 * 100.0)
                    })
                    .collect();
                let total = shares.iter().sum();
                CrossTabRow { label, shares, total }
            })
            .collect();

        Ok(CrossTab {
            row_dimension: row_col.to_string(),
            col_labels,
            rows: table_rows,
        })
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
