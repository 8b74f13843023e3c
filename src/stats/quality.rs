//! Data Quality Module
//! Non-fatal quality findings: near-constant columns and flat group means.
//!
//! These surface the synthetic/low-variance character of the survey data as
//! warnings and report content, never as errors.

use log::warn;
use polars::prelude::*;

use super::StatsCalculator;

/// Relative variance below which a column counts as near-constant.
const MIN_COEFFICIENT_OF_VARIATION: f64 = 0.02;

/// Group-mean spread (relative to overall std) below which groups count as
/// indistinguishable.
const MIN_GROUP_SPREAD_RATIO: f64 = 0.05;

/// One non-fatal data-quality finding.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityNote {
    pub dataset: String,
    pub subject: String,
    pub message: String,
}

impl QualityNote {
    pub fn headline(&self) -> String {
        format!("[{}] {}: {}", self.dataset, self.subject, self.message)
    }
}

/// Scan numeric columns of a cleaned dataset for low-variance signals.
pub fn assess_dataset(
    dataset: &str,
    df: &DataFrame,
    numeric_cols: &[&str],
    group_col: &str,
) -> PolarsResult<Vec<QualityNote>> {
    let mut notes = Vec::new();

    for &column in numeric_cols {
        let summaries = StatsCalculator::summarize_by_group(df, group_col, column)?;
        let by_group = StatsCalculator::group_values(df, group_col, column)?;
        let values: Vec<f64> = by_group.values().flatten().copied().collect();
        if values.len() < 2 {
            continue;
        }
        let overall = StatsCalculator::summarize(&values);

        if overall.mean.abs() > f64::EPSILON
            && overall.std / overall.mean.abs() < MIN_COEFFICIENT_OF_VARIATION
        {
            notes.push(QualityNote {
                dataset: dataset.to_string(),
                subject: column.to_string(),
                message: "variance is near zero across all respondents".to_string(),
            });
        }

        if summaries.len() > 1 && overall.std > 0.0 {
            let means: Vec<f64> = summaries.iter().map(|s| s.mean).collect();
            let spread = means.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
                - means.iter().cloned().fold(f64::INFINITY, f64::min);
            if spread < MIN_GROUP_SPREAD_RATIO * overall.std {
                notes.push(QualityNote {
                    dataset: dataset.to_string(),
                    subject: column.to_string(),
                    message: format!(
                        "group means differ by only {:.3} across {}; synthetic/low-variance signal",
                        spread, group_col
                    ),
                });
            }
        }
    }

    for note in &notes {
        warn!("{}", note.headline());
    }
    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_constant_column_is_flagged() {
        let df = DataFrame::new(vec![
            Column::new("work_type".into(), vec!["Remote", "Remote", "Onsite", "Onsite"]),
            Column::new("flat".into(), vec![5.0, 5.0, 5.0001, 5.0]),
        ])
        .unwrap();
        let notes = assess_dataset("test", &df, &["flat"], "work_type").unwrap();
        assert!(notes.iter().any(|n| n.subject == "flat"
            && n.message.contains("variance is near zero")));
    }

    #[test]
    fn flat_group_means_are_flagged() {
        // Wide within-group spread, near-identical group means
        let df = DataFrame::new(vec![
            Column::new(
                "work_type".into(),
                vec!["Remote", "Remote", "Onsite", "Onsite"],
            ),
            Column::new("score".into(), vec![1.0, 9.0, 1.001, 9.001]),
        ])
        .unwrap();
        let notes = assess_dataset("test", &df, &["score"], "work_type").unwrap();
        assert!(notes
            .iter()
            .any(|n| n.subject == "score" && n.message.contains("group means")));
    }

    #[test]
    fn varied_data_produces_no_notes() {
        let df = DataFrame::new(vec![
            Column::new(
                "work_type".into(),
                vec!["Remote", "Remote", "Onsite", "Onsite"],
            ),
            Column::new("score".into(), vec![1.0, 2.0, 7.0, 9.0]),
        ])
        .unwrap();
        let notes = assess_dataset("test", &df, &["score"], "work_type").unwrap();
        assert!(notes.is_empty());
    }
}
