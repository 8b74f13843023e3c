//! Data Cleaner Module
//! One cleaning pass per dataset: column pruning, population filtering,
//! missing-value resolution and derived columns.
//!
//! The missing-value policy is fixed per column: numeric survey scales get
//! column-mean imputation, `gender` gets mode imputation, and structural
//! categoricals (work type, job role, satisfaction) drop the row instead.

use log::debug;
use polars::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;

use super::loader::SchemaError;
use super::{f64_values, str_values};

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("Column '{0}' has no usable values to impute from")]
    EmptyColumn(String),
    #[error("No rows left in dataset '{0}' after filtering")]
    NoRows(String),
}

/// What one cleaning pass did, for logging and invariant checks.
#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub dataset: String,
    pub rows_in: usize,
    pub rows_out: usize,
    pub imputed: Vec<(String, usize)>,
}

impl CleanSummary {
    pub fn total_imputed(&self) -> usize {
        self.imputed.iter().map(|(_, n)| n).sum()
    }
}

/// Numeric columns carried over from the productivity dataset.
const PRODUCTIVITY_NUMERIC: [&str; 11] = [
    "Age",
    "Years_At_Company",
    "Monthly_Salary",
    "Work_Hours_Per_Week",
    "Projects_Handled",
    "Overtime_Hours",
    "Sick_Days",
    "Training_Hours",
    "Promotions",
    "Employee_Satisfaction_Score",
    "Performance_Score",
];

/// Numeric columns carried over from the mental-health dataset.
const MENTAL_HEALTH_NUMERIC: [&str; 9] = [
    "Age",
    "Years_of_Experience",
    "Hours_Worked_Per_Week",
    "Number_of_Virtual_Meetings",
    "Work_Life_Balance_Rating",
    "Stress_Level",
    "Productivity_Change",
    "Social_Isolation_Rating",
    "Company_Support_for_Remote_Work",
];

/// Tech roles retained from the mental-health survey.
const TECH_ROLES: [&str; 3] = ["Data Scientist", "Software Engineer", "Project Manager"];

/// Handles the per-dataset cleaning passes.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean the employee productivity dataset.
    ///
    /// Keeps IT-department rows whose remote-work frequency is 0, 50 or 100,
    /// maps the frequency onto work-type labels, imputes missing values and
    /// derives a 1-5 `motivation_score` from satisfaction, performance and
    /// the normalized promotion/training factors.
    pub fn clean_productivity(df: &DataFrame) -> Result<(DataFrame, CleanSummary), CleanError> {
        let mut needed = vec!["Department", "Gender", "Remote_Work_Frequency"];
        needed.extend(PRODUCTIVITY_NUMERIC);
        ensure_columns(df, "productivity", &needed)?;

        let department = str_values(df, "Department")?;
        let frequency = f64_values(df, "Remote_Work_Frequency")?;
        let gender = str_values(df, "Gender")?;

        // Analysis population: IT department, frequency collapsed to 0/50/100
        let mut keep: Vec<usize> = Vec::new();
        let mut work_type: Vec<String> = Vec::new();
        for i in 0..df.height() {
            let is_it = department[i].as_deref() == Some("IT");
            let label = match frequency[i] {
                Some(f) if f == 100.0 => Some("Remote"),
                Some(f) if f == 50.0 => Some("Hybrid"),
                Some(f) if f == 0.0 => Some("Onsite"),
                _ => None,
            };
            if let (true, Some(label)) = (is_it, label) {
                keep.push(i);
                work_type.push(label.to_string());
            }
        }
        if keep.is_empty() {
            return Err(CleanError::NoRows("productivity".to_string()));
        }

        let mut summary = CleanSummary {
            dataset: "productivity".to_string(),
            rows_in: df.height(),
            rows_out: keep.len(),
            imputed: Vec::new(),
        };

        let mut numeric: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for name in PRODUCTIVITY_NUMERIC {
            let values = select(&f64_values(df, name)?, &keep);
            numeric.insert(name, impute_mean(values, name, &mut summary)?);
        }
        let gender = impute_mode(select(&gender, &keep), "Gender", &mut summary)?;

        // Promotions and training hours normalized to a 1-5 range, then the
        // motivation score is the average of the four factors.
        let promotions_norm = normalize_1_to_5(&numeric["Promotions"]);
        let training_norm = normalize_1_to_5(&numeric["Training_Hours"]);
        let satisfaction = &numeric["Employee_Satisfaction_Score"];
        let performance = &numeric["Performance_Score"];
        let motivation: Vec<f64> = (0..keep.len())
            .map(|i| {
                round2((satisfaction[i] + performance[i] + promotions_norm[i] + training_norm[i]) / 4.0)
            })
            .collect();

        let mut columns = vec![
            Column::new("work_type".into(), work_type),
            Column::new("gender".into(), gender),
        ];
        for (raw, cleaned_name) in [
            ("Age", "age"),
            ("Years_At_Company", "years_at_company"),
            ("Monthly_Salary", "monthly_salary"),
            ("Work_Hours_Per_Week", "work_hours_per_week"),
            ("Projects_Handled", "projects_handled"),
            ("Overtime_Hours", "overtime_hours"),
            ("Sick_Days", "sick_days"),
            ("Training_Hours", "training_hours"),
            ("Promotions", "promotions"),
            ("Employee_Satisfaction_Score", "employee_satisfaction_score"),
            ("Performance_Score", "performance_score"),
        ] {
            columns.push(Column::new(cleaned_name.into(), numeric.remove(raw).unwrap_or_default()));
        }
        columns.push(Column::new("motivation_score".into(), motivation));

        Ok((DataFrame::new(columns)?, summary))
    }

    /// Clean the remote-work mental-health dataset.
    ///
    /// Keeps tech roles only, renames `Work_Location` to `work_type`,
    /// imputes missing values and derives Low/Medium/High bands for the
    /// rating columns.
    pub fn clean_mental_health(df: &DataFrame) -> Result<(DataFrame, CleanSummary), CleanError> {
        let mut needed = vec![
            "Job_Role",
            "Work_Location",
            "Gender",
            "Satisfaction_with_Remote_Work",
        ];
        needed.extend(MENTAL_HEALTH_NUMERIC);
        ensure_columns(df, "mental_health", &needed)?;

        let job_role = str_values(df, "Job_Role")?;
        let location = str_values(df, "Work_Location")?;
        let gender = str_values(df, "Gender")?;
        let satisfaction = str_values(df, "Satisfaction_with_Remote_Work")?;

        // Structural categoricals gate the row: a missing group key cannot
        // be imputed without fabricating group membership.
        let mut keep: Vec<usize> = Vec::new();
        for i in 0..df.height() {
            let tech = job_role[i]
                .as_deref()
                .map(|r| TECH_ROLES.contains(&r))
                .unwrap_or(false);
            if tech && location[i].is_some() && satisfaction[i].is_some() {
                keep.push(i);
            }
        }
        if keep.is_empty() {
            return Err(CleanError::NoRows("mental_health".to_string()));
        }

        let mut summary = CleanSummary {
            dataset: "mental_health".to_string(),
            rows_in: df.height(),
            rows_out: keep.len(),
            imputed: Vec::new(),
        };

        let work_type: Vec<String> = keep.iter().map(|&i| location[i].clone().unwrap()).collect();
        let job_role: Vec<String> = keep.iter().map(|&i| job_role[i].clone().unwrap()).collect();
        let satisfaction: Vec<String> =
            keep.iter().map(|&i| satisfaction[i].clone().unwrap()).collect();
        let gender = impute_mode(select(&gender, &keep), "Gender", &mut summary)?;

        let mut numeric: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for name in MENTAL_HEALTH_NUMERIC {
            let values = select(&f64_values(df, name)?, &keep);
            numeric.insert(name, impute_mean(values, name, &mut summary)?);
        }

        let support_band = band_values(&numeric["Company_Support_for_Remote_Work"]);
        let isolation_band = band_values(&numeric["Social_Isolation_Rating"]);
        let balance_band = band_values(&numeric["Work_Life_Balance_Rating"]);
        let stress_band = band_values(&numeric["Stress_Level"]);

        let mut columns = vec![
            Column::new("work_type".into(), work_type),
            Column::new("job_role".into(), job_role),
            Column::new("gender".into(), gender),
        ];
        for (raw, cleaned_name) in [
            ("Age", "age"),
            ("Years_of_Experience", "years_of_experience"),
            ("Hours_Worked_Per_Week", "hours_worked_per_week"),
            ("Number_of_Virtual_Meetings", "number_of_virtual_meetings"),
            ("Work_Life_Balance_Rating", "work_life_balance_rating"),
            ("Stress_Level", "stress_level"),
            ("Productivity_Change", "productivity_change"),
            ("Social_Isolation_Rating", "social_isolation_rating"),
            ("Company_Support_for_Remote_Work", "company_support_for_remote_work"),
        ] {
            columns.push(Column::new(cleaned_name.into(), numeric.remove(raw).unwrap_or_default()));
        }
        columns.push(Column::new("satisfaction_with_remote_work".into(), satisfaction));
        columns.push(Column::new("degree_of_remote_support".into(), support_band));
        columns.push(Column::new("degree_of_social_isolation".into(), isolation_band));
        columns.push(Column::new("degree_of_work_life_balance".into(), balance_band));
        columns.push(Column::new("stress_band".into(), stress_band));

        Ok((DataFrame::new(columns)?, summary))
    }
}

fn ensure_columns(df: &DataFrame, dataset: &str, needed: &[&str]) -> Result<(), SchemaError> {
    let names = df.get_column_names();
    for column in needed {
        if !names.iter().any(|c| c.as_str() == *column) {
            return Err(SchemaError::MissingColumn {
                dataset: dataset.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn select<T: Clone>(values: &[T], keep: &[usize]) -> Vec<T> {
    keep.iter().map(|&i| values[i].clone()).collect()
}

/// Replace missing values with the mean of the non-missing ones.
fn impute_mean(
    values: Vec<Option<f64>>,
    column: &str,
    summary: &mut CleanSummary,
) -> Result<Vec<f64>, CleanError> {
    let present: Vec<f64> = values
        .iter()
        .filter_map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    if present.is_empty() {
        return Err(CleanError::EmptyColumn(column.to_string()));
    }
    let mean = present.iter().sum::<f64>() / present.len() as f64;

    let mut filled = 0usize;
    let result = values
        .into_iter()
        .map(|v| match v.filter(|x| !x.is_nan()) {
            Some(x) => x,
            None => {
                filled += 1;
                mean
            }
        })
        .collect();
    if filled > 0 {
        debug!("imputed {filled} value(s) in '{column}' with mean {mean:.3}");
    }
    summary.imputed.push((column.to_string(), filled));
    Ok(result)
}

/// Replace missing values with the most frequent one (ties break
/// alphabetically).
fn impute_mode(
    values: Vec<Option<String>>,
    column: &str,
    summary: &mut CleanSummary,
) -> Result<Vec<String>, CleanError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for v in values.iter().flatten() {
        *counts.entry(v.as_str()).or_default() += 1;
    }
    let mode = counts
        .iter()
        .max_by_key(|(name, count)| (*count, std::cmp::Reverse(*name)))
        .map(|(name, _)| name.to_string())
        .ok_or_else(|| CleanError::EmptyColumn(column.to_string()))?;

    let mut filled = 0usize;
    let result = values
        .into_iter()
        .map(|v| {
            v.unwrap_or_else(|| {
                filled += 1;
                mode.clone()
            })
        })
        .collect();
    summary.imputed.push((column.to_string(), filled));
    Ok(result)
}

/// Map ratings onto a 1-5 range so heterogeneous factors can be averaged.
fn normalize_1_to_5(values: &[f64]) -> Vec<f64> {
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max <= 0.0 {
        return vec![1.0; values.len()];
    }
    values.iter().map(|v| v / max * 4.0 + 1.0).collect()
}

/// Band a 1-5 rating into Low (<=2), Medium (exactly 3) or High.
/// An imputed fractional rating between 2 and 3 lands in High.
fn band_values(values: &[f64]) -> Vec<String> {
    values
        .iter()
        .map(|&v| {
            if v <= 2.0 {
                "Low"
            } else if (v - 3.0).abs() < f64::EPSILON {
                "Medium"
            } else {
                "High"
            }
            .to_string()
        })
        .collect()
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn productivity_fixture() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "Department".into(),
                vec![Some("IT"), Some("IT"), Some("HR"), Some("IT"), Some("IT")],
            ),
            Column::new(
                "Gender".into(),
                vec![Some("Female"), None, Some("Male"), Some("Male"), Some("Female")],
            ),
            Column::new(
                "Remote_Work_Frequency".into(),
                vec![Some(100.0), Some(50.0), Some(100.0), Some(75.0), Some(0.0)],
            ),
            Column::new("Age".into(), vec![Some(30.0), Some(40.0), Some(50.0), Some(35.0), None]),
            Column::new("Years_At_Company".into(), vec![Some(2.0); 5]),
            Column::new("Monthly_Salary".into(), vec![Some(6400.0); 5]),
            Column::new("Work_Hours_Per_Week".into(), vec![Some(45.0); 5]),
            Column::new("Projects_Handled".into(), vec![Some(24.0); 5]),
            Column::new("Overtime_Hours".into(), vec![Some(14.0); 5]),
            Column::new("Sick_Days".into(), vec![Some(7.0); 5]),
            Column::new(
                "Training_Hours".into(),
                vec![Some(50.0), Some(100.0), Some(10.0), Some(20.0), Some(0.0)],
            ),
            Column::new(
                "Promotions".into(),
                vec![Some(1.0), Some(2.0), Some(0.0), Some(1.0), Some(0.0)],
            ),
            Column::new(
                "Employee_Satisfaction_Score".into(),
                vec![Some(3.0), Some(4.0), Some(2.0), Some(3.0), Some(3.0)],
            ),
            Column::new(
                "Performance_Score".into(),
                vec![Some(3.0), Some(4.0), Some(5.0), Some(3.0), Some(3.0)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn productivity_filters_population_and_maps_work_type() {
        let raw = productivity_fixture();
        let (cleaned, summary) = DataCleaner::clean_productivity(&raw).unwrap();

        // HR row and the 75% frequency row are gone
        assert_eq!(cleaned.height(), 3);
        assert!(summary.rows_out <= summary.rows_in);

        let work_types = str_values(&cleaned, "work_type").unwrap();
        assert_eq!(
            work_types.into_iter().map(Option::unwrap).collect::<Vec<_>>(),
            vec!["Remote", "Hybrid", "Onsite"]
        );
    }

    #[test]
    fn productivity_output_has_no_missing_values() {
        let raw = productivity_fixture();
        let (cleaned, _) = DataCleaner::clean_productivity(&raw).unwrap();
        for col in cleaned.get_columns() {
            assert_eq!(col.null_count(), 0, "column {} kept nulls", col.name());
        }
    }

    #[test]
    fn productivity_imputes_age_mean_and_gender_mode() {
        let raw = productivity_fixture();
        let (cleaned, summary) = DataCleaner::clean_productivity(&raw).unwrap();

        // Kept rows had ages 30, 40, None -> missing one gets (30+40)/2
        let ages = f64_values(&cleaned, "age").unwrap();
        assert_eq!(ages[2], Some(35.0));

        // Kept genders were Female, None, Female -> mode is Female
        let genders = str_values(&cleaned, "gender").unwrap();
        assert_eq!(genders[1].as_deref(), Some("Female"));

        assert!(summary.total_imputed() >= 2);
    }

    #[test]
    fn motivation_score_averages_four_factors() {
        let raw = productivity_fixture();
        let (cleaned, _) = DataCleaner::clean_productivity(&raw).unwrap();
        let motivation = f64_values(&cleaned, "motivation_score").unwrap();

        // Row 0: satisfaction 3, performance 3, promotions 1/2*4+1 = 3,
        // training 50/100*4+1 = 3 -> mean 3.0
        assert_eq!(motivation[0], Some(3.0));
    }

    fn mental_health_fixture() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "Job_Role".into(),
                vec![Some("Data Scientist"), Some("Software Engineer"), Some("Sales")],
            ),
            Column::new(
                "Work_Location".into(),
                vec![Some("Remote"), Some("Onsite"), Some("Remote")],
            ),
            Column::new("Gender".into(), vec![Some("Female"), Some("Male"), Some("Male")]),
            Column::new(
                "Satisfaction_with_Remote_Work".into(),
                vec![Some("Satisfied"), Some("Unsatisfied"), Some("Neutral")],
            ),
            Column::new("Age".into(), vec![Some(30.0), Some(40.0), Some(50.0)]),
            Column::new("Years_of_Experience".into(), vec![Some(5.0), Some(10.0), Some(3.0)]),
            Column::new("Hours_Worked_Per_Week".into(), vec![Some(40.0), Some(42.0), Some(39.0)]),
            Column::new(
                "Number_of_Virtual_Meetings".into(),
                vec![Some(8.0), Some(2.0), Some(5.0)],
            ),
            Column::new(
                "Work_Life_Balance_Rating".into(),
                vec![Some(4.0), Some(2.0), Some(3.0)],
            ),
            Column::new("Stress_Level".into(), vec![None, Some(4.0), Some(2.0)]),
            Column::new("Productivity_Change".into(), vec![Some(5.0), Some(3.0), Some(1.0)]),
            Column::new(
                "Social_Isolation_Rating".into(),
                vec![Some(4.0), Some(1.0), Some(3.0)],
            ),
            Column::new(
                "Company_Support_for_Remote_Work".into(),
                vec![Some(5.0), Some(2.0), Some(3.0)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn mental_health_mean_imputes_stress_level() {
        let raw = mental_health_fixture();
        let (cleaned, _) = DataCleaner::clean_mental_health(&raw).unwrap();

        // Non-tech Sales row is dropped; both tech rows are retained and the
        // missing stress level becomes the mean of the remaining values.
        assert_eq!(cleaned.height(), 2);
        let stress = f64_values(&cleaned, "stress_level").unwrap();
        assert_eq!(stress[0], Some(4.0));
        assert_eq!(stress[1], Some(4.0));
    }

    #[test]
    fn mental_health_bands_ratings() {
        let raw = mental_health_fixture();
        let (cleaned, _) = DataCleaner::clean_mental_health(&raw).unwrap();

        let support = str_values(&cleaned, "degree_of_remote_support").unwrap();
        assert_eq!(support[0].as_deref(), Some("High"));
        assert_eq!(support[1].as_deref(), Some("Low"));

        let stress_band = str_values(&cleaned, "stress_band").unwrap();
        assert_eq!(stress_band[0].as_deref(), Some("High"));
    }

    #[test]
    fn banding_treats_only_exact_three_as_medium() {
        let bands = band_values(&[1.0, 2.0, 2.5, 3.0, 3.5, 5.0]);
        assert_eq!(bands, vec!["Low", "Low", "High", "Medium", "High", "High"]);
    }

    #[test]
    fn missing_required_column_is_schema_error() {
        let df = DataFrame::new(vec![Column::new("Department".into(), vec!["IT"])]).unwrap();
        let err = DataCleaner::clean_productivity(&df).unwrap_err();
        assert!(matches!(err, CleanError::Schema(_)));
    }
}
