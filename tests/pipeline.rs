//! End-to-end pipeline tests over small CSV fixtures.

use std::io::Write;
use std::path::{Path, PathBuf};

use workscope::data::{
    merge_work_type_profiles, str_values, CleanError, DataCleaner, DataLoader, LoadError,
};
use workscope::stats::{correlation_matrix, StatsCalculator};

const PRODUCTIVITY_HEADER: &str = "Employee_ID,Department,Gender,Age,Years_At_Company,Monthly_Salary,Work_Hours_Per_Week,Projects_Handled,Overtime_Hours,Sick_Days,Remote_Work_Frequency,Training_Hours,Promotions,Employee_Satisfaction_Score,Performance_Score";

const MENTAL_HEALTH_HEADER: &str = "Employee_ID,Age,Gender,Job_Role,Industry,Years_of_Experience,Work_Location,Hours_Worked_Per_Week,Number_of_Virtual_Meetings,Work_Life_Balance_Rating,Stress_Level,Productivity_Change,Social_Isolation_Rating,Satisfaction_with_Remote_Work,Company_Support_for_Remote_Work";

fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

fn productivity_csv() -> String {
    let mut body = String::from(PRODUCTIVITY_HEADER);
    body.push('\n');
    // id, dept, gender, age, tenure, salary, hours, projects, overtime,
    // sick, remote freq, training, promotions, satisfaction, performance
    let rows = [
        "E1,IT,Female,31,3,6400,44,22,12,6,100,48,1,3.1,3.4",
        "E2,IT,Male,42,5,6600,46,25,16,8,100,52,0,2.8,3.1",
        "E3,IT,Male,,4,6500,45,24,14,7,50,50,1,3.0,3.2",
        "E4,IT,,38,6,6700,47,26,15,7,50,55,2,3.3,3.5",
        "E5,IT,Female,29,2,6300,43,21,11,5,0,45,0,2.9,3.0",
        "E6,IT,Male,47,8,6800,48,27,17,9,0,60,1,3.2,3.3",
        "E7,HR,Female,35,4,5200,40,15,8,6,100,30,1,3.0,3.1",
        "E8,IT,Female,40,5,6500,45,24,14,7,75,50,1,3.1,3.2",
        "E9,IT,Male,36,4,6450,45,23,13,7,25,49,0,3.0,3.1",
    ];
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    body
}

fn mental_health_csv() -> String {
    let mut body = String::from(MENTAL_HEALTH_HEADER);
    body.push('\n');
    // id, age, gender, role, industry, yoe, location, hours, meetings,
    // balance, stress, productivity change, isolation, satisfaction, support
    let rows = [
        "M1,30,Female,Data Scientist,Tech,5,Remote,40,8,4,,5,4,Satisfied,5",
        "M2,41,Male,Software Engineer,Tech,10,Onsite,42,2,2,4,3,1,Unsatisfied,2",
        "M3,35,Male,Project Manager,Tech,7,Hybrid,41,6,3,2,4,3,Neutral,3",
        "M4,28,Female,Software Engineer,Tech,3,Remote,39,9,4,3,6,4,Satisfied,4",
        "M5,50,Male,Sales,Retail,20,Remote,38,4,3,5,2,2,Neutral,3",
        "M6,33,Female,Data Scientist,Tech,6,Onsite,43,3,3,3,3,2,Neutral,3",
    ];
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    body
}

#[test]
fn full_pipeline_holds_cleaning_invariants() {
    let dir = tempfile::tempdir().unwrap();
    let productivity_path = write_file(dir.path(), "productivity.csv", &productivity_csv());
    let mental_health_path = write_file(dir.path(), "mental_health.csv", &mental_health_csv());

    let mut loader = DataLoader::new();
    loader.load_csv(&productivity_path).unwrap();
    let raw_rows = loader.get_row_count();
    let (productivity, summary) =
        DataCleaner::clean_productivity(loader.get_dataframe().unwrap()).unwrap();

    // HR, 25% and 75% rows drop out; every remaining cell resolved
    assert_eq!(summary.rows_in, raw_rows);
    assert_eq!(productivity.height(), 6);
    assert!(productivity.height() <= raw_rows);
    for col in productivity.get_columns() {
        assert_eq!(col.null_count(), 0, "column {} kept nulls", col.name());
    }

    let mut loader = DataLoader::new();
    loader.load_csv(&mental_health_path).unwrap();
    let (mental_health, _) =
        DataCleaner::clean_mental_health(loader.get_dataframe().unwrap()).unwrap();

    // Non-tech row drops out
    assert_eq!(mental_health.height(), 5);
    for col in mental_health.get_columns() {
        assert_eq!(col.null_count(), 0, "column {} kept nulls", col.name());
    }

    // Work-type labels come from the fixed category set
    let work_types = str_values(&productivity, "work_type").unwrap();
    for value in work_types.into_iter().flatten() {
        assert!(["Remote", "Hybrid", "Onsite"].contains(&value.as_str()));
    }
}

#[test]
fn aggregation_is_deterministic_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "productivity.csv", &productivity_csv());

    let mut loader = DataLoader::new();
    loader.load_csv(&path).unwrap();
    let (cleaned, _) = DataCleaner::clean_productivity(loader.get_dataframe().unwrap()).unwrap();

    let metrics = ["work_hours_per_week", "performance_score", "motivation_score"];
    let first = StatsCalculator::summarize_metrics_parallel(&cleaned, "work_type", &metrics).unwrap();
    let second = StatsCalculator::summarize_metrics_parallel(&cleaned, "work_type", &metrics).unwrap();
    assert_eq!(first, second);

    let matrix_a = correlation_matrix(&cleaned, &metrics).unwrap();
    let matrix_b = correlation_matrix(&cleaned, &metrics).unwrap();
    assert_eq!(matrix_a, matrix_b);

    // Symmetric with exact unit diagonal
    for i in 0..metrics.len() {
        assert_eq!(matrix_a.get(i, i), 1.0);
        for j in 0..metrics.len() {
            assert_eq!(matrix_a.get(i, j), matrix_a.get(j, i));
        }
    }
}

#[test]
fn merged_profile_covers_shared_work_types() {
    let dir = tempfile::tempdir().unwrap();
    let productivity_path = write_file(dir.path(), "productivity.csv", &productivity_csv());
    let mental_health_path = write_file(dir.path(), "mental_health.csv", &mental_health_csv());

    let mut loader = DataLoader::new();
    loader.load_csv(&productivity_path).unwrap();
    let (productivity, _) =
        DataCleaner::clean_productivity(loader.get_dataframe().unwrap()).unwrap();

    let mut loader = DataLoader::new();
    loader.load_csv(&mental_health_path).unwrap();
    let (mental_health, _) =
        DataCleaner::clean_mental_health(loader.get_dataframe().unwrap()).unwrap();

    let merged = merge_work_type_profiles(
        &productivity,
        &mental_health,
        &["performance_score"],
        &["stress_level"],
    )
    .unwrap();

    // Both fixtures carry all three work settings
    assert_eq!(merged.height(), 3);
    let work_types: Vec<String> = str_values(&merged, "work_type")
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    for expected in ["Remote", "Hybrid", "Onsite"] {
        assert!(work_types.iter().any(|w| w == expected));
    }
}

#[test]
fn missing_input_file_is_a_load_error() {
    let mut loader = DataLoader::new();
    let err = loader
        .load_csv(Path::new("definitely/not/here.csv"))
        .unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound(_)));
}

#[test]
fn missing_required_column_is_a_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    // Productivity file without the Remote_Work_Frequency column
    let path = write_file(
        dir.path(),
        "broken.csv",
        "Department,Gender,Age\nIT,Female,30\n",
    );

    let mut loader = DataLoader::new();
    loader.load_csv(&path).unwrap();
    assert!(loader
        .validate_schema("productivity", &["Department", "Remote_Work_Frequency"])
        .is_err());

    let err = DataCleaner::clean_productivity(loader.get_dataframe().unwrap()).unwrap_err();
    assert!(matches!(err, CleanError::Schema(_)));
}

#[test]
fn empty_file_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "empty.csv", "a,b\n");

    let mut loader = DataLoader::new();
    let err = loader.load_csv(&path).unwrap_err();
    assert!(matches!(err, LoadError::NoData(_) | LoadError::Csv(_)));
}
