//! Workscope - Remote-Work Productivity & Mental-Health Analysis
//!
//! Batch pipeline: load both survey CSVs, clean them, merge per-work-type
//! profiles, compute descriptive statistics and correlations, render the
//! figures and assemble the findings deck. One run per invocation.

use anyhow::{Context, Result};
use log::info;
use polars::prelude::*;
use std::fs;
use std::path::Path;

use workscope::charts;
use workscope::config::Config;
use workscope::data::{
    f64_values, merge_work_type_profiles, ordered_groups, str_values, DataCleaner, DataLoader,
};
use workscope::report::DeckBuilder;
use workscope::stats::{
    assess_dataset, correlation_matrix, CorrelationMatrix, CrossTab, GroupSummary, PivotTable,
    QualityNote, StatsCalculator,
};

/// Numeric columns of the cleaned productivity dataset.
const PRODUCTIVITY_METRICS: [&str; 12] = [
    "age",
    "years_at_company",
    "monthly_salary",
    "work_hours_per_week",
    "projects_handled",
    "overtime_hours",
    "sick_days",
    "training_hours",
    "promotions",
    "employee_satisfaction_score",
    "performance_score",
    "motivation_score",
];

/// Score columns feeding the pivot, bar and box-plot views.
const SCORE_COLS: [&str; 3] = [
    "performance_score",
    "employee_satisfaction_score",
    "motivation_score",
];
const SCORE_TITLES: [&str; 3] = ["Performance", "Satisfaction", "Motivation"];

/// Numeric columns of the cleaned mental-health dataset.
const MENTAL_HEALTH_METRICS: [&str; 7] = [
    "hours_worked_per_week",
    "number_of_virtual_meetings",
    "work_life_balance_rating",
    "stress_level",
    "productivity_change",
    "social_isolation_rating",
    "company_support_for_remote_work",
];

/// Columns the per-work-type hours table describes.
const HOURS_DESCRIBE_COLS: [&str; 4] = [
    "hours_worked_per_week",
    "number_of_virtual_meetings",
    "work_life_balance_rating",
    "company_support_for_remote_work",
];

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = Config::load(Path::new(&config_path))
        .with_context(|| format!("loading configuration from {config_path}"))?;

    run(&config)
}

fn run(config: &Config) -> Result<()> {
    // ---- Load ----
    let mut productivity_loader = DataLoader::new();
    productivity_loader
        .load_csv(&config.input_data.productivity_file)
        .context("loading productivity dataset")?;
    productivity_loader.validate_schema("productivity", &["Department", "Remote_Work_Frequency"])?;
    info!(
        "productivity dataset: {} rows, {} columns",
        productivity_loader.get_row_count(),
        productivity_loader.get_columns().len()
    );

    let mut mental_health_loader = DataLoader::new();
    mental_health_loader
        .load_csv(&config.input_data.mental_health_file)
        .context("loading mental-health dataset")?;
    mental_health_loader.validate_schema("mental_health", &["Job_Role", "Work_Location"])?;
    info!(
        "mental-health dataset: {} rows, {} columns",
        mental_health_loader.get_row_count(),
        mental_health_loader.get_columns().len()
    );

    // ---- Clean ----
    let (productivity, productivity_summary) = DataCleaner::clean_productivity(
        productivity_loader
            .get_dataframe()
            .context("productivity dataset not loaded")?,
    )?;
    info!(
        "cleaned productivity: {} -> {} rows, {} value(s) imputed",
        productivity_summary.rows_in,
        productivity_summary.rows_out,
        productivity_summary.total_imputed()
    );

    let (mental_health, mental_health_summary) = DataCleaner::clean_mental_health(
        mental_health_loader
            .get_dataframe()
            .context("mental-health dataset not loaded")?,
    )?;
    info!(
        "cleaned mental-health: {} -> {} rows, {} value(s) imputed",
        mental_health_summary.rows_in,
        mental_health_summary.rows_out,
        mental_health_summary.total_imputed()
    );

    write_csv(&productivity, &config.output_data.productivity_file)
        .context("writing cleaned productivity dataset")?;
    write_csv(&mental_health, &config.output_data.mental_health_file)
        .context("writing cleaned mental-health dataset")?;

    let figures_dir = &config.output_data.figures_dir;
    fs::create_dir_all(figures_dir).context("creating figures directory")?;
    let fig = |name: &str| figures_dir.join(name);

    // ---- Productivity dataset ----
    println!("== Productivity dataset, descriptive statistics by work type ==");
    for (metric, summaries) in
        StatsCalculator::summarize_metrics_parallel(&productivity, "work_type", &PRODUCTIVITY_METRICS)?
    {
        print_group_summaries(&metric, &summaries);
    }

    let counts = StatsCalculator::counts_by(&productivity, "work_type")?;
    let slices: Vec<(String, f64)> = counts
        .iter()
        .map(|(label, count)| (label.clone(), *count as f64))
        .collect();
    charts::pie_chart(
        "Distribution of Work Type",
        &slices,
        true,
        &fig("distribution_of_work_type.png"),
    )?;

    let hour_rows =
        StatsCalculator::mean_by_group(&productivity, "work_type", &["work_hours_per_week", "overtime_hours"])?;
    let categories: Vec<String> = hour_rows.iter().map(|(g, _)| g.clone()).collect();
    charts::stacked_bar_chart(
        "Average Work and Overtime Hours by Work Type",
        "Average Hours",
        &categories,
        &[
            ("Work Hours", hour_rows.iter().map(|(_, v)| v[0]).collect()),
            ("Overtime Hours", hour_rows.iter().map(|(_, v)| v[1]).collect()),
        ],
        &fig("work_hours.png"),
    )?;

    let pivot = StatsCalculator::mean_median_pivot(&productivity, "work_type", &SCORE_COLS)?;
    print_pivot("== Mean/median scores by work type ==", &pivot);

    let score_rows = StatsCalculator::mean_by_group(&productivity, "work_type", &SCORE_COLS)?;
    let group_labels: Vec<String> = score_rows.iter().map(|(g, _)| g.clone()).collect();
    let metric_labels: Vec<String> = SCORE_TITLES.iter().map(|t| t.to_string()).collect();
    let bar_values: Vec<Vec<f64>> = (0..SCORE_COLS.len())
        .map(|m| score_rows.iter().map(|(_, v)| v[m]).collect())
        .collect();
    charts::grouped_bar_chart(
        "Average Scores of Performance, Satisfaction and Motivation by Work Type",
        "Average Score",
        &metric_labels,
        &group_labels,
        &bar_values,
        &fig("average_scores.png"),
    )?;

    let mut panels = Vec::new();
    for (&col, title) in SCORE_COLS.iter().zip(SCORE_TITLES) {
        let by_group = StatsCalculator::group_values(&productivity, "work_type", col)?;
        let labels: Vec<String> = by_group.keys().cloned().collect();
        let groups: Vec<(String, Vec<f64>)> = ordered_groups(&labels)
            .into_iter()
            .map(|g| {
                let values = by_group[&g].clone();
                (g, values)
            })
            .collect();
        panels.push((format!("{title} Score"), groups));
    }
    charts::box_plot_panels("Scores by Work Type", &panels, &fig("scores_by_work_type.png"))?;

    let matrix = correlation_matrix(&productivity, &PRODUCTIVITY_METRICS)?;
    charts::correlation_heatmap(
        "Correlation Heatmap of Numerical Values",
        &matrix,
        &fig("heat_map.png"),
    )?;
    print_strongest(&matrix);

    // ---- Mental-health dataset ----
    let satisfaction_rows = StatsCalculator::mean_by_group(
        &mental_health,
        "satisfaction_with_remote_work",
        &["company_support_for_remote_work", "social_isolation_rating"],
    )?;
    println!("\n== Mean support and isolation by satisfaction with remote work ==");
    for (group, means) in &satisfaction_rows {
        println!("{:<14} support {:>6.2}  isolation {:>6.2}", group, means[0], means[1]);
    }
    charts::horizontal_bar_chart(
        "Social Isolation Rating by Satisfaction Level with Remote Work",
        "Average Social Isolation Rating",
        &satisfaction_rows
            .iter()
            .map(|(g, v)| (g.clone(), v[1]))
            .collect::<Vec<_>>(),
        &fig("satisfaction_isolation.png"),
    )?;
    charts::horizontal_bar_chart(
        "Company Support for Remote Work by Satisfaction Level",
        "Average Company Support for Remote Work",
        &satisfaction_rows
            .iter()
            .map(|(g, v)| (g.clone(), v[0]))
            .collect::<Vec<_>>(),
        &fig("satisfaction_support.png"),
    )?;

    let meeting_rows = StatsCalculator::mean_by_group(
        &mental_health,
        "work_type",
        &["number_of_virtual_meetings", "hours_worked_per_week"],
    )?;
    println!("\n== Mean virtual meetings and weekly hours by work type ==");
    for (group, means) in &meeting_rows {
        println!("{:<10} meetings {:>6.2}  hours {:>6.2}", group, means[0], means[1]);
    }

    let hours_by_type = StatsCalculator::group_values(&mental_health, "work_type", "hours_worked_per_week")?;
    let hour_labels: Vec<String> = hours_by_type.keys().cloned().collect();
    let hour_shares: Vec<(String, f64)> = ordered_groups(&hour_labels)
        .into_iter()
        .map(|g| {
            let total: f64 = hours_by_type[&g].iter().sum();
            (g, total)
        })
        .collect();
    charts::pie_chart(
        "Proportion of Total Hours Worked by Work Type",
        &hour_shares,
        false,
        &fig("work_type_hours_share.png"),
    )?;

    let stress_work = StatsCalculator::crosstab_percent(
        &mental_health,
        "stress_band",
        "work_type",
        &["Low", "Medium", "High"],
    )?;
    print_crosstab("== Work-type split within each stress band (%) ==", &stress_work);

    let stress_role = StatsCalculator::crosstab_percent(
        &mental_health,
        "stress_band",
        "job_role",
        &["Low", "Medium", "High"],
    )?;
    print_crosstab("== Job-role split within each stress band (%) ==", &stress_role);

    println!("\n== Mental-health dataset, hours & ratings by work type ==");
    for (metric, summaries) in
        StatsCalculator::summarize_metrics_parallel(&mental_health, "work_type", &HOURS_DESCRIBE_COLS)?
    {
        print_group_summaries(&metric, &summaries);
    }

    // ---- Merge ----
    let merged = merge_work_type_profiles(
        &productivity,
        &mental_health,
        &SCORE_COLS,
        &["stress_level", "productivity_change", "social_isolation_rating"],
    )?;
    print_merged_profile(&merged)?;

    // ---- Quality ----
    let mut quality = assess_dataset("productivity", &productivity, &PRODUCTIVITY_METRICS, "work_type")?;
    quality.extend(assess_dataset(
        "mental_health",
        &mental_health,
        &MENTAL_HEALTH_METRICS,
        "work_type",
    )?);

    // ---- Report ----
    let report_file = &config.output_data.report_file;
    if let Some(parent) = report_file.parent() {
        fs::create_dir_all(parent).context("creating report directory")?;
    }

    let mut deck = DeckBuilder::new("Remote Work, Productivity & Mental Health");
    deck.title_slide("Team-building, career growth and flexible hours in remote work settings");
    deck.bullet_slide("Scores by work setting", &score_bullets(&pivot));
    deck.bullet_slide("Strongest correlations", &correlation_bullets(&matrix));
    deck.bullet_slide("Data quality caveats", &quality_bullets(&quality));
    deck.chart_slide(
        "Workforce composition and hours",
        &[fig("distribution_of_work_type.png"), fig("work_hours.png")],
    );
    deck.chart_slide(
        "Scores by work setting",
        &[fig("average_scores.png"), fig("scores_by_work_type.png")],
    );
    deck.chart_slide("Correlations", &[fig("heat_map.png")]);
    deck.chart_slide(
        "Satisfaction with remote work",
        &[fig("satisfaction_isolation.png"), fig("satisfaction_support.png")],
    );
    deck.chart_slide("Hours by work setting", &[fig("work_type_hours_share.png")]);
    deck.save(report_file).context("writing findings deck")?;

    info!(
        "pipeline complete: {} slides -> {}",
        deck.slide_count(),
        report_file.display()
    );
    Ok(())
}

fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df.clone())?;
    Ok(())
}

fn print_group_summaries(metric: &str, summaries: &[GroupSummary]) {
    println!("\n{metric}");
    println!(
        "{:<10} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "group", "n", "mean", "median", "std", "min", "q1", "q3", "max"
    );
    for s in summaries {
        println!(
            "{:<10} {:>6} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>10.3}",
            s.group, s.count, s.mean, s.median, s.std, s.min, s.q1, s.q3, s.max
        );
    }
}

fn print_pivot(title: &str, pivot: &PivotTable) {
    println!("\n{title}");
    for row in &pivot.rows {
        let cells: Vec<String> = pivot
            .metrics
            .iter()
            .enumerate()
            .map(|(m, metric)| {
                format!("{} mean {:.2} median {:.2}", metric, row.means[m], row.medians[m])
            })
            .collect();
        println!("{:<10} {}", row.group, cells.join(" | "));
    }
}

fn print_crosstab(title: &str, tab: &CrossTab) {
    println!("\n{title}");
    let header: Vec<String> = tab.col_labels.iter().map(|l| format!("{l:>12}")).collect();
    println!("{:<10} {} {:>12}", tab.row_dimension, header.join(" "), "Total");
    for row in &tab.rows {
        let cells: Vec<String> = row.shares.iter().map(|v| format!("{v:>12.2}")).collect();
        println!("{:<10} {} {:>12.2}", row.label, cells.join(" "), row.total);
    }
}

fn print_merged_profile(merged: &DataFrame) -> Result<()> {
    println!("\n== Combined work-type profile (both datasets) ==");
    let work_types = str_values(merged, "work_type")?;
    let metric_names: Vec<String> = merged
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .filter(|name| name != "work_type")
        .collect();

    for (i, work_type) in work_types.iter().enumerate() {
        let mut cells = Vec::new();
        for name in &metric_names {
            let values = f64_values(merged, name)?;
            cells.push(format!("{} {:.2}", name, values[i].unwrap_or(f64::NAN)));
        }
        println!(
            "{:<10} {}",
            work_type.clone().unwrap_or_default(),
            cells.join(" | ")
        );
    }
    Ok(())
}

fn score_bullets(pivot: &PivotTable) -> Vec<String> {
    pivot
        .metrics
        .iter()
        .enumerate()
        .map(|(m, metric)| {
            let parts: Vec<String> = pivot
                .rows
                .iter()
                .map(|row| format!("{} {:.2}", row.group, row.means[m]))
                .collect();
            format!("Mean {}: {}", metric.replace('_', " "), parts.join(" / "))
        })
        .collect()
}

fn correlation_bullets(matrix: &CorrelationMatrix) -> Vec<String> {
    let pairs = matrix.strongest_pairs(5);
    if pairs.is_empty() {
        return vec!["No usable correlations (insufficient variance)".to_string()];
    }
    pairs
        .into_iter()
        .map(|(a, b, r)| format!("{} vs {}: r = {:.2}", a.replace('_', " "), b.replace('_', " "), r))
        .collect()
}

fn quality_bullets(notes: &[QualityNote]) -> Vec<String> {
    if notes.is_empty() {
        return vec!["No low-variance findings; group differences are interpretable".to_string()];
    }
    notes.iter().map(|n| n.headline()).collect()
}

fn print_strongest(matrix: &CorrelationMatrix) {
    println!("\n== Strongest correlations (productivity dataset) ==");
    for (a, b, r) in matrix.strongest_pairs(5) {
        println!("{a:<30} {b:<30} r = {r:>6.2}");
    }
}
