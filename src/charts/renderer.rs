//! Static Chart Renderer
//! Renders the analysis figures as PNG files using plotters.
//!
//! Chart set mirrors the study notebook: work-type donut, stacked work/
//! overtime hours, grouped score bars, score box plots, correlation heatmap,
//! horizontal satisfaction bars and an hours-share pie.

use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::stats::CorrelationMatrix;

/// Errors that can occur during chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create drawing area: {0}")]
    DrawingArea(String),

    #[error("Failed to configure chart: {0}")]
    ChartConfig(String),

    #[error("Failed to draw chart elements: {0}")]
    Drawing(String),

    #[error("Failed to save chart to file: {0}")]
    FileSave(#[from] std::io::Error),

    #[error("Invalid chart data: {0}")]
    InvalidData(String),
}

type Result<T> = core::result::Result<T, ChartError>;

/// Color palette for groups; the first entry marks the leading category.
pub const PALETTE: [RGBColor; 6] = [
    RGBColor(91, 155, 213),  // Blue
    RGBColor(112, 173, 71),  // Green
    RGBColor(237, 125, 49),  // Orange
    RGBColor(155, 89, 182),  // Purple
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
];

const CHART_SIZE: (u32, u32) = (900, 600);

fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Pie (or donut) chart of category shares.
pub fn pie_chart(
    title: &str,
    slices: &[(String, f64)],
    donut: bool,
    output_path: &Path,
) -> Result<()> {
    if slices.is_empty() {
        return Err(ChartError::InvalidData("Pie needs at least one slice".to_string()));
    }

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;
    let root = root
        .titled(title, ("sans-serif", 28))
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let dims = root.dim_in_pixel();
    let center = (dims.0 as i32 / 2, dims.1 as i32 / 2);
    let radius = (dims.1.min(dims.0) as f64) * 0.32;

    let sizes: Vec<f64> = slices.iter().map(|(_, v)| *v).collect();
    let labels: Vec<String> = slices.iter().map(|(l, _)| l.clone()).collect();
    let colors: Vec<RGBColor> = (0..slices.len()).map(palette_color).collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 18).into_font().color(&BLACK));
    pie.percentages(("sans-serif", 15).into_font().color(&BLACK));
    root.draw(&pie)
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    if donut {
        root.draw(&Circle::new(center, (radius * 0.45) as i32, WHITE.filled()))
            .map_err(|e| ChartError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Vertical stacked bars, one stack per category. Series stack bottom-up in
/// the order given.
pub fn stacked_bar_chart(
    title: &str,
    y_desc: &str,
    categories: &[String],
    series: &[(&str, Vec<f64>)],
    output_path: &Path,
) -> Result<()> {
    if categories.is_empty() || series.is_empty() {
        return Err(ChartError::InvalidData("Stacked bars need data".to_string()));
    }

    let n = categories.len() as i32;
    let y_max = (0..categories.len())
        .map(|i| series.iter().map(|(_, v)| v[i]).sum::<f64>())
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.15;

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    let labels = categories.to_vec();
    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .x_label_formatter(&move |seg: &SegmentValue<i32>| match seg {
            SegmentValue::CenterOf(i) if (*i as usize) < labels.len() => {
                labels[*i as usize].clone()
            }
            _ => String::new(),
        })
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    let mut base = vec![0.0f64; categories.len()];
    for (series_idx, (name, values)) in series.iter().enumerate() {
        let style = palette_color(series_idx).filled();
        let lower = base.clone();
        chart
            .draw_series((0..categories.len()).map(|i| {
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(i as i32), lower[i]),
                        (SegmentValue::Exact(i as i32 + 1), lower[i] + values[i]),
                    ],
                    style,
                );
                bar.set_margin(0, 0, 18, 18);
                bar
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?
            .label(*name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], style));

        for (i, v) in values.iter().enumerate() {
            base[i] += v;
        }
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Grouped vertical bars: one block of bars per metric, one bar per series
/// within the block, a blank slot between blocks.
pub fn grouped_bar_chart(
    title: &str,
    y_desc: &str,
    metric_labels: &[String],
    series_labels: &[String],
    values: &[Vec<f64>],
    output_path: &Path,
) -> Result<()> {
    let nm = metric_labels.len();
    let ng = series_labels.len();
    if nm == 0 || ng == 0 || values.len() != nm {
        return Err(ChartError::InvalidData("Grouped bars need data".to_string()));
    }

    let slots = (nm * (ng + 1) - 1) as i32;
    let y_max = values
        .iter()
        .flatten()
        .cloned()
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.15;

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d((0..slots).into_segmented(), 0f64..y_max)
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    let labels = metric_labels.to_vec();
    let block = ng + 1;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize + 1)
        .y_desc(y_desc)
        .x_label_formatter(&move |seg: &SegmentValue<i32>| match seg {
            SegmentValue::CenterOf(i) => {
                let slot = *i as usize;
                if slot % block == ng / 2 && slot / block < labels.len() {
                    labels[slot / block].clone()
                } else {
                    String::new()
                }
            }
            _ => String::new(),
        })
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    for (g, series_name) in series_labels.iter().enumerate() {
        let style = palette_color(g).filled();
        chart
            .draw_series((0..nm).map(|m| {
                let slot = (m * block + g) as i32;
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(slot), 0.0),
                        (SegmentValue::Exact(slot + 1), values[m][g]),
                    ],
                    style,
                );
                bar.set_margin(0, 0, 3, 3);
                bar
            }))
            .map_err(|e| ChartError::Drawing(e.to_string()))?
            .label(series_name.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], style));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// One box plot panel per metric, groups side by side within a panel.
pub fn box_plot_panels(
    title: &str,
    panels: &[(String, Vec<(String, Vec<f64>)>)],
    output_path: &Path,
) -> Result<()> {
    if panels.is_empty() {
        return Err(ChartError::InvalidData("Box plots need panels".to_string()));
    }

    let root = BitMapBackend::new(output_path, (1400, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;
    let root = root
        .titled(title, ("sans-serif", 28))
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let areas = root.split_evenly((1, panels.len()));
    for (area, (metric_title, groups)) in areas.iter().zip(panels) {
        let values: Vec<f64> = groups.iter().flat_map(|(_, v)| v.iter().copied()).collect();
        if values.is_empty() {
            continue;
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let pad = ((max - min) * 0.15).max(0.5);
        let y_range = (min - pad) as f32..(max + pad) as f32;

        let n = groups.len() as i32;
        let mut chart = ChartBuilder::on(area)
            .caption(metric_title, ("sans-serif", 20))
            .margin(12)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d((0..n).into_segmented(), y_range)
            .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

        let labels: Vec<String> = groups.iter().map(|(g, _)| g.clone()).collect();
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&move |seg: &SegmentValue<i32>| match seg {
                SegmentValue::CenterOf(i) if (*i as usize) < labels.len() => {
                    labels[*i as usize].clone()
                }
                _ => String::new(),
            })
            .draw()
            .map_err(|e| ChartError::Drawing(e.to_string()))?;

        for (i, (_, group_values)) in groups.iter().enumerate() {
            if group_values.is_empty() {
                continue;
            }
            let quartiles = Quartiles::new(group_values);
            chart
                .draw_series(std::iter::once(
                    Boxplot::new_vertical(SegmentValue::CenterOf(i as i32), &quartiles)
                        .width(28)
                        .style(palette_color(i).stroke_width(2)),
                ))
                .map_err(|e| ChartError::Drawing(e.to_string()))?;
        }
    }

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Correlation heatmap with per-cell annotations, blue-white-red diverging
/// scale over [-1, 1].
pub fn correlation_heatmap(
    title: &str,
    matrix: &CorrelationMatrix,
    output_path: &Path,
) -> Result<()> {
    let n = matrix.labels.len();
    if n == 0 {
        return Err(ChartError::InvalidData("Heatmap needs columns".to_string()));
    }

    let root = BitMapBackend::new(output_path, (1000, 860)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(150)
        .y_label_area_size(210)
        .build_cartesian_2d(
            (0..n as i32).into_segmented(),
            (0..n as i32).into_segmented(),
        )
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    let x_labels = matrix.labels.clone();
    let y_labels = matrix.labels.clone();
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n + 1)
        .y_labels(n + 1)
        .x_label_style(("sans-serif", 14).into_font().transform(FontTransform::Rotate90))
        .x_label_formatter(&move |seg: &SegmentValue<i32>| match seg {
            SegmentValue::CenterOf(i) if (*i as usize) < x_labels.len() => {
                x_labels[*i as usize].clone()
            }
            _ => String::new(),
        })
        .y_label_formatter(&move |seg: &SegmentValue<i32>| match seg {
            SegmentValue::CenterOf(i) if (*i as usize) < y_labels.len() => {
                y_labels[*i as usize].clone()
            }
            _ => String::new(),
        })
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series((0..n).flat_map(|i| {
            (0..n).map(move |j| {
                let r = matrix.values[i][j];
                Rectangle::new(
                    [
                        (SegmentValue::Exact(j as i32), SegmentValue::Exact(i as i32)),
                        (
                            SegmentValue::Exact(j as i32 + 1),
                            SegmentValue::Exact(i as i32 + 1),
                        ),
                    ],
                    diverging_color(r).filled(),
                )
            })
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series((0..n).flat_map(|i| {
            (0..n).map(move |j| {
                let r = matrix.values[i][j];
                let text = if r.is_nan() {
                    "-".to_string()
                } else {
                    format!("{:.2}", r)
                };
                Text::new(
                    text,
                    (
                        SegmentValue::CenterOf(j as i32),
                        SegmentValue::CenterOf(i as i32),
                    ),
                    ("sans-serif", 13).into_font().color(&BLACK),
                )
            })
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Horizontal mean bars, one per category.
pub fn horizontal_bar_chart(
    title: &str,
    x_desc: &str,
    rows: &[(String, f64)],
    output_path: &Path,
) -> Result<()> {
    if rows.is_empty() {
        return Err(ChartError::InvalidData("Bar chart needs rows".to_string()));
    }

    let n = rows.len() as i32;
    let x_max = rows.iter().map(|(_, v)| *v).fold(0.0f64, f64::max).max(1.0) * 1.15;

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(130)
        .build_cartesian_2d(0f64..x_max, (0..n).into_segmented())
        .map_err(|e| ChartError::ChartConfig(e.to_string()))?;

    let labels: Vec<String> = rows.iter().map(|(l, _)| l.clone()).collect();
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc(x_desc)
        .y_label_formatter(&move |seg: &SegmentValue<i32>| match seg {
            SegmentValue::CenterOf(i) if (*i as usize) < labels.len() => {
                labels[*i as usize].clone()
            }
            _ => String::new(),
        })
        .draw()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    chart
        .draw_series(rows.iter().enumerate().map(|(i, (_, v))| {
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(i as i32)),
                    (*v, SegmentValue::Exact(i as i32 + 1)),
                ],
                palette_color(i).filled(),
            );
            bar.set_margin(10, 10, 0, 0);
            bar
        }))
        .map_err(|e| ChartError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| ChartError::Drawing(e.to_string()))?;
    Ok(())
}

/// Blue-white-red scale for correlation values in [-1, 1].
fn diverging_color(r: f64) -> RGBColor {
    if r.is_nan() {
        return RGBColor(230, 230, 230);
    }
    let t = ((r + 1.0) / 2.0).clamp(0.0, 1.0);
    let blue = (59.0, 76.0, 192.0);
    let white = (245.0, 245.0, 245.0);
    let red = (180.0, 4.0, 38.0);

    let (from, to, f) = if t < 0.5 {
        (blue, white, t * 2.0)
    } else {
        (white, red, (t - 0.5) * 2.0)
    };
    RGBColor(
        (from.0 + (to.0 - from.0) * f) as u8,
        (from.1 + (to.1 - from.1) * f) as u8,
        (from.2 + (to.2 - from.2) * f) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::correlation_matrix;
    use polars::prelude::{Column, DataFrame};

    #[test]
    fn empty_inputs_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("chart.png");

        assert!(matches!(
            pie_chart("t", &[], false, &out),
            Err(ChartError::InvalidData(_))
        ));
        assert!(matches!(
            stacked_bar_chart("t", "y", &[], &[], &out),
            Err(ChartError::InvalidData(_))
        ));
        assert!(matches!(
            horizontal_bar_chart("t", "x", &[], &out),
            Err(ChartError::InvalidData(_))
        ));
        assert!(matches!(
            box_plot_panels("t", &[], &out),
            Err(ChartError::InvalidData(_))
        ));
    }

    #[test]
    fn diverging_color_endpoints() {
        assert_eq!(diverging_color(-1.0), RGBColor(59, 76, 192));
        assert_eq!(diverging_color(1.0), RGBColor(180, 4, 38));
        let mid = diverging_color(0.0);
        assert!(mid.0 > 200 && mid.1 > 200 && mid.2 > 200);
    }

    #[test]
    #[ignore = "Font rendering not available in test environment"]
    fn renders_all_chart_kinds() {
        let dir = tempfile::tempdir().unwrap();

        pie_chart(
            "Distribution of Work Type",
            &[("Remote".to_string(), 10.0), ("Onsite".to_string(), 5.0)],
            true,
            &dir.path().join("donut.png"),
        )
        .unwrap();

        stacked_bar_chart(
            "Average Work and Overtime Hours by Work Type",
            "Average Hours",
            &["Remote".to_string(), "Onsite".to_string()],
            &[("Work Hours", vec![42.0, 45.0]), ("Overtime Hours", vec![12.0, 9.0])],
            &dir.path().join("stacked.png"),
        )
        .unwrap();

        grouped_bar_chart(
            "Average Scores by Work Type",
            "Average Score",
            &["Performance".to_string(), "Motivation".to_string()],
            &["Remote".to_string(), "Onsite".to_string()],
            &[vec![3.0, 3.1], vec![2.9, 3.2]],
            &dir.path().join("grouped.png"),
        )
        .unwrap();

        box_plot_panels(
            "Scores by Work Type",
            &[(
                "Performance".to_string(),
                vec![
                    ("Remote".to_string(), vec![1.0, 2.0, 3.0, 4.0]),
                    ("Onsite".to_string(), vec![2.0, 3.0, 4.0, 5.0]),
                ],
            )],
            &dir.path().join("box.png"),
        )
        .unwrap();

        let df = DataFrame::new(vec![
            Column::new("a".into(), vec![1.0, 2.0, 3.0]),
            Column::new("b".into(), vec![3.0, 2.0, 1.0]),
        ])
        .unwrap();
        let matrix = correlation_matrix(&df, &["a", "b"]).unwrap();
        correlation_heatmap("Correlation Heatmap", &matrix, &dir.path().join("heat.png")).unwrap();

        horizontal_bar_chart(
            "Social Isolation by Satisfaction",
            "Average Rating",
            &[("Satisfied".to_string(), 3.2), ("Unsatisfied".to_string(), 3.0)],
            &dir.path().join("barh.png"),
        )
        .unwrap();

        for name in ["donut", "stacked", "grouped", "box", "heat", "barh"] {
            assert!(dir.path().join(format!("{name}.png")).exists());
        }
    }
}
