//! Charts module - static chart rendering

mod renderer;

pub use renderer::{
    box_plot_panels, correlation_heatmap, grouped_bar_chart, horizontal_bar_chart, pie_chart,
    stacked_bar_chart, ChartError,
};
