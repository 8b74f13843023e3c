//! Workscope - Remote-Work Productivity & Mental-Health Analysis
//!
//! Batch pipeline over two survey datasets: load CSVs, clean them, merge
//! per-work-type profiles, compute descriptive statistics and correlations,
//! render static charts and assemble a findings slide deck.
//!
//! Caveat: the underlying survey datasets are synthetic and show very little
//! variance between work settings. The quality checks in [`stats::quality`]
//! flag this at run time; conclusions drawn from these datasets should be
//! treated accordingly.

pub mod charts;
pub mod config;
pub mod data;
pub mod report;
pub mod stats;
