//! Correlation Module
//! Pairwise Pearson correlation matrix with two-tailed significance.

use polars::prelude::*;
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::data::f64_values;

/// Significance threshold for correlation p-values
pub const SIGNIFICANCE_THRESHOLD: f64 = 0.05;

/// Symmetric correlation matrix over a set of numeric columns.
///
/// `values[i][j] == values[j][i]` and the diagonal is exactly 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
    pub p_values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn is_significant(&self, i: usize, j: usize) -> bool {
        i != j && self.p_values[i][j] <= SIGNIFICANCE_THRESHOLD
    }

    /// Strongest absolute off-diagonal correlations, descending. Feeds the
    /// report narrative.
    pub fn strongest_pairs(&self, top_n: usize) -> Vec<(String, String, f64)> {
        let mut pairs: Vec<(String, String, f64)> = Vec::new();
        for i in 0..self.labels.len() {
            for j in (i + 1)..self.labels.len() {
                let r = self.values[i][j];
                if !r.is_nan() {
                    pairs.push((self.labels[i].clone(), self.labels[j].clone(), r));
                }
            }
        }
        pairs.sort_by(|a, b| {
            b.2.abs()
                .partial_cmp(&a.2.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        pairs.truncate(top_n);
        pairs
    }
}

/// Compute the pairwise-complete Pearson correlation matrix for the given
/// numeric columns. Deterministic given fixed input.
pub fn correlation_matrix(df: &DataFrame, columns: &[&str]) -> PolarsResult<CorrelationMatrix> {
    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|&c| f64_values(df, c))
        .collect::<PolarsResult<_>>()?;

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    let mut p_values = vec![vec![f64::NAN; n]; n];

    for i in 0..n {
        values[i][i] = 1.0;
        p_values[i][i] = 0.0;
        for j in (i + 1)..n {
            let (r, pairs) = pearson(&series[i], &series[j]);
            let p = p_value(r, pairs);
            values[i][j] = r;
            values[j][i] = r;
            p_values[i][j] = p;
            p_values[j][i] = p;
        }
    }

    Ok(CorrelationMatrix {
        labels: columns.iter().map(|c| c.to_string()).collect(),
        values,
        p_values,
    })
}

/// Pearson r over rows where both values are present. Returns NaN when a
/// side has no variance.
fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> (f64, usize) {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => Some((*x, *y)),
            _ => None,
        })
        .collect();

    let n = pairs.len();
    if n < 2 {
        return (f64::NAN, n);
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return (f64::NAN, n);
    }
    (cov / (var_x * var_y).sqrt(), n)
}

/// Two-tailed p-value for a Pearson r via the t-distribution.
fn p_value(r: f64, n: usize) -> f64 {
    if r.is_nan() || n < 3 {
        return f64::NAN;
    }
    if (1.0 - r * r) <= f64::EPSILON {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => 2.0 * (1.0 - dist.cdf(t.abs())),
        Err(_) => f64::NAN,
    }
}
