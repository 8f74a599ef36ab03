//! Derived quantities shown on the charts: summary statistics, correlation,
//! R², histogram bins and label formatting.
use itertools_num::linspace;
use ndarray::{Array1, ArrayView1, ArrayView2};
use statrs::statistics::Statistics;

use crate::error::{Result, VizError};

/// Quantile with linear interpolation between order statistics.
///
/// Returns `None` for empty input. `q` is clamped to `[0, 1]`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Mean, median and central 95% range of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSummary {
    pub mean: f64,
    pub median: f64,
    pub lower_95: f64,
    pub upper_95: f64,
}

impl DistributionSummary {
    pub fn compute(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(VizError::EmptyInput("distribution sample"));
        }
        let q = |p| quantile(values, p).unwrap_or(f64::NAN);
        Ok(Self {
            mean: values.mean(),
            median: q(0.5),
            lower_95: q(0.025),
            upper_95: q(0.975),
        })
    }
}

/// Pearson correlation coefficient of two equally long samples.
pub fn pearson(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
    if x.len() != y.len() {
        return Err(VizError::shape(x.len(), y.len()));
    }
    if x.len() < 2 {
        return Err(VizError::EmptyInput("correlation sample"));
    }
    let cov = x.iter().covariance(y.iter());
    let corr = cov / (x.iter().std_dev() * y.iter().std_dev());
    log::debug!("pearson correlation over {} points: {}", x.len(), corr);
    Ok(corr)
}

/// Pearson correlation between the first two columns of an (n, 2+) array.
pub fn column_correlation(data: ArrayView2<f64>) -> Result<f64> {
    if data.ncols() < 2 {
        return Err(VizError::WrongColumnCount {
            expected: 2,
            found: data.ncols(),
        });
    }
    pearson(data.column(0), data.column(1))
}

/// Coefficient of determination for one output.
///
/// A constant `y_true` scores 1.0 on a perfect fit and 0.0 otherwise.
pub fn r2_score(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(VizError::shape(y_true.len(), y_pred.len()));
    }
    if y_true.is_empty() {
        return Err(VizError::EmptyInput("y_true"));
    }
    let mean = y_true.iter().mean();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

/// R² for each output column.
pub fn r2_per_output(y_true: ArrayView2<f64>, y_pred: ArrayView2<f64>) -> Result<Vec<f64>> {
    if y_true.dim() != y_pred.dim() {
        return Err(VizError::shape(y_true.dim(), y_pred.dim()));
    }
    y_true
        .columns()
        .into_iter()
        .zip(y_pred.columns())
        .map(|(t, p)| r2_score(t, p))
        .collect()
}

/// Prediction error `pred - true`.
pub fn residuals(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<Array1<f64>> {
    if y_true.len() != y_pred.len() {
        return Err(VizError::shape(y_true.len(), y_pred.len()));
    }
    Ok(&y_pred - &y_true)
}

/// Relative change from `start` to `end` as a fraction (0.25 == 25%).
pub fn fractional_change(start: f64, end: f64) -> f64 {
    (end - start) / start
}

/// Percent change of one step given the step size and the value it was added to.
///
/// A zero previous value is replaced by 1 so projects starting from nothing
/// still get a finite value.
pub fn step_percent_change(step: f64, previous: f64) -> f64 {
    let denom = if previous == 0.0 { 1.0 } else { previous };
    step / denom * 100.0
}

/// Equal-width histogram bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` bin edges from the sample minimum to its maximum.
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width bins spanning `[min, max]`.
    ///
    /// Every bin is half open except the last, which includes the maximum.
    /// A constant sample is spread over `[v - 0.5, v + 0.5]`.
    pub fn compute(values: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(VizError::InvalidArgument("bins must be positive".into()));
        }
        if values.is_empty() {
            return Err(VizError::EmptyInput("histogram sample"));
        }
        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let edges: Vec<f64> = linspace(lo, hi, bins + 1).collect();
        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0u64; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }
        log::debug!("histogram of {} values over {} bins: {:?}", values.len(), bins, counts);
        Ok(Self { edges, counts })
    }

    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(first), Some(last)) if self.counts.len() > 0 => {
                (last - first) / self.counts.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Format an integer with comma thousands separators: `1234567` -> `1,234,567`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
