//! Trailing-window statistics
//!
//! Every helper returns one entry per input position. Positions before the
//! first complete window are `None`. Each window is summed on its own, so a
//! value never depends on rounding residue from points that already left the
//! window.

use crate::error::IndicatorError;
use crate::Result;

/// Apply `stat` to every complete trailing window of `window` points.
pub fn rolling_apply<F>(values: &[f64], window: usize, stat: F) -> Result<Vec<Option<f64>>>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return Err(IndicatorError::invalid_params("rolling window must be positive"));
    }
    let mut out = vec![None; values.len()];
    for end in (window - 1)..values.len() {
        out[end] = Some(stat(&values[end + 1 - window..=end]));
    }
    Ok(out)
}

/// Arithmetic mean of each trailing window
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    rolling_apply(values, window, mean)
}

/// Minimum of each trailing window
pub fn rolling_min(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    rolling_apply(values, window, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Maximum of each trailing window
pub fn rolling_max(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Sample standard deviation (divisor `window - 1`) of each trailing window
pub fn rolling_std(values: &[f64], window: usize) -> Result<Vec<Option<f64>>> {
    if window < 2 {
        return Err(IndicatorError::invalid_params(
            "sample standard deviation needs a window of at least 2",
        ));
    }
    rolling_apply(values, window, sample_std)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn sample_std(values: &[f64]) -> f64 {
    let avg = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - avg) * (v - avg)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}
