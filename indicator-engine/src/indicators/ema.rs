//! EMA (Exponential Moving Average)
//!
//! Recursive smoothing with `alpha = 2 / (span + 1)`, seeded with the first
//! input and without bias correction:
//!
//! ```text
//! y[0] = x[0]
//! y[t] = alpha * x[t] + (1 - alpha) * y[t-1]
//! ```

use crate::error::IndicatorError;
use crate::Result;

/// Running EMA state
#[derive(Debug, Clone)]
pub struct EMA {
    alpha: f64,
    current: Option<f64>,
}

impl EMA {
    /// Create new EMA with the given span
    pub fn new(span: usize) -> Result<Self> {
        if span == 0 {
            return Err(IndicatorError::invalid_params("EMA span must be positive"));
        }
        Ok(Self {
            alpha: 2.0 / (span as f64 + 1.0),
            current: None,
        })
    }

    /// Feed the next value and return the updated average
    pub fn update(&mut self, value: f64) -> f64 {
        let next = match self.current {
            None => value,
            Some(prev) => self.alpha * value + (1.0 - self.alpha) * prev,
        };
        self.current = Some(next);
        next
    }
}

/// EMA of every position of `values`
pub fn ewma(values: &[f64], span: usize) -> Result<Vec<f64>> {
    let mut ema = EMA::new(span)?;
    Ok(values.iter().map(|&v| ema.update(v)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_seeds_average() {
        let result = ewma(&[10.0, 20.0], 3).unwrap();
        assert_eq!(result[0], 10.0);
        // alpha = 0.5
        assert!((result[1] - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_recursive_definition() {
        let values = [1.0, 3.0, 2.0, 5.0, 4.0];
        let result = ewma(&values, 4).unwrap();
        let alpha = 2.0 / 5.0;
        let mut expected = values[0];
        for (i, v) in values.iter().enumerate().skip(1) {
            expected = alpha * v + (1.0 - alpha) * expected;
            assert!((result[i] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_span_one_tracks_input() {
        let values = [4.0, 1.0, 7.5];
        assert_eq!(ewma(&values, 1).unwrap(), values.to_vec());
    }

    #[test]
    fn test_zero_span_is_rejected() {
        assert!(EMA::new(0).is_err());
        assert!(ewma(&[1.0], 0).is_err());
    }

    #[test]
    fn test_streaming_matches_batch() {
        let values = [100.0, 101.0, 99.5, 102.25];
        let mut ema = EMA::new(5).unwrap();
        let streamed: Vec<f64> = values.iter().map(|&v| ema.update(v)).collect();
        assert_eq!(streamed, ewma(&values, 5).unwrap());
    }
}
