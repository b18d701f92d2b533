//! RSI (Relative Strength Index) indicator
//!
//! Simple-average RSI: gains and losses are averaged over a plain rolling
//! window (not Wilder smoothing).

use crate::config::SignalThresholds;
use crate::data::{MarketData, PriceSeries};
use crate::error::IndicatorError;
use crate::indicators::{ensure_len, rolling_mean, Indicator};
use crate::signal::{Category, Label, LevelReading, Reading};
use crate::Result;
use tracing::debug;

/// RSI indicator
#[derive(Debug, Clone)]
pub struct RSI {
    period: usize,
    oversold: f64,
    overbought: f64,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Self {
        let thresholds = SignalThresholds::default();
        Self {
            period,
            oversold: thresholds.rsi_oversold,
            overbought: thresholds.rsi_overbought,
        }
    }

    pub fn with_thresholds(mut self, oversold: f64, overbought: f64) -> Self {
        self.oversold = oversold;
        self.overbought = overbought;
        self
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }

    /// RSI at every position; the first `period` positions are `None`
    pub fn series(&self, prices: &PriceSeries) -> Result<Vec<Option<f64>>> {
        if self.period == 0 {
            return Err(IndicatorError::invalid_params("RSI period must be positive"));
        }
        prices.ensure_finite("RSI")?;

        let values = prices.as_slice();
        let deltas: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
        let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

        let mean_gain = rolling_mean(&gains, self.period)?;
        let mean_loss = rolling_mean(&losses, self.period)?;

        // delta i belongs to price i + 1
        let mut out = vec![None; values.len()];
        for (i, (gain, loss)) in mean_gain.iter().zip(&mean_loss).enumerate() {
            if let (Some(gain), Some(loss)) = (gain, loss) {
                out[i + 1] = Some(rsi_from_means(*gain, *loss));
            }
        }
        Ok(out)
    }

    /// Value and state on the most recent close
    pub fn compute(&self, prices: &PriceSeries) -> Result<LevelReading> {
        let required = self.period + 1;
        ensure_len("RSI", required, prices.len())?;

        let Some(value) = self.series(prices)?.last().copied().flatten() else {
            return Err(IndicatorError::insufficient("RSI", required, prices.len()));
        };

        let (state, info) = classify_rsi(value, self.oversold, self.overbought);
        debug!("RSI({}): value={:.2}, state={}", self.period, value, state);

        Ok(LevelReading { value, state, info })
    }
}

impl Default for RSI {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for RSI {
    fn name(&self) -> &str {
        "RSI"
    }

    fn required_len(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, data: &MarketData) -> Result<Reading> {
        self.compute(data.closes()).map(Reading::from)
    }
}

/// `100 - 100 / (1 + gain / loss)` with the zero-loss cases pinned:
/// only gains saturates at 100, no movement at all sits at 50.
pub fn rsi_from_means(mean_gain: f64, mean_loss: f64) -> f64 {
    if mean_loss == 0.0 {
        if mean_gain == 0.0 {
            50.0
        } else {
            100.0
        }
    } else {
        100.0 - 100.0 / (1.0 + mean_gain / mean_loss)
    }
}

/// Below `oversold` is a contrarian buy (good), above `overbought` is bad
pub fn classify_rsi(value: f64, oversold: f64, overbought: f64) -> (Category, Label) {
    if value < oversold {
        (Category::Good, Label::Oversold)
    } else if value > overbought {
        (Category::Bad, Label::Overbought)
    } else {
        (Category::None, Label::Normal)
    }
}

/// Calculate RSI from a series of values
pub fn calculate_rsi(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    RSI::new(period).series(&PriceSeries::from(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_rising_series_saturates() {
        let prices: PriceSeries = (0..20).map(|i| 100.0 + i as f64).collect::<Vec<_>>().into();
        let reading = RSI::default().compute(&prices).unwrap();
        assert_eq!(reading.value, 100.0);
        assert_eq!(reading.state, Category::Bad);
        assert_eq!(reading.info, Label::Overbought);
    }

    #[test]
    fn test_rsi_falling_series_is_zero() {
        let prices: PriceSeries = (0..20).map(|i| 100.0 - i as f64).collect::<Vec<_>>().into();
        let reading = RSI::default().compute(&prices).unwrap();
        assert_eq!(reading.value, 0.0);
        assert_eq!(reading.state, Category::Good);
        assert_eq!(reading.info, Label::Oversold);
    }

    #[test]
    fn test_rsi_flat_series_is_midpoint() {
        let prices = PriceSeries::from(vec![100.0; 15]);
        let reading = RSI::default().compute(&prices).unwrap();
        assert_eq!(reading.value, 50.0);
        assert_eq!(reading.state, Category::None);
        assert_eq!(reading.info, Label::Normal);
    }

    #[test]
    fn test_rsi_known_value() {
        // gains 2 + 2, losses 1 + 1 over period 4: RS = 2, RSI = 66.67
        let prices = PriceSeries::from(vec![10.0, 12.0, 11.0, 13.0, 12.0]);
        let reading = RSI::new(4).compute(&prices).unwrap();
        assert!((reading.value - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(reading.state, Category::None);
    }

    #[test]
    fn test_rsi_series_alignment() {
        let series = calculate_rsi(&[1.0, 2.0, 3.0, 2.0], 2).unwrap();
        assert_eq!(series.len(), 4);
        assert_eq!(series[0], None);
        assert_eq!(series[1], None);
        assert_eq!(series[2], Some(100.0));
        assert_eq!(series[3], Some(50.0));
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let prices = PriceSeries::from(vec![1.0; 14]);
        let err = RSI::default().compute(&prices).unwrap_err();
        assert_eq!(err, IndicatorError::insufficient("RSI", 15, 14));
    }

    #[test]
    fn test_rsi_stays_within_bounds() {
        let values: Vec<f64> = (0..100).map(|i| 50.0 + 5.0 * ((i as f64) * 0.7).cos()).collect();
        for value in calculate_rsi(&values, 14).unwrap().iter().flatten() {
            assert!((0.0..=100.0).contains(value));
        }
    }
}
