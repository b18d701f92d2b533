//! SMA (Simple Moving Average) indicator

use crate::config::SignalThresholds;
use crate::data::{MarketData, PriceSeries};
use crate::error::IndicatorError;
use crate::indicators::{ensure_len, rolling_mean, Indicator};
use crate::signal::{Category, Label, LevelReading, Reading};
use crate::Result;
use tracing::debug;

/// Trailing mean of the last `period` closes
#[derive(Debug, Clone)]
pub struct SMA {
    name: String,
    period: usize,
    neutral_band: f64,
}

impl SMA {
    /// Create new SMA indicator
    pub fn new(period: usize) -> Self {
        Self {
            name: format!("SMA{}", period),
            period,
            neutral_band: SignalThresholds::default().neutral_band,
        }
    }

    /// Relative distance from the average still treated as neutral
    pub fn with_neutral_band(mut self, neutral_band: f64) -> Self {
        self.neutral_band = neutral_band;
        self
    }

    /// Get SMA period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Rolling mean at every position
    pub fn series(&self, prices: &PriceSeries) -> Result<Vec<Option<f64>>> {
        prices.ensure_finite(&self.name)?;
        rolling_mean(prices.as_slice(), self.period)
    }

    /// Value and state on the most recent close
    pub fn compute(&self, prices: &PriceSeries) -> Result<LevelReading> {
        ensure_len(&self.name, self.period, prices.len())?;
        let series = self.series(prices)?;

        let (Some(latest), Some(avg)) = (prices.last(), series.last().copied().flatten()) else {
            return Err(IndicatorError::insufficient(&self.name, self.period, prices.len()));
        };

        let (state, info) = classify_sma(latest, avg, self.neutral_band);
        debug!("{}: close={:.4}, average={:.4}, state={}", self.name, latest, avg, state);

        Ok(LevelReading {
            value: avg,
            state,
            info,
        })
    }
}

impl Indicator for SMA {
    fn name(&self) -> &str {
        &self.name
    }

    fn required_len(&self) -> usize {
        self.period
    }

    fn evaluate(&self, data: &MarketData) -> Result<Reading> {
        self.compute(data.closes()).map(Reading::from)
    }
}

/// Close within `neutral_band` of the average is neutral, above is good,
/// below is bad.
pub fn classify_sma(latest: f64, avg: f64, neutral_band: f64) -> (Category, Label) {
    if (latest - avg).abs() < neutral_band * avg.abs() {
        (Category::Neutral, Label::Neutral)
    } else if latest > avg {
        (Category::Good, Label::Good)
    } else {
        (Category::Bad, Label::Bad)
    }
}

/// Calculate SMA from a series of values
pub fn calculate_sma(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    rolling_mean(values, period)
}
