//! Realized volatility indicator
//!
//! Rolling sample standard deviation of log returns, annualized with the
//! square root of the trading days per year.

use crate::config::{IndicatorPeriods, SignalThresholds};
use crate::data::{MarketData, PriceSeries};
use crate::error::IndicatorError;
use crate::indicators::{ensure_len, rolling_std, Indicator};
use crate::signal::{Category, Label, LevelReading, Reading};
use crate::Result;
use tracing::debug;

/// Annualized realized volatility
#[derive(Debug, Clone)]
pub struct Volatility {
    period: usize,
    trading_days: usize,
    low: f64,
    high: f64,
}

impl Volatility {
    /// Create new volatility indicator over `period` log returns
    pub fn new(period: usize) -> Self {
        let thresholds = SignalThresholds::default();
        Self {
            period,
            trading_days: IndicatorPeriods::default().trading_days_per_year,
            low: thresholds.volatility_low,
            high: thresholds.volatility_high,
        }
    }

    pub fn with_trading_days(mut self, trading_days: usize) -> Self {
        self.trading_days = trading_days;
        self
    }

    pub fn with_thresholds(mut self, low: f64, high: f64) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Annualized volatility at every position; the first `period`
    /// positions are `None`
    pub fn series(&self, prices: &PriceSeries) -> Result<Vec<Option<f64>>> {
        if self.period < 2 {
            return Err(IndicatorError::invalid_params(
                "volatility period must be at least 2",
            ));
        }
        let returns = log_returns(prices)?;
        let annualize = (self.trading_days as f64).sqrt();

        let mut out = vec![None; prices.len()];
        for (i, std) in rolling_std(&returns, self.period)?.into_iter().enumerate() {
            out[i + 1] = std.map(|s| s * annualize);
        }
        Ok(out)
    }

    /// Value and state on the most recent close
    pub fn compute(&self, prices: &PriceSeries) -> Result<LevelReading> {
        let required = self.period + 1;
        ensure_len("Volatility", required, prices.len())?;

        let Some(value) = self.series(prices)?.last().copied().flatten() else {
            return Err(IndicatorError::insufficient("Volatility", required, prices.len()));
        };

        let (state, info) = classify_volatility(value, self.low, self.high);
        debug!("Volatility({}): value={:.4}, state={}", self.period, value, state);

        Ok(LevelReading { value, state, info })
    }
}

impl Default for Volatility {
    fn default() -> Self {
        Self::new(30)
    }
}

impl Indicator for Volatility {
    fn name(&self) -> &str {
        "Volatility"
    }

    fn required_len(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, data: &MarketData) -> Result<Reading> {
        self.compute(data.closes()).map(Reading::from)
    }
}

/// `ln(p[t] / p[t-1])` for every consecutive pair; prices must be positive
pub fn log_returns(prices: &PriceSeries) -> Result<Vec<f64>> {
    prices.ensure_positive("Volatility")?;
    Ok(prices
        .as_slice()
        .windows(2)
        .map(|w| (w[1] / w[0]).ln())
        .collect())
}

pub fn classify_volatility(value: f64, low: f64, high: f64) -> (Category, Label) {
    if value < low {
        (Category::None, Label::LowVolatility)
    } else if value > high {
        (Category::Bad, Label::HighVolatility)
    } else {
        (Category::Neutral, Label::Neutral)
    }
}
