//! MACD (Moving Average Convergence Divergence) indicator

use crate::config::SignalThresholds;
use crate::data::{MarketData, PriceSeries};
use crate::error::IndicatorError;
use crate::indicators::{ensure_len, ewma, Indicator};
use crate::signal::{Category, Label, MacdReading, Reading};
use crate::Result;
use tracing::debug;

/// Histogram magnitude, relative to the latest price, that counts as zero.
const FLAT_HISTOGRAM_TOLERANCE: f64 = 1e-12;

/// MACD indicator
#[derive(Debug, Clone)]
pub struct MACD {
    short_span: usize,
    long_span: usize,
    signal_span: usize,
    neutral_band: f64,
}

/// MACD lines at every position
#[derive(Debug, Clone, PartialEq)]
pub struct MACDSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MACD {
    /// Create new MACD indicator
    pub fn new(short_span: usize, long_span: usize, signal_span: usize) -> Self {
        Self {
            short_span,
            long_span,
            signal_span,
            neutral_band: SignalThresholds::default().neutral_band,
        }
    }

    /// Histogram band, relative to the MACD line, treated as neutral
    pub fn with_neutral_band(mut self, neutral_band: f64) -> Self {
        self.neutral_band = neutral_band;
        self
    }

    pub fn spans(&self) -> (usize, usize, usize) {
        (self.short_span, self.long_span, self.signal_span)
    }

    fn validate(&self) -> Result<()> {
        if self.short_span == 0 || self.long_span == 0 || self.signal_span == 0 {
            return Err(IndicatorError::invalid_params("MACD spans must be positive"));
        }
        if self.short_span >= self.long_span {
            return Err(IndicatorError::invalid_params(format!(
                "MACD short span ({}) must be below long span ({})",
                self.short_span, self.long_span
            )));
        }
        Ok(())
    }

    /// MACD, signal and histogram lines for the whole series
    pub fn series(&self, prices: &PriceSeries) -> Result<MACDSeries> {
        self.validate()?;
        prices.ensure_finite("MACD")?;

        let values = prices.as_slice();
        let ema_short = ewma(values, self.short_span)?;
        let ema_long = ewma(values, self.long_span)?;

        let macd: Vec<f64> = ema_short
            .iter()
            .zip(&ema_long)
            .map(|(short, long)| short - long)
            .collect();
        let signal = ewma(&macd, self.signal_span)?;
        let histogram = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        Ok(MACDSeries {
            macd,
            signal,
            histogram,
        })
    }

    /// Lines and state on the most recent point
    pub fn compute(&self, prices: &PriceSeries) -> Result<MacdReading> {
        self.validate()?;
        ensure_len("MACD", self.required_len(), prices.len())?;

        let lines = self.series(prices)?;
        let last = prices.len() - 1;
        let (macd, signal, histogram) = (lines.macd[last], lines.signal[last], lines.histogram[last]);
        let latest = prices.as_slice()[last];

        let (state, info) = classify_macd(macd, signal, histogram, latest, self.neutral_band);
        debug!(
            "MACD({},{},{}): macd={:.4}, signal={:.4}, histogram={:.4}, state={}",
            self.short_span, self.long_span, self.signal_span, macd, signal, histogram, state
        );

        Ok(MacdReading {
            macd,
            signal,
            histogram,
            state,
            info,
        })
    }
}

impl Default for MACD {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl Indicator for MACD {
    fn name(&self) -> &str {
        "MACD"
    }

    fn required_len(&self) -> usize {
        self.long_span + self.signal_span
    }

    fn evaluate(&self, data: &MarketData) -> Result<Reading> {
        self.compute(data.closes()).map(Reading::from)
    }
}

/// Histogram near zero (relative to the MACD line, or numerically zero at the
/// price scale) is neutral; otherwise MACD above signal is good.
pub fn classify_macd(
    macd: f64,
    signal: f64,
    histogram: f64,
    latest_price: f64,
    neutral_band: f64,
) -> (Category, Label) {
    let converged = histogram.abs() < neutral_band * macd.abs()
        || histogram.abs() <= FLAT_HISTOGRAM_TOLERANCE * latest_price.abs();
    if converged {
        (Category::Neutral, Label::Neutral)
    } else if macd > signal {
        (Category::Good, Label::Good)
    } else {
        (Category::Bad, Label::Bad)
    }
}
