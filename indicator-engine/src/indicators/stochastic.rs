//! Stochastic Oscillator indicator
//!
//! ```text
//! %K = 100 * (Close - LowestLow(p)) / (HighestHigh(p) - LowestLow(p))
//! %D = SMA(%K, smoothing)
//! ```
//!
//! A window whose highest high equals its lowest low has no defined %K. Such
//! points are reported at the midpoint (50) so the numbers stay finite, and a
//! reading that depends on any of them carries no signal.

use crate::config::SignalThresholds;
use crate::data::{MarketData, OhlcSeries};
use crate::error::IndicatorError;
use crate::indicators::rolling::mean;
use crate::indicators::{ensure_len, rolling_max, rolling_min, Indicator};
use crate::signal::{Category, Label, Reading, StochasticReading};
use crate::Result;
use tracing::debug;

const FLAT_WINDOW_K: f64 = 50.0;

/// Stochastic oscillator
#[derive(Debug, Clone)]
pub struct Stochastic {
    period: usize,
    smoothing: usize,
    oversold: f64,
    overbought: f64,
}

/// %K and %D at every position
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticSeries {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
    /// True where the %K window had zero range
    pub flat: Vec<bool>,
}

impl Stochastic {
    /// Create new stochastic oscillator with %D smoothing of 3
    pub fn new(period: usize) -> Self {
        let thresholds = SignalThresholds::default();
        Self {
            period,
            smoothing: 3,
            oversold: thresholds.stochastic_oversold,
            overbought: thresholds.stochastic_overbought,
        }
    }

    pub fn with_smoothing(mut self, smoothing: usize) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_thresholds(mut self, oversold: f64, overbought: f64) -> Self {
        self.oversold = oversold;
        self.overbought = overbought;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn validate(&self) -> Result<()> {
        if self.period == 0 || self.smoothing == 0 {
            return Err(IndicatorError::invalid_params(
                "stochastic period and smoothing must be positive",
            ));
        }
        Ok(())
    }

    /// %K, %D and flat-window flags for the whole series
    pub fn series(&self, ohlc: &OhlcSeries) -> Result<StochasticSeries> {
        self.validate()?;
        ohlc.high().ensure_finite("Stochastic")?;
        ohlc.low().ensure_finite("Stochastic")?;
        ohlc.close().ensure_finite("Stochastic")?;
        ohlc.ensure_consistent("Stochastic")?;

        let lowest = rolling_min(ohlc.low().as_slice(), self.period)?;
        let highest = rolling_max(ohlc.high().as_slice(), self.period)?;
        let closes = ohlc.close().as_slice();

        let len = ohlc.len();
        let mut k = vec![None; len];
        let mut flat = vec![false; len];
        for t in 0..len {
            if let (Some(lo), Some(hi)) = (lowest[t], highest[t]) {
                let range = hi - lo;
                if range > 0.0 {
                    k[t] = Some(100.0 * (closes[t] - lo) / range);
                } else if range == 0.0 {
                    k[t] = Some(FLAT_WINDOW_K);
                    flat[t] = true;
                } else {
                    return Err(IndicatorError::invalid_input(format!(
                        "Stochastic: window ending at {} has high {} below low {}",
                        t, hi, lo
                    )));
                }
            }
        }

        let d = (0..len)
            .map(|t| {
                if t + 1 < self.smoothing {
                    return None;
                }
                k[t + 1 - self.smoothing..=t]
                    .iter()
                    .copied()
                    .collect::<Option<Vec<f64>>>()
                    .map(|window| mean(&window))
            })
            .collect();

        Ok(StochasticSeries { k, d, flat })
    }

    /// %K, %D and crossover state on the two most recent points
    pub fn compute(&self, ohlc: &OhlcSeries) -> Result<StochasticReading> {
        self.validate()?;
        let required = self.required_len();
        ensure_len("Stochastic", required, ohlc.len())?;

        let series = self.series(ohlc)?;
        let last = ohlc.len() - 1;
        let (Some(k), Some(d), Some(k_prev), Some(d_prev)) = (
            series.k[last],
            series.d[last],
            series.k[last - 1],
            series.d[last - 1],
        ) else {
            return Err(IndicatorError::insufficient("Stochastic", required, ohlc.len()));
        };

        // every %K that feeds the previous and the latest %D
        let flat_window = series.flat[last - self.smoothing..=last].iter().any(|f| *f);
        let (state, info) = if flat_window {
            (Category::None, Label::NoSignal)
        } else {
            classify_stochastic(k, d, k_prev, d_prev, self.oversold, self.overbought)
        };

        debug!(
            "Stochastic({}): %K={:.2}, %D={:.2}, previous %K={:.2}, %D={:.2}, flat={}, state={}",
            self.period, k, d, k_prev, d_prev, flat_window, state
        );

        Ok(StochasticReading { k, d, state, info })
    }
}

impl Default for Stochastic {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Stochastic {
    fn name(&self) -> &str {
        "Stochastic"
    }

    fn required_len(&self) -> usize {
        self.period + self.smoothing
    }

    fn evaluate(&self, data: &MarketData) -> Result<Reading> {
        let ohlc = data.ohlc().ok_or_else(|| {
            IndicatorError::invalid_input("Stochastic: high/low series are required")
        })?;
        self.compute(ohlc).map(Reading::from)
    }
}

/// Crossover state machine over the latest and previous (%K, %D) pairs.
///
/// A fresh crossover takes precedence over the overbought/oversold zones,
/// except that a bullish cross above `overbought` is still bad and a bearish
/// cross below `oversold` is only neutral.
pub fn classify_stochastic(
    k: f64,
    d: f64,
    k_prev: f64,
    d_prev: f64,
    oversold: f64,
    overbought: f64,
) -> (Category, Label) {
    if k > d && k_prev <= d_prev {
        if k > overbought {
            (Category::Bad, Label::Overbought)
        } else {
            (Category::Good, Label::Good)
        }
    } else if k < d && k_prev >= d_prev {
        if k < oversold {
            (Category::Neutral, Label::Oversold)
        } else {
            (Category::Bad, Label::Bad)
        }
    } else if k > overbought {
        (Category::Bad, Label::Overbought)
    } else if k < oversold {
        (Category::Good, Label::Oversold)
    } else {
        (Category::None, Label::NoSignal)
    }
}
