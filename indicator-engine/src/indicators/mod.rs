//! Technical indicators module
//!
//! Each indicator is a pure function of an immutable series: it validates its
//! own input, computes the full rolling series, and classifies the most
//! recent point into a `Category` plus `Label`.

pub mod ema;
pub mod macd;
pub mod rolling;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod volatility;

pub use ema::*;
pub use macd::*;
pub use rolling::*;
pub use rsi::*;
pub use sma::*;
pub use stochastic::*;
pub use volatility::*;

use crate::data::{MarketData, OhlcSeries, PriceSeries};
use crate::error::IndicatorError;
use crate::signal::{LevelReading, MacdReading, Reading, StochasticReading};
use crate::Result;

/// Indicator trait for all indicators
pub trait Indicator: Send + Sync {
    /// Slot name (e.g., "SMA50", "RSI")
    fn name(&self) -> &str;

    /// Minimum number of points needed for a reading
    fn required_len(&self) -> usize;

    /// Compute the reading for the most recent point
    fn evaluate(&self, data: &MarketData) -> Result<Reading>;
}

pub(crate) fn ensure_len(indicator: &str, required: usize, actual: usize) -> Result<()> {
    if actual < required {
        return Err(IndicatorError::insufficient(indicator, required, actual));
    }
    Ok(())
}

/// Simple moving average over the last `period` closes
pub fn sma(prices: &PriceSeries, period: usize) -> Result<LevelReading> {
    SMA::new(period).compute(prices)
}

/// MACD with explicit spans
pub fn macd(
    prices: &PriceSeries,
    short_span: usize,
    long_span: usize,
    signal_span: usize,
) -> Result<MacdReading> {
    MACD::new(short_span, long_span, signal_span).compute(prices)
}

/// Stochastic oscillator with the given %K lookback and %D smoothing of 3
pub fn stochastic(ohlc: &OhlcSeries, period: usize) -> Result<StochasticReading> {
    Stochastic::new(period).compute(ohlc)
}

/// RSI with the given period
pub fn rsi(prices: &PriceSeries, period: usize) -> Result<LevelReading> {
    RSI::new(period).compute(prices)
}

/// Annualized realized volatility over the given window of log returns
pub fn volatility(prices: &PriceSeries, period: usize) -> Result<LevelReading> {
    Volatility::new(period).compute(prices)
}
