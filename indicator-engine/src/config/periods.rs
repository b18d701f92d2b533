//! Indicator window configuration

use crate::error::IndicatorError;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Window lengths and spans for every indicator slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorPeriods {
    /// SMA windows, one dashboard slot each
    pub sma_windows: Vec<usize>,
    /// MACD short EMA span
    pub macd_short: usize,
    /// MACD long EMA span
    pub macd_long: usize,
    /// MACD signal EMA span
    pub macd_signal: usize,
    /// Stochastic %K lookback
    pub stochastic_period: usize,
    /// Stochastic %D smoothing window
    pub stochastic_smoothing: usize,
    /// RSI period
    pub rsi_period: usize,
    /// Volatility rolling window (log returns)
    pub volatility_period: usize,
    /// Annualization factor for volatility
    pub trading_days_per_year: usize,
}

impl Default for IndicatorPeriods {
    fn default() -> Self {
        Self {
            sma_windows: vec![10, 50, 200],
            macd_short: 12,
            macd_long: 26,
            macd_signal: 9,
            stochastic_period: 14,
            stochastic_smoothing: 3,
            rsi_period: 14,
            volatility_period: 30,
            trading_days_per_year: 252,
        }
    }
}

impl IndicatorPeriods {
    /// Reject windows that cannot produce a value
    pub fn validate(&self) -> Result<()> {
        if self.sma_windows.is_empty() {
            return Err(IndicatorError::invalid_params("at least one SMA window is required"));
        }
        for (i, window) in self.sma_windows.iter().enumerate() {
            if *window == 0 {
                return Err(IndicatorError::invalid_params("SMA window must be positive"));
            }
            if self.sma_windows[..i].contains(window) {
                return Err(IndicatorError::invalid_params(format!(
                    "duplicate SMA window {}",
                    window
                )));
            }
        }

        let positive = [
            ("macd_short", self.macd_short),
            ("macd_long", self.macd_long),
            ("macd_signal", self.macd_signal),
            ("stochastic_period", self.stochastic_period),
            ("stochastic_smoothing", self.stochastic_smoothing),
            ("rsi_period", self.rsi_period),
            ("trading_days_per_year", self.trading_days_per_year),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(IndicatorError::invalid_params(format!("{} must be positive", name)));
        }

        if self.macd_short >= self.macd_long {
            return Err(IndicatorError::invalid_params(format!(
                "MACD short span ({}) must be below long span ({})",
                self.macd_short, self.macd_long
            )));
        }
        if self.volatility_period < 2 {
            return Err(IndicatorError::invalid_params(
                "volatility_period must be at least 2",
            ));
        }
        Ok(())
    }
}
