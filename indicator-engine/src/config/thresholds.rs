//! Classification thresholds

use crate::error::IndicatorError;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Cut-offs used to turn indicator values into a `Category`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// Relative band treated as "at the average" (e.g., 0.01 = 1%)
    pub neutral_band: f64,
    /// RSI below this is oversold
    pub rsi_oversold: f64,
    /// RSI above this is overbought
    pub rsi_overbought: f64,
    /// %K below this is oversold
    pub stochastic_oversold: f64,
    /// %K above this is overbought
    pub stochastic_overbought: f64,
    /// Annualized volatility below this is low (e.g., 0.15 = 15%)
    pub volatility_low: f64,
    /// Annualized volatility above this is high
    pub volatility_high: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            neutral_band: 0.01,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            stochastic_oversold: 20.0,
            stochastic_overbought: 80.0,
            volatility_low: 0.15,
            volatility_high: 0.30,
        }
    }
}

impl SignalThresholds {
    pub fn validate(&self) -> Result<()> {
        if !self.neutral_band.is_finite() || self.neutral_band < 0.0 {
            return Err(IndicatorError::invalid_params(format!(
                "neutral_band must be a non-negative number, got {}",
                self.neutral_band
            )));
        }
        check_bounds("rsi", self.rsi_oversold, self.rsi_overbought, 100.0)?;
        check_bounds(
            "stochastic",
            self.stochastic_oversold,
            self.stochastic_overbought,
            100.0,
        )?;
        check_bounds(
            "volatility",
            self.volatility_low,
            self.volatility_high,
            f64::INFINITY,
        )
    }
}

fn check_bounds(name: &str, lower: f64, upper: f64, max: f64) -> Result<()> {
    if lower.is_nan() || upper.is_nan() || lower < 0.0 || upper > max || lower >= upper {
        return Err(IndicatorError::invalid_params(format!(
            "{} thresholds must satisfy 0 <= {} < {} <= {}",
            name, lower, upper, max
        )));
    }
    Ok(())
}
