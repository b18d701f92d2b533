//! Indicator reading types

use crate::signal::{Category, Label};
use serde::Serialize;

/// Single-value reading (SMA, RSI, volatility)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelReading {
    pub value: f64,
    pub state: Category,
    pub info: Label,
}

/// MACD reading on the most recent point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdReading {
    /// Short EMA minus long EMA
    pub macd: f64,
    /// EMA of the MACD line
    pub signal: f64,
    /// MACD minus signal
    pub histogram: f64,
    pub state: Category,
    pub info: Label,
}

/// Stochastic oscillator reading on the most recent point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StochasticReading {
    /// %K in percent
    pub k: f64,
    /// %D, the moving average of %K
    pub d: f64,
    pub state: Category,
    pub info: Label,
}

/// Any indicator's reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reading {
    Level(LevelReading),
    Macd(MacdReading),
    Stochastic(StochasticReading),
}

impl Reading {
    pub fn state(&self) -> Category {
        match self {
            Reading::Level(r) => r.state,
            Reading::Macd(r) => r.state,
            Reading::Stochastic(r) => r.state,
        }
    }

    pub fn info(&self) -> Label {
        match self {
            Reading::Level(r) => r.info,
            Reading::Macd(r) => r.info,
            Reading::Stochastic(r) => r.info,
        }
    }

    /// Headline number: the level, the MACD line, or %K
    pub fn value(&self) -> f64 {
        match self {
            Reading::Level(r) => r.value,
            Reading::Macd(r) => r.macd,
            Reading::Stochastic(r) => r.k,
        }
    }

    pub fn as_level(&self) -> Option<&LevelReading> {
        match self {
            Reading::Level(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_macd(&self) -> Option<&MacdReading> {
        match self {
            Reading::Macd(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_stochastic(&self) -> Option<&StochasticReading> {
        match self {
            Reading::Stochastic(r) => Some(r),
            _ => None,
        }
    }
}

impl From<LevelReading> for Reading {
    fn from(reading: LevelReading) -> Self {
        Reading::Level(reading)
    }
}

impl From<MacdReading> for Reading {
    fn from(reading: MacdReading) -> Self {
        Reading::Macd(reading)
    }
}

impl From<StochasticReading> for Reading {
    fn from(reading: StochasticReading) -> Self {
        Reading::Stochastic(reading)
    }
}
