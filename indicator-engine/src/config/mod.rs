//! Configuration module

pub mod periods;
pub mod thresholds;

pub use periods::*;
pub use thresholds::*;

use anyhow::Context;
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Full engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub periods: IndicatorPeriods,
    pub thresholds: SignalThresholds,
}

impl EngineConfig {
    /// Validate periods and thresholds
    pub fn validate(&self) -> crate::Result<()> {
        self.periods.validate()?;
        self.thresholds.validate()
    }

    /// Load from `INDICATOR_*` environment variables (and `.env`), falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an explicit variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();
        let p = &defaults.periods;
        let t = &defaults.thresholds;

        let sma_windows = match lookup("INDICATOR_SMA_WINDOWS") {
            Some(raw) => raw
                .split(',')
                .map(|w| {
                    w.trim()
                        .parse::<usize>()
                        .with_context(|| format!("INDICATOR_SMA_WINDOWS: invalid window {:?}", w))
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => p.sma_windows.clone(),
        };

        let config = EngineConfig {
            periods: IndicatorPeriods {
                sma_windows,
                macd_short: var_or(&lookup, "INDICATOR_MACD_SHORT", p.macd_short)?,
                macd_long: var_or(&lookup, "INDICATOR_MACD_LONG", p.macd_long)?,
                macd_signal: var_or(&lookup, "INDICATOR_MACD_SIGNAL", p.macd_signal)?,
                stochastic_period: var_or(
                    &lookup,
                    "INDICATOR_STOCHASTIC_PERIOD",
                    p.stochastic_period,
                )?,
                stochastic_smoothing: var_or(
                    &lookup,
                    "INDICATOR_STOCHASTIC_SMOOTHING",
                    p.stochastic_smoothing,
                )?,
                rsi_period: var_or(&lookup, "INDICATOR_RSI_PERIOD", p.rsi_period)?,
                volatility_period: var_or(
                    &lookup,
                    "INDICATOR_VOLATILITY_PERIOD",
                    p.volatility_period,
                )?,
                trading_days_per_year: var_or(
                    &lookup,
                    "INDICATOR_TRADING_DAYS",
                    p.trading_days_per_year,
                )?,
            },
            thresholds: SignalThresholds {
                neutral_band: var_or(&lookup, "INDICATOR_NEUTRAL_BAND", t.neutral_band)?,
                rsi_oversold: var_or(&lookup, "INDICATOR_RSI_OVERSOLD", t.rsi_oversold)?,
                rsi_overbought: var_or(&lookup, "INDICATOR_RSI_OVERBOUGHT", t.rsi_overbought)?,
                stochastic_oversold: var_or(
                    &lookup,
                    "INDICATOR_STOCHASTIC_OVERSOLD",
                    t.stochastic_oversold,
                )?,
                stochastic_overbought: var_or(
                    &lookup,
                    "INDICATOR_STOCHASTIC_OVERBOUGHT",
                    t.stochastic_overbought,
                )?,
                volatility_low: var_or(&lookup, "INDICATOR_VOLATILITY_LOW", t.volatility_low)?,
                volatility_high: var_or(&lookup, "INDICATOR_VOLATILITY_HIGH", t.volatility_high)?,
            },
        };

        config
            .validate()
            .context("invalid indicator configuration")?;
        Ok(config)
    }
}

fn var_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{}: cannot parse {:?}", key, raw)),
        None => Ok(default),
    }
}
