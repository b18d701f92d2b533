//! Indicator dashboard
//!
//! Evaluates every configured indicator slot over one price history. Slots
//! are independent: a slot that fails (too little history, bad prices) is
//! recorded as an error and the remaining slots are still computed.

pub mod snapshot;

pub use snapshot::*;

use crate::config::EngineConfig;
use crate::data::{CandleSeries, MarketData};
use crate::indicators::{Indicator, MACD, RSI, SMA, Stochastic, Volatility};
use crate::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ordered set of indicator slots
#[derive(Clone)]
pub struct Dashboard {
    indicators: Vec<Arc<dyn Indicator>>,
}

impl Dashboard {
    /// Build the standard slots (SMAs, MACD, stochastic, RSI, volatility)
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let dashboard = Self::build(config);
        info!(
            "Indicator dashboard configured with {} slots: {}",
            dashboard.indicators.len(),
            dashboard.slot_names().join(", ")
        );
        Ok(dashboard)
    }

    /// Custom slot list, evaluated in the given order
    pub fn with_indicators(indicators: Vec<Arc<dyn Indicator>>) -> Self {
        Self { indicators }
    }

    fn build(config: &EngineConfig) -> Self {
        let p = &config.periods;
        let t = &config.thresholds;

        let mut indicators: Vec<Arc<dyn Indicator>> = p
            .sma_windows
            .iter()
            .map(|&window| {
                Arc::new(SMA::new(window).with_neutral_band(t.neutral_band)) as Arc<dyn Indicator>
            })
            .collect();

        indicators.push(Arc::new(
            MACD::new(p.macd_short, p.macd_long, p.macd_signal).with_neutral_band(t.neutral_band),
        ));
        indicators.push(Arc::new(
            Stochastic::new(p.stochastic_period)
                .with_smoothing(p.stochastic_smoothing)
                .with_thresholds(t.stochastic_oversold, t.stochastic_overbought),
        ));
        indicators.push(Arc::new(
            RSI::new(p.rsi_period).with_thresholds(t.rsi_oversold, t.rsi_overbought),
        ));
        indicators.push(Arc::new(
            Volatility::new(p.volatility_period)
                .with_trading_days(p.trading_days_per_year)
                .with_thresholds(t.volatility_low, t.volatility_high),
        ));

        Self { indicators }
    }

    pub fn indicators(&self) -> &[Arc<dyn Indicator>] {
        &self.indicators
    }

    pub fn slot_names(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.name()).collect()
    }

    /// History length at which every slot can produce a reading
    pub fn required_len(&self) -> usize {
        self.indicators
            .iter()
            .map(|i| i.required_len())
            .max()
            .unwrap_or(0)
    }

    /// Evaluate every slot over a candle history
    pub fn evaluate(&self, candles: &CandleSeries) -> IndicatorSnapshot {
        let data = MarketData::from_ohlc(candles.ohlc());
        let slots = self.evaluate_slots(&data);
        IndicatorSnapshot::new(Some(candles.symbol.clone()), slots)
    }

    /// Evaluate every slot over already extracted series
    pub fn evaluate_data(&self, data: &MarketData) -> IndicatorSnapshot {
        IndicatorSnapshot::new(None, self.evaluate_slots(data))
    }

    fn evaluate_slots(&self, data: &MarketData) -> Vec<IndicatorSlot> {
        let slots: Vec<IndicatorSlot> = self
            .indicators
            .iter()
            .map(|indicator| evaluate_slot(indicator.as_ref(), data))
            .collect();

        let failed = slots.iter().filter(|slot| !slot.is_ok()).count();
        info!(
            "Evaluated {} indicator slots over {} points ({} failed)",
            slots.len(),
            data.len(),
            failed
        );
        slots
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::build(&EngineConfig::default())
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("slots", &self.slot_names())
            .finish()
    }
}

/// Evaluate one indicator into a slot, logging the outcome
pub fn evaluate_slot(indicator: &dyn Indicator, data: &MarketData) -> IndicatorSlot {
    let result = indicator.evaluate(data);
    match &result {
        Ok(reading) => debug!(
            "{}: value={:.4}, state={}, info={}",
            indicator.name(),
            reading.value(),
            reading.state(),
            reading.info()
        ),
        Err(err) => warn!("{} failed: {}", indicator.name(), err),
    }
    IndicatorSlot {
        name: indicator.name().to_string(),
        result,
    }
}
