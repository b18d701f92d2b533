//! Per-slot indicator results

use crate::error::IndicatorError;
use crate::signal::Reading;
use crate::Result;
use serde_json::{json, Value};

/// One dashboard slot: an indicator name and its own outcome
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSlot {
    pub name: String,
    pub result: Result<Reading>,
}

impl IndicatorSlot {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Results of every slot for one series, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSnapshot {
    symbol: Option<String>,
    slots: Vec<IndicatorSlot>,
}

impl IndicatorSnapshot {
    pub fn new(symbol: Option<String>, slots: Vec<IndicatorSlot>) -> Self {
        Self { symbol, slots }
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn slots(&self) -> &[IndicatorSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Outcome of the named slot
    pub fn get(&self, name: &str) -> Option<&Result<Reading>> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .map(|slot| &slot.result)
    }

    /// Reading of the named slot, if it succeeded
    pub fn reading(&self, name: &str) -> Option<&Reading> {
        self.get(name).and_then(|result| result.as_ref().ok())
    }

    pub fn successes(&self) -> impl Iterator<Item = (&str, &Reading)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.result.as_ref().ok().map(|r| (slot.name.as_str(), r)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &IndicatorError)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.result.as_ref().err().map(|e| (slot.name.as_str(), e)))
    }

    /// True when every slot produced a reading
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(IndicatorSlot::is_ok)
    }

    /// JSON handed to the summary stage: one entry per slot, either the
    /// reading fields or the error message.
    pub fn to_summary_json(&self) -> Value {
        let indicators: Vec<Value> = self
            .slots
            .iter()
            .map(|slot| match &slot.result {
                Ok(reading) => reading_json(&slot.name, reading),
                Err(err) => json!({ "name": slot.name, "error": err.to_string() }),
            })
            .collect();

        json!({
            "symbol": self.symbol,
            "indicators": indicators,
        })
    }
}

fn reading_json(name: &str, reading: &Reading) -> Value {
    match reading {
        Reading::Level(r) => json!({
            "name": name,
            "value": r.value,
            "state": r.state.as_str(),
            "info": r.info.as_str(),
        }),
        Reading::Macd(r) => json!({
            "name": name,
            "macd": r.macd,
            "signal": r.signal,
            "histogram": r.histogram,
            "state": r.state.as_str(),
            "info": r.info.as_str(),
        }),
        Reading::Stochastic(r) => json!({
            "name": name,
            "k": r.k,
            "d": r.d,
            "state": r.state.as_str(),
            "info": r.info.as_str(),
        }),
    }
}
