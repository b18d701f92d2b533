//! OHLCV candle data structures

use crate::data::{OhlcSeries, PriceSeries};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candle data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
    /// Start of the period
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}

/// Price history for one instrument, oldest candle first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandleSeries {
    /// Ticker (e.g., "AAPL")
    pub symbol: String,
    /// Timeframe (e.g., "1d")
    pub timeframe: String,
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Create new empty series
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            candles: Vec::new(),
        }
    }

    /// Create from vector of candles
    pub fn from_vec(
        symbol: impl Into<String>,
        timeframe: impl Into<String>,
        candles: Vec<Candle>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            candles,
        }
    }

    /// Add a candle
    pub fn push(&mut self, candle: Candle) {
        self.candles.push(candle);
    }

    /// Get number of candles
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get last candle
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Get all candles
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Close prices as an immutable series
    pub fn closes(&self) -> PriceSeries {
        self.column(|c| c.close)
    }

    /// High/low/close columns, aligned by construction
    pub fn ohlc(&self) -> OhlcSeries {
        OhlcSeries::from_aligned(
            self.column(|c| c.high),
            self.column(|c| c.low),
            self.closes(),
        )
    }

    /// Sort by timestamp (oldest first)
    pub fn sort_by_time(&mut self) {
        self.candles.sort_by_key(|c| c.timestamp);
    }

    fn column(&self, pick: impl Fn(&Candle) -> f64) -> PriceSeries {
        self.candles.iter().map(pick).collect::<Vec<_>>().into()
    }
}
