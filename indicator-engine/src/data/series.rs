//! Immutable price series handed to the indicators

use crate::error::IndicatorError;
use crate::Result;
use std::sync::Arc;

/// Ordered closing prices, oldest first.
///
/// The buffer is shared behind an `Arc`, so clones are cheap and the same
/// series can be read from several threads while indicators run.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    values: Arc<[f64]>,
}

impl PriceSeries {
    /// Create a series from owned values
    pub fn new(values: impl Into<Arc<[f64]>>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the raw values
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Most recent value
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Fail with `InvalidInput` on NaN or infinite values.
    pub fn ensure_finite(&self, indicator: &str) -> Result<()> {
        match self.values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(IndicatorError::invalid_input(format!(
                "{}: value at index {} is not finite",
                indicator, index
            ))),
            None => Ok(()),
        }
    }

    /// Fail with `InvalidInput` on values that are not strictly positive.
    pub fn ensure_positive(&self, indicator: &str) -> Result<()> {
        self.ensure_finite(indicator)?;
        match self.values.iter().position(|v| *v <= 0.0) {
            Some(index) => Err(IndicatorError::invalid_input(format!(
                "{}: price at index {} is not positive ({})",
                indicator, index, self.values[index]
            ))),
            None => Ok(()),
        }
    }
}

impl From<Vec<f64>> for PriceSeries {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl From<&[f64]> for PriceSeries {
    fn from(values: &[f64]) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f64]> for PriceSeries {
    fn as_ref(&self) -> &[f64] {
        self.as_slice()
    }
}

/// High, low and close series aligned by index.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcSeries {
    high: PriceSeries,
    low: PriceSeries,
    close: PriceSeries,
}

impl OhlcSeries {
    /// Build from parallel series; all three must have the same length and
    /// every bar must satisfy `low <= close <= high`.
    pub fn new(
        high: impl Into<PriceSeries>,
        low: impl Into<PriceSeries>,
        close: impl Into<PriceSeries>,
    ) -> Result<Self> {
        let (high, low, close) = (high.into(), low.into(), close.into());
        if high.len() != low.len() || low.len() != close.len() {
            return Err(IndicatorError::invalid_input(format!(
                "misaligned OHLC series: high={}, low={}, close={}",
                high.len(),
                low.len(),
                close.len()
            )));
        }
        let ohlc = Self::from_aligned(high, low, close);
        ohlc.ensure_consistent("OHLC")?;
        Ok(ohlc)
    }

    /// Caller guarantees equal lengths (e.g. columns of one candle series).
    pub(crate) fn from_aligned(high: PriceSeries, low: PriceSeries, close: PriceSeries) -> Self {
        debug_assert!(high.len() == low.len() && low.len() == close.len());
        Self { high, low, close }
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// Fail with `InvalidInput` on a bar whose high is below its low or
    /// whose close lies outside `[low, high]`. NaN is left to `ensure_finite`.
    pub fn ensure_consistent(&self, indicator: &str) -> Result<()> {
        let bars = self
            .high
            .as_slice()
            .iter()
            .zip(self.low.as_slice())
            .zip(self.close.as_slice());
        for (index, ((&high, &low), &close)) in bars.enumerate() {
            if high < low || close < low || close > high {
                return Err(IndicatorError::invalid_input(format!(
                    "{}: inconsistent bar at index {} (high={}, low={}, close={})",
                    indicator, index, high, low, close
                )));
            }
        }
        Ok(())
    }

    pub fn high(&self) -> &PriceSeries {
        &self.high
    }

    pub fn low(&self) -> &PriceSeries {
        &self.low
    }

    pub fn close(&self) -> &PriceSeries {
        &self.close
    }
}

/// Everything an indicator may read: closes always, high/low when the data
/// source provided them.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketData {
    closes: PriceSeries,
    ohlc: Option<OhlcSeries>,
}

impl MarketData {
    /// Close-only data; indicators needing high/low will reject it
    pub fn from_closes(closes: impl Into<PriceSeries>) -> Self {
        Self {
            closes: closes.into(),
            ohlc: None,
        }
    }

    /// Full OHLC data; closes are taken from the close column
    pub fn from_ohlc(ohlc: OhlcSeries) -> Self {
        Self {
            closes: ohlc.close().clone(),
            ohlc: Some(ohlc),
        }
    }

    pub fn closes(&self) -> &PriceSeries {
        &self.closes
    }

    pub fn ohlc(&self) -> Option<&OhlcSeries> {
        self.ohlc.as_ref()
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive_reports_index() {
        let series = PriceSeries::from(vec![1.0, 0.0, 3.0]);
        let err = series.ensure_positive("Volatility").unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidInput(ref msg) if msg.contains("index 1")));
    }

    #[test]
    fn test_ensure_finite_rejects_nan() {
        let series = PriceSeries::from(vec![1.0, f64::NAN]);
        assert!(series.ensure_finite("SMA10").is_err());
        assert!(PriceSeries::from(vec![1.0, 2.0]).ensure_finite("SMA10").is_ok());
    }

    #[test]
    fn test_ohlc_rejects_misaligned_lengths() {
        let err = OhlcSeries::new(vec![1.0, 2.0], vec![1.0], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidInput(_)));
    }

    #[test]
    fn test_ohlc_rejects_high_below_low() {
        let err = OhlcSeries::new(vec![10.0, 9.0], vec![9.0, 11.0], vec![9.5, 10.0]).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidInput(ref msg) if msg.contains("index 1")));
    }

    #[test]
    fn test_ohlc_rejects_close_outside_range() {
        let above = OhlcSeries::new(vec![10.0], vec![9.0], vec![10.5]).unwrap_err();
        assert!(matches!(above, IndicatorError::InvalidInput(_)));
        let below = OhlcSeries::new(vec![10.0], vec![9.0], vec![8.0]).unwrap_err();
        assert!(matches!(below, IndicatorError::InvalidInput(_)));
        // close on either edge is fine
        assert!(OhlcSeries::new(vec![10.0, 10.0], vec![9.0, 9.0], vec![9.0, 10.0]).is_ok());
    }

    #[test]
    fn test_clones_share_buffer() {
        let series = PriceSeries::from(vec![1.0, 2.0]);
        let copy = series.clone();
        assert!(std::ptr::eq(series.as_slice(), copy.as_slice()));
    }
}
