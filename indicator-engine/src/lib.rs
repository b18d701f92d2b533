//! Indicator Engine: technical indicators with qualitative signal states
//!
//! Turns an already retrieved price history into indicator readings. Every
//! reading carries a numeric value, a coarse [`Category`](signal::Category)
//! and a short language-neutral [`Label`](signal::Label).
//!
//! # Features
//!
//! - **Data**: immutable, thread-shareable price and OHLC series built from candles
//! - **Indicators**: SMA, MACD, Stochastic Oscillator, RSI, realized volatility
//! - **Dashboard**: evaluates every slot independently and keeps per-slot failures
//! - **Configuration**: serde/env driven periods and thresholds
//!
//! Indicators are pure: they never mutate their input and identical input
//! yields identical output, so callers may run them on any thread.
//!
//! # Example
//!
//! ```
//! use indicator_engine::prelude::*;
//!
//! let prices = PriceSeries::from(vec![100.0; 210]);
//! let reading = sma(&prices, 50)?;
//! assert_eq!(reading.value, 100.0);
//! assert_eq!(reading.state, Category::Neutral);
//!
//! let rsi = RSI::default().compute(&prices)?;
//! assert_eq!(rsi.info, Label::Normal);
//! # Ok::<(), IndicatorError>(())
//! ```

pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod indicators;
pub mod signal;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::dashboard::*;
    pub use crate::data::*;
    pub use crate::error::*;
    pub use crate::indicators::*;
    pub use crate::signal::*;
}

pub use error::IndicatorError;

/// Result type alias
pub type Result<T> = std::result::Result<T, IndicatorError>;
