//! Data module
//!
//! Candle history and the immutable series the indicators read.

pub mod candle;
pub mod series;

pub use candle::*;
pub use series::*;
