//! Qualitative state attached to every indicator reading

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse sentiment of a reading. Not a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Good,
    Bad,
    Neutral,
    /// No actionable signal
    None,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Good => "good",
            Category::Bad => "bad",
            Category::Neutral => "neutral",
            Category::None => "none",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short, language-neutral explanation of a reading.
///
/// Display layers translate these; the engine never formats text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Good,
    Bad,
    Neutral,
    Oversold,
    Overbought,
    Normal,
    #[serde(rename = "Low volatility")]
    LowVolatility,
    #[serde(rename = "High volatility")]
    HighVolatility,
    #[serde(rename = "No signal")]
    NoSignal,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Good => "Good",
            Label::Bad => "Bad",
            Label::Neutral => "Neutral",
            Label::Oversold => "Oversold",
            Label::Overbought => "Overbought",
            Label::Normal => "Normal",
            Label::LowVolatility => "Low volatility",
            Label::HighVolatility => "High volatility",
            Label::NoSignal => "No signal",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
