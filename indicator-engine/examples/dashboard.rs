//! Example: evaluate the indicator dashboard over a synthetic daily history
//!
//! Periods and thresholds come from `INDICATOR_*` environment variables
//! (or a `.env` file). Each slot runs on tokio's blocking pool.

use chrono::{Duration, TimeZone, Utc};
use indicator_engine::config::EngineConfig;
use indicator_engine::dashboard::{evaluate_slot, Dashboard, IndicatorSnapshot};
use indicator_engine::data::{Candle, CandleSeries, MarketData};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Roughly one year of daily candles with a trend and a cycle
fn synthetic_candles(symbol: &str, count: usize) -> CandleSeries {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    let mut series = CandleSeries::new(symbol, "1d");
    for i in 0..count {
        let t = i as f64;
        let close = 150.0 + 0.12 * t + 9.0 * (t / 11.0).sin();
        let open = close - 0.8 * (t / 3.0).cos();
        let high = open.max(close) + 1.2;
        let low = open.min(close) - 1.2;
        series.push(Candle::new(
            open,
            high,
            low,
            close,
            1_000_000.0,
            start + Duration::days(i as i64),
        ));
    }
    series
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = EngineConfig::from_env()?;
    let dashboard = Dashboard::new(&config)?;

    let candles = synthetic_candles("AAPL", 252);
    info!(
        "Evaluating {} candles for {} ({} needed for every slot)",
        candles.len(),
        candles.symbol,
        dashboard.required_len()
    );
    if let Some(latest) = candles.last() {
        info!("Latest close {:.2} at {}", latest.close, latest.timestamp);
    }

    let data = MarketData::from_ohlc(candles.ohlc());
    let mut handles = Vec::new();
    for indicator in dashboard.indicators() {
        let indicator = Arc::clone(indicator);
        let data = data.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            evaluate_slot(indicator.as_ref(), &data)
        }));
    }

    let mut slots = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(slot) => slots.push(slot),
            Err(e) => error!("Indicator task failed: {}", e),
        }
    }

    let snapshot = IndicatorSnapshot::new(Some(candles.symbol.clone()), slots);
    for (name, reading) in snapshot.successes() {
        info!(
            "{:<10} {:>10.4}  {:<8} {}",
            name,
            reading.value(),
            reading.state(),
            reading.info()
        );
    }
    for (name, err) in snapshot.failures() {
        error!("{:<10} {}", name, err);
    }

    println!("{}", serde_json::to_string_pretty(&snapshot.to_summary_json())?);
    Ok(())
}
