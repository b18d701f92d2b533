//! Integration tests for indicator-engine

use chrono::{TimeZone, Utc};
use indicator_engine::config::EngineConfig;
use indicator_engine::dashboard::{Dashboard, IndicatorSnapshot};
use indicator_engine::data::{Candle, CandleSeries, MarketData, PriceSeries};
use indicator_engine::error::IndicatorError;
use indicator_engine::indicators::{macd, rsi, sma, volatility, Indicator};
use indicator_engine::signal::{Category, Label, Reading};
use std::sync::Arc;

/// Helper function to create daily candles around the given closes
fn create_candles(closes: &[f64], spread: f64) -> CandleSeries {
    let base_time = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    let candles = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            Candle::new(
                close,
                close + spread,
                close - spread,
                close,
                1_000.0,
                base_time + chrono::Duration::days(i as i64),
            )
        })
        .collect();
    CandleSeries::from_vec("AAPL", "1d", candles)
}

/// 100 to 200 in equal steps over 252 points
fn linear_closes() -> Vec<f64> {
    (0..252).map(|i| 100.0 + 100.0 * i as f64 / 251.0).collect()
}

fn level(snapshot: &IndicatorSnapshot, name: &str) -> (f64, Category, Label) {
    let reading = snapshot
        .reading(name)
        .and_then(Reading::as_level)
        .unwrap_or_else(|| panic!("{} has no level reading", name));
    (reading.value, reading.state, reading.info)
}

#[test]
fn test_constant_series_scenario() {
    let candles = create_candles(&[100.0; 210], 0.0);
    let snapshot = Dashboard::default().evaluate(&candles);

    assert!(snapshot.is_complete());
    assert_eq!(snapshot.symbol(), Some("AAPL"));
    for name in ["SMA10", "SMA50", "SMA200"] {
        assert_eq!(level(&snapshot, name), (100.0, Category::Neutral, Label::Neutral));
    }

    // no movement at all: RSI sits at the midpoint
    assert_eq!(level(&snapshot, "RSI"), (50.0, Category::None, Label::Normal));
    assert_eq!(
        level(&snapshot, "Volatility"),
        (0.0, Category::None, Label::LowVolatility)
    );

    let macd = snapshot.reading("MACD").and_then(Reading::as_macd).unwrap();
    assert!(macd.histogram.abs() < 1e-9);
    assert_eq!(macd.state, Category::Neutral);

    // high == low == close: every stochastic window is flat
    let stochastic = snapshot
        .reading("Stochastic")
        .and_then(Reading::as_stochastic)
        .unwrap();
    assert!(stochastic.k.is_finite() && stochastic.d.is_finite());
    assert_eq!(stochastic.state, Category::None);
    assert_eq!(stochastic.info, Label::NoSignal);
}

#[test]
fn test_linear_series_scenario() {
    let candles = create_candles(&linear_closes(), 0.0);
    let snapshot = Dashboard::default().evaluate(&candles);
    assert!(snapshot.is_complete());

    // SMA10 = 198.207, close 200: distance 1.79 is inside the 1% band (1.98)
    let (sma10, state, _) = level(&snapshot, "SMA10");
    assert!((sma10 - 198.207_171_314_741_06).abs() < 1e-9);
    assert_eq!(state, Category::Neutral);

    let (sma50, state, _) = level(&snapshot, "SMA50");
    assert!((sma50 - 190.239_043_824_701_3).abs() < 1e-9);
    assert_eq!(state, Category::Good);

    let (sma200, state, _) = level(&snapshot, "SMA200");
    assert!((sma200 - 160.358_565_737_051_8).abs() < 1e-9);
    assert_eq!(state, Category::Good);

    assert_eq!(level(&snapshot, "RSI"), (100.0, Category::Bad, Label::Overbought));

    let (vol, state, info) = level(&snapshot, "Volatility");
    assert!((vol - 0.000_589_651_005_367_055).abs() < 1e-12);
    assert_eq!((state, info), (Category::None, Label::LowVolatility));

    // both EMAs have converged onto the trend: histogram ~1e-8
    let macd = snapshot.reading("MACD").and_then(Reading::as_macd).unwrap();
    assert!((macd.macd - 2.788_844_601_196_274).abs() < 1e-9);
    assert_eq!(macd.state, Category::Neutral);

    // close is always the window high
    let stochastic = snapshot
        .reading("Stochastic")
        .and_then(Reading::as_stochastic)
        .unwrap();
    assert!((stochastic.k - 100.0).abs() < 1e-9);
    assert_eq!(stochastic.state, Category::Bad);
}

#[test]
fn test_volatility_matches_direct_formula() {
    let closes = linear_closes();
    let returns: Vec<f64> = closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect();
    let window = &returns[returns.len() - 30..];
    let mean = window.iter().sum::<f64>() / 30.0;
    let var = window.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / 29.0;
    let expected = var.sqrt() * 252.0_f64.sqrt();

    let reading = volatility(&PriceSeries::from(closes), 30).unwrap();
    assert!((reading.value - expected).abs() < 1e-13);
}

#[test]
fn test_monotonic_series_properties() {
    let rising: Vec<f64> = (0..250).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
    let falling: Vec<f64> = (0..250).map(|i| 100.0 * 0.99_f64.powi(i)).collect();
    let rising = PriceSeries::from(rising);
    let falling = PriceSeries::from(falling);

    for window in [10, 50, 200] {
        assert_eq!(sma(&rising, window).unwrap().state, Category::Good);
        assert_eq!(sma(&falling, window).unwrap().state, Category::Bad);
    }

    let up = rsi(&rising, 14).unwrap();
    assert_eq!((up.value, up.state), (100.0, Category::Bad));
    let down = rsi(&falling, 14).unwrap();
    assert_eq!((down.value, down.state), (0.0, Category::Good));
}

#[test]
fn test_every_constant_sma_equals_constant() {
    for constant in [0.5, 1.0, 42.0, 100.0, 12_345.678] {
        let prices = PriceSeries::from(vec![constant; 200]);
        for window in [1, 10, 50, 200] {
            let reading = sma(&prices, window).unwrap();
            assert!((reading.value - constant).abs() <= constant * 1e-12);
            assert_eq!(reading.state, Category::Neutral);
        }
    }
}

#[test]
fn test_macd_constant_series_after_warmup() {
    for len in [35, 60, 210] {
        let reading = macd(&PriceSeries::from(vec![250.0; len]), 12, 26, 9).unwrap();
        assert_eq!(reading.state, Category::Neutral);
    }
}

#[test]
fn test_insufficient_history_per_slot() {
    let candles = create_candles(&linear_closes()[..40], 1.0);
    let snapshot = Dashboard::default().evaluate(&candles);

    let failed: Vec<&str> = snapshot.failures().map(|(name, _)| name).collect();
    assert_eq!(failed, ["SMA50", "SMA200"]);
    match snapshot.get("SMA200") {
        Some(Err(IndicatorError::InsufficientData {
            required, actual, ..
        })) => assert_eq!((*required, *actual), (200, 40)),
        other => panic!("unexpected SMA200 slot: {:?}", other),
    }
    for name in ["SMA10", "MACD", "Stochastic", "RSI", "Volatility"] {
        assert!(snapshot.reading(name).is_some(), "{} should succeed", name);
    }
}

#[test]
fn test_bad_price_only_fails_volatility() {
    let mut closes = linear_closes();
    closes[100] = -5.0;
    let snapshot = Dashboard::default().evaluate_data(&MarketData::from_closes(closes));

    assert!(matches!(
        snapshot.get("Volatility"),
        Some(Err(IndicatorError::InvalidInput(_)))
    ));
    for name in ["SMA10", "SMA50", "SMA200", "MACD", "RSI"] {
        assert!(snapshot.reading(name).is_some(), "{} should succeed", name);
    }
}

#[test]
fn test_evaluation_is_pure() {
    let closes: Vec<f64> = (0..260)
        .map(|i| 100.0 + 8.0 * ((i as f64) * 0.21).sin() + 0.1 * i as f64)
        .collect();
    let candles = create_candles(&closes, 1.5);
    let dashboard = Dashboard::default();

    let first = dashboard.evaluate(&candles);
    let second = dashboard.evaluate(&candles);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.slots().iter().zip(second.slots()) {
        let (a, b) = (a.result.as_ref().unwrap(), b.result.as_ref().unwrap());
        assert_eq!(a.value().to_bits(), b.value().to_bits());
        assert_eq!(a.state(), b.state());
        assert_eq!(a.info(), b.info());
    }
    // input is untouched
    assert_eq!(candles.closes().as_slice(), closes.as_slice());
}

#[test]
fn test_slots_can_run_on_separate_threads() {
    let closes: Vec<f64> = (0..220)
        .map(|i| 50.0 + 5.0 * ((i as f64) * 0.35).cos())
        .collect();
    let data = MarketData::from_ohlc(create_candles(&closes, 0.5).ohlc());
    let dashboard = Dashboard::default();
    let sequential = dashboard.evaluate_data(&data);

    let handles: Vec<_> = dashboard
        .indicators()
        .iter()
        .map(|indicator| {
            let indicator: Arc<dyn Indicator> = Arc::clone(indicator);
            let data = data.clone();
            std::thread::spawn(move || (indicator.name().to_string(), indicator.evaluate(&data)))
        })
        .collect();

    for handle in handles {
        let (name, result) = handle.join().unwrap();
        assert_eq!(sequential.get(&name), Some(&result));
    }
}

#[test]
fn test_custom_config_changes_slots() {
    let mut config = EngineConfig::default();
    config.periods.sma_windows = vec![5, 20];
    config.periods.rsi_period = 5;
    config.thresholds.volatility_high = 0.5;

    let dashboard = Dashboard::new(&config).unwrap();
    assert_eq!(
        dashboard.slot_names(),
        ["SMA5", "SMA20", "MACD", "Stochastic", "RSI", "Volatility"]
    );

    let snapshot = dashboard.evaluate(&create_candles(&linear_closes()[..40], 1.0));
    assert!(snapshot.is_complete());
}

#[test]
fn test_summary_payload() {
    let candles = create_candles(&linear_closes()[..100], 1.0);
    let json = Dashboard::default().evaluate(&candles).to_summary_json();

    assert_eq!(json["symbol"], "AAPL");
    let indicators = json["indicators"].as_array().unwrap();
    assert_eq!(indicators.len(), 7);
    assert_eq!(indicators[0]["name"], "SMA10");
    assert_eq!(indicators[2]["name"], "SMA200");
    assert!(indicators[2]["error"]
        .as_str()
        .unwrap()
        .contains("insufficient data"));
    assert_eq!(indicators[3]["name"], "MACD");
    assert!(indicators[3]["histogram"].is_number());
    assert_eq!(indicators[5]["info"], "Overbought");
}

#[test]
fn test_inverted_candles_fail_only_stochastic() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    // high and low swapped on every candle
    let candles = create_candles(&closes, -1.0);
    let snapshot = Dashboard::default().evaluate(&candles);

    assert!(matches!(
        snapshot.get("Stochastic"),
        Some(Err(IndicatorError::InvalidInput(_)))
    ));
    for name in ["SMA10", "SMA50", "MACD", "RSI", "Volatility"] {
        assert!(snapshot.reading(name).is_some(), "{} should succeed", name);
    }
}
