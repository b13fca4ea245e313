use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Single opening-price observation for one trading pair on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds, as exported by the exchange
    pub unix_ms: i64,
    pub date: NaiveDate,
    /// Full pair name, e.g. "BTC/USDT"
    pub symbol: String,
    pub open: f64,
}

/// Price history for a single trading pair, ascending by date with no
/// duplicate dates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl SymbolSeries {
    pub fn opens(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.open).collect()
    }
}

/// Immutable store of every loaded symbol history, built once at startup
#[derive(Debug, Clone, Default)]
pub struct MarketStore {
    pub series: Vec<SymbolSeries>,
}

/// One row of the combined feature table: the raw price observation plus
/// the derived statistics. A `None` marks a value that is undefined at this
/// row (incomplete trailing window, zero divisor, first observation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub unix_ms: i64,
    pub date: NaiveDate,
    pub symbol: String,
    pub open: f64,
    pub pct_change: Option<f64>,
    pub rolling_pct_change: Option<f64>,
    pub std_deviation: Option<f64>,
    pub sharpe_score: Option<f64>,
    pub standard_score: Option<f64>,
}

/// Pairwise correlation of opening prices over shared dates.
/// Square and symmetric; `None` marks a pair with no usable overlap.
#[derive(Debug, Clone, Default)]
pub struct CorrelationMatrix {
    pub symbols: Vec<String>,
    pub matrix: Vec<Vec<Option<f64>>>,
}

/// User filter: selected bare tickers plus an optional half-open date range
/// (start inclusive, end exclusive)
#[derive(Debug, Clone)]
pub struct FilterSelection {
    pub symbols: BTreeSet<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// "BTC" + "USDT" -> "BTC/USDT"
pub fn full_symbol(ticker: &str, quote: &str) -> String {
    format!("{}/{}", ticker, quote)
}

/// "BTC/USDT" -> "BTC"; symbols without a quote suffix pass through
pub fn base_ticker(symbol: &str) -> &str {
    symbol.split_once('/').map(|(base, _)| base).unwrap_or(symbol)
}
