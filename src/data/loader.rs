use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use crate::data::models::{MarketStore, PricePoint, SymbolSeries};

/// Parse date from the formats the source files use
/// ("YYYY-MM-DD HH:MM:SS" or plain "YYYY-MM-DD")
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

/// Load every CSV directly under `dir` into an immutable store.
/// All-or-nothing: any unreadable or malformed file aborts the load.
pub fn load_store(dir: &Path) -> Result<MarketStore> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read data directory '{}'", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        bail!("No CSV files found in '{}'", dir.display());
    }

    let mut points = Vec::new();
    for path in &paths {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        let rows = parse_price_csv(&text)
            .with_context(|| format!("Failed to parse '{}'", path.display()))?;
        tracing::info!("Loaded {} rows from {}", rows.len(), path.display());
        points.extend(rows);
    }

    build_store(points)
}

/// The exchange export carries a download-info line above the real header.
/// Skip the first line unless it already names the unix column.
fn strip_banner(text: &str) -> &str {
    let first = text.lines().next().unwrap_or("");
    if first.to_ascii_lowercase().contains("unix") {
        return text;
    }
    match text.find('\n') {
        Some(pos) => &text[pos + 1..],
        None => "",
    }
}

/// Parse one source file into price points. Columns are located by header
/// name (case-insensitive, any order); extra columns are ignored. Rows
/// arrive newest first and are reordered in `build_store`.
fn parse_price_csv(text: &str) -> Result<Vec<PricePoint>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(Cursor::new(strip_banner(text)));

    let headers = reader.headers().context("Missing CSV headers")?.clone();

    let unix_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("unix"))
        .context("No unix column")?;
    let date_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("date"))
        .context("No date column")?;
    let symbol_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("symbol"))
        .context("No symbol column")?;
    let open_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("open"))
        .context("No open column")?;

    let needed = unix_idx.max(date_idx).max(symbol_idx).max(open_idx);

    let mut points = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.context("Invalid CSV row")?;
        if record.len() <= needed {
            bail!(
                "Data row {} has {} fields, need at least {}",
                row + 1,
                record.len(),
                needed + 1
            );
        }

        let unix_ms: i64 = record
            .get(unix_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Bad unix timestamp on data row {}", row + 1))?;

        let date_str = record.get(date_idx).unwrap_or("");
        let Some(date) = parse_date(date_str) else {
            bail!("Bad date '{}' on data row {}", date_str, row + 1);
        };

        let symbol = record.get(symbol_idx).unwrap_or("").trim().to_string();
        if symbol.is_empty() {
            bail!("Empty symbol on data row {}", row + 1);
        }

        let open: f64 = record
            .get(open_idx)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("Bad open price on data row {}", row + 1))?;
        if !open.is_finite() {
            bail!("Non-finite open price on data row {}", row + 1);
        }

        points.push(PricePoint {
            unix_ms,
            date,
            symbol,
            open,
        });
    }

    Ok(points)
}

/// Group rows by symbol (a single file may carry several), order each
/// series ascending by timestamp and drop duplicate dates, keeping the
/// first occurrence.
fn build_store(points: Vec<PricePoint>) -> Result<MarketStore> {
    if points.is_empty() {
        bail!("No price rows loaded");
    }

    let mut by_symbol: BTreeMap<String, Vec<PricePoint>> = BTreeMap::new();
    for p in points {
        by_symbol.entry(p.symbol.clone()).or_default().push(p);
    }

    let mut series = Vec::with_capacity(by_symbol.len());
    for (symbol, mut pts) in by_symbol {
        pts.sort_by_key(|p| p.unix_ms);
        let before = pts.len();
        pts.dedup_by_key(|p| p.date);
        if pts.len() < before {
            tracing::warn!("{}: dropped {} duplicate-date rows", symbol, before - pts.len());
        }
        series.push(SymbolSeries { symbol, points: pts });
    }

    let total: usize = series.iter().map(|s| s.points.len()).sum();
    tracing::info!("Store ready: {} symbols, {} rows", series.len(), total);

    Ok(MarketStore { series })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
https://www.CryptoDataDownload.com
unix,date,symbol,open,high,low,close,Volume BTC,Volume USDT,tradecount
1641081600000,2022-01-02 00:00:00,BTC/USDT,47722.65,47944.00,46633.00,47286.18,29549.94,1398467731.86,951839
1640995200000,2022-01-01 00:00:00,BTC/USDT,46216.93,47954.63,46208.37,47722.65,19604.46,923410924.02,641673
";

    #[test]
    fn test_banner_skipped_and_columns_located() {
        let points = parse_price_csv(SAMPLE).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].symbol, "BTC/USDT");
        assert_eq!(points[0].unix_ms, 1_641_081_600_000);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2022, 1, 2).unwrap());
        assert!((points[0].open - 47722.65).abs() < 1e-9);
    }

    #[test]
    fn test_banner_line_optional() {
        let text = "unix,date,symbol,open\n1640995200000,2021-12-31,ETH/USDT,3676.23\n";
        let points = parse_price_csv(text).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].symbol, "ETH/USDT");
    }

    #[test]
    fn test_descending_rows_reordered_ascending() {
        let store = build_store(parse_price_csv(SAMPLE).unwrap()).unwrap();
        assert_eq!(store.series.len(), 1);

        let s = &store.series[0];
        assert_eq!(s.points[0].date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert!((s.points[0].open - 46216.93).abs() < 1e-9);
        assert_eq!(s.points[1].date, NaiveDate::from_ymd_opt(2022, 1, 2).unwrap());
    }

    #[test]
    fn test_duplicate_dates_keep_first() {
        let text = "\
unix,date,symbol,open
1640995200000,2022-01-01 00:00:00,BTC/USDT,100.0
1641038400000,2022-01-01 12:00:00,BTC/USDT,200.0
1641081600000,2022-01-02 00:00:00,BTC/USDT,300.0
";
        let store = build_store(parse_price_csv(text).unwrap()).unwrap();
        let s = &store.series[0];
        assert_eq!(s.points.len(), 2);
        assert!((s.points[0].open - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_symbols_grouped() {
        let text = "\
unix,date,symbol,open
1640995200000,2022-01-01,ETH/USDT,3676.23
1640995200000,2022-01-01,BTC/USDT,46216.93
1641081600000,2022-01-02,ETH/USDT,3769.29
";
        let store = build_store(parse_price_csv(text).unwrap()).unwrap();
        assert_eq!(store.series.len(), 2);
        assert_eq!(store.series[0].symbol, "BTC/USDT");
        assert_eq!(store.series[1].symbol, "ETH/USDT");
        assert_eq!(store.series[1].points.len(), 2);
    }

    #[test]
    fn test_missing_column_is_error() {
        let text = "unix,date,open\n1640995200000,2022-01-01,1.5\n";
        assert!(parse_price_csv(text).is_err());
    }

    #[test]
    fn test_malformed_row_aborts() {
        let text = "unix,date,symbol,open\nnot_a_number,2022-01-01,BTC/USDT,1.0\n";
        assert!(parse_price_csv(text).is_err());

        let text = "unix,date,symbol,open\n1640995200000,yesterday,BTC/USDT,1.0\n";
        assert!(parse_price_csv(text).is_err());

        let text = "unix,date,symbol,open\n1640995200000,2022-01-01,BTC/USDT,inf\n";
        assert!(parse_price_csv(text).is_err());
    }

    #[test]
    fn test_load_store_reads_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("btc.csv")).unwrap();
        write!(file, "{}", SAMPLE).unwrap();

        let store = load_store(dir.path()).unwrap();
        assert_eq!(store.series.len(), 1);
        assert_eq!(store.series[0].points.len(), 2);
    }

    #[test]
    fn test_empty_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_store(dir.path()).is_err());
    }

    #[test]
    fn test_one_bad_file_fails_whole_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut good = fs::File::create(dir.path().join("a.csv")).unwrap();
        write!(good, "{}", SAMPLE).unwrap();
        let mut bad = fs::File::create(dir.path().join("b.csv")).unwrap();
        write!(bad, "unix,date,symbol,open\nbroken,row,BTC/USDT,1.0\n").unwrap();

        assert!(load_store(dir.path()).is_err());
    }
}
