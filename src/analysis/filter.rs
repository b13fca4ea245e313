use std::collections::{BTreeMap, BTreeSet};

use crate::analysis::features;
use crate::data::models::{full_symbol, FeatureRow, FilterSelection, PricePoint, SymbolSeries};

/// Apply a user selection to the combined feature table.
///
/// A row survives when its symbol is a selected ticker with the quote
/// suffix appended and its date falls inside `[start_date, end_date)`.
/// Standard scores are then recomputed per symbol over the surviving rows
/// only, so the score always reflects the visible window; every other
/// derived column keeps its full-history value. The stored table is never
/// mutated.
pub fn filter_and_recompute(
    table: &[FeatureRow],
    selection: &FilterSelection,
    quote: &str,
) -> Vec<FeatureRow> {
    if selection.symbols.is_empty() {
        return Vec::new();
    }

    let wanted: BTreeSet<String> = selection
        .symbols
        .iter()
        .map(|ticker| full_symbol(ticker, quote))
        .collect();

    let mut rows: Vec<FeatureRow> = table
        .iter()
        .filter(|r| wanted.contains(&r.symbol))
        .filter(|r| selection.start_date.map_or(true, |d| r.date >= d))
        .filter(|r| selection.end_date.map_or(true, |d| r.date < d))
        .cloned()
        .collect();

    rescore(&mut rows);
    rows
}

/// Recompute `standard_score` per symbol over exactly the given rows
fn rescore(rows: &mut [FeatureRow]) {
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, row) in rows.iter().enumerate() {
        groups.entry(row.symbol.clone()).or_default().push(i);
    }

    for indices in groups.values() {
        let opens: Vec<f64> = indices.iter().map(|&i| rows[i].open).collect();
        let scores = features::standard_scores(&opens);
        for (k, &i) in indices.iter().enumerate() {
            rows[i].standard_score = scores[k];
        }
    }
}

/// Regroup filtered rows into per-symbol series for the correlation engine.
/// Output order follows `symbols`; a symbol with no surviving rows yields
/// an empty series rather than being dropped.
pub fn filtered_series(rows: &[FeatureRow], symbols: &[String]) -> Vec<SymbolSeries> {
    symbols
        .iter()
        .map(|symbol| SymbolSeries {
            symbol: symbol.clone(),
            points: rows
                .iter()
                .filter(|r| &r.symbol == symbol)
                .map(|r| PricePoint {
                    unix_ms: r.unix_ms,
                    date: r.date,
                    symbol: r.symbol.clone(),
                    open: r.open,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::{base_ticker, PricePoint};
    use chrono::NaiveDate;

    fn series(symbol: &str, opens: &[f64]) -> SymbolSeries {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        SymbolSeries {
            symbol: symbol.to_string(),
            points: opens
                .iter()
                .enumerate()
                .map(|(i, &open)| PricePoint {
                    unix_ms: 1_609_459_200_000 + i as i64 * 86_400_000,
                    date: start + chrono::Duration::days(i as i64),
                    symbol: symbol.to_string(),
                    open,
                })
                .collect(),
        }
    }

    fn sample_table() -> Vec<FeatureRow> {
        let btc = series("BTC/USDT", &[100.0, 110.0, 99.0, 105.0, 120.0]);
        let eth = series("ETH/USDT", &[10.0, 12.0, 11.0, 14.0, 13.0]);
        features::compute_table(&[btc, eth], 2)
    }

    fn selection(tickers: &[&str], start: Option<&str>, end: Option<&str>) -> FilterSelection {
        FilterSelection {
            symbols: tickers.iter().map(|t| t.to_string()).collect(),
            start_date: start.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()),
            end_date: end.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()),
        }
    }

    #[test]
    fn test_empty_selection_yields_no_rows() {
        let table = sample_table();
        let rows = filter_and_recompute(&table, &selection(&[], None, None), "USDT");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_inverted_range_yields_no_rows() {
        let table = sample_table();
        let sel = selection(&["BTC", "ETH"], Some("2021-01-04"), Some("2021-01-02"));
        assert!(filter_and_recompute(&table, &sel, "USDT").is_empty());
    }

    #[test]
    fn test_start_inclusive_end_exclusive() {
        let table = sample_table();
        let sel = selection(&["BTC"], Some("2021-01-02"), Some("2021-01-04"));
        let rows = filter_and_recompute(&table, &sel, "USDT");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2021, 1, 2).unwrap());
        assert_eq!(rows[1].date, NaiveDate::from_ymd_opt(2021, 1, 3).unwrap());
    }

    #[test]
    fn test_unknown_ticker_contributes_nothing() {
        let table = sample_table();

        let rows = filter_and_recompute(&table, &selection(&["BTC", "SHIB"], None, None), "USDT");
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.symbol == "BTC/USDT"));

        let rows = filter_and_recompute(&table, &selection(&["SHIB"], None, None), "USDT");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_full_selection_reproduces_table() {
        let table = sample_table();
        let rows = filter_and_recompute(&table, &selection(&["BTC", "ETH"], None, None), "USDT");
        assert_eq!(rows, table);
    }

    #[test]
    fn test_scores_recomputed_over_visible_rows() {
        let table = sample_table();
        let sel = selection(&["BTC"], Some("2021-01-02"), Some("2021-01-05"));
        let rows = filter_and_recompute(&table, &sel, "USDT");

        // Scores match a direct computation over the visible opens
        let direct = features::standard_scores(&[110.0, 99.0, 105.0]);
        assert_eq!(rows.len(), 3);
        for (row, expected) in rows.iter().zip(&direct) {
            assert_eq!(row.standard_score, *expected);
        }

        // And differ from the full-history scores kept in the table
        let full = table.iter().find(|r| r.date == rows[0].date && r.symbol == "BTC/USDT");
        assert_ne!(rows[0].standard_score, full.unwrap().standard_score);

        // Other derived columns are passed through untouched
        assert_eq!(rows[0].pct_change, full.unwrap().pct_change);
        assert_eq!(rows[0].std_deviation, full.unwrap().std_deviation);
    }

    #[test]
    fn test_filtered_series_keeps_requested_order() {
        let table = sample_table();
        let rows = filter_and_recompute(&table, &selection(&["BTC", "ETH"], None, None), "USDT");

        let symbols = vec![
            "BTC/USDT".to_string(),
            "ETH/USDT".to_string(),
            "DOGE/USDT".to_string(),
        ];
        let grouped = filtered_series(&rows, &symbols);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].symbol, "BTC/USDT");
        assert_eq!(grouped[0].points.len(), 5);
        assert_eq!(grouped[1].points.len(), 5);
        assert!(grouped[2].points.is_empty(), "unmatched symbol stays as an empty series");
        for pair in grouped[0].points.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_symbol_name_helpers() {
        assert_eq!(full_symbol("BTC", "USDT"), "BTC/USDT");
        assert_eq!(base_ticker("BTC/USDT"), "BTC");
        assert_eq!(base_ticker("BTC"), "BTC");
    }
}
