use chrono::NaiveDate;

/// Trading pairs offered in the currency selector (ticker, display name).
/// Every pair is quoted in USDT.
pub const SYMBOLS: &[(&str, &str)] = &[
    ("BTC", "Bitcoin"),
    ("ETH", "Ethereum"),
    ("LTC", "Litecoin"),
    ("DOGE", "Dogecoin"),
    ("NEO", "NEO"),
    ("BNB", "BNB"),
    ("XRP", "XRP"),
    ("LINK", "Chainlink"),
    ("EOS", "EOS"),
    ("TRX", "TRON"),
    ("ETC", "Ethereum Classic"),
    ("XLM", "Stellar"),
    ("ZEC", "Zcash"),
    ("ADA", "Cardano"),
    ("QTUM", "Qtum"),
    ("DASH", "Dash"),
    ("XMR", "Monero"),
    ("BTT", "BitTorrent"),
];

/// Quote currency appended to every ticker ("BTC" -> "BTC/USDT")
pub const QUOTE_ASSET: &str = "USDT";

/// Ticker selected on first launch
pub const DEFAULT_SYMBOL: &str = "BTC";

/// Trailing window (days) for rolling return and rolling deviation
pub const ROLLING_WINDOW: usize = 30;

/// Directory scanned for price CSVs unless overridden on the command line
pub const DATA_DIR: &str = "data";

/// File the filter controls are persisted to between sessions
pub const SETTINGS_FILE: &str = "zigfrid_settings.json";

/// Earliest selectable date in the range controls (first day of source data)
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 8, 17).expect("valid calendar date")
}

/// Latest selectable date in the range controls (last day of source data)
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 4, 9).expect("valid calendar date")
}

/// Range start on first launch
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid calendar date")
}

/// Range end on first launch (exclusive)
pub fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).expect("valid calendar date")
}
