use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config;

/// Filter controls persisted between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    pub selected: BTreeSet<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            selected: BTreeSet::from([config::DEFAULT_SYMBOL.to_string()]),
            start_date: config::default_start_date(),
            end_date: config::default_end_date(),
        }
    }
}

impl ViewSettings {
    /// Drop tickers outside the configured universe and clamp both dates to
    /// the selectable bounds. A stale settings file stays usable after the
    /// symbol list or the data span changes.
    pub fn sanitized(self) -> Self {
        let known: BTreeSet<&str> = config::SYMBOLS.iter().map(|(t, _)| *t).collect();
        Self {
            selected: self
                .selected
                .into_iter()
                .filter(|t| known.contains(t.as_str()))
                .collect(),
            start_date: self.start_date.clamp(config::min_date(), config::max_date()),
            end_date: self.end_date.clamp(config::min_date(), config::max_date()),
        }
    }
}

pub fn load(path: &Path) -> Result<ViewSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings '{}'", path.display()))?;
    serde_json::from_str(&text).context("Failed to parse settings JSON")
}

pub fn save(path: &Path, settings: &ViewSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write settings '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = ViewSettings {
            selected: BTreeSet::from(["BTC".to_string(), "ETH".to_string()]),
            start_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2021, 5, 1).unwrap(),
        };
        save(&path, &settings).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.selected, settings.selected);
        assert_eq!(loaded.start_date, settings.start_date);
        assert_eq!(loaded.end_date, settings.end_date);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_default_selects_bitcoin() {
        let defaults = ViewSettings::default();
        assert!(defaults.selected.contains("BTC"));
        assert!(defaults.start_date < defaults.end_date);
    }

    #[test]
    fn test_sanitize_drops_unknown_tickers() {
        let stale = ViewSettings {
            selected: BTreeSet::from(["BTC".to_string(), "SHIB".to_string()]),
            start_date: config::default_start_date(),
            end_date: config::default_end_date(),
        };

        let clean = stale.sanitized();
        assert!(clean.selected.contains("BTC"));
        assert!(!clean.selected.contains("SHIB"));
        assert_eq!(clean.selected.len(), 1);
    }

    #[test]
    fn test_sanitize_clamps_dates_to_bounds() {
        let stale = ViewSettings {
            selected: BTreeSet::from(["BTC".to_string()]),
            start_date: NaiveDate::from_ymd_opt(2015, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        };

        let clean = stale.sanitized();
        assert_eq!(clean.start_date, config::min_date());
        assert_eq!(clean.end_date, config::max_date());
    }

    #[test]
    fn test_sanitize_keeps_valid_settings_unchanged() {
        let valid = ViewSettings {
            selected: BTreeSet::from(["BTC".to_string(), "ETH".to_string()]),
            start_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2021, 5, 1).unwrap(),
        };

        let clean = valid.clone().sanitized();
        assert_eq!(clean.selected, valid.selected);
        assert_eq!(clean.start_date, valid.start_date);
        assert_eq!(clean.end_date, valid.end_date);
    }
}
