use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::NaiveDate;
use eframe::egui;

use crate::analysis::{correlation, features, filter};
use crate::config;
use crate::data::models::{
    full_symbol, CorrelationMatrix, FeatureRow, FilterSelection, MarketStore,
};
use crate::data::settings::{self, ViewSettings};
use crate::ui;

/// Active tab in the main UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dashboard,
    Prices,
    Scores,
    Correlations,
}

/// Rows and correlations derived from the current filter controls.
/// Rebuilt as a whole on every control change, never edited in place.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    /// Selected pairs in selector order, empty-in-view pairs included
    pub symbols: Vec<String>,
    pub rows: Vec<FeatureRow>,
    pub correlation: CorrelationMatrix,
    pub avg_cross_correlation: f64,
}

/// Per-chart height overrides (pixels), adjustable by the user at runtime
#[derive(Debug, Clone)]
pub struct ChartHeights {
    pub price: f32,
    pub daily_change: f32,
    pub standard_score: f32,
    pub rolling_return: f32,
    pub sharpe: f32,
}

impl Default for ChartHeights {
    fn default() -> Self {
        Self {
            price: 260.0,
            daily_change: 200.0,
            standard_score: 220.0,
            rolling_return: 200.0,
            sharpe: 200.0,
        }
    }
}

/// Shared application state: the immutable store and feature table computed
/// once at startup, the live filter controls, and the view derived from them
pub struct AppState {
    pub active_tab: Tab,
    pub store: MarketStore,
    pub table: Vec<FeatureRow>,
    pub selected: BTreeSet<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub view: FilteredView,
    pub chart_heights: ChartHeights,
    pub status_message: String,
    pub settings_path: PathBuf,
}

impl AppState {
    /// Build state from a loaded store: compute the feature table over the
    /// full history once, restore persisted controls, derive the first view.
    pub fn new(store: MarketStore) -> Self {
        let table = features::compute_table(&store.series, config::ROLLING_WINDOW);
        tracing::info!(
            "Feature table ready: {} rows across {} symbols",
            table.len(),
            store.series.len()
        );

        let settings_path = PathBuf::from(config::SETTINGS_FILE);
        let persisted = settings::load(&settings_path)
            .unwrap_or_else(|e| {
                tracing::warn!("Using default view settings ({})", e);
                ViewSettings::default()
            })
            .sanitized();

        let mut state = Self {
            active_tab: Tab::Dashboard,
            store,
            table,
            selected: persisted.selected,
            start_date: persisted.start_date,
            end_date: persisted.end_date,
            view: FilteredView::default(),
            chart_heights: ChartHeights::default(),
            status_message: String::new(),
            settings_path,
        };
        state.refresh_view();
        state
    }

    /// Rerun the filter and correlation over the stored table. Called once
    /// at startup and whenever a control reports a change.
    pub fn refresh_view(&mut self) {
        let selection = FilterSelection {
            symbols: self.selected.clone(),
            start_date: Some(self.start_date),
            end_date: Some(self.end_date),
        };

        let symbols: Vec<String> = config::SYMBOLS
            .iter()
            .filter(|(ticker, _)| self.selected.contains(*ticker))
            .map(|(ticker, _)| full_symbol(ticker, config::QUOTE_ASSET))
            .collect();

        let rows = filter::filter_and_recompute(&self.table, &selection, config::QUOTE_ASSET);
        let series = filter::filtered_series(&rows, &symbols);
        let corr = correlation::compute_correlation(&series);
        let avg = correlation::average_cross_correlation(&corr);

        self.status_message = format!(
            "{} currencies, {} rows | {} to {} (end exclusive)",
            symbols.len(),
            rows.len(),
            self.start_date,
            self.end_date
        );

        self.view = FilteredView {
            symbols,
            rows,
            correlation: corr,
            avg_cross_correlation: avg,
        };
    }

    fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            selected: self.selected.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Main application struct for eframe
pub struct ZigfridApp {
    pub state: AppState,
}

impl ZigfridApp {
    pub fn new(store: MarketStore) -> Self {
        Self {
            state: AppState::new(store),
        }
    }
}

impl eframe::App for ZigfridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top panel with tabs
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.state.active_tab, Tab::Dashboard, "Dashboard");
                ui.selectable_value(&mut self.state.active_tab, Tab::Prices, "Prices");
                ui.selectable_value(&mut self.state.active_tab, Tab::Scores, "Scores");
                ui.selectable_value(
                    &mut self.state.active_tab,
                    Tab::Correlations,
                    "Correlations",
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("rolling window: {} days", config::ROLLING_WINDOW));
                });
            });
        });

        // Bottom status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
            });
        });

        // Left panel with the filter controls
        egui::SidePanel::left("filter_panel")
            .default_width(235.0)
            .show(ctx, |ui| {
                if ui::controls::render(ui, &mut self.state) {
                    self.state.refresh_view();
                }
            });

        // Central panel with active tab content (scrollable when content overflows)
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink(false)
                .show(ui, |ui| match self.state.active_tab {
                    Tab::Dashboard => ui::dashboard::render(ui, &mut self.state),
                    Tab::Prices => ui::price_view::render(ui, &mut self.state),
                    Tab::Scores => ui::score_view::render(ui, &mut self.state),
                    Tab::Correlations => ui::correlation_view::render(ui, &mut self.state),
                });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = settings::save(&self.state.settings_path, &self.state.view_settings()) {
            tracing::warn!("Failed to persist view settings: {}", e);
        }
    }
}
