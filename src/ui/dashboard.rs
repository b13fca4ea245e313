use eframe::egui;

use crate::app::AppState;
use crate::config;
use crate::data::models::{base_ticker, FeatureRow};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Crypto Zigfrid");
    ui.small("All prices are quoted in USDT.");
    ui.add_space(8.0);

    if state.view.rows.is_empty() {
        ui.label("No rows match the current filters. Select at least one currency and widen the date range.");
        return;
    }

    // Key metrics row
    ui.horizontal(|ui| {
        metric_card(ui, "Currencies", &format!("{}", state.view.symbols.len()));
        metric_card(ui, "Rows in View", &format!("{}", state.view.rows.len()));

        let first = state.view.rows.iter().map(|r| r.date).min();
        let last = state.view.rows.iter().map(|r| r.date).max();
        if let (Some(a), Some(b)) = (first, last) {
            metric_card(ui, "Date Span", &format!("{} to {}", a, b));
        }

        metric_card(
            ui,
            "Avg Cross-Correlation",
            &format!("{:.3}", state.view.avg_cross_correlation),
        );
        metric_card(ui, "Rolling Window", &format!("{} days", config::ROLLING_WINDOW));
    });

    ui.add_space(16.0);
    ui.separator();
    ui.add_space(8.0);

    ui.heading("Currencies in View");
    ui.add_space(8.0);

    egui::Grid::new("symbol_summary")
        .striped(true)
        .min_col_width(90.0)
        .show(ui, |ui| {
            ui.strong("Currency");
            ui.strong("Pair");
            ui.strong("Last Open");
            ui.strong("Daily Change");
            ui.strong("Rolling Return");
            ui.strong("Sharpe");
            ui.strong("Rows");
            ui.end_row();

            for symbol in &state.view.symbols {
                let rows: Vec<&FeatureRow> = state
                    .view
                    .rows
                    .iter()
                    .filter(|r| &r.symbol == symbol)
                    .collect();

                let ticker = base_ticker(symbol);
                let name = config::SYMBOLS
                    .iter()
                    .find(|(t, _)| *t == ticker)
                    .map(|(_, n)| *n)
                    .unwrap_or("Unknown");

                ui.label(name);
                ui.label(symbol);

                match rows.last() {
                    Some(latest) => {
                        ui.label(price_label(latest.open));
                        pct_cell(ui, latest.pct_change);
                        pct_cell(ui, latest.rolling_pct_change);
                        score_cell(ui, latest.sharpe_score);
                    }
                    None => {
                        ui.label("-");
                        ui.label("-");
                        ui.label("-");
                        ui.label("-");
                    }
                }

                ui.label(format!("{}", rows.len()));
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.small("Daily and rolling changes are taken at the last date in view. '-' marks values the trailing window cannot define yet.");
}

fn metric_card(ui: &mut egui::Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.small(label);
                ui.strong(value);
            });
        });
}

/// Sub-unit pairs (DOGE, BTT, TRX) need more digits than BTC
fn price_label(open: f64) -> String {
    if open >= 1.0 {
        format!("{:.2}", open)
    } else {
        format!("{:.6}", open)
    }
}

fn change_color(v: f64) -> egui::Color32 {
    if v >= 0.0 {
        egui::Color32::from_rgb(50, 180, 50)
    } else {
        egui::Color32::from_rgb(220, 50, 50)
    }
}

fn pct_cell(ui: &mut egui::Ui, value: Option<f64>) {
    match value {
        Some(v) => {
            ui.colored_label(change_color(v), format!("{:+.2}%", v * 100.0));
        }
        None => {
            ui.label("-");
        }
    }
}

fn score_cell(ui: &mut egui::Ui, value: Option<f64>) {
    match value {
        Some(v) => {
            ui.colored_label(change_color(v), format!("{:+.3}", v));
        }
        None => {
            ui.label("-");
        }
    }
}
