use eframe::egui;
use egui_plot::{Legend, Plot};

use crate::app::AppState;
use crate::config;
use crate::ui::chart_utils::{date_axis_formatter, height_control, symbol_lines, zero_line};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Scores");
    ui.add_space(8.0);

    if state.view.rows.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    ui.label("Standard score of the open price, centered on the visible date range");
    height_control(ui, &mut state.chart_heights.standard_score, "Standard Score Chart Height");
    let view = &state.view;
    Plot::new("standard_score_plot")
        .height(state.chart_heights.standard_score)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(date_axis_formatter)
        .y_axis_label("Standard Score")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            symbol_lines(plot_ui, &view.symbols, &view.rows, |r| r.standard_score);
            zero_line(plot_ui, &view.rows);
        });

    ui.add_space(12.0);
    ui.label(format!(
        "Mean daily change over the trailing {} days, scaled by the window length",
        config::ROLLING_WINDOW
    ));
    height_control(ui, &mut state.chart_heights.rolling_return, "Rolling Return Chart Height");
    let view = &state.view;
    Plot::new("rolling_return_plot")
        .height(state.chart_heights.rolling_return)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(date_axis_formatter)
        .y_axis_label("Rolling Return (%)")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            symbol_lines(plot_ui, &view.symbols, &view.rows, |r| {
                r.rolling_pct_change.map(|v| v * 100.0)
            });
            zero_line(plot_ui, &view.rows);
        });

    ui.add_space(12.0);
    ui.label("Rolling return divided by the rolling deviation of the open price");
    height_control(ui, &mut state.chart_heights.sharpe, "Sharpe Chart Height");
    let view = &state.view;
    Plot::new("sharpe_plot")
        .height(state.chart_heights.sharpe)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(date_axis_formatter)
        .y_axis_label("Sharpe Score")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            symbol_lines(plot_ui, &view.symbols, &view.rows, |r| r.sharpe_score);
            zero_line(plot_ui, &view.rows);
        });

    ui.add_space(4.0);
    ui.small(format!(
        "Rolling values stay empty until a pair has {} prior days in its history. Gaps mark undefined values, not missing data.",
        config::ROLLING_WINDOW
    ));
}
