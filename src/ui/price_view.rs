use eframe::egui;
use egui_plot::{Legend, Plot};

use crate::app::AppState;
use crate::ui::chart_utils::{date_axis_formatter, height_control, symbol_lines};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Opening Prices");
    ui.add_space(8.0);

    if state.view.rows.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    height_control(ui, &mut state.chart_heights.price, "Price Chart Height");
    let view = &state.view;
    Plot::new("open_price_plot")
        .height(state.chart_heights.price)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(date_axis_formatter)
        .y_axis_label("Open (USDT)")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            symbol_lines(plot_ui, &view.symbols, &view.rows, |r| Some(r.open));
        });

    ui.add_space(12.0);
    ui.heading("Daily Change");
    ui.add_space(4.0);

    height_control(ui, &mut state.chart_heights.daily_change, "Daily Change Chart Height");
    let view = &state.view;
    Plot::new("daily_change_plot")
        .height(state.chart_heights.daily_change)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(date_axis_formatter)
        .y_axis_label("Daily Change (%)")
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            symbol_lines(plot_ui, &view.symbols, &view.rows, |r| {
                r.pct_change.map(|v| v * 100.0)
            });
        });

    ui.add_space(4.0);
    ui.small("The first visible day of each pair has no change to show.");
}
