use eframe::egui;

use crate::app::AppState;
use crate::data::models::base_ticker;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Correlations");
    ui.add_space(8.0);

    let corr = &state.view.correlation;
    if corr.symbols.is_empty() || state.view.rows.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    ui.label("Pearson correlation of opening prices over the dates each pair shares.");
    ui.add_space(8.0);

    egui::ScrollArea::horizontal().show(ui, |ui| {
        egui::Grid::new("correlation_heatmap")
            .min_col_width(56.0)
            .show(ui, |ui| {
                ui.label("");
                for symbol in &corr.symbols {
                    ui.strong(base_ticker(symbol));
                }
                ui.end_row();

                for (i, row_symbol) in corr.symbols.iter().enumerate() {
                    ui.strong(base_ticker(row_symbol));
                    for j in 0..corr.symbols.len() {
                        match corr.matrix[i][j] {
                            Some(r) => {
                                ui.colored_label(corr_to_color(r), format!("{:.2}", r));
                            }
                            None => {
                                ui.label("-");
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    });

    ui.add_space(8.0);
    ui.label(format!(
        "Average cross-correlation: {:.3}",
        state.view.avg_cross_correlation
    ));

    ui.add_space(4.0);
    ui.small("'-' marks a pair with no shared dates (or no spread) inside the current range.");
}

/// Diverging scale: strong positive = red, weak = gray, strong negative = blue
fn corr_to_color(r: f64) -> egui::Color32 {
    if r > 0.75 {
        egui::Color32::from_rgb(220, 50, 50)
    } else if r > 0.4 {
        egui::Color32::from_rgb(220, 150, 50)
    } else if r > -0.4 {
        egui::Color32::from_rgb(150, 150, 150)
    } else if r > -0.75 {
        egui::Color32::from_rgb(80, 160, 255)
    } else {
        egui::Color32::from_rgb(70, 130, 220)
    }
}
