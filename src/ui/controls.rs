use chrono::NaiveDate;
use eframe::egui;

use crate::app::AppState;
use crate::config;

/// Filter controls rendered in the left panel. Returns true when any
/// control changed and the derived view must be rebuilt.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let mut changed = false;

    ui.add_space(4.0);
    ui.heading("Filters");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label("Currencies");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("None").clicked() {
                state.selected.clear();
                changed = true;
            }
            if ui.small_button("All").clicked() {
                state.selected = config::SYMBOLS.iter().map(|(t, _)| t.to_string()).collect();
                changed = true;
            }
        });
    });
    ui.add_space(4.0);

    egui::ScrollArea::vertical()
        .id_salt("currency_list")
        .max_height(340.0)
        .show(ui, |ui| {
            for (ticker, name) in config::SYMBOLS {
                let mut on = state.selected.contains(*ticker);
                if ui.checkbox(&mut on, format!("{} ({})", name, ticker)).changed() {
                    if on {
                        state.selected.insert(ticker.to_string());
                    } else {
                        state.selected.remove(*ticker);
                    }
                    changed = true;
                }
            }
        });

    ui.add_space(8.0);
    ui.separator();
    ui.add_space(4.0);

    ui.label("Date range");
    changed |= date_slider(ui, "From", &mut state.start_date);
    changed |= date_slider(ui, "To", &mut state.end_date);
    ui.small("Start is inclusive, end is exclusive.");

    ui.add_space(4.0);
    if ui.button("Reset range").clicked() {
        state.start_date = config::default_start_date();
        state.end_date = config::default_end_date();
        changed = true;
    }

    changed
}

/// Slider over the allowed calendar span, displayed as an ISO date
fn date_slider(ui: &mut egui::Ui, label: &str, date: &mut NaiveDate) -> bool {
    let min = config::min_date();
    let span = (config::max_date() - min).num_days();

    let mut offset = (*date - min).num_days().clamp(0, span);
    let response = ui.add(
        egui::Slider::new(&mut offset, 0..=span)
            .text(label)
            .custom_formatter(move |v, _| {
                (min + chrono::Duration::days(v as i64))
                    .format("%Y-%m-%d")
                    .to_string()
            }),
    );

    if response.changed() {
        *date = min + chrono::Duration::days(offset);
        return true;
    }
    false
}
