/// Shared chart utilities for all UI views that render plots.

use chrono::NaiveDate;
use eframe::egui;
use egui_plot::{Line, PlotPoints, PlotUi};

use crate::data::models::FeatureRow;

/// Inline height-adjustment drag control placed immediately above a chart.
/// Allows all drawn charts to be vertically resized via a shared implementation.
pub fn height_control(ui: &mut egui::Ui, height: &mut f32, label: &str) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(80, 120, 200, 18))
        .inner_margin(egui::Margin::symmetric(8.0, 3.0))
        .rounding(egui::Rounding::same(4.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(100, 160, 255), "⇕");
                ui.colored_label(egui::Color32::from_gray(170), label);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::DragValue::new(height)
                            .speed(2.0)
                            .range(80.0..=800.0)
                            .suffix(" px"),
                    );
                    ui.colored_label(egui::Color32::from_gray(130), "drag to resize ·");
                });
            });
        });
    ui.add_space(2.0);
}

/// Days since 1970-01-01, the x coordinate used on every date axis
pub fn date_to_x(date: NaiveDate) -> f64 {
    (date - NaiveDate::default()).num_days() as f64
}

/// Inverse of [`date_to_x`], for axis tick labels
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::default().checked_add_signed(chrono::Duration::days(x.round() as i64))
}

/// Axis tick formatter rendering the day offset as an ISO date
pub fn date_axis_formatter(
    mark: egui_plot::GridMark,
    _range: &std::ops::RangeInclusive<f64>,
) -> String {
    match x_to_date(mark.value) {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

/// Fixed palette indexed by the symbol's position in the current view
pub fn series_color(idx: usize) -> egui::Color32 {
    const PALETTE: &[egui::Color32] = &[
        egui::Color32::from_rgb(100, 150, 255),
        egui::Color32::from_rgb(255, 100, 100),
        egui::Color32::from_rgb(100, 220, 100),
        egui::Color32::from_rgb(255, 180, 50),
        egui::Color32::from_rgb(180, 100, 255),
        egui::Color32::from_rgb(70, 180, 220),
        egui::Color32::from_rgb(255, 120, 200),
        egui::Color32::from_rgb(170, 170, 90),
        egui::Color32::from_rgb(120, 120, 255),
        egui::Color32::from_rgb(220, 150, 50),
        egui::Color32::from_rgb(90, 200, 160),
        egui::Color32::from_rgb(200, 90, 90),
    ];
    PALETTE[idx % PALETTE.len()]
}

/// Draw one line per symbol from the filtered rows. Rows where `value`
/// is undefined or non-finite are skipped, which renders them as gaps.
pub fn symbol_lines<F>(plot_ui: &mut PlotUi, symbols: &[String], rows: &[FeatureRow], value: F)
where
    F: Fn(&FeatureRow) -> Option<f64>,
{
    for (idx, symbol) in symbols.iter().enumerate() {
        let points: PlotPoints = rows
            .iter()
            .filter(|r| &r.symbol == symbol)
            .filter_map(|r| {
                let v = value(r)?;
                if !v.is_finite() {
                    return None;
                }
                Some([date_to_x(r.date), v])
            })
            .collect();

        plot_ui.line(Line::new(points).name(symbol).color(series_color(idx)));
    }
}

/// Dashed horizontal reference line spanning the dates in view
pub fn zero_line(plot_ui: &mut PlotUi, rows: &[FeatureRow]) {
    let first = rows.iter().map(|r| r.date).min();
    let last = rows.iter().map(|r| r.date).max();
    if let (Some(a), Some(b)) = (first, last) {
        let points: PlotPoints = vec![[date_to_x(a), 0.0], [date_to_x(b), 0.0]]
            .into_iter()
            .collect();
        plot_ui.line(
            Line::new(points)
                .name("Zero")
                .color(egui::Color32::from_rgb(150, 150, 150))
                .style(egui_plot::LineStyle::dashed_dense()),
        );
    }
}
