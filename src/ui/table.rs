use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};
use poverty_dash::data::views::DashboardViews;

use crate::ui::NO_DATA_MESSAGE;

// ---------------------------------------------------------------------------
// Snapshot metric cards
// ---------------------------------------------------------------------------

/// Latest-year value of each selected indicator.
pub fn snapshot_metrics(ui: &mut Ui, views: &DashboardViews) {
    ui.strong("Key metrics");
    if views.snapshot.is_empty() {
        ui.colored_label(Color32::YELLOW, NO_DATA_MESSAGE);
        return;
    }

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for metric in &views.snapshot {
            ui.group(|ui: &mut Ui| {
                ui.vertical(|ui: &mut Ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} ({})",
                            metric.entry.indicator_name, metric.entry.year
                        ))
                        .small(),
                    );
                    ui.label(RichText::new(metric.formatted()).heading().strong());
                    ui.label(RichText::new(metric.category.label()).weak());
                });
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Filtered rows
// ---------------------------------------------------------------------------

pub fn filtered_table(ui: &mut Ui, views: &DashboardViews) {
    ui.strong(format!("Filtered dataset ({} rows)", views.filtered.len()));
    if views.is_empty_selection() {
        ui.colored_label(Color32::YELLOW, NO_DATA_MESSAGE);
        return;
    }

    let rows = &views.filtered;
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(60.0))
        .column(Column::initial(420.0).at_least(120.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Year");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Indicator Name");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Value");
            });
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let obs = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(obs.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&obs.indicator_name);
                });
                row.col(|ui: &mut Ui| {
                    match obs.value {
                        Some(v) => ui.label(format!("{v:.3}")),
                        None => ui.label(RichText::new("N/A").weak()),
                    };
                });
            });
        });
}
