use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use poverty_dash::data::category::IndicatorCategory;
use poverty_dash::data::metrics::RankOrder;

use crate::state::{AppState, Tab};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset() else {
        ui.label("No dataset loaded.");
        return;
    };
    let Some(bounds) = dataset.year_bounds() else {
        ui.label("Dataset has no rows.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            let mut changed = false;
            if let Some(query) = state.query.as_mut() {
                ui.strong("Year range");
                let range = &mut query.year_range;
                let span = bounds.start..=bounds.end;
                changed |= ui
                    .add(egui::Slider::new(&mut range.start, span.clone()).text("From"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut range.end, span).text("To"))
                    .changed();
                if range.start > range.end {
                    range.end = range.start;
                }
                ui.separator();

                // ---- Ranking ----
                ui.strong("Ranking");
                let before = (query.ranking_year, query.rank_order);
                egui::ComboBox::from_id_salt("ranking_year")
                    .selected_text(
                        query
                            .ranking_year
                            .map(|y| y.to_string())
                            .unwrap_or_default(),
                    )
                    .show_ui(ui, |ui: &mut Ui| {
                        for &year in dataset.years().iter().rev() {
                            ui.selectable_value(
                                &mut query.ranking_year,
                                Some(year),
                                year.to_string(),
                            );
                        }
                    });
                ui.horizontal(|ui: &mut Ui| {
                    for order in [RankOrder::Descending, RankOrder::Ascending] {
                        ui.radio_value(&mut query.rank_order, order, order.label());
                    }
                });
                changed |= before != (query.ranking_year, query.rank_order);
                ui.separator();
            }
            if changed {
                state.mark_dirty();
            }

            // ---- Indicators, grouped by category (collapsible) ----
            ui.strong("Indicators");
            for category in IndicatorCategory::ALL {
                let names: Vec<String> = dataset
                    .indicators()
                    .iter()
                    .filter(|n| IndicatorCategory::classify(n) == category)
                    .cloned()
                    .collect();
                if names.is_empty() {
                    continue;
                }

                let n_selected = state
                    .query
                    .as_ref()
                    .map_or(0, |q| names.iter().filter(|n| q.indicators.contains(*n)).count());
                let header_text = format!("{category}  ({n_selected}/{})", names.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(category.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(&names);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(&names);
                            }
                        });

                        for name in &names {
                            let mut checked = state
                                .query
                                .as_ref()
                                .is_some_and(|q| q.indicators.contains(name));
                            let text = RichText::new(name).color(state.colors.color_for(name));
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_indicator(name);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.cache.source().is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = state.dataset() {
            let span = ds
                .year_bounds()
                .map(|r| format!(", {}–{}", r.start, r.end))
                .unwrap_or_default();
            let shown = state.views.as_ref().map_or(0, |v| v.filtered.len());
            ui.label(format!(
                "{} observations, {} indicators{span}; {shown} selected",
                ds.len(),
                ds.indicators().len(),
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – tabbed views
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(views) = &state.views else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let text = match &state.status_message {
                Some(msg) => format!("{msg}\n\nOpen a file to continue  (File → Open…)"),
                None => "Open a file to view indicators  (File → Open…)".to_string(),
            };
            ui.heading(text);
        });
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }
    });
    ui.separator();

    match state.tab {
        Tab::Overview => {
            table::snapshot_metrics(ui, views);
            ui.separator();
            plot::trend_plot(ui, views, &state.colors);
        }
        Tab::Growth => plot::growth_chart(ui, views, &state.colors),
        Tab::Ranking => plot::ranking_chart(ui, views),
        Tab::Correlation => plot::correlation_heatmap(ui, views),
        Tab::Data => table::filtered_table(ui, views),
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open indicator data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
