use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use poverty_dash::data::views::DashboardViews;
use poverty_dash::error::InsufficientDataError;

use crate::color::{diverging, sequential, IndicatorColors};
use crate::ui::NO_DATA_MESSAGE;

// ---------------------------------------------------------------------------
// Trend (line chart)
// ---------------------------------------------------------------------------

/// One line per selected indicator over the selected year range.
pub fn trend_plot(ui: &mut Ui, views: &DashboardViews, colors: &IndicatorColors) {
    ui.strong("Trend of selected indicators over time");
    if views.trend.iter().all(|s| s.points.is_empty()) {
        ui.colored_label(Color32::YELLOW, NO_DATA_MESSAGE);
        return;
    }

    Plot::new("trend_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Value")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &views.trend {
                let color = colors.color_for(&series.indicator_name);
                let points: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .map(|&(year, value)| [year as f64, value])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(&series.indicator_name)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(&series.indicator_name)
                        .color(color)
                        .radius(3.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Growth (grouped bar chart)
// ---------------------------------------------------------------------------

/// Year-on-year growth, one bar group per year, one bar per indicator.
pub fn growth_chart(ui: &mut Ui, views: &DashboardViews, colors: &IndicatorColors) {
    ui.strong("Year-on-year growth / decline (%)");
    if views.growth.is_empty() {
        ui.label("Not enough data to compute growth rates.");
        return;
    }

    let groups: Vec<_> = views
        .growth
        .chunk_by(|a, b| a.indicator_name == b.indicator_name)
        .collect();
    let width = 0.8 / groups.len() as f64;

    Plot::new("growth_plot")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Growth rate (%)")
        .show(ui, |plot_ui| {
            for (k, group) in groups.iter().enumerate() {
                let name = &group[0].indicator_name;
                let color = colors.color_for(name);
                let offset = (k as f64 - (groups.len() - 1) as f64 / 2.0) * width;
                let bars: Vec<Bar> = group
                    .iter()
                    .map(|g| {
                        Bar::new(g.year as f64 + offset, g.growth_pct)
                            .width(width)
                            .fill(color)
                            .name(format!("{name} ({})", g.year))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).name(name).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Ranking (horizontal bar chart)
// ---------------------------------------------------------------------------

pub fn ranking_chart(ui: &mut Ui, views: &DashboardViews) {
    let year = views
        .ranking_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "–".to_string());
    ui.strong(format!("Ranking of all indicators in {year}"));
    if views.ranking.is_empty() {
        ui.colored_label(Color32::YELLOW, "No ranking data available for this year.");
        return;
    }

    let min = views.ranking.iter().map(|e| e.value).fold(f64::INFINITY, f64::min);
    let max = views.ranking.iter().map(|e| e.value).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let bars: Vec<Bar> = views
        .ranking
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let t = if span.abs() < f64::EPSILON { 1.0 } else { (entry.value - min) / span };
            // First entry on top.
            Bar::new(-(i as f64), entry.value)
                .width(0.7)
                .fill(sequential(t))
                .name(&entry.indicator_name)
        })
        .collect();

    let plot_height = (ui.available_height() * 0.6).max(160.0);
    Plot::new("ranking_plot")
        .height(plot_height)
        .x_axis_label("Value")
        .show_axes([true, false])
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });

    egui::ScrollArea::vertical()
        .id_salt("ranking_list")
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("ranking_grid").striped(true).show(ui, |ui: &mut Ui| {
                for (i, entry) in views.ranking.iter().enumerate() {
                    ui.label(format!("{}.", i + 1));
                    ui.label(&entry.indicator_name);
                    ui.label(format!("{:.2}", entry.value));
                    ui.end_row();
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Correlation (heatmap grid)
// ---------------------------------------------------------------------------

const CELL_SIZE: egui::Vec2 = egui::vec2(64.0, 28.0);

fn insufficient_data_message(err: &InsufficientDataError) -> String {
    format!(
        "Too much missing data for correlation matrix ({:.0}% of {} cells missing).",
        err.missing_fraction() * 100.0,
        err.total
    )
}

pub fn correlation_heatmap(ui: &mut Ui, views: &DashboardViews) {
    ui.strong("Correlation between selected indicators");
    let matrix = match &views.correlation {
        Ok(m) => m,
        Err(e) => {
            log::debug!("correlation view: {e}");
            ui.label(RichText::new(insufficient_data_message(e)).italics());
            return;
        }
    };
    if matrix.is_empty() {
        ui.colored_label(Color32::YELLOW, NO_DATA_MESSAGE);
        return;
    }

    egui::ScrollArea::both().show(ui, |ui: &mut Ui| {
        egui::Grid::new("correlation_grid")
            .spacing([2.0, 2.0])
            .show(ui, |ui: &mut Ui| {
                ui.label("");
                for (j, name) in matrix.indicators.iter().enumerate() {
                    ui.label(RichText::new(format!("#{}", j + 1)).strong())
                        .on_hover_text(name);
                }
                ui.end_row();

                for (i, row_name) in matrix.indicators.iter().enumerate() {
                    ui.label(format!("#{} {row_name}", i + 1));
                    for (j, col_name) in matrix.indicators.iter().enumerate() {
                        let r = matrix.get(i, j);
                        let (rect, response) = ui.allocate_exact_size(CELL_SIZE, Sense::hover());
                        let painter = ui.painter();
                        painter.rect_filled(rect, 2.0, diverging(r));
                        let text = r.map_or_else(|| "N/A".to_string(), |r| format!("{r:.2}"));
                        painter.text(
                            rect.center(),
                            Align2::CENTER_CENTER,
                            text,
                            FontId::proportional(12.0),
                            Color32::BLACK,
                        );
                        response.on_hover_text(format!("{row_name}\n× {col_name}"));
                    }
                    ui.end_row();
                }
            });
    });
}
