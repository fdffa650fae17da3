//! egui rendering. Every number shown here comes from `DashboardViews`.

pub mod panels;
pub mod plot;
pub mod table;

/// Shown wherever a view has nothing to draw for the current filters.
pub const NO_DATA_MESSAGE: &str = "No data available for the selected filters.";
