use eframe::egui;
use poverty_dash::settings::DashboardSettings;

use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PovertyDashApp {
    pub state: AppState,
}

impl PovertyDashApp {
    /// Build the app and open the configured dataset, if any.
    pub fn new(settings: DashboardSettings) -> Self {
        let data_path = settings.data_path.clone();
        let mut state = AppState::new(settings);
        state.open(&data_path);
        Self { state }
    }
}

impl eframe::App for PovertyDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Filters may have changed above; recompute before drawing views.
        self.state.refresh();

        // ---- Central panel: views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &mut self.state);
        });
    }
}
