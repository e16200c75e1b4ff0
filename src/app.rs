use eframe::egui;

use crate::data::model::LaunchDataset;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchBoardApp {
    pub state: AppState,
}

impl Default for LaunchBoardApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl LaunchBoardApp {
    /// Start with a dataset already loaded (CLI startup path).
    pub fn with_dataset(dataset: LaunchDataset) -> Self {
        let mut app = Self::default();
        app.state.set_dataset(dataset);
        app
    }
}

impl eframe::App for LaunchBoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: records table (toggleable) ----
        if self.state.show_table {
            egui::TopBottomPanel::bottom("records_table")
                .default_height(200.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::records_table(ui, &self.state);
                });
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::charts(ui, &self.state);
        });
    }
}
