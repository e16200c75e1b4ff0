use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Records table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the currently selected records, one row per launch.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Flight");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Launch Site");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Payload (kg)");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Booster Version");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Category");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Outcome");
            });
        })
        .body(|body| {
            body.rows(18.0, state.scatter_indices.len(), |mut row| {
                let rec = &dataset.records[state.scatter_indices[row.index()]];
                row.col(|ui: &mut Ui| {
                    let flight = match rec.flight_number {
                        Some(n) => n.to_string(),
                        None => "-".to_string(),
                    };
                    ui.label(flight);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.0}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.booster_version.as_deref().unwrap_or("-"));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.booster_category.as_deref().unwrap_or("-"));
                });
                row.col(|ui: &mut Ui| {
                    ui.colored_label(color::outcome_color(rec.outcome), rec.outcome.to_string());
                });
            });
        });
}
