use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::data::model::SiteFilter;
use crate::state::{AppState, ColorMode};

/// Step of the payload range sliders, in kilograms.
const PAYLOAD_STEP_KG: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Left side panel – dashboard controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Logo (centered) ----
    let logo = egui::include_image!("../../assets/logo.png");
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(logo)
                .max_width(ui.available_width() * 0.8)
                .max_height(120.0)
                .rounding(4.0),
        );
    });
    ui.add_space(4.0);

    ui.heading("Controls");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state below.
    let sites = dataset.sites.clone();
    let (min_payload, max_payload) = dataset.payload_bounds;

    // ---- Site selector ----
    ui.strong("Launch site");
    let selected_label = match &state.selection.site {
        SiteFilter::All => "All Sites".to_string(),
        SiteFilter::Site(s) => s.clone(),
    };
    let mut new_site: Option<SiteFilter> = None;
    egui::ComboBox::from_id_salt("site_filter")
        .selected_text(&selected_label)
        .show_ui(ui, |ui: &mut Ui| {
            let all_selected = state.selection.site == SiteFilter::All;
            if ui.selectable_label(all_selected, "All Sites").clicked() {
                new_site = Some(SiteFilter::All);
            }
            for site in &sites {
                let is_selected =
                    matches!(&state.selection.site, SiteFilter::Site(s) if s == site);
                if ui.selectable_label(is_selected, site).clicked() {
                    new_site = Some(SiteFilter::Site(site.clone()));
                }
            }
        });
    if let Some(site) = new_site {
        state.set_site_filter(site);
    }

    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (kg)");
    let (mut low, mut high) = state.selection.payload_range;
    let low_changed = ui
        .add(
            Slider::new(&mut low, min_payload..=max_payload)
                .step_by(PAYLOAD_STEP_KG)
                .text("low"),
        )
        .changed();
    let high_changed = ui
        .add(
            Slider::new(&mut high, min_payload..=max_payload)
                .step_by(PAYLOAD_STEP_KG)
                .text("high"),
        )
        .changed();
    if low_changed || high_changed {
        // Linked handles: the moved one stops at the other.
        if low_changed {
            low = low.min(high);
        }
        if high_changed {
            high = high.max(low);
        }
        state.set_payload_range(low, high);
    }
    ui.label(format!("{low:.0} – {high:.0} kg selected"));

    ui.separator();

    // ---- Scatter colouring ----
    ui.strong("Color points by");
    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.color_mode, ColorMode::Outcome, "Outcome");
        ui.selectable_value(&mut state.color_mode, ColorMode::Site, "Site");
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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches loaded, {} selected",
                ds.len(),
                state.scatter_indices.len()
            ));
        }

        ui.separator();

        if ui.selectable_label(state.show_table, "Records").clicked() {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launch records across {} sites",
                    dataset.len(),
                    dataset.sites.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
