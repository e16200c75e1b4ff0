use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, Points};

use crate::color;
use crate::data::model::{LaunchDataset, Outcome, SiteFilter};
use crate::state::{AppState, ColorMode};

// ---------------------------------------------------------------------------
// Outcome and payload charts (central panel)
// ---------------------------------------------------------------------------

/// Render both dashboard charts, stacked vertically.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a launch-records file to begin  (File → Open…)");
            });
            return;
        }
    };

    // Split the panel between the two charts, leaving room for the captions.
    let chart_height = ((ui.available_height() - 56.0) / 2.0).max(120.0);

    outcome_chart(ui, state, chart_height);
    ui.separator();
    payload_scatter(ui, state, dataset, chart_height);
}

// ---------------------------------------------------------------------------
// Outcome counts (bar chart)
// ---------------------------------------------------------------------------

fn outcome_chart(ui: &mut Ui, state: &AppState, height: f32) {
    let title = match &state.selection.site {
        SiteFilter::All => "Total success vs failed launches".to_string(),
        SiteFilter::Site(s) => format!("Success vs failed launches for {s}"),
    };
    ui.strong(title);

    Plot::new("outcome_chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_formatter(outcome_axis_formatter)
        .include_x(-0.5)
        .include_x(1.5)
        .include_y(0.0)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (&outcome, &count) in &state.counts {
                let bar = Bar::new(outcome.class() as f64, count as f64)
                    .width(0.6)
                    .name(outcome.to_string())
                    .fill(color::outcome_color(outcome));
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(outcome.to_string())
                        .color(color::outcome_color(outcome)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Payload vs outcome (scatter)
// ---------------------------------------------------------------------------

fn payload_scatter(ui: &mut Ui, state: &AppState, dataset: &LaunchDataset, height: f32) {
    let site_label = match &state.selection.site {
        SiteFilter::All => "All Sites".to_string(),
        SiteFilter::Site(s) => s.clone(),
    };
    ui.strong(format!("Payload vs launch success for {site_label}"));

    let (min_payload, max_payload) = dataset.payload_bounds;

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Success (1 = Success, 0 = Failure)")
        .y_axis_formatter(outcome_axis_formatter)
        .include_x(min_payload)
        .include_x(max_payload)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| match state.color_mode {
            ColorMode::Outcome => {
                for outcome in [Outcome::Failure, Outcome::Success] {
                    let coords: Vec<[f64; 2]> = state
                        .scatter_indices
                        .iter()
                        .map(|&idx| &dataset.records[idx])
                        .filter(|r| r.outcome == outcome)
                        .map(|r| [r.payload_mass_kg, r.outcome.class() as f64])
                        .collect();
                    if coords.is_empty() {
                        continue;
                    }
                    plot_ui.points(
                        Points::new(coords)
                            .name(outcome.to_string())
                            .color(color::outcome_color(outcome))
                            .radius(3.0),
                    );
                }
            }
            ColorMode::Site => {
                for site in &dataset.sites {
                    let coords: Vec<[f64; 2]> = state
                        .scatter_indices
                        .iter()
                        .map(|&idx| &dataset.records[idx])
                        .filter(|r| &r.site == site)
                        .map(|r| [r.payload_mass_kg, r.outcome.class() as f64])
                        .collect();
                    if coords.is_empty() {
                        continue;
                    }
                    plot_ui.points(
                        Points::new(coords)
                            .name(site)
                            .color(state.site_colors.color_for(site))
                            .radius(3.0),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Axis labelling
// ---------------------------------------------------------------------------

/// Label the binary outcome axis: 0 is Failure, 1 is Success, everything
/// else stays blank.
fn outcome_axis_formatter(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    if (mark.value - Outcome::Failure.class() as f64).abs() < 1e-6 {
        Outcome::Failure.to_string()
    } else if (mark.value - Outcome::Success.class() as f64).abs() < 1e-6 {
        Outcome::Success.to_string()
    } else {
        String::new()
    }
}
