use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

// ---------------------------------------------------------------------------
// Fixed outcome colours
// ---------------------------------------------------------------------------

/// The two outcome classes always render in the same colours.
pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Failure => Color32::from_rgb(218, 54, 51),
        Outcome::Success => Color32::from_rgb(46, 160, 67),
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: launch site → Color32
// ---------------------------------------------------------------------------

/// Maps the dataset's launch sites to distinct colours, for the scatter
/// chart's per-site colouring mode.
#[derive(Debug, Clone, Default)]
pub struct SiteColors {
    mapping: BTreeMap<String, Color32>,
}

impl SiteColors {
    /// Build a colour map over the dataset's known sites (sorted order, so
    /// each site keeps its colour across reloads of the same dataset).
    pub fn new(sites: &[String]) -> Self {
        let palette = generate_palette(sites.len());
        let mapping = sites.iter().cloned().zip(palette).collect();
        SiteColors { mapping }
    }

    /// Look up the colour for a site.  Unknown sites fall back to gray.
    pub fn color_for(&self, site: &str) -> Color32 {
        self.mapping.get(site).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct_for_small_n() {
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_site_falls_back_to_gray() {
        let colors = SiteColors::new(&["CCAFS LC-40".to_string(), "KSC LC-39A".to_string()]);
        assert_ne!(colors.color_for("CCAFS LC-40"), Color32::GRAY);
        assert_eq!(colors.color_for("somewhere else"), Color32::GRAY);
    }
}
