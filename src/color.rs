use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

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

/// Fixed outcome convention: failure is red, success is green.
pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Failure => Color32::from_rgb(0xd6, 0x27, 0x28),
        Outcome::Success => Color32::from_rgb(0x2c, 0xa0, 0x2c),
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a categorical column (launch site, booster
/// category) to distinct colours. Built once from the whole dataset so a
/// category keeps its colour while filters change.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(categories: &BTreeSet<String>) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories.iter().cloned().zip(palette).collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category; unknown labels are grey.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(4);
        assert_eq!(p.len(), 4);
        let unique: BTreeSet<_> = p.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 4);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn color_map_is_stable_and_defaults_to_grey() {
        let cats: BTreeSet<String> = ["B4", "B5", "FT"].iter().map(|s| s.to_string()).collect();
        let cm = ColorMap::new(&cats);
        assert_eq!(cm.color_for("FT"), ColorMap::new(&cats).color_for("FT"));
        assert_ne!(cm.color_for("B4"), cm.color_for("B5"));
        assert_eq!(cm.color_for("v1.0"), Color32::GRAY);
    }

    #[test]
    fn outcome_colours_follow_convention() {
        let fail = outcome_color(Outcome::Failure);
        let ok = outcome_color(Outcome::Success);
        assert!(fail.r() > fail.g());
        assert!(ok.g() > ok.r());
    }
}
