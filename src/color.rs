use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

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
// Category colors: chart series value → Color32
// ---------------------------------------------------------------------------

/// Maps the unique values of a category column (e.g. `BusinessType`) to
/// distinct colours, so every chart draws a category the same way.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    pub column: String,
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build a colour map for the given column from its unique values.
    pub fn new(column: &str, unique_values: &std::collections::BTreeSet<CellValue>) -> Self {
        let palette = generate_palette(unique_values.len());
        let mapping: BTreeMap<CellValue, Color32> = unique_values
            .iter()
            .zip(palette.into_iter())
            .map(|(v, c): (&CellValue, Color32)| (v.clone(), c))
            .collect();

        CategoryColors {
            column: column.to_string(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given category value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}
