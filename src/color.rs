use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use pin_collector::data::model::Table;

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
            let hsl = Hsl::new(hue, 0.65, 0.5);
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
// Collection accents
// ---------------------------------------------------------------------------

/// Maps each collection name to a distinct accent colour for gallery cards.
#[derive(Debug, Clone, Default)]
pub struct CollectionColors {
    mapping: BTreeMap<String, Color32>,
}

impl CollectionColors {
    pub fn from_table(table: &Table) -> Self {
        let names: BTreeSet<&str> = table
            .records
            .iter()
            .map(|r| r.collection.trim())
            .filter(|c| !c.is_empty())
            .collect();
        let palette = generate_palette(names.len());
        let mapping = names
            .into_iter()
            .zip(palette)
            .map(|(name, color)| (name.to_string(), color))
            .collect();
        CollectionColors { mapping }
    }

    pub fn color_for(&self, collection: &str) -> Color32 {
        self.mapping
            .get(collection.trim())
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}
