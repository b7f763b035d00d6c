use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.75, 0.45);
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
// Color mapping: transport type → Color32
// ---------------------------------------------------------------------------

/// Assigns each transport type a distinct colour, in option-list order.
#[derive(Debug, Clone)]
pub struct ColorMap {
    order: Vec<String>,
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(transport_types: &[String]) -> Self {
        let palette = generate_palette(transport_types.len());
        let mapping = transport_types
            .iter()
            .cloned()
            .zip(palette)
            .collect();

        ColorMap {
            order: transport_types.to_vec(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Colour for a transport type; grey for absent or unknown types.
    pub fn color_for(&self, transport_type: Option<&str>) -> Color32 {
        transport_type
            .and_then(|t| self.mapping.get(t))
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.order
            .iter()
            .map(|t| (t.clone(), self.color_for(Some(t))))
            .collect()
    }
}
