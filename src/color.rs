use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Categorical mapping: label → Color32
// ---------------------------------------------------------------------------

/// Assigns distinct colours to category labels (donut slices, legends).
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Colours are assigned in iteration order of `labels`.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous red → yellow → green scale
// ---------------------------------------------------------------------------

/// Diverging scale for numeric values, low = red, high = green.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RdYlGn {
    min: f64,
    max: f64,
}

impl RdYlGn {
    const RED: (f32, f32, f32) = (0.843, 0.188, 0.153);
    const YELLOW: (f32, f32, f32) = (1.0, 1.0, 0.749);
    const GREEN: (f32, f32, f32) = (0.102, 0.596, 0.314);

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Build a scale spanning the given values; `None` when empty.
    pub fn spanning(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |acc, v| match acc {
            None => Some(Self::new(v, v)),
            Some(s) => Some(Self::new(s.min.min(v), s.max.max(v))),
        })
    }

    /// Position of `value` on the scale in `[0, 1]`. A degenerate range maps
    /// to the midpoint.
    pub fn position(&self, value: f64) -> f32 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.5;
        }
        ((value - self.min) / range).clamp(0.0, 1.0) as f32
    }

    pub fn color_for(&self, value: f64) -> Color32 {
        let t = self.position(value);
        let lin = |(r, g, b): (f32, f32, f32)| -> LinSrgb { Srgb::new(r, g, b).into_linear() };
        let mixed = if t < 0.5 {
            lin(Self::RED).mix(lin(Self::YELLOW), t * 2.0)
        } else {
            lin(Self::YELLOW).mix(lin(Self::GREEN), (t - 0.5) * 2.0)
        };
        to_color32(Srgb::from_linear(mixed))
    }
}
