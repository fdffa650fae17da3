use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let hsl = Hsl::new(hue, saturation, lightness);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32((i as f32 / n as f32) * 360.0, 0.75, 0.55))
        .collect()
}

// ---------------------------------------------------------------------------
// Indicator → series colour
// ---------------------------------------------------------------------------

/// Stable colour per indicator, assigned once per dataset.
#[derive(Debug, Clone, Default)]
pub struct IndicatorColors {
    mapping: BTreeMap<String, Color32>,
}

impl IndicatorColors {
    pub fn new(indicators: &[String]) -> Self {
        let mapping = indicators
            .iter()
            .cloned()
            .zip(generate_palette(indicators.len()))
            .collect();
        IndicatorColors { mapping }
    }

    pub fn color_for(&self, indicator: &str) -> Color32 {
        self.mapping
            .get(indicator)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}

// ---------------------------------------------------------------------------
// Scales
// ---------------------------------------------------------------------------

/// Purple → yellow ramp for `t` in `[0, 1]` (ranking bars).
pub fn sequential(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    hsl_to_color32(270.0 - 210.0 * t, 0.65, 0.35 + 0.25 * t)
}

/// Blue (−1) → near-white (0) → red (+1). Missing cells are grey.
pub fn diverging(r: Option<f64>) -> Color32 {
    let Some(r) = r else {
        return Color32::GRAY;
    };
    let r = r.clamp(-1.0, 1.0) as f32;
    let hue = if r < 0.0 { 215.0 } else { 5.0 };
    hsl_to_color32(hue, 0.7, 0.95 - 0.5 * r.abs())
}
