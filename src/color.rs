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
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb.into_format())
        })
        .collect()
}

fn to_color32(rgb: Srgb<u8>) -> Color32 {
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

// ---------------------------------------------------------------------------
// Diverging scale for correlations
// ---------------------------------------------------------------------------

/// Blue → light grey → red over [-1, 1], mixed in linear RGB.
#[derive(Debug, Clone)]
pub struct CoolWarm {
    cool: LinSrgb,
    neutral: LinSrgb,
    warm: LinSrgb,
}

impl Default for CoolWarm {
    fn default() -> Self {
        let lin = |r: u8, g: u8, b: u8| Srgb::new(r, g, b).into_format::<f32>().into_linear();
        Self {
            cool: lin(59, 76, 192),
            neutral: lin(221, 221, 221),
            warm: lin(180, 4, 38),
        }
    }
}

impl CoolWarm {
    /// Colour for a correlation coefficient. NaN maps to grey.
    pub fn color_for(&self, r: f64) -> Color32 {
        if r.is_nan() {
            return Color32::GRAY;
        }
        let r = r.clamp(-1.0, 1.0) as f32;
        let mixed = if r < 0.0 {
            self.neutral.mix(self.cool, -r)
        } else {
            self.neutral.mix(self.warm, r)
        };
        to_color32(Srgb::from_linear(mixed))
    }

    /// Annotation colour readable on top of [`CoolWarm::color_for`].
    pub fn text_color_for(&self, r: f64) -> Color32 {
        if r.abs() > 0.6 {
            Color32::WHITE
        } else {
            Color32::BLACK
        }
    }
}
