use femtovg::Color;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::settings::{ColorScheme, ThemeMode};

/// Visual styling for the clock face.
///
/// Theme values are loaded from YAML files in ./assets/themes, one per
/// (mode, scheme) preset.
///
/// Example YAML format for a theme file:
///
/// background_color: [26, 26, 46]
/// text_color: [255, 255, 255]
/// secondary_text_color: [255, 255, 255, 153]
/// gradient_start: [0, 217, 255]
/// gradient_end: [255, 149, 0]
/// highlight_color: [255, 215, 0]
/// highlight_glow: [255, 215, 0, 128]
/// font_size: 16.0
/// line_width: 3.0
///
/// Note: The theme YAML files must exist for the app to run. The app will
/// panic if they are missing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Theme {
    pub background_color: [u8; 3],
    pub text_color: [u8; 3],
    pub secondary_text_color: [u8; 4],
    pub gradient_start: [u8; 3],
    pub gradient_end: [u8; 3],
    pub highlight_color: [u8; 3],
    pub highlight_glow: [u8; 4],
    pub font_size: f32,
    pub line_width: f32,
}

impl Theme {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Self {
        let yaml = fs::read_to_string(path).expect("Failed to read theme YAML file");
        serde_yaml::from_str(&yaml).expect("Failed to parse theme YAML file")
    }

    /// Construct a theme from the mode and color scheme settings
    pub fn from_preset(mode: ThemeMode, scheme: ColorScheme) -> Self {
        let file = Self::preset_file(mode, scheme);
        if !Path::new(file).exists() {
            panic!("Theme YAML file not found: {}. Please create it in ./assets/themes.", file);
        }
        Self::from_yaml_file(file)
    }

    fn preset_file(mode: ThemeMode, scheme: ColorScheme) -> &'static str {
        match (mode, scheme) {
            (ThemeMode::Dark, ColorScheme::Default) => "assets/themes/dark_default.yml",
            (ThemeMode::Dark, ColorScheme::Ocean) => "assets/themes/dark_ocean.yml",
            (ThemeMode::Dark, ColorScheme::Sunset) => "assets/themes/dark_sunset.yml",
            (ThemeMode::Dark, ColorScheme::Forest) => "assets/themes/dark_forest.yml",
            (ThemeMode::Dark, ColorScheme::Monochrome) => "assets/themes/dark_monochrome.yml",
            (ThemeMode::Light, ColorScheme::Default) => "assets/themes/light_default.yml",
            (ThemeMode::Light, ColorScheme::Ocean) => "assets/themes/light_ocean.yml",
            (ThemeMode::Light, ColorScheme::Sunset) => "assets/themes/light_sunset.yml",
            (ThemeMode::Light, ColorScheme::Forest) => "assets/themes/light_forest.yml",
            (ThemeMode::Light, ColorScheme::Monochrome) => "assets/themes/light_monochrome.yml",
        }
    }

    /// Interpolate between two themes (for smooth transitions)
    pub fn interpolate(a: &Theme, b: &Theme, t: f32) -> Self {
        Self {
            background_color: lerp3(a.background_color, b.background_color, t),
            text_color: lerp3(a.text_color, b.text_color, t),
            secondary_text_color: lerp4(a.secondary_text_color, b.secondary_text_color, t),
            gradient_start: lerp3(a.gradient_start, b.gradient_start, t),
            gradient_end: lerp3(a.gradient_end, b.gradient_end, t),
            highlight_color: lerp3(a.highlight_color, b.highlight_color, t),
            highlight_glow: lerp4(a.highlight_glow, b.highlight_glow, t),
            font_size: lerp(a.font_size, b.font_size, t),
            line_width: lerp(a.line_width, b.line_width, t),
        }
    }

    // Helpers to convert [u8; 3] or [u8; 4] to femtovg::Color
    pub fn color3(rgb: [u8; 3]) -> Color {
        Color::rgb(rgb[0], rgb[1], rgb[2])
    }
    pub fn color4(rgba: [u8; 4]) -> Color {
        Color::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Blend two RGB colors, used for the proximity-driven marker colors.
    pub fn blend3(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
        lerp3(a, b, t)
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    lerp(a as f32, b as f32, t).round().clamp(0.0, 255.0) as u8
}

fn lerp3(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    [
        lerp_u8(a[0], b[0], t),
        lerp_u8(a[1], b[1], t),
        lerp_u8(a[2], b[2], t),
    ]
}

fn lerp4(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    [
        lerp_u8(a[0], b[0], t),
        lerp_u8(a[1], b[1], t),
        lerp_u8(a[2], b[2], t),
        lerp_u8(a[3], b[3], t),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme(bg: [u8; 3]) -> Theme {
        Theme {
            background_color: bg,
            text_color: [255, 255, 255],
            secondary_text_color: [255, 255, 255, 153],
            gradient_start: [0, 217, 255],
            gradient_end: [255, 149, 0],
            highlight_color: [255, 215, 0],
            highlight_glow: [255, 215, 0, 128],
            font_size: 16.0,
            line_width: 3.0,
        }
    }

    #[test]
    fn interpolation_endpoints_match_inputs() {
        let a = theme([0, 0, 0]);
        let b = theme([200, 100, 50]);
        assert_eq!(Theme::interpolate(&a, &b, 0.0), a);
        assert_eq!(Theme::interpolate(&a, &b, 1.0), b);
    }

    #[test]
    fn interpolation_midpoint_is_halfway() {
        let a = theme([0, 0, 0]);
        let b = theme([200, 100, 50]);
        let mid = Theme::interpolate(&a, &b, 0.5);
        assert_eq!(mid.background_color, [100, 50, 25]);
    }

    #[test]
    fn parses_yaml_theme() {
        let yaml = "\
background_color: [26, 26, 46]
text_color: [255, 255, 255]
secondary_text_color: [255, 255, 255, 153]
gradient_start: [0, 217, 255]
gradient_end: [255, 149, 0]
highlight_color: [255, 215, 0]
highlight_glow: [255, 215, 0, 128]
font_size: 16.0
line_width: 3.0
";
        let parsed: Theme = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.background_color, [26, 26, 46]);
        assert_eq!(parsed.highlight_glow[3], 128);
    }

    #[test]
    fn all_preset_files_load() {
        // Exercises every shipped theme asset; run from the crate root.
        for mode in [ThemeMode::Dark, ThemeMode::Light] {
            for scheme in [
                ColorScheme::Default,
                ColorScheme::Ocean,
                ColorScheme::Sunset,
                ColorScheme::Forest,
                ColorScheme::Monochrome,
            ] {
                let theme = Theme::from_preset(mode, scheme);
                assert!(theme.font_size > 0.0);
            }
        }
    }
}
