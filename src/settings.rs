use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::{env, fs};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::logging::SETTINGS_NAMESPACE;

const SETTINGS_ENV_VAR: &str = "RINGCLOCK_SETTINGS";
const SETTINGS_FILE: &str = "settings.yml";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Default,
    Ocean,
    Sunset,
    Forest,
    Monochrome,
}

impl ColorScheme {
    /// Parse a command-listener token like "ocean". Case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::Default),
            "ocean" => Some(Self::Ocean),
            "sunset" => Some(Self::Sunset),
            "forest" => Some(Self::Forest),
            "monochrome" => Some(Self::Monochrome),
            _ => None,
        }
    }
}

/// User-facing configuration, passed explicitly into the frame loop each
/// tick. Persisted as YAML; every field has a default so a partial or
/// missing file still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// "local" or an IANA zone name like "Europe/Paris"
    pub time_zone: String,
    pub is_24_hour: bool,
    pub animations_enabled: bool,
    pub theme_mode: ThemeMode,
    pub color_scheme: ColorScheme,
    /// Influence radius of the seconds-ring emphasis, in marker units
    pub motion_sensitivity: f64,
    /// Draw a line from the ring center to the current continuous second
    pub show_indicator_line: bool,
    /// Seeded paper speckle behind the clock face
    pub paper_texture: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_zone: "local".to_string(),
            is_24_hour: false,
            animations_enabled: true,
            theme_mode: ThemeMode::Dark,
            color_scheme: ColorScheme::Default,
            motion_sensitivity: 2.5,
            show_indicator_line: false,
            paper_texture: false,
        }
    }
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let yaml = fs::read_to_string(path)?;
        let mut settings: Settings = serde_yaml::from_str(&yaml)?;
        // A negative radius would mean "divide by nothing"; the mapper treats
        // it as no influence, but there is no reason to persist it.
        if settings.motion_sensitivity < 0.0 {
            settings.motion_sensitivity = 0.0;
        }
        Ok(settings)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Load from the default location, falling back to defaults if the file
    /// does not exist yet. A file that exists but cannot be parsed is logged
    /// and ignored rather than crashing the clock.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!(target: SETTINGS_NAMESPACE, "No settings file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => {
                info!(target: SETTINGS_NAMESPACE, "Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!(target: SETTINGS_NAMESPACE, "Ignoring unreadable settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Where settings live: `$RINGCLOCK_SETTINGS` if set, otherwise
/// `settings.yml` in the working directory.
pub fn settings_path() -> PathBuf {
    match env::var(SETTINGS_ENV_VAR) {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from(SETTINGS_FILE),
    }
}

/// Runtime settings state shared between the frame loop, the command
/// listener, and the autosave task.
pub struct SettingsState {
    settings: Settings,
    dirty: bool,
}

impl SettingsState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            dirty: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        if self.settings.theme_mode != mode {
            self.settings.theme_mode = mode;
            self.dirty = true;
        }
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        if self.settings.color_scheme != scheme {
            self.settings.color_scheme = scheme;
            self.dirty = true;
        }
    }

    pub fn set_24_hour(&mut self, is_24_hour: bool) {
        if self.settings.is_24_hour != is_24_hour {
            self.settings.is_24_hour = is_24_hour;
            self.dirty = true;
        }
    }

    pub fn set_animations_enabled(&mut self, enabled: bool) {
        if self.settings.animations_enabled != enabled {
            self.settings.animations_enabled = enabled;
            self.dirty = true;
        }
    }

    pub fn set_indicator_line(&mut self, shown: bool) {
        if self.settings.show_indicator_line != shown {
            self.settings.show_indicator_line = shown;
            self.dirty = true;
        }
    }

    pub fn set_paper_texture(&mut self, enabled: bool) {
        if self.settings.paper_texture != enabled {
            self.settings.paper_texture = enabled;
            self.dirty = true;
        }
    }

    pub fn set_time_zone(&mut self, zone: &str) {
        if self.settings.time_zone != zone {
            self.settings.time_zone = zone.to_string();
            self.dirty = true;
        }
    }

    pub fn set_motion_sensitivity(&mut self, radius: f64) {
        let radius = radius.max(0.0);
        if (self.settings.motion_sensitivity - radius).abs() > f64::EPSILON {
            self.settings.motion_sensitivity = radius;
            self.dirty = true;
        }
    }

    /// Take the dirty flag; the autosave task saves only when this was set.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

pub type SharedSettings = Arc<Mutex<SettingsState>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = env::temp_dir();
        path.push(format!("ringclock-test-{}-{}.yml", name, std::process::id()));
        path
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = temp_path("roundtrip");
        let mut settings = Settings::default();
        settings.time_zone = "Europe/Paris".to_string();
        settings.is_24_hour = true;
        settings.color_scheme = ColorScheme::Ocean;
        settings.motion_sensitivity = 4.0;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let settings: Settings = serde_yaml::from_str("is_24_hour: true\n").unwrap();
        assert!(settings.is_24_hour);
        assert_eq!(settings.time_zone, "local");
        assert_eq!(settings.color_scheme, ColorScheme::Default);
        assert!(settings.animations_enabled);
    }

    #[test]
    fn negative_sensitivity_is_clamped_on_load() {
        let path = temp_path("clamp");
        fs::write(&path, "motion_sensitivity: -3.0\n").unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.motion_sensitivity, 0.0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = temp_path("missing-never-created");
        let settings = Settings::load_or_default(&path);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn scheme_parse_is_case_insensitive() {
        assert_eq!(ColorScheme::parse("Ocean"), Some(ColorScheme::Ocean));
        assert_eq!(ColorScheme::parse("MONOCHROME"), Some(ColorScheme::Monochrome));
        assert_eq!(ColorScheme::parse("neon"), None);
    }

    #[test]
    fn setters_mark_dirty_only_on_change() {
        let mut state = SettingsState::new(Settings::default());
        assert!(!state.take_dirty());

        state.set_24_hour(false); // already the default
        assert!(!state.take_dirty());

        state.set_24_hour(true);
        assert!(state.take_dirty());
        assert!(!state.take_dirty());

        state.set_color_scheme(ColorScheme::Forest);
        state.set_motion_sensitivity(-1.0); // clamps to 0, still a change
        assert!(state.take_dirty());
        assert_eq!(state.settings().motion_sensitivity, 0.0);
    }
}
