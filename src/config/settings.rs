//! Tool settings
//!
//! Loaded from `<config dir>/fluid-grid/settings.toml`. Every section is
//! optional; missing values fall back to the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::config::form::FormDefaults;
use crate::domain::core::Viewport;
use crate::domain::resolution::{Resolution, ResolutionPreset, builtin_presets, preset_label};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Form defaults section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultsSettings {
    pub columns: u32,
    pub gutter: f64,
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        Self {
            columns: FormDefaults::COLUMNS,
            gutter: FormDefaults::GUTTER_PERCENT,
        }
    }
}

/// Initial viewport section, used until the first resize
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: f64,
    pub height: f64,
    /// Extra width of the browser window beyond the client area
    pub scrollbar: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        let viewport = Viewport::default();
        Self {
            width: viewport.client_width,
            height: viewport.client_height,
            scrollbar: 0.0,
        }
    }
}

/// Additional device size offered after the built-in list
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PresetSettings {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub defaults: DefaultsSettings,
    pub viewport: ViewportSettings,
    pub presets: Vec<PresetSettings>,
}

impl Settings {
    /// Default settings location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fluid-grid").join("settings.toml"))
    }

    /// Loads settings from an explicit path; the file must exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&contents).map_err(|err| match err {
            SettingsError::Parse { source, .. } => SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Loads settings from the given path, or from the default location
    ///
    /// A missing file at the default location yields built-in defaults; a
    /// missing explicitly given file is an error.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents).map_err(|source| SettingsError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.defaults.columns == 0 || self.defaults.columns > FormDefaults::MAX_COLUMNS {
            return Err(SettingsError::Invalid(format!(
                "defaults.columns must be between 1 and {}, got {}",
                FormDefaults::MAX_COLUMNS,
                self.defaults.columns
            )));
        }
        if !self.defaults.gutter.is_finite() || self.defaults.gutter < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "defaults.gutter must be a non-negative number, got {}",
                self.defaults.gutter
            )));
        }
        if !self.viewport.width.is_finite() || self.viewport.width <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "viewport.width must be positive, got {}",
                self.viewport.width
            )));
        }
        if !self.viewport.height.is_finite() || self.viewport.height < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "viewport.height must not be negative, got {}",
                self.viewport.height
            )));
        }
        if !self.viewport.scrollbar.is_finite() || self.viewport.scrollbar < 0.0 {
            return Err(SettingsError::Invalid(format!(
                "viewport.scrollbar must not be negative, got {}",
                self.viewport.scrollbar
            )));
        }
        if let Some(preset) = self.presets.iter().find(|p| p.width == 0 || p.height == 0) {
            return Err(SettingsError::Invalid(format!(
                "preset {}x{} has a zero dimension",
                preset.width, preset.height
            )));
        }
        Ok(())
    }

    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults {
            columns: self.defaults.columns,
            gutter_percent: self.defaults.gutter,
        }
    }

    pub fn initial_viewport(&self) -> Viewport {
        Viewport::with_browser_width(
            self.viewport.width,
            self.viewport.height,
            self.viewport.width + self.viewport.scrollbar,
        )
    }

    /// Built-in presets followed by the configured ones
    pub fn presets(&self) -> Vec<ResolutionPreset> {
        let mut presets = builtin_presets();
        for extra in &self.presets {
            let resolution = Resolution::Fixed {
                width: extra.width,
                height: extra.height,
            };
            if presets.iter().any(|p| p.resolution == resolution) {
                continue;
            }
            presets.push(ResolutionPreset::new(
                resolution,
                preset_label(extra.width, extra.height, &extra.label),
            ));
        }
        presets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.form_defaults(), FormDefaults::default());
        assert_eq!(settings.presets().len(), builtin_presets().len());
    }

    #[test]
    fn full_file_is_parsed() {
        let settings = Settings::from_toml(
            r#"
            [defaults]
            columns = 16
            gutter = 2.5

            [viewport]
            width = 1263
            height = 700
            scrollbar = 17

            [[presets]]
            width = 2560
            height = 1440
            label = "WQHD"
            "#,
        )
        .unwrap();

        assert_eq!(settings.form_defaults().columns, 16);
        assert_eq!(settings.form_defaults().gutter_percent, 2.5);

        let viewport = settings.initial_viewport();
        assert_eq!(viewport.client_width, 1263.0);
        assert_eq!(viewport.browser_width, 1280.0);

        let presets = settings.presets();
        let last = presets.last().unwrap();
        assert_eq!(last.label, "2560x1440 (WQHD)");
    }

    #[test]
    fn duplicate_presets_are_skipped() {
        let settings = Settings::from_toml(
            r#"
            [[presets]]
            width = 1920
            height = 1080
            "#,
        )
        .unwrap();
        assert_eq!(settings.presets().len(), builtin_presets().len());
    }

    #[test]
    fn invalid_defaults_rejected() {
        let err = Settings::from_toml("[defaults]\ncolumns = 0\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_toml("[defaults]\ncolumns = 5000\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_toml("[defaults]\ngutter = -3.0\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_toml("[[presets]]\nwidth = 0\nheight = 10\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = Settings::from_toml("[defaults\ncolumns = 3").unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[defaults]\ncolumns = 8").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.defaults.columns, 8);
        assert_eq!(settings.defaults.gutter, FormDefaults::GUTTER_PERCENT);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Settings::load_or_default(Some(&path)).unwrap_err();
        assert!(matches!(err, SettingsError::Read { .. }));
    }
}
