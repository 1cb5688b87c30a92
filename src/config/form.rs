use crate::domain::core::Viewport;
use crate::domain::grid::{ConfigIssue, GridConfig, GridError};
use crate::domain::resolution::Resolution;

/// Values the form falls back to on reset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormDefaults {
    pub columns: u32,
    pub gutter_percent: f64,
}

impl FormDefaults {
    pub const COLUMNS: u32 = 12;
    pub const GUTTER_PERCENT: f64 = 4.0;
    /// Largest column count the form accepts
    ///
    /// Every column becomes a markup element, so the count bounds the size
    /// of the generated row.
    pub const MAX_COLUMNS: u32 = 1000;
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            columns: Self::COLUMNS,
            gutter_percent: Self::GUTTER_PERCENT,
        }
    }
}

/// Raw text currently held by the configurator form
///
/// Values are kept exactly as typed; they are only interpreted when a
/// snapshot is taken with [`FormValues::to_config`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub columns: String,
    pub gutter: String,
    pub resolution: String,
}

impl FormValues {
    pub fn new(defaults: &FormDefaults) -> Self {
        Self {
            columns: defaults.columns.to_string(),
            gutter: defaults.gutter_percent.to_string(),
            resolution: Resolution::Fluid.option_value(),
        }
    }

    /// Restores the defaults and selects the fluid option
    pub fn reset(&mut self, defaults: &FormDefaults) {
        *self = Self::new(defaults);
    }

    pub fn selected_resolution(&self) -> Result<Resolution, GridError> {
        Resolution::parse(&self.resolution)
            .map_err(|_| invalid(ConfigIssue::UnknownResolution(self.resolution.clone())))
    }

    /// Snapshots the form into a grid configuration for the given viewport
    ///
    /// # Arguments
    /// * `viewport` - Live viewport; supplies the container width for the
    ///   fluid option and the fallback row height for every option
    ///
    /// # Returns
    /// A validated `GridConfig`, or `GridError::InvalidConfig` naming the
    /// first field that could not be used
    pub fn to_config(&self, viewport: &Viewport) -> Result<GridConfig, GridError> {
        let columns = parse_columns(&self.columns)?;
        let gutter_percent = parse_gutter(&self.gutter)?;
        let resolution = self.selected_resolution()?;
        let (container_width_px, fixed_height_px) = resolution.container(viewport);

        let config = GridConfig {
            columns,
            gutter_percent,
            container_width_px,
            container_height_px: viewport.client_height,
            fixed_height_px,
        };
        config.validate()?;
        Ok(config)
    }
}

fn invalid(issue: ConfigIssue) -> GridError {
    GridError::InvalidConfig(issue)
}

fn parse_columns(raw: &str) -> Result<u32, GridError> {
    let text = raw.trim();
    if let Ok(columns) = text.parse::<u64>() {
        return match u32::try_from(columns) {
            Ok(0) => Err(invalid(ConfigIssue::ZeroColumns)),
            Ok(n) if n <= FormDefaults::MAX_COLUMNS => Ok(n),
            _ => Err(invalid(ConfigIssue::TooManyColumns(columns))),
        };
    }

    // Distinguish "3.5" or "-2" from text that is not a number at all
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Err(invalid(ConfigIssue::NonIntegerColumns(raw.to_string()))),
        _ => Err(invalid(ConfigIssue::NonNumericColumns(raw.to_string()))),
    }
}

fn parse_gutter(raw: &str) -> Result<f64, GridError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        Ok(value) if value.is_finite() => Err(invalid(ConfigIssue::NegativeGutter(value))),
        _ => Err(invalid(ConfigIssue::NonNumericGutter(raw.to_string()))),
    }
}
