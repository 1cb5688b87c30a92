//! Column grid calculations
//!
//! This module turns a column count and a gutter percentage into the
//! widths the renderer needs. It is a pure computation: no state is kept
//! between calls and identical input always yields identical output.

use thiserror::Error;

/// The specific rule a grid configuration broke
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    /// Column count is zero
    ZeroColumns,
    /// Column text is empty or not a number
    NonNumericColumns(String),
    /// Column text is a number but not a positive whole number
    NonIntegerColumns(String),
    /// Gutter text is empty or not a number
    NonNumericGutter(String),
    /// Gutter is below zero
    NegativeGutter(f64),
    /// Container width is not a positive finite number
    InvalidContainerWidth(f64),
    /// Fallback container height is negative or not finite
    InvalidContainerHeight(f64),
    /// Fixed row height is not a positive finite number
    InvalidFixedHeight(f64),
    /// Resolution selection could not be understood
    UnknownResolution(String),
    /// Column count exceeds what the configurator will lay out
    TooManyColumns(u64),
    /// Inputs are finite but a computed width overflows
    NonFiniteResult,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigIssue::ZeroColumns => write!(f, "column count must be at least 1"),
            ConfigIssue::NonNumericColumns(raw) => {
                write!(f, "column count {raw:?} is not a number")
            }
            ConfigIssue::NonIntegerColumns(raw) => {
                write!(f, "column count {raw:?} is not a positive whole number")
            }
            ConfigIssue::NonNumericGutter(raw) => write!(f, "gutter {raw:?} is not a number"),
            ConfigIssue::NegativeGutter(value) => {
                write!(f, "gutter {value}% must not be negative")
            }
            ConfigIssue::InvalidContainerWidth(value) => {
                write!(f, "container width {value}px must be a positive number")
            }
            ConfigIssue::InvalidContainerHeight(value) => {
                write!(f, "container height {value}px must not be negative")
            }
            ConfigIssue::InvalidFixedHeight(value) => {
                write!(f, "fixed height {value}px must be a positive number")
            }
            ConfigIssue::UnknownResolution(raw) => {
                write!(f, "resolution {raw:?} is not recognised")
            }
            ConfigIssue::TooManyColumns(columns) => {
                write!(f, "column count {columns} is more than the grid can show")
            }
            ConfigIssue::NonFiniteResult => {
                write!(f, "gutter and container are too large to compute column widths")
            }
        }
    }
}

/// Errors produced while computing a grid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(ConfigIssue),
}

/// Immutable snapshot of everything needed to lay out one grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Number of columns (must be >= 1)
    pub columns: u32,
    /// Gutter between adjacent columns, as a percentage of container width
    pub gutter_percent: f64,
    /// Width of the grid container in pixels
    pub container_width_px: f64,
    /// Row height used when no fixed height is selected
    pub container_height_px: f64,
    /// Row height of a selected fixed resolution
    pub fixed_height_px: Option<f64>,
}

impl GridConfig {
    /// Creates a fluid configuration filling a container of the given size
    pub fn fluid(columns: u32, gutter_percent: f64, width: f64, height: f64) -> Self {
        Self {
            columns,
            gutter_percent,
            container_width_px: width,
            container_height_px: height,
            fixed_height_px: None,
        }
    }

    /// Creates a configuration inside a fixed-size container
    pub fn fixed(columns: u32, gutter_percent: f64, width: f64, height: f64) -> Self {
        Self {
            columns,
            gutter_percent,
            container_width_px: width,
            container_height_px: height,
            fixed_height_px: Some(height),
        }
    }

    /// Checks every field, reporting the first broken rule
    pub fn validate(&self) -> Result<(), GridError> {
        let issue = if self.columns == 0 {
            Some(ConfigIssue::ZeroColumns)
        } else if !self.gutter_percent.is_finite() && self.gutter_percent != f64::NEG_INFINITY {
            Some(ConfigIssue::NonNumericGutter(self.gutter_percent.to_string()))
        } else if self.gutter_percent < 0.0 {
            Some(ConfigIssue::NegativeGutter(self.gutter_percent))
        } else if !self.container_width_px.is_finite() || self.container_width_px <= 0.0 {
            Some(ConfigIssue::InvalidContainerWidth(self.container_width_px))
        } else if !self.container_height_px.is_finite() || self.container_height_px < 0.0 {
            Some(ConfigIssue::InvalidContainerHeight(self.container_height_px))
        } else {
            match self.fixed_height_px {
                Some(h) if !h.is_finite() || h <= 0.0 => Some(ConfigIssue::InvalidFixedHeight(h)),
                _ => None,
            }
        };

        match issue {
            Some(issue) => Err(GridError::InvalidConfig(issue)),
            None => Ok(()),
        }
    }
}

/// Widths and height of a computed grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridResult {
    /// Width of one column as a percentage of the container
    ///
    /// Negative when the gutters alone take more than the container.
    pub column_width_percent: f64,
    /// Width of one column in whole pixels
    pub column_width_px: i64,
    /// Width of one gutter in whole pixels
    pub gutter_width_px: i64,
    /// Height given to each column
    pub row_height_px: f64,
}

/// Computes column and gutter widths for a grid
///
/// The container width is split into `columns` tracks after reserving
/// `gutter_percent` for each of the `columns - 1` internal gutters.
///
/// # Errors
/// `GridError::InvalidConfig` when the configuration fails
/// [`GridConfig::validate`], or when a finite gutter or container is so
/// large that a width overflows `f64` or the whole-pixel range.
///
/// # Example
/// ```rust
/// use fluid_grid::domain::grid::{compute, GridConfig};
///
/// let result = compute(&GridConfig::fluid(12, 4.0, 1200.0, 800.0)).unwrap();
/// assert_eq!(result.column_width_px, 56);
/// assert_eq!(result.gutter_width_px, 48);
/// ```
pub fn compute(config: &GridConfig) -> Result<GridResult, GridError> {
    config.validate()?;

    let columns = f64::from(config.columns);
    let gutters = f64::from(config.columns - 1);
    let column_width_percent = (100.0 - config.gutter_percent * gutters) / columns;
    if !column_width_percent.is_finite() {
        return Err(GridError::InvalidConfig(ConfigIssue::NonFiniteResult));
    }

    let column_width_px = to_whole_px(column_width_percent / 100.0 * config.container_width_px)?;
    let gutter_width_px = to_whole_px(config.gutter_percent / 100.0 * config.container_width_px)?;
    let row_height_px = config.fixed_height_px.unwrap_or(config.container_height_px);

    Ok(GridResult {
        column_width_percent,
        column_width_px,
        gutter_width_px,
        row_height_px,
    })
}

/// Rounds a pixel width, refusing values `i64` cannot hold
fn to_whole_px(value: f64) -> Result<i64, GridError> {
    // 2^63 itself is out of range, so the bound is exclusive
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !value.is_finite() || value.abs() >= LIMIT {
        return Err(GridError::InvalidConfig(ConfigIssue::NonFiniteResult));
    }
    Ok(round_half_up(value))
}

/// Rounds to the nearest integer with halves going toward positive infinity
fn round_half_up(value: f64) -> i64 {
    let rounded = value.round();
    if value - rounded == 0.5 {
        (rounded + 1.0) as i64
    } else {
        rounded as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_column_grid() {
        let result = compute(&GridConfig::fluid(12, 4.0, 1200.0, 900.0)).unwrap();

        assert_eq!(result.column_width_percent, (100.0 - 44.0) / 12.0);
        assert_eq!(result.column_width_px, 56);
        assert_eq!(result.gutter_width_px, 48);
        assert_eq!(result.row_height_px, 900.0);
    }

    #[test]
    fn single_column_fills_container() {
        let result = compute(&GridConfig::fluid(1, 7.5, 1333.0, 600.0)).unwrap();

        assert_eq!(result.column_width_percent, 100.0);
        assert_eq!(result.column_width_px, 1333);
        // Gutter is never drawn but is still reported
        assert_eq!(result.gutter_width_px, 100);
    }

    #[test]
    fn zero_columns_rejected() {
        let result = compute(&GridConfig::fluid(0, 4.0, 1200.0, 800.0));
        assert_eq!(result, Err(GridError::InvalidConfig(ConfigIssue::ZeroColumns)));
    }

    #[test]
    fn negative_gutter_rejected() {
        let result = compute(&GridConfig::fluid(4, -1.0, 800.0, 600.0));
        assert!(matches!(
            result,
            Err(GridError::InvalidConfig(ConfigIssue::NegativeGutter(_)))
        ));
    }

    #[test]
    fn non_finite_inputs_rejected() {
        let nan_gutter = compute(&GridConfig::fluid(4, f64::NAN, 800.0, 600.0));
        assert!(matches!(
            nan_gutter,
            Err(GridError::InvalidConfig(ConfigIssue::NonNumericGutter(_)))
        ));

        let zero_width = compute(&GridConfig::fluid(4, 2.0, 0.0, 600.0));
        assert!(matches!(
            zero_width,
            Err(GridError::InvalidConfig(ConfigIssue::InvalidContainerWidth(_)))
        ));

        let mut bad_height = GridConfig::fixed(4, 2.0, 800.0, 600.0);
        bad_height.fixed_height_px = Some(f64::INFINITY);
        assert!(matches!(
            compute(&bad_height),
            Err(GridError::InvalidConfig(ConfigIssue::InvalidFixedHeight(_)))
        ));
    }

    #[test]
    fn infinite_gutter_is_not_a_number() {
        let err = compute(&GridConfig::fluid(4, f64::INFINITY, 800.0, 600.0)).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidConfig(ConfigIssue::NonNumericGutter("inf".to_string()))
        );

        let err = compute(&GridConfig::fluid(4, f64::NEG_INFINITY, 800.0, 600.0)).unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig(ConfigIssue::NegativeGutter(_))));
    }

    #[test]
    fn overflowing_widths_rejected() {
        // 1e308 * 2 gutters overflows to infinity
        let err = compute(&GridConfig::fluid(3, 1e308, 1200.0, 800.0)).unwrap_err();
        assert_eq!(err, GridError::InvalidConfig(ConfigIssue::NonFiniteResult));

        // Percent stays finite but the pixel products do not fit
        let err = compute(&GridConfig::fluid(1, 1e307, 1e300, 800.0)).unwrap_err();
        assert_eq!(err, GridError::InvalidConfig(ConfigIssue::NonFiniteResult));

        // Finite pixels that no i64 can hold
        let err = compute(&GridConfig::fluid(2, 1e20, 1000.0, 800.0)).unwrap_err();
        assert_eq!(err, GridError::InvalidConfig(ConfigIssue::NonFiniteResult));
    }

    #[test]
    fn large_but_representable_widths_pass() {
        let result = compute(&GridConfig::fluid(2, 1e12, 1000.0, 800.0)).unwrap();
        assert_eq!(result.gutter_width_px, 10_000_000_000_000);
        assert!(result.column_width_px < 0);
    }

    #[test]
    fn overconsumed_gutters_are_not_clamped() {
        // 5 gutters of 30% leave -50% for 6 columns
        let result = compute(&GridConfig::fluid(6, 30.0, 600.0, 400.0)).unwrap();

        assert_eq!(result.column_width_percent, -50.0 / 6.0);
        assert_eq!(result.column_width_px, -50);
        assert_eq!(result.gutter_width_px, 180);
    }

    #[test]
    fn fixed_height_overrides_container_height() {
        let result = compute(&GridConfig::fixed(4, 2.0, 768.0, 1024.0)).unwrap();
        assert_eq!(result.row_height_px, 1024.0);

        let mut config = GridConfig::fluid(4, 2.0, 768.0, 500.0);
        config.fixed_height_px = Some(320.0);
        assert_eq!(compute(&config).unwrap().row_height_px, 320.0);
    }

    #[test]
    fn rounding_sends_halves_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(2.4999), 2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn compute_is_idempotent() {
        let config = GridConfig::fluid(7, 3.3, 1111.0, 777.0);
        let first = compute(&config).unwrap();
        let second = compute(&config).unwrap();

        assert_eq!(
            first.column_width_percent.to_bits(),
            second.column_width_percent.to_bits()
        );
        assert_eq!(first, second);
    }

    #[test]
    fn error_message_names_the_rule() {
        let err = compute(&GridConfig::fluid(0, 4.0, 1200.0, 800.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid grid configuration: column count must be at least 1"
        );
    }
}
