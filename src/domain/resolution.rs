//! Resolution presets
//!
//! A resolution either lets the grid fill the live viewport (fluid) or
//! pins the container to a fixed device size. The preset list mirrors the
//! devices the configurator has always offered.

use thiserror::Error;

use crate::domain::core::Viewport;

/// Errors raised while reading a resolution selection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("Unrecognised resolution {0:?}; expected \"W, H\", \"WxH\" or \"fluid\"")]
    Unrecognized(String),
    #[error("Resolution {width}x{height} has a zero dimension")]
    ZeroDimension { width: u32, height: u32 },
}

/// Container sizing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Container fills the viewport
    #[default]
    Fluid,
    /// Container is pinned to a device size
    Fixed { width: u32, height: u32 },
}

impl Resolution {
    /// Parses a selection value
    ///
    /// Accepts the form encoding (`""` for fluid, `"768, 1024"` for a fixed
    /// size) as well as `fluid` and `768x1024`.
    pub fn parse(value: &str) -> Result<Self, ResolutionError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("fluid") {
            return Ok(Resolution::Fluid);
        }

        let (w, h) = trimmed
            .split_once(',')
            .or_else(|| trimmed.split_once(['x', 'X']))
            .ok_or_else(|| ResolutionError::Unrecognized(value.to_string()))?;

        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| ResolutionError::Unrecognized(value.to_string()))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| ResolutionError::Unrecognized(value.to_string()))?;

        if width == 0 || height == 0 {
            return Err(ResolutionError::ZeroDimension { width, height });
        }

        Ok(Resolution::Fixed { width, height })
    }

    /// Value used for this resolution in the form's select box
    pub fn option_value(&self) -> String {
        match self {
            Resolution::Fluid => String::new(),
            Resolution::Fixed { width, height } => format!("{width}, {height}"),
        }
    }

    /// Container size for this resolution
    ///
    /// # Arguments
    /// * `viewport` - Live viewport; only consulted for the fluid option
    ///
    /// # Returns
    /// `(container width, fixed row height)`. The height is `None` for the
    /// fluid option so rows follow the viewport height.
    pub fn container(&self, viewport: &Viewport) -> (f64, Option<f64>) {
        match self {
            Resolution::Fluid => (viewport.client_width, None),
            Resolution::Fixed { width, height } => (f64::from(*width), Some(f64::from(*height))),
        }
    }

    /// Selected virtual width, if the container is pinned
    pub fn fixed_width(&self) -> Option<u32> {
        match self {
            Resolution::Fluid => None,
            Resolution::Fixed { width, .. } => Some(*width),
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Fluid => write!(f, "fluid"),
            Resolution::Fixed { width, height } => write!(f, "{width}x{height}"),
        }
    }
}

/// A named entry in the resolution select box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionPreset {
    pub resolution: Resolution,
    pub label: String,
}

impl ResolutionPreset {
    pub fn new(resolution: Resolution, label: impl Into<String>) -> Self {
        Self {
            resolution,
            label: label.into(),
        }
    }
}

/// Built-in device sizes as (width, height, description)
const BUILTIN_PRESETS: &[(u32, u32, &str)] = &[
    (240, 320, ""),
    (320, 240, ""),
    (320, 480, "iPhone portrait"),
    (480, 320, "iPhone landscape, BlackBerry Bold"),
    (544, 372, "NTSC TV safe"),
    (640, 480, "VGA"),
    (600, 1024, "Kindle portrait"),
    (768, 1024, "iPad portrait"),
    (800, 600, "SVGA"),
    (1024, 600, "Kindle landscape"),
    (1024, 768, "XGA, iPad landscape"),
    (1280, 720, "HD 720p"),
    (1280, 1024, "SXGA"),
    (1600, 1200, "UXGA"),
    (1920, 1080, "HD 1080p"),
];

/// Label of the fluid option
pub const FLUID_LABEL: &str = "-- Fluid --";

/// Formats a preset label the way the select box shows it
pub fn preset_label(width: u32, height: u32, description: &str) -> String {
    if description.is_empty() {
        format!("{width}x{height}")
    } else {
        format!("{width}x{height} ({description})")
    }
}

/// The full select box contents: fluid first, then every device size
pub fn builtin_presets() -> Vec<ResolutionPreset> {
    let mut presets = Vec::with_capacity(BUILTIN_PRESETS.len() + 1);
    presets.push(ResolutionPreset::new(Resolution::Fluid, FLUID_LABEL));
    for &(width, height, description) in BUILTIN_PRESETS {
        presets.push(ResolutionPreset::new(
            Resolution::Fixed { width, height },
            preset_label(width, height, description),
        ));
    }
    presets
}
