//! Core domain types
//!
//! Measurements of the surface the grid is laid out in. Everything here is
//! in CSS pixels and carries no knowledge of how it was measured.

/// Live viewport measurements
///
/// `client_width`/`client_height` exclude scrollbars, `browser_width`
/// includes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub client_width: f64,
    pub client_height: f64,
    pub browser_width: f64,
}

impl Viewport {
    /// Creates a viewport without scrollbars
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            client_width: width,
            client_height: height,
            browser_width: width,
        }
    }

    /// Creates a viewport whose browser window is wider than its client area
    pub fn with_browser_width(width: f64, height: f64, browser_width: f64) -> Self {
        Self {
            client_width: width,
            client_height: height,
            browser_width,
        }
    }

    /// Width taken by vertical scrollbars, if any
    pub fn scrollbar_width(&self) -> f64 {
        (self.browser_width - self.client_width).max(0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}
