//! fluid-grid: grid configurator for fluid column layouts
//!
//! Computes column and gutter widths from a column count and a gutter
//! percentage, and renders the stylesheet, markup and preview that show
//! the resulting grid.

pub mod app;
pub mod config;
pub mod domain;
pub mod ui;
