//! Domain logic and core data structures
//!
//! This module contains the pure grid arithmetic and the resolution
//! presets. Nothing in here knows about forms, panels or output formats.

pub mod core;
pub mod grid;
pub mod resolution;
