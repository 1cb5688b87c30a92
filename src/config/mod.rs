//! Configuration module for fluid-grid
//!
//! `form` holds the raw values typed into the configurator and turns them
//! into grid snapshots. `settings` reads the optional TOML file that seeds
//! the form defaults, the initial viewport and extra presets.

pub mod form;
pub mod settings;

pub use form::{FormDefaults, FormValues};
pub use settings::{Settings, SettingsError};
