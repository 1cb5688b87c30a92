//! Application orchestration layer
//!
//! This module coordinates the form, the panel and the renderer. It owns
//! the configurator state and turns events into render cycles.

pub mod controller;
pub mod session;
pub mod state;

pub use controller::{AppError, Configurator, ConfiguratorEvent, Outcome};
