//! Configurator controller
//!
//! The controller owns the form values, the live viewport, the panel state
//! and the last rendered grid. Every relevant event runs one complete
//! recompute-and-render cycle; a configuration that fails validation never
//! replaces what is already on screen.

use thiserror::Error;

use crate::app::state::{PanelEvent, PanelState, StateMachine};
use crate::config::form::{FormDefaults, FormValues};
use crate::config::settings::{Settings, SettingsError};
use crate::domain::core::Viewport;
use crate::domain::grid::{GridError, compute};
use crate::domain::resolution::{ResolutionPreset, builtin_presets};
use crate::ui::markup::form_markup;
use crate::ui::page::RenderedGrid;
use crate::ui::renderer::RendererError;

/// Application errors surfaced by the controller and the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error("No grid has been rendered")]
    NothingRendered,
    #[error("Unknown session command {0:?}")]
    UnknownCommand(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// User and window events the configurator reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum ConfiguratorEvent {
    /// Toggle control clicked
    Toggle,
    /// Columns input edited
    SetColumns(String),
    /// Gutter input edited
    SetGutter(String),
    /// Resolution select changed, carrying the option value
    SelectResolution(String),
    /// Form submitted
    Submit,
    /// Form reset to defaults
    Reset,
    /// Window resized
    Resize(Viewport),
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new grid was rendered
    Rendered,
    /// The form held an invalid configuration; the previous grid stays
    Rejected(GridError),
    /// The event did not require a recompute
    Unchanged,
}

/// Headless grid configurator
#[derive(Debug, Clone)]
pub struct Configurator {
    defaults: FormDefaults,
    presets: Vec<ResolutionPreset>,
    form: FormValues,
    viewport: Viewport,
    panel: PanelState,
    rendered: Option<RenderedGrid>,
    last_error: Option<GridError>,
}

impl Configurator {
    /// Creates a configurator and renders the default grid once
    ///
    /// # Arguments
    /// * `defaults` - Values the form starts with and returns to on reset
    /// * `viewport` - Initial viewport size
    /// * `presets` - Entries of the resolution select box
    ///
    /// # Returns
    /// A configurator with the panel hidden. If the defaults do not fit the
    /// viewport, nothing is rendered and [`Configurator::error_message`]
    /// says why.
    pub fn new(defaults: FormDefaults, viewport: Viewport, presets: Vec<ResolutionPreset>) -> Self {
        let mut configurator = Self {
            form: FormValues::new(&defaults),
            defaults,
            presets,
            viewport,
            panel: PanelState::default(),
            rendered: None,
            last_error: None,
        };
        configurator.recompute();
        configurator
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.form_defaults(),
            settings.initial_viewport(),
            settings.presets(),
        )
    }

    /// Applies one event, recomputing when the event calls for it
    pub fn handle_event(&mut self, event: ConfiguratorEvent) -> Outcome {
        tracing::debug!(?event, "configurator event");
        match event {
            ConfiguratorEvent::Toggle => {
                self.panel = StateMachine::process_event(self.panel, PanelEvent::Toggle);
                if self.panel.is_visible() {
                    self.recompute()
                } else {
                    // Closing the panel discards whatever was typed
                    self.form.reset(&self.defaults);
                    Outcome::Unchanged
                }
            }
            ConfiguratorEvent::SetColumns(text) => {
                self.form.columns = text;
                Outcome::Unchanged
            }
            ConfiguratorEvent::SetGutter(text) => {
                self.form.gutter = text;
                Outcome::Unchanged
            }
            ConfiguratorEvent::SelectResolution(value) => {
                self.form.resolution = value;
                self.recompute()
            }
            ConfiguratorEvent::Submit => self.recompute(),
            ConfiguratorEvent::Reset => {
                self.form.reset(&self.defaults);
                self.recompute()
            }
            ConfiguratorEvent::Resize(viewport) => {
                self.viewport = viewport;
                self.recompute()
            }
        }
    }

    /// Runs one recompute-and-render cycle from the current form snapshot
    fn recompute(&mut self) -> Outcome {
        let attempt = self.form.to_config(&self.viewport).and_then(|config| {
            let resolution = self.form.selected_resolution()?;
            let result = compute(&config)?;
            Ok((config, resolution, result))
        });

        match attempt {
            Ok((config, resolution, result)) => {
                tracing::debug!(
                    columns = config.columns,
                    gutter = config.gutter_percent,
                    container = config.container_width_px,
                    column_percent = result.column_width_percent,
                    column_px = result.column_width_px,
                    gutter_px = result.gutter_width_px,
                    "grid recomputed"
                );
                self.rendered = Some(RenderedGrid::build(config, result, resolution, &self.viewport));
                self.last_error = None;
                Outcome::Rendered
            }
            Err(err) => {
                tracing::warn!(error = %err, "keeping previous grid");
                self.last_error = Some(err.clone());
                Outcome::Rejected(err)
            }
        }
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn panel(&self) -> PanelState {
        self.panel
    }

    pub fn presets(&self) -> &[ResolutionPreset] {
        &self.presets
    }

    /// Last successfully rendered grid
    pub fn rendered(&self) -> Option<&RenderedGrid> {
        self.rendered.as_ref()
    }

    /// Message to show the user, if the last cycle was rejected
    pub fn error_message(&self) -> Option<String> {
        self.last_error.as_ref().map(|err| err.to_string())
    }

    /// Current form markup, reflecting typed values and selection
    pub fn form_html(&self) -> String {
        form_markup(&self.form, &self.presets)
    }
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new(FormDefaults::default(), Viewport::default(), builtin_presets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::ConfigIssue;
    use crate::domain::resolution::Resolution;

    fn configurator(width: f64, height: f64) -> Configurator {
        Configurator::new(
            FormDefaults::default(),
            Viewport::new(width, height),
            builtin_presets(),
        )
    }

    #[test]
    fn initial_render_uses_defaults() {
        let configurator = configurator(1200.0, 800.0);
        let rendered = configurator.rendered().unwrap();

        assert_eq!(rendered.config.columns, 12);
        assert_eq!(rendered.result.column_width_px, 56);
        assert_eq!(rendered.result.gutter_width_px, 48);
        assert_eq!(configurator.panel(), PanelState::Hidden);
        assert!(configurator.error_message().is_none());
    }

    #[test]
    fn editing_inputs_does_not_recompute() {
        let mut configurator = configurator(1200.0, 800.0);

        let outcome = configurator.handle_event(ConfiguratorEvent::SetColumns("6".into()));
        assert_eq!(outcome, Outcome::Unchanged);
        assert_eq!(configurator.rendered().unwrap().config.columns, 12);

        let outcome = configurator.handle_event(ConfiguratorEvent::Submit);
        assert_eq!(outcome, Outcome::Rendered);
        assert_eq!(configurator.rendered().unwrap().config.columns, 6);
    }

    #[test]
    fn invalid_submit_keeps_previous_grid() {
        let mut configurator = configurator(1200.0, 800.0);
        let before = configurator.rendered().cloned();

        configurator.handle_event(ConfiguratorEvent::SetColumns(String::new()));
        let outcome = configurator.handle_event(ConfiguratorEvent::Submit);

        assert!(matches!(
            outcome,
            Outcome::Rejected(GridError::InvalidConfig(ConfigIssue::NonNumericColumns(_)))
        ));
        assert_eq!(configurator.rendered().cloned(), before);
        assert!(configurator.error_message().unwrap().contains("not a number"));

        // A valid submit clears the message
        configurator.handle_event(ConfiguratorEvent::SetColumns("3".into()));
        assert_eq!(configurator.handle_event(ConfiguratorEvent::Submit), Outcome::Rendered);
        assert!(configurator.error_message().is_none());
    }

    #[test]
    fn overflowing_gutter_keeps_previous_grid() {
        let mut configurator = configurator(1200.0, 800.0);
        let before = configurator.rendered().cloned();

        configurator.handle_event(ConfiguratorEvent::SetGutter("1e308".into()));
        let outcome = configurator.handle_event(ConfiguratorEvent::Submit);

        assert_eq!(
            outcome,
            Outcome::Rejected(GridError::InvalidConfig(ConfigIssue::NonFiniteResult))
        );
        assert_eq!(configurator.rendered().cloned(), before);
        assert!(!configurator.rendered().unwrap().stylesheet.contains("inf"));
    }

    #[test]
    fn column_count_over_limit_keeps_previous_grid() {
        let mut configurator = configurator(1200.0, 800.0);
        let before = configurator.rendered().cloned();

        configurator.handle_event(ConfiguratorEvent::SetColumns("4000000000".into()));
        let outcome = configurator.handle_event(ConfiguratorEvent::Submit);

        assert_eq!(
            outcome,
            Outcome::Rejected(GridError::InvalidConfig(ConfigIssue::TooManyColumns(4_000_000_000)))
        );
        assert_eq!(configurator.rendered().cloned(), before);
    }

    #[test]
    fn resolution_change_pins_container() {
        let mut configurator = configurator(1200.0, 800.0);

        let outcome = configurator.handle_event(ConfiguratorEvent::SelectResolution("320, 480".into()));
        assert_eq!(outcome, Outcome::Rendered);

        let rendered = configurator.rendered().unwrap();
        assert_eq!(rendered.resolution, Resolution::Fixed { width: 320, height: 480 });
        assert_eq!(rendered.config.container_width_px, 320.0);
        assert_eq!(rendered.result.row_height_px, 480.0);
        assert_eq!(rendered.container.width, "320px");
        assert_eq!(rendered.report.viewport_width, Some(320));
    }

    #[test]
    fn resize_recomputes_fluid_grid() {
        let mut configurator = configurator(1200.0, 800.0);

        let outcome = configurator.handle_event(ConfiguratorEvent::Resize(Viewport::with_browser_width(
            600.0, 400.0, 617.0,
        )));
        assert_eq!(outcome, Outcome::Rendered);

        let rendered = configurator.rendered().unwrap();
        assert_eq!(rendered.result.gutter_width_px, 24);
        assert_eq!(rendered.result.row_height_px, 400.0);
        assert_eq!(rendered.report.browser_width, 617.0);
    }

    #[test]
    fn reset_restores_defaults_and_recomputes() {
        let mut configurator = configurator(1200.0, 800.0);
        configurator.handle_event(ConfiguratorEvent::SetColumns("5".into()));
        configurator.handle_event(ConfiguratorEvent::SetGutter("1".into()));
        configurator.handle_event(ConfiguratorEvent::SelectResolution("640, 480".into()));

        let outcome = configurator.handle_event(ConfiguratorEvent::Reset);
        assert_eq!(outcome, Outcome::Rendered);
        assert_eq!(configurator.form(), &FormValues::new(&FormDefaults::default()));
        assert_eq!(configurator.rendered().unwrap().resolution, Resolution::Fluid);
        assert_eq!(configurator.rendered().unwrap().config.columns, 12);
    }

    #[test]
    fn closing_panel_discards_typed_values() {
        let mut configurator = configurator(1200.0, 800.0);

        assert_eq!(configurator.handle_event(ConfiguratorEvent::Toggle), Outcome::Rendered);
        assert_eq!(configurator.panel(), PanelState::Visible);

        configurator.handle_event(ConfiguratorEvent::SetColumns("9".into()));
        assert_eq!(configurator.handle_event(ConfiguratorEvent::Toggle), Outcome::Unchanged);
        assert_eq!(configurator.panel(), PanelState::Hidden);
        assert_eq!(configurator.form().columns, "12");
    }

    #[test]
    fn unusable_viewport_leaves_nothing_rendered() {
        let configurator = configurator(0.0, 800.0);
        assert!(configurator.rendered().is_none());
        assert!(configurator.error_message().is_some());
    }

    #[test]
    fn form_html_reflects_state() {
        let mut configurator = configurator(1200.0, 800.0);
        configurator.handle_event(ConfiguratorEvent::SetGutter("2.5".into()));
        let html = configurator.form_html();
        assert!(html.contains("id=\"gutterwidth\" value=\"2.5\""));
    }
}
