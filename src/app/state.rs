//! Panel state management
//!
//! Defines the visibility state machine of the configurator panel. While
//! the panel is hidden the static demonstration rows are shown; while it
//! is open they are replaced by the dynamically generated row.

/// Configurator panel state - either hidden or open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Panel is closed, static rows are visible
    #[default]
    Hidden,
    /// Panel is open, the generated row is visible
    Visible,
}

impl PanelState {
    /// Text shown on the toggle control
    pub fn toggle_label(&self) -> &'static str {
        match self {
            PanelState::Hidden => "+",
            PanelState::Visible => "-",
        }
    }

    /// Title attribute of the toggle control
    pub fn toggle_title(&self) -> &'static str {
        match self {
            PanelState::Hidden => "Open grid configurator",
            PanelState::Visible => "Close grid configurator",
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, PanelState::Visible)
    }

    /// Which rows are displayed in this state
    pub fn rows(&self) -> RowVisibility {
        match self {
            PanelState::Hidden => RowVisibility {
                static_rows: true,
                dynamic_row: false,
            },
            PanelState::Visible => RowVisibility {
                static_rows: false,
                dynamic_row: true,
            },
        }
    }
}

/// Display state of the page rows
///
/// The first static row always stays visible; `static_rows` covers the
/// rows after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowVisibility {
    pub static_rows: bool,
    pub dynamic_row: bool,
}

/// Events that can change the panel state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// Toggle control was clicked
    Toggle,
    /// Any other configurator activity
    Other,
}

/// State machine for panel transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes an event and returns the new panel state
    pub fn process_event(current: PanelState, event: PanelEvent) -> PanelState {
        match (current, event) {
            (PanelState::Hidden, PanelEvent::Toggle) => {
                tracing::info!("panel: Hidden -> Visible");
                PanelState::Visible
            }
            (PanelState::Visible, PanelEvent::Toggle) => {
                tracing::info!("panel: Visible -> Hidden");
                PanelState::Hidden
            }
            (state, PanelEvent::Other) => state,
        }
    }
}
