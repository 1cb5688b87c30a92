//! Markup for the configurator form, the generated columns and the
//! width caption.

use std::fmt;

use crate::config::form::FormValues;
use crate::domain::core::Viewport;
use crate::domain::grid::GridResult;
use crate::domain::resolution::{Resolution, ResolutionPreset};

/// One labelled column element per column
pub fn column_markup(columns: u32, result: &GridResult) -> String {
    let label = column_label(result);
    let mut html = String::new();
    for _ in 0..columns {
        html.push_str("<div class=\"col one\">");
        html.push_str(&label);
        html.push_str("</div>");
    }
    html
}

/// Text shown inside each generated column
pub fn column_label(result: &GridResult) -> String {
    format!("{}px - {}px", result.column_width_px, result.gutter_width_px)
}

/// The configurator form with the current values filled in
pub fn form_markup(values: &FormValues, presets: &[ResolutionPreset]) -> String {
    let selected = Resolution::parse(&values.resolution).ok();
    let mut html = String::new();

    html.push_str("<p>");
    html.push_str("<span id=\"docWidth\"></span>");
    html.push_str("<label for=\"colnum\">Columns</label>");
    html.push_str(&format!(
        "<input type=\"text\" name=\"colnum\" id=\"colnum\" value=\"{}\">",
        escape(&values.columns)
    ));
    html.push_str("</p>");
    html.push_str("<p>");
    html.push_str("<label for=\"gutterwidth\">Gutter (%)</label>");
    html.push_str(&format!(
        "<input type=\"text\" name=\"gutterwidth\" id=\"gutterwidth\" value=\"{}\">",
        escape(&values.gutter)
    ));
    html.push_str("</p>");
    html.push_str("<label for=\"resolution\">Resolution</label>");
    html.push_str("<select name=\"resolution\" id=\"resolution\">");
    for preset in presets {
        let marker = if Some(preset.resolution) == selected {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>",
            escape(&preset.resolution.option_value()),
            marker,
            escape(&preset.label)
        ));
    }
    html.push_str("</select>");
    html.push_str("<input type=\"reset\" value=\"Reset\">");
    html.push_str("<input type=\"submit\" value=\"Update\">");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Widths shown in the caption above the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionReport {
    /// Viewport width without scrollbars
    pub window_width: f64,
    /// Browser window width including scrollbars
    pub browser_width: f64,
    /// Width of the selected fixed resolution
    pub viewport_width: Option<u32>,
}

impl DimensionReport {
    pub fn new(viewport: &Viewport, resolution: &Resolution) -> Self {
        Self {
            window_width: viewport.client_width,
            browser_width: viewport.browser_width,
            viewport_width: resolution.fixed_width(),
        }
    }

    fn lines(&self) -> [String; 3] {
        // The selected width is shown bare, as it appears in the option value
        let virtual_width = match self.viewport_width {
            Some(width) => width.to_string(),
            None => "fluid".to_string(),
        };
        [
            format!("{}px Window width", self.window_width),
            format!("{}px Browser width", self.browser_width),
            format!("{virtual_width} Viewport width"),
        ]
    }

    pub fn to_html(&self) -> String {
        self.lines().join(" <br />")
    }
}

impl fmt::Display for DimensionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}
