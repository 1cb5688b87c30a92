//! Interactive session driver
//!
//! Reads configurator commands line by line and reports the outcome of
//! each one. This is the text-mode stand-in for clicking and typing in
//! the configurator panel.

use std::io::{BufRead, Write};

use crate::app::controller::{AppError, ConfiguratorEvent, Configurator, Outcome};
use crate::domain::core::Viewport;

/// A parsed session line
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Event(ConfiguratorEvent),
    /// Print the current stylesheet, row and caption
    Show,
    /// Print the form markup
    Form,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  toggle                 open or close the configurator panel
  columns N              type N into the columns input
  gutter G               type G into the gutter input
  resolution R           select a resolution (fluid, WxH or \"W, H\")
  submit                 apply the typed values
  reset                  restore defaults
  resize W H [BROWSER_W] change the viewport size
  show                   print the current stylesheet and markup
  form                   print the form markup
  help                   print this message
  quit                   end the session";

impl SessionCommand {
    /// Parses one input line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Result<Option<Self>, AppError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "toggle" => SessionCommand::Event(ConfiguratorEvent::Toggle),
            "columns" => SessionCommand::Event(ConfiguratorEvent::SetColumns(rest.to_string())),
            "gutter" => SessionCommand::Event(ConfiguratorEvent::SetGutter(rest.to_string())),
            "resolution" => {
                SessionCommand::Event(ConfiguratorEvent::SelectResolution(rest.to_string()))
            }
            "submit" => SessionCommand::Event(ConfiguratorEvent::Submit),
            "reset" => SessionCommand::Event(ConfiguratorEvent::Reset),
            "resize" => SessionCommand::Event(ConfiguratorEvent::Resize(parse_viewport(line, rest)?)),
            "show" => SessionCommand::Show,
            "form" => SessionCommand::Form,
            "help" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            _ => return Err(AppError::UnknownCommand(line.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_viewport(line: &str, args: &str) -> Result<Viewport, AppError> {
    let numbers: Vec<f64> = args
        .split_whitespace()
        .map(|n| n.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| AppError::UnknownCommand(line.to_string()))?;

    match numbers.as_slice() {
        [width, height] => Ok(Viewport::new(*width, *height)),
        [width, height, browser] => Ok(Viewport::with_browser_width(*width, *height, *browser)),
        _ => Err(AppError::UnknownCommand(line.to_string())),
    }
}

/// Writes the current rendered grid, or the reason nothing is shown
pub fn write_current<W: Write>(configurator: &Configurator, output: &mut W) -> Result<(), AppError> {
    writeln!(
        output,
        "panel: {} ({})",
        if configurator.panel().is_visible() { "open" } else { "closed" },
        configurator.panel().toggle_label()
    )?;
    match configurator.rendered() {
        Some(rendered) => {
            writeln!(output, "{}", rendered.report)?;
            write!(output, "{}", rendered.stylesheet)?;
            writeln!(output, "{}", rendered.row_html())?;
        }
        None => writeln!(output, "no grid rendered")?,
    }
    if let Some(message) = configurator.error_message() {
        writeln!(output, "error: {message}")?;
    }
    Ok(())
}

/// Runs commands from `input` until it ends or `quit` is read
///
/// Unknown commands are reported on `output` and the session continues.
pub fn run_session<R: BufRead, W: Write>(
    configurator: &mut Configurator,
    input: R,
    output: &mut W,
) -> Result<(), AppError> {
    for line in input.lines() {
        let line = line?;
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(output, "error: {err}")?;
                continue;
            }
        };

        match command {
            SessionCommand::Event(event) => match configurator.handle_event(event) {
                Outcome::Rendered => {
                    if let Some(rendered) = configurator.rendered() {
                        writeln!(
                            output,
                            "rendered: {} columns, {}% ({}px) wide, {}px gutters",
                            rendered.config.columns,
                            rendered.result.column_width_percent,
                            rendered.result.column_width_px,
                            rendered.result.gutter_width_px
                        )?;
                    }
                }
                Outcome::Rejected(err) => writeln!(output, "error: {err}")?,
                Outcome::Unchanged => writeln!(output, "ok")?,
            },
            SessionCommand::Show => write_current(configurator, output)?,
            SessionCommand::Form => writeln!(output, "{}", configurator.form_html())?,
            SessionCommand::Help => writeln!(output, "{HELP}")?,
            SessionCommand::Quit => break,
        }
    }
    Ok(())
}
