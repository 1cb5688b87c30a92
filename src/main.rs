// fluid-grid CLI - headless grid configurator

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fluid_grid::app::session::{HELP, run_session, write_current};
use fluid_grid::app::{AppError, Configurator, ConfiguratorEvent, Outcome};
use fluid_grid::config::Settings;
use fluid_grid::domain::core::Viewport;
use fluid_grid::ui::markup::form_markup;
use fluid_grid::ui::{PreviewLayout, PreviewRenderer, RenderedGrid};

#[derive(Parser)]
#[command(name = "fluid-grid")]
#[command(about = "Compute and render fluid column grids")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to <config dir>/fluid-grid/settings.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log recompute cycles to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print column and gutter widths
    Compute(GridArgs),
    /// Print the generated stylesheet
    Css(GridArgs),
    /// Print the generated row markup and the width caption
    Markup(GridArgs),
    /// Print the configurator form markup
    Form(GridArgs),
    /// List the resolution presets
    Presets,
    /// Write a PNG preview of the column row
    Preview {
        #[command(flatten)]
        grid: GridArgs,
        /// Output PNG path
        #[arg(long, short = 'o')]
        output: PathBuf,
        /// Font used to label columns (TrueType or OpenType)
        #[arg(long)]
        font: Option<PathBuf>,
    },
    /// Drive the configurator interactively from stdin
    Session,
}

#[derive(Args, Debug, Clone, Default)]
struct GridArgs {
    /// Number of columns
    #[arg(long, short = 'c')]
    columns: Option<String>,
    /// Gutter width in percent of the container
    #[arg(long, short = 'g')]
    gutter: Option<String>,
    /// Viewport width in pixels
    #[arg(long)]
    width: Option<f64>,
    /// Viewport height in pixels
    #[arg(long)]
    height: Option<f64>,
    /// Browser window width including scrollbars
    #[arg(long)]
    browser_width: Option<f64>,
    /// Fixed resolution: fluid, WxH or "W, H"
    #[arg(long, short = 'r')]
    resolution: Option<String>,
}

impl GridArgs {
    /// Applies the arguments as form edits and submits them
    fn apply(&self, configurator: &mut Configurator) -> Result<(), AppError> {
        if self.width.is_some() || self.height.is_some() || self.browser_width.is_some() {
            let current = configurator.viewport();
            let width = self.width.unwrap_or(current.client_width);
            let height = self.height.unwrap_or(current.client_height);
            let browser = self.browser_width.unwrap_or(width);
            configurator.handle_event(ConfiguratorEvent::Resize(Viewport::with_browser_width(
                width, height, browser,
            )));
        }
        if let Some(columns) = &self.columns {
            configurator.handle_event(ConfiguratorEvent::SetColumns(columns.clone()));
        }
        if let Some(gutter) = &self.gutter {
            configurator.handle_event(ConfiguratorEvent::SetGutter(gutter.clone()));
        }
        if let Some(resolution) = &self.resolution {
            configurator.handle_event(ConfiguratorEvent::SelectResolution(resolution.clone()));
        }

        match configurator.handle_event(ConfiguratorEvent::Submit) {
            Outcome::Rejected(err) => Err(err.into()),
            _ => Ok(()),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn configured_grid(settings: &Settings, args: &GridArgs) -> Result<(Configurator, RenderedGrid), AppError> {
    let mut configurator = Configurator::from_settings(settings);
    args.apply(&mut configurator)?;
    let rendered = configurator
        .rendered()
        .cloned()
        .ok_or(AppError::NothingRendered)?;
    Ok((configurator, rendered))
}

fn cmd_compute(settings: &Settings, args: &GridArgs) -> Result<(), AppError> {
    let (_, rendered) = configured_grid(settings, args)?;
    let mut out = io::stdout().lock();
    writeln!(out, "columns: {}", rendered.config.columns)?;
    writeln!(out, "gutter_percent: {}", rendered.config.gutter_percent)?;
    writeln!(out, "container_width_px: {}", rendered.config.container_width_px)?;
    writeln!(out, "column_width_percent: {}", rendered.result.column_width_percent)?;
    writeln!(out, "column_width_px: {}", rendered.result.column_width_px)?;
    writeln!(out, "gutter_width_px: {}", rendered.result.gutter_width_px)?;
    writeln!(out, "row_height_px: {}", rendered.result.row_height_px)?;
    Ok(())
}

fn cmd_css(settings: &Settings, args: &GridArgs) -> Result<(), AppError> {
    let (_, rendered) = configured_grid(settings, args)?;
    write!(io::stdout().lock(), "{}", rendered.stylesheet)?;
    Ok(())
}

fn cmd_markup(settings: &Settings, args: &GridArgs) -> Result<(), AppError> {
    let (_, rendered) = configured_grid(settings, args)?;
    let mut out = io::stdout().lock();
    writeln!(out, "<span id=\"docWidth\">{}</span>", rendered.report.to_html())?;
    writeln!(out, "{}", rendered.row_html())?;
    Ok(())
}

fn cmd_form(settings: &Settings, args: &GridArgs) -> Result<(), AppError> {
    let (configurator, _) = configured_grid(settings, args)?;
    writeln!(
        io::stdout().lock(),
        "{}",
        form_markup(configurator.form(), configurator.presets())
    )?;
    Ok(())
}

fn cmd_presets(settings: &Settings) -> Result<(), AppError> {
    let mut out = io::stdout().lock();
    for preset in settings.presets() {
        writeln!(out, "{:<10} {}", preset.resolution.to_string(), preset.label)?;
    }
    Ok(())
}

fn cmd_preview(
    settings: &Settings,
    args: &GridArgs,
    output: &Path,
    font: Option<&Path>,
) -> Result<(), AppError> {
    let (_, rendered) = configured_grid(settings, args)?;
    let layout = PreviewLayout::from_grid(&rendered.config, &rendered.result)?;
    let renderer = match font {
        Some(path) => PreviewRenderer::with_font_file(path)?,
        None => PreviewRenderer::new(),
    };
    renderer.write_png(&layout, output)?;
    Ok(())
}

fn cmd_session(settings: &Settings) -> Result<(), AppError> {
    let mut configurator = Configurator::from_settings(settings);
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;
    write_current(&configurator, &mut out)?;
    run_session(&mut configurator, io::stdin().lock(), &mut out)
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = Settings::load_or_default(cli.config.as_deref())?;

    match &cli.command {
        Commands::Compute(args) => cmd_compute(&settings, args),
        Commands::Css(args) => cmd_css(&settings, args),
        Commands::Markup(args) => cmd_markup(&settings, args),
        Commands::Form(args) => cmd_form(&settings, args),
        Commands::Presets => cmd_presets(&settings),
        Commands::Preview { grid, output, font } => {
            cmd_preview(&settings, grid, output, font.as_deref())
        }
        Commands::Session => cmd_session(&settings),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
