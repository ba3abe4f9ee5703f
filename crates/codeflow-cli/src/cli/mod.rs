//! CLI entry and dispatch.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use codeflow_core::config::{self, Config, Speed};
use codeflow_core::themes::ThemeRegistry;
use codeflow_core::{interrupt, logging};

use self::commands::show::{Presentation, ShowOptions};

mod commands;

#[derive(Parser)]
#[command(name = "codeflow")]
#[command(version)]
#[command(about = "Reveal source files in the terminal with syntax highlighting")]
#[command(after_help = "Example:\n  codeflow -t base16-ocean.dark -d main.rs")]
struct Cli {
    /// Highlighting theme (default from config, then base16-ocean.dark)
    #[arg(short, long, value_name = "NAME")]
    theme: Option<String>,

    /// List available themes and exit
    #[arg(long = "list-themes")]
    list_themes: bool,

    /// Reveal one character per keystroke
    #[arg(short, long, conflicts_with = "display")]
    interactive: bool,

    /// Reveal automatically at the typing speed
    #[arg(short, long)]
    display: bool,

    /// Typing speed in characters per second (1-1000, default 20)
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    speed: Option<i64>,

    /// Files to show, in order
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = parse_args();

    let _log_guard = logging::init().context("init logging")?;
    interrupt::init().context("install signal handler")?;

    dispatch(cli)
}

/// Parses arguments; usage errors exit 1, help and version exit 0.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let registry =
        ThemeRegistry::load(Some(&config::paths::themes_dir())).context("load themes")?;

    if cli.list_themes {
        return commands::themes::list(&registry, &mut io::stdout().lock());
    }

    let speed = Speed::new(cli.speed.unwrap_or(config.speed))?;
    tracing::debug!(speed = speed.get(), "speed resolved");

    if cli.files.is_empty() {
        bail!("No file provided\n\n{}", Cli::command().render_usage());
    }

    let theme_name = cli.theme.as_deref().unwrap_or(&config.theme);
    let theme = registry.get(theme_name)?;

    if let Some(missing) = cli.files.iter().find(|path| !path.is_file()) {
        bail!("File not found: {}", missing.display());
    }

    let presentation = Presentation::resolve(cli.interactive, cli.display, config.mode);
    tracing::info!(
        files = cli.files.len(),
        theme = theme_name,
        ?presentation,
        "starting"
    );

    commands::show::run(&ShowOptions {
        files: &cli.files,
        theme: &theme,
        presentation,
        speed,
    })
}
