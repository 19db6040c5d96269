use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use gridpath_cli::commands::interactive::handle_interactive;
use gridpath_cli::commands::run::{handle_run, RunCommandArgs};
use gridpath_cli::commands::show::handle_show;
use gridpath_cli::logging::{init_logging, LoggingConfig};
use gridpath_cli::output::OutputFormat;
use gridpath_cli::terminal::ColorPalette;
use gridpath_lib::{GridConfig, Layout, Session};

#[derive(Parser, Debug)]
#[command(author, version, about = "Step through a best-first grid search")]
struct Cli {
    /// Grid side length (the grid is N x N). Ignored when a layout is given.
    #[arg(long, global = true)]
    side_length: Option<usize>,

    /// Minimum milliseconds between two edits of the same cell.
    #[arg(long, global = true)]
    cooldown_ms: Option<u64>,

    /// JSON file with grid configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Text layout to load (`.` open, `#` wall, `S` start, `F` finish).
    #[arg(long, global = true)]
    layout: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable ANSI colours.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Step the search until it reaches the finish, runs out of cells, or hits the limit.
    Run {
        /// Maximum number of steps to take.
        #[arg(long, default_value_t = 10_000)]
        max_steps: usize,
        /// Only print the final grid.
        #[arg(long)]
        quiet: bool,
    },
    /// Read commands from stdin and step on demand.
    Interactive,
    /// Print the grid and exit.
    Show,
}

fn main() -> Result<()> {
    init_logging(&LoggingConfig::from_env());
    let cli = Cli::parse();

    let config = resolve_config(&cli)?;
    let mut session = build_session(cli.layout.as_deref(), config)?;
    debug!(side_length = session.grid().side_length(), "session ready");

    let palette = if cli.no_color {
        ColorPalette::plain()
    } else {
        ColorPalette::detect()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = match cli.command {
        Command::Run { max_steps, quiet } => handle_run(
            &mut session,
            &RunCommandArgs { max_steps, quiet },
            cli.format,
            &palette,
            &mut out,
        ),
        Command::Interactive => handle_interactive(
            &mut session,
            io::stdin().lock(),
            &mut out,
            cli.format,
            &palette,
        ),
        Command::Show => handle_show(&session, cli.format, &palette, &mut out),
    };

    out.flush()?;
    result
}

/// Config file (environment and defaults when absent), then flag overrides.
fn resolve_config(cli: &Cli) -> Result<GridConfig> {
    let mut config = match cli.config.as_deref() {
        Some(path) => GridConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => GridConfig::from_env(),
    };

    if let Some(side_length) = cli.side_length {
        config = config.with_side_length(side_length);
    }
    if let Some(cooldown_ms) = cli.cooldown_ms {
        config = config.with_cooldown_ms(cooldown_ms);
    }

    config.validate().context("invalid grid configuration")?;
    Ok(config)
}

fn build_session(layout: Option<&Path>, config: GridConfig) -> Result<Session> {
    match layout {
        Some(path) => {
            let layout = Layout::from_path(path)?;
            Session::from_layout(&layout, config)
                .with_context(|| format!("failed to build grid from {}", path.display()))
        }
        None => Session::new(config).context("failed to build grid"),
    }
}
