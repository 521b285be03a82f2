use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use fading_snake::config::{GameConfig, Mode, THEME_PAPER};
use fading_snake::game::GameEngine;
use fading_snake::input::InputHandler;
use fading_snake::renderer::JsonLinesRenderer;
use fading_snake::script::{parse_script, run_script};
use fading_snake::terminal_runtime::{
    FRAME_INTERVAL, TerminalSession, install_panic_hook, run_interactive,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start in hard mode.
    #[arg(long)]
    hard: bool,

    /// Step interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for apple placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Play a token script headlessly and print one JSON snapshot per tick.
    #[arg(long)]
    script: Option<String>,

    /// Write logs to this file (interactive mode only logs when set).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref(), cli.script.is_some())?;

    let config = resolve_config(&cli)?;
    let mut engine = GameEngine::new(config).context("invalid game configuration")?;

    match cli.script.as_deref() {
        Some(script) => {
            let steps = parse_script(script)?;
            let mut renderer = JsonLinesRenderer::new(io::stdout().lock());
            let ticks = run_script(&mut engine, &steps, &mut renderer)?;
            info!(ticks, score = engine.state().score, "script finished");
        }
        None => {
            install_panic_hook();
            let mut session = TerminalSession::enter(&THEME_PAPER)?;
            let mut input = InputHandler::new(FRAME_INTERVAL);
            run_interactive(&mut engine, &mut session, &mut input)?;
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if cli.hard {
        config.mode = Mode::Hard;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    Ok(config)
}

/// Logs go to `log_file` when given, to stderr when headless, nowhere
/// otherwise since the game owns the terminal.
fn init_tracing(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|error| anyhow!("failed to install log subscriber: {error}"))?;
    } else if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init()
            .map_err(|error| anyhow!("failed to install log subscriber: {error}"))?;
    }

    Ok(())
}
