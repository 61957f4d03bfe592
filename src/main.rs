mod app;
mod audio;
mod cli;
mod command;
mod config;
mod consts;
mod display;
mod game;
mod input;
mod util;
use crate::app::App;
use crate::cli::{Arguments, Cli};
use crate::config::Config;
use crate::display::TerminalDisplay;
use crate::game::Game;
use crate::input::TerminalInput;
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match Cli::from_parser(lexopt::Parser::from_env()) {
        Ok(Cli::Run(args)) => args,
        Ok(Cli::Help) => {
            print!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(Cli::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}: {e}", env!("CARGO_PKG_NAME"));
            return ExitCode::from(2);
        }
    };
    let config = match setup(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {e:#}", env!("CARGO_PKG_NAME"));
            return ExitCode::FAILURE;
        }
    };
    io_exit(play(config))
}

/// Install logging and load the configuration, before the terminal is
/// taken over
fn setup(args: &Arguments) -> anyhow::Result<Config> {
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path)?;
    }
    let config = match args.config.as_deref() {
        Some(path) => Config::load(path, false)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) => Config::load(&path, true)
                .with_context(|| format!("failed to load {}", path.display()))?,
            Err(e) => {
                tracing::warn!(error = %e, "Using default configuration");
                Config::default()
            }
        },
    };
    let config = args.apply(config).validate()?;
    tracing::info!(?config, "Loaded configuration");
    Ok(config)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("toxic_snake=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn play(config: Config) -> io::Result<()> {
    let sounds = audio::open(config.sound.output);
    let terminal = ratatui::init();
    let r = App::new(
        Game::new(config.settings()),
        TerminalInput,
        TerminalDisplay::new(terminal, io::stdout()),
        sounds,
        config.frame_duration(),
    )
    .run();
    ratatui::restore();
    println!("{}", r?);
    Ok(())
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
