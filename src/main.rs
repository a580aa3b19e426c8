mod app;
mod cli;
mod config;
mod consts;
mod controls;
mod frontend;
mod game;
mod palette;
mod storage;
mod util;
use crate::app::App;
use crate::cli::{Arguments, Command};
use crate::config::{Config, Dimensions};
use crate::frontend::{Flat, Sliced};
use crate::storage::Storage;
use anyhow::Context;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = match Command::from_parser(lexopt::Parser::from_env()) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            print!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("dimsnake: {e}");
            eprintln!("Run `dimsnake --help` for usage");
            return ExitCode::FAILURE;
        }
    };
    let (config, storage) = match prepare(&args) {
        Ok(pair) => pair,
        Err(e) => {
            eprintln!("dimsnake: {e:?}");
            return ExitCode::FAILURE;
        }
    };
    let dimensions = config.game.dimensions;
    tracing::info!(%dimensions, player = %config.player.name, "Starting");
    let terminal = ratatui::init();
    let r = match dimensions {
        Dimensions::Two => App::<_, 2>::new(Flat, config, storage).run(terminal),
        Dimensions::Three => App::<_, 3>::new(Sliced, config, storage).run(terminal),
    };
    ratatui::restore();
    io_exit(r)
}

/// Set up logging, then load the configuration & the storage file
fn prepare(args: &Arguments) -> anyhow::Result<(Config, Storage)> {
    if let Some(ref path) = args.log_file {
        init_logging(path)?;
    }
    let config_path = match args.config {
        Some(ref p) => p.clone(),
        None => Config::find_path(),
    };
    let mut config = Config::load(&config_path).with_context(|| {
        format!(
            "failed to load configuration from {}",
            config_path.display()
        )
    })?;
    args.apply(&mut config);
    config
        .validate()
        .context("configuration is invalid with the given command-line options")?;
    let storage_path = config
        .storage_file()
        .context("could not determine where to store high scores; set files.storage_file")?;
    let storage = Storage::open(storage_path)?;
    let settings = storage.settings();
    tracing::debug!(
        path = %storage.path().display(),
        music_volume = settings.music_volume,
        sfx_volume = settings.sfx_volume,
        difficulty = %settings.difficulty,
        "Opened storage"
    );
    Ok((config, storage))
}

/// Send `tracing` output to the file at `path`.  Nothing is logged unless
/// this is called, as the terminal belongs to the game.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = fs_err::File::create(path).context("failed to open log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize logging")
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dimsnake: {e}");
            ExitCode::from(2)
        }
    }
}
