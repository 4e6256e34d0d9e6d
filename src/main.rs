use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use snake::audio::TermAudio;
use snake::clock::FramePacer;
use snake::config::Config;
use snake::frontend::Io;
use snake::menu::App;
use snake::scores::JsonScoreStore;
use snake::term::{fit_board, TermManager};

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    config.ensure_data_dir()?;
    init_tracing(&config.log_path())?;

    let audio = TermAudio::new(config.assets_dir.as_deref(), config.bell).map_err(|e| {
        error!(error = %e, "startup failed");
        e
    })?;

    let (w, h) = crossterm::terminal::size().context("could not read terminal size")?;
    let board = fit_board(w, h);
    info!(cols = board.cols(), rows = board.rows(), rate = config.base_rate, "starting");

    let mut term = TermManager::new(board)?;
    term.setup()?;

    let io = Io {
        screen: term,
        audio,
        scores: JsonScoreStore::new(config.scores_path()),
        pacer: FramePacer::new(),
    };
    let mut app = App::new(io, board, config.base_rate, StdRng::from_entropy());
    let result = app.run();

    // Always try to restore the terminal, even if the game failed.
    let _ = app.io_mut().screen.restore();
    result?;
    Ok(())
}
