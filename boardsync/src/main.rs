//! boardsync - terminal front end for the shared chessboard.
//!
//! Starts one board provider over the cozy-chess engine, then reads UI events
//! (drags, drops, moves, FEN edits) from stdin and prints the synchronized
//! board after each one.

use std::path::PathBuf;

use anyhow::Context;
use board_sync::{BoardEvent, BoardProvider};
use chess::DisplayOptions;
use clap::Parser;
use engine::CozyEngine;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod repl;

#[derive(Parser)]
#[command(name = "boardsync", about = "Chessboard kept in sync with a rules engine")]
struct Cli {
    /// Starting position. Defaults to the standard opening position.
    #[arg(long)]
    fen: Option<String>,

    /// Draw the board from Black's side.
    #[arg(long)]
    flip: bool,

    /// Hide rank and file labels.
    #[arg(long)]
    no_labels: bool,

    /// Print snapshots as JSON instead of a text board.
    #[arg(long)]
    json: bool,

    /// Directory for the daily log file. Overrides `BOARDSYNC_LOG_DIR`.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(config::get_log_dir);
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&log_dir, "boardsync");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("boardsync starting up");

    let engine = match &cli.fen {
        Some(fen) => CozyEngine::from_fen(fen).context("invalid starting position")?,
        None => CozyEngine::new(),
    };
    let provider = BoardProvider::spawn_with_config(engine, config::board_config())
        .context("failed to start board")?;

    let (_, mut events) = provider.handle().subscribe().await?;
    let watcher = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(BoardEvent::StateChanged(snapshot)) => {
                    tracing::info!(
                        fen = %snapshot.fen,
                        status = %snapshot.status,
                        error = ?snapshot.error,
                        "Board changed"
                    );
                }
                Ok(BoardEvent::Error(e)) => tracing::warn!(error = %e, "Board update failed"),
                Err(RecvError::Lagged(n)) => tracing::warn!(skipped = n, "Event watcher lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let session = repl::Session::new(
        DisplayOptions {
            flip: cli.flip,
            labels: !cli.no_labels,
        },
        cli.json,
    );
    println!("boardsync - type \"help\" for commands");
    println!("Debug logs: {}/boardsync.YYYY-MM-DD", log_dir.display());
    let result = provider.scope(repl::run(session)).await;

    provider.shutdown().await;
    if let Err(e) = watcher.await {
        tracing::error!(error = %e, "Event watcher failed");
    }

    tracing::info!("boardsync shutting down");
    result
}
