use std::ops::ControlFlow;
use std::sync::Arc;

use engine::RulesEngine;
use tokio::sync::{broadcast, mpsc};
use tracing::Instrument;

use super::commands::{BoardCommand, SyncError};
use super::events::BoardEvent;
use super::snapshot::BoardSnapshot;
use super::synchronizer::BoardSynchronizer;

/// The board actor loop.
/// Sole owner of the synchronizer; commands run one at a time, to completion.
pub(crate) async fn run_board_actor<E: RulesEngine>(
    sync: BoardSynchronizer<E>,
    cmd_rx: mpsc::Receiver<BoardCommand>,
    event_tx: broadcast::Sender<BoardEvent>,
) {
    run_board_actor_inner(sync, cmd_rx, event_tx)
        .instrument(tracing::info_span!("board"))
        .await;
}

async fn run_board_actor_inner<E: RulesEngine>(
    mut sync: BoardSynchronizer<E>,
    mut cmd_rx: mpsc::Receiver<BoardCommand>,
    event_tx: broadcast::Sender<BoardEvent>,
) {
    tracing::info!("Board actor started");

    while let Some(cmd) = cmd_rx.recv().await {
        if let ControlFlow::Break(()) = handle_command(&mut sync, cmd, &event_tx) {
            tracing::info!("Board actor shutting down");
            break;
        }
    }

    tracing::info!("Board actor exited");
}

fn handle_command<E: RulesEngine>(
    sync: &mut BoardSynchronizer<E>,
    cmd: BoardCommand,
    event_tx: &broadcast::Sender<BoardEvent>,
) -> ControlFlow<()> {
    match cmd {
        BoardCommand::SetPosition { fen, reply } => {
            let result = sync.set_position(&fen);
            publish(&result, event_tx);
            let _ = reply.send(result);
        }
        BoardCommand::ApplyMove { from, to, reply } => {
            let result = sync.apply_move(from, to);
            publish(&result, event_tx);
            let _ = reply.send(result);
        }
        BoardCommand::CanDrag { pos, reply } => {
            let _ = reply.send(sync.can_drag(pos));
        }
        BoardCommand::CanDrop { from, to, reply } => {
            let _ = reply.send(sync.can_drop(from, to));
        }
        BoardCommand::GetSnapshot { reply } => {
            let _ = reply.send(sync.snapshot());
        }
        BoardCommand::Subscribe { reply } => {
            let _ = reply.send((sync.snapshot(), event_tx.subscribe()));
        }
        BoardCommand::Shutdown => return ControlFlow::Break(()),
    }
    ControlFlow::Continue(())
}

fn publish(
    result: &Result<Arc<BoardSnapshot>, SyncError>,
    event_tx: &broadcast::Sender<BoardEvent>,
) {
    // Sending fails only when nobody is subscribed.
    let _ = match result {
        Ok(snapshot) => event_tx.send(BoardEvent::StateChanged(Arc::clone(snapshot))),
        Err(e) => {
            tracing::error!(error = %e, "engine contract violation, keeping previous snapshot");
            event_tx.send(BoardEvent::Error(e.to_string()))
        }
    };
}
