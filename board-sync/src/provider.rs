use std::future::Future;

use engine::RulesEngine;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use super::actor::run_board_actor;
use super::commands::SyncError;
use super::handle::{BoardHandle, CURRENT};
use super::synchronizer::BoardSynchronizer;

/// Channel sizes for the board actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Queued commands before senders wait. Must be at least 1.
    pub command_capacity: usize,
    /// Events kept for slow subscribers before they start lagging. Must be at least 1.
    pub event_capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            command_capacity: 32,
            event_capacity: 100,
        }
    }
}

/// The application's single board: one synchronizer, one engine, one actor.
///
/// Create it once at startup and hand out [`BoardHandle`]s, either explicitly
/// via [`handle`](Self::handle) or implicitly through [`scope`](Self::scope).
pub struct BoardProvider {
    handle: BoardHandle,
    task: JoinHandle<()>,
}

impl BoardProvider {
    /// Build the synchronizer and start the actor. Must run inside a Tokio runtime.
    pub fn spawn<E>(engine: E) -> Result<Self, SyncError>
    where
        E: RulesEngine + Send + 'static,
    {
        Self::spawn_with_config(engine, BoardConfig::default())
    }

    pub fn spawn_with_config<E>(engine: E, config: BoardConfig) -> Result<Self, SyncError>
    where
        E: RulesEngine + Send + 'static,
    {
        let sync = BoardSynchronizer::new(engine)?;

        let (cmd_tx, cmd_rx) = mpsc::channel(config.command_capacity.max(1));
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));

        let task = tokio::spawn(run_board_actor(sync, cmd_rx, event_tx));
        tracing::info!(?config, "Board provider started");

        Ok(Self {
            handle: BoardHandle::new(cmd_tx),
            task,
        })
    }

    pub fn handle(&self) -> BoardHandle {
        self.handle.clone()
    }

    /// Run `future` with this provider's handle reachable through [`BoardHandle::current`].
    pub async fn scope<F: Future>(&self, future: F) -> F::Output {
        CURRENT.scope(self.handle.clone(), future).await
    }

    /// Stop the actor and wait for it. Outstanding handles fail with [`SyncError::Closed`].
    pub async fn shutdown(self) {
        self.handle.shutdown().await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Board actor task failed");
        }
    }
}
