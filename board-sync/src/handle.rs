use std::sync::Arc;

use chess::Pos;
use tokio::sync::{broadcast, mpsc, oneshot};

use super::commands::{BoardCommand, SyncError};
use super::events::BoardEvent;
use super::feedback::{drop_feedback, DropFeedback};
use super::snapshot::BoardSnapshot;

tokio::task_local! {
    pub(crate) static CURRENT: BoardHandle;
}

/// Cheap, cloneable handle to the board actor.
#[derive(Debug, Clone)]
pub struct BoardHandle {
    cmd_tx: mpsc::Sender<BoardCommand>,
}

impl BoardHandle {
    pub(crate) fn new(cmd_tx: mpsc::Sender<BoardCommand>) -> Self {
        Self { cmd_tx }
    }

    /// The handle installed by the enclosing [`BoardProvider::scope`].
    ///
    /// Task-locals do not follow `tokio::spawn`; spawned tasks should receive a
    /// clone instead.
    ///
    /// [`BoardProvider::scope`]: crate::BoardProvider::scope
    pub fn current() -> Result<Self, SyncError> {
        CURRENT
            .try_with(|handle| handle.clone())
            .map_err(|_| SyncError::OutsideScope)
    }

    pub async fn snapshot(&self) -> Result<Arc<BoardSnapshot>, SyncError> {
        let (tx, rx) = oneshot::channel();
        self.send(BoardCommand::GetSnapshot { reply: tx }).await?;
        rx.await.map_err(|_| SyncError::Closed)
    }

    pub async fn set_position(
        &self,
        fen: impl Into<String>,
    ) -> Result<Arc<BoardSnapshot>, SyncError> {
        let (tx, rx) = oneshot::channel();
        self.send(BoardCommand::SetPosition {
            fen: fen.into(),
            reply: tx,
        })
        .await?;
        rx.await.map_err(|_| SyncError::Closed)?
    }

    pub async fn can_drag(&self, pos: Pos) -> Result<bool, SyncError> {
        let (tx, rx) = oneshot::channel();
        self.send(BoardCommand::CanDrag { pos, reply: tx }).await?;
        rx.await.map_err(|_| SyncError::Closed)
    }

    pub async fn can_drop(&self, from: Pos, to: Pos) -> Result<bool, SyncError> {
        let (tx, rx) = oneshot::channel();
        self.send(BoardCommand::CanDrop { from, to, reply: tx })
            .await?;
        rx.await.map_err(|_| SyncError::Closed)
    }

    pub async fn apply_move(&self, from: Pos, to: Pos) -> Result<Arc<BoardSnapshot>, SyncError> {
        let (tx, rx) = oneshot::channel();
        self.send(BoardCommand::ApplyMove { from, to, reply: tx })
            .await?;
        rx.await.map_err(|_| SyncError::Closed)?
    }

    /// Highlight for square `to` while the piece from `from` is dragged.
    pub async fn drop_feedback(
        &self,
        from: Pos,
        to: Pos,
        is_over: bool,
    ) -> Result<Option<DropFeedback>, SyncError> {
        let can_drop = self.can_drop(from, to).await?;
        Ok(drop_feedback(is_over, can_drop))
    }

    /// Current snapshot plus a receiver for every later change.
    pub async fn subscribe(
        &self,
    ) -> Result<(Arc<BoardSnapshot>, broadcast::Receiver<BoardEvent>), SyncError> {
        let (tx, rx) = oneshot::channel();
        self.send(BoardCommand::Subscribe { reply: tx }).await?;
        rx.await.map_err(|_| SyncError::Closed)
    }

    pub async fn shutdown(&self) {
        let _ = self.cmd_tx.send(BoardCommand::Shutdown).await;
    }

    pub fn is_closed(&self) -> bool {
        self.cmd_tx.is_closed()
    }

    async fn send(&self, cmd: BoardCommand) -> Result<(), SyncError> {
        self.cmd_tx.send(cmd).await.map_err(|_| SyncError::Closed)
    }
}
