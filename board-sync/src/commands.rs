use std::sync::Arc;

use chess::Pos;
use engine::EngineError;
use tokio::sync::{broadcast, oneshot};

use super::events::BoardEvent;
use super::snapshot::BoardSnapshot;

#[derive(Debug, Clone, thiserror::Error)]
pub enum SyncError {
    /// The engine broke its contract; the previous snapshot was kept.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    #[error("Board accessed outside of a provider scope")]
    OutsideScope,
    #[error("Board actor closed")]
    Closed,
}

pub(crate) type SnapshotReply = oneshot::Sender<Result<Arc<BoardSnapshot>, SyncError>>;

/// Commands sent to the board actor. Each embeds a oneshot for the reply.
pub(crate) enum BoardCommand {
    SetPosition {
        fen: String,
        reply: SnapshotReply,
    },
    ApplyMove {
        from: Pos,
        to: Pos,
        reply: SnapshotReply,
    },
    CanDrag {
        pos: Pos,
        reply: oneshot::Sender<bool>,
    },
    CanDrop {
        from: Pos,
        to: Pos,
        reply: oneshot::Sender<bool>,
    },
    GetSnapshot {
        reply: oneshot::Sender<Arc<BoardSnapshot>>,
    },
    Subscribe {
        reply: oneshot::Sender<(Arc<BoardSnapshot>, broadcast::Receiver<BoardEvent>)>,
    },
    Shutdown,
}
