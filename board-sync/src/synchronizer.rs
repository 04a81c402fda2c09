use std::sync::Arc;

use chess::Pos;
use engine::{EngineAdapter, EngineError, RulesEngine};

use super::commands::SyncError;
use super::snapshot::BoardSnapshot;

/// Owns the engine adapter and the current snapshot.
///
/// Every mutation re-reads the whole position from the engine and swaps in a
/// new snapshot; nothing is predicted or patched. Single owner, no locks: the
/// board actor is the only caller once a provider is running.
pub struct BoardSynchronizer<E> {
    adapter: EngineAdapter<E>,
    snapshot: Arc<BoardSnapshot>,
}

impl<E: RulesEngine> BoardSynchronizer<E> {
    /// Derive the initial snapshot from the engine's current position.
    pub fn new(engine: E) -> Result<Self, SyncError> {
        let adapter = EngineAdapter::new(engine);
        let snapshot = BoardSnapshot {
            board: adapter.board()?,
            fen: adapter.fen(),
            error: None,
            status: adapter.game_status(),
        };
        Ok(Self {
            adapter,
            snapshot: Arc::new(snapshot),
        })
    }

    pub fn snapshot(&self) -> Arc<BoardSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Mirror `fen` and ask the engine to adopt it.
    ///
    /// A rejection is not an `Err`: it lands in the snapshot's `error` while the
    /// board and status stay at the last valid position.
    pub fn set_position(&mut self, fen: &str) -> Result<Arc<BoardSnapshot>, SyncError> {
        let next = match self.adapter.set_position(fen) {
            Ok(()) => BoardSnapshot {
                board: self.adapter.board()?,
                fen: fen.to_string(),
                error: None,
                status: self.adapter.game_status(),
            },
            Err(EngineError::PositionRejected(message)) => {
                tracing::warn!(fen, %message, "position rejected");
                BoardSnapshot {
                    board: self.snapshot.board.clone(),
                    fen: fen.to_string(),
                    error: Some(message),
                    status: self.snapshot.status.clone(),
                }
            }
            Err(e) => return Err(e.into()),
        };
        Ok(self.replace(next))
    }

    pub fn can_drag(&self, pos: Pos) -> bool {
        self.adapter.can_drag(pos)
    }

    pub fn can_drop(&self, from: Pos, to: Pos) -> bool {
        self.adapter.can_drop(from, to)
    }

    /// Hand the move to the engine, then re-read everything. An illegal move the
    /// engine ignores yields a snapshot equal to the previous one.
    pub fn apply_move(&mut self, from: Pos, to: Pos) -> Result<Arc<BoardSnapshot>, SyncError> {
        self.adapter.apply_move(from, to);
        let next = BoardSnapshot {
            board: self.adapter.board()?,
            fen: self.adapter.fen(),
            error: self.snapshot.error.clone(),
            status: self.adapter.game_status(),
        };
        Ok(self.replace(next))
    }

    fn replace(&mut self, next: BoardSnapshot) -> Arc<BoardSnapshot> {
        self.snapshot = Arc::new(next);
        self.snapshot()
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &E {
        self.adapter.engine()
    }
}
