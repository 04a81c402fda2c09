use std::sync::Arc;

use super::snapshot::BoardSnapshot;

/// Events broadcast from the board actor to all subscribers.
#[derive(Debug, Clone)]
pub enum BoardEvent {
    /// Full snapshot after any mutation. All subscribers receive the same `Arc`.
    StateChanged(Arc<BoardSnapshot>),
    /// The engine broke its contract while handling a command.
    Error(String),
}
