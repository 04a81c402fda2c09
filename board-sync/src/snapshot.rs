use chess::Board;
use serde::Serialize;

/// Complete, immutable snapshot of the UI-facing board state.
/// Replaced as a whole after every mutation, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub board: Board,
    /// Mirror of the FEN text for display and editing. After a rejected
    /// position this is the rejected text, not the engine's FEN.
    pub fen: String,
    /// Why the last `set_position` was rejected, if it was.
    pub error: Option<String>,
    /// Engine-provided game status, e.g. "In Progress".
    pub status: String,
}
