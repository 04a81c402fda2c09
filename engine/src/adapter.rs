use chess::{Board, Pos};

use crate::capability::RulesEngine;
use crate::error::EngineError;

/// Typed façade over a [`RulesEngine`].
///
/// Converts the engine's raw answers into project types and nothing more: no
/// validation, no caching, no retries.
#[derive(Debug)]
pub struct EngineAdapter<E> {
    engine: E,
}

impl<E: RulesEngine> EngineAdapter<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Current position as 64 decoded squares.
    pub fn board(&self) -> Result<Board, EngineError> {
        let linear = self.engine.linear_board();
        Ok(Board::from_linear(&linear)?)
    }

    pub fn fen(&self) -> String {
        self.engine.fen()
    }

    pub fn set_position(&mut self, fen: &str) -> Result<(), EngineError> {
        tracing::debug!(fen, "engine set_position");
        match self.engine.set_position(fen) {
            Some(message) => Err(EngineError::PositionRejected(message)),
            None => Ok(()),
        }
    }

    pub fn can_drag(&self, pos: Pos) -> bool {
        self.engine.can_drag(pos)
    }

    pub fn can_drop(&self, from: Pos, to: Pos) -> bool {
        self.engine.can_drop(from, to)
    }

    pub fn apply_move(&mut self, from: Pos, to: Pos) {
        tracing::debug!(%from, %to, "engine move");
        self.engine.make_move(from, to);
    }

    pub fn game_status(&self) -> String {
        self.engine.game_status()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{EngineCall, ScriptedEngine, ScriptedPosition};
    use chess::{PieceColor, PieceKind, STANDARD_FEN};

    fn pos(s: &str) -> Pos {
        s.parse().unwrap()
    }

    #[test]
    fn test_board_is_decoded() {
        let adapter = EngineAdapter::new(ScriptedEngine::standard());
        let board = adapter.board().unwrap();
        let rook = board[0].piece.unwrap();
        assert_eq!((rook.kind, rook.color), (PieceKind::Rook, PieceColor::Black));
    }

    #[test]
    fn test_rejection_becomes_error() {
        let mut adapter = EngineAdapter::new(ScriptedEngine::standard());
        let err = adapter.set_position("garbage").unwrap_err();
        assert!(matches!(err, EngineError::PositionRejected(ref m) if !m.is_empty()));
        assert!(adapter.set_position(STANDARD_FEN).is_ok());
    }

    #[test]
    fn test_short_board_is_a_contract_violation() {
        let broken = ScriptedPosition::new("broken", "rnbqkbnr", "In Progress");
        let adapter = EngineAdapter::new(ScriptedEngine::new(broken));
        assert!(matches!(
            adapter.board(),
            Err(EngineError::MalformedBoard(_))
        ));
    }

    #[test]
    fn test_queries_pass_straight_through() {
        let engine = ScriptedEngine::standard()
            .with_can_drag(|p| p.to_string() == "e2")
            .with_can_drop(|_, _| true);
        let log = engine.call_log();
        let adapter = EngineAdapter::new(engine);

        assert!(adapter.can_drag(pos("e2")));
        assert!(!adapter.can_drag(pos("e7")));
        assert!(adapter.can_drop(pos("a1"), pos("h8")));
        assert_eq!(
            log.calls(),
            vec![
                EngineCall::CanDrag(pos("e2")),
                EngineCall::CanDrag(pos("e7")),
                EngineCall::CanDrop(pos("a1"), pos("h8")),
            ]
        );
    }
}
