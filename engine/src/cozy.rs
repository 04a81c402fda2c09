use chess::{format_fen, index_to_square, parse_fen, Piece, Pos, BLANK, BOARD_SIZE};
use cozy_chess::{Board, Color, File, GameStatus, Move, Rank, Square};

use crate::capability::RulesEngine;
use crate::error::EngineError;

/// Rules engine backed by cozy-chess.
#[derive(Debug, Clone, Default)]
pub struct CozyEngine {
    position: Board,
}

impl CozyEngine {
    /// Engine at the standard starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine at an arbitrary starting position.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        Ok(Self {
            position: parse_fen(fen)?,
        })
    }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.position.generate_moves(|mvs| {
            moves.extend(mvs);
            false
        });
        moves
    }

    /// Turn a drag from one square to another into the legal move it stands for.
    ///
    /// Pawns reaching the last rank promote to a queen. A king dropped two files
    /// sideways castles; cozy-chess encodes castling as the king capturing its own
    /// rook, so the target is rewritten to the rook's square.
    fn resolve_move(&self, from: Pos, to: Pos) -> Option<Move> {
        let legal = self.legal_moves();
        let from_sq = to_square(from);
        let to_sq = to_square(to);
        let piece = self.position.piece_on(from_sq)?;

        // Castling is reached only through the two-file king drop below.
        if piece == cozy_chess::Piece::King
            && self.position.color_on(to_sq) == Some(self.position.side_to_move())
        {
            return None;
        }

        let promotion = (piece == cozy_chess::Piece::Pawn
            && matches!(to_sq.rank(), Rank::First | Rank::Eighth))
        .then_some(cozy_chess::Piece::Queen);
        let direct = Move {
            from: from_sq,
            to: to_sq,
            promotion,
        };
        if legal.contains(&direct) {
            return Some(direct);
        }

        if piece == cozy_chess::Piece::King
            && from.rank() == to.rank()
            && from.file().abs_diff(to.file()) == 2
        {
            let rook_file = if to.file() > from.file() {
                File::H
            } else {
                File::A
            };
            let castle = Move {
                from: from_sq,
                to: Square::new(rook_file, from_sq.rank()),
                promotion: None,
            };
            if legal.contains(&castle) {
                return Some(castle);
            }
        }

        None
    }
}

fn to_square(pos: Pos) -> Square {
    Square::new(
        File::index(pos.file() as usize),
        Rank::index(pos.rank() as usize),
    )
}

impl RulesEngine for CozyEngine {
    fn linear_board(&self) -> String {
        (0..BOARD_SIZE)
            .map(|index| {
                let (pos, _) = index_to_square(index);
                let square = to_square(pos);
                match (self.position.piece_on(square), self.position.color_on(square)) {
                    (Some(kind), Some(color)) => Piece::new(kind.into(), color.into()).to_char(),
                    _ => BLANK,
                }
            })
            .collect()
    }

    fn fen(&self) -> String {
        format_fen(&self.position)
    }

    fn set_position(&mut self, fen: &str) -> Option<String> {
        match parse_fen(fen) {
            Ok(position) => {
                self.position = position;
                None
            }
            Err(e) => {
                tracing::debug!(fen, error = %e, "rejected position");
                Some(e.to_string())
            }
        }
    }

    fn can_drag(&self, pos: Pos) -> bool {
        self.position.color_on(to_square(pos)) == Some(self.position.side_to_move())
    }

    fn can_drop(&self, from: Pos, to: Pos) -> bool {
        self.resolve_move(from, to).is_some()
    }

    fn make_move(&mut self, from: Pos, to: Pos) {
        match self.resolve_move(from, to) {
            Some(mv) => self.position.play_unchecked(mv),
            None => tracing::debug!(%from, %to, "ignoring illegal move"),
        }
    }

    fn game_status(&self) -> String {
        let status = match self.position.status() {
            GameStatus::Ongoing => "In Progress",
            GameStatus::Drawn => "Game Over (Draw)",
            // The side to move has been mated.
            GameStatus::Won => match self.position.side_to_move() {
                Color::White => "Game Over (Black Won)",
                Color::Black => "Game Over (White Won)",
            },
        };
        status.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::STANDARD_FEN;

    fn pos(s: &str) -> Pos {
        s.parse().unwrap()
    }

    fn char_at(engine: &CozyEngine, square: &str) -> char {
        engine
            .linear_board()
            .chars()
            .nth(pos(square).index())
            .unwrap()
    }

    fn play(engine: &mut CozyEngine, moves: &[(&str, &str)]) {
        for (from, to) in moves {
            engine.make_move(pos(from), pos(to));
        }
    }

    #[test]
    fn test_starting_linear_board() {
        let engine = CozyEngine::new();
        let linear = engine.linear_board();
        assert_eq!(linear.chars().count(), 64);
        assert!(linear.starts_with("rnbqkbnrpppppppp"));
        assert!(linear.ends_with("PPPPPPPPRNBQKBNR"));
        assert_eq!(engine.fen(), STANDARD_FEN);
        assert_eq!(engine.game_status(), "In Progress");
    }

    #[test]
    fn test_pawn_push() {
        let mut engine = CozyEngine::new();
        assert!(engine.can_drop(pos("e2"), pos("e4")));
        engine.make_move(pos("e2"), pos("e4"));
        assert_eq!(char_at(&engine, "e2"), BLANK);
        assert_eq!(char_at(&engine, "e4"), 'P');
        assert!(engine
            .fen()
            .starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"));
    }

    #[test]
    fn test_drag_follows_side_to_move() {
        let mut engine = CozyEngine::new();
        assert!(engine.can_drag(pos("e2")));
        assert!(!engine.can_drag(pos("e7")));
        assert!(!engine.can_drag(pos("e4")));
        engine.make_move(pos("e2"), pos("e4"));
        assert!(engine.can_drag(pos("e7")));
        assert!(!engine.can_drag(pos("d2")));
    }

    #[test]
    fn test_illegal_drop_and_move_are_ignored() {
        let mut engine = CozyEngine::new();
        assert!(!engine.can_drop(pos("e2"), pos("e5")));
        assert!(!engine.can_drop(pos("e4"), pos("e5")));
        engine.make_move(pos("e2"), pos("e5"));
        assert_eq!(engine.fen(), STANDARD_FEN);
    }

    #[test]
    fn test_castling_by_king_drop() {
        let mut engine = CozyEngine::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(engine.can_drop(pos("e1"), pos("g1")));
        assert!(engine.can_drop(pos("e1"), pos("c1")));
        assert!(!engine.can_drop(pos("e1"), pos("h1")));
        assert!(!engine.can_drop(pos("e1"), pos("a1")));
        engine.make_move(pos("e1"), pos("g1"));
        assert_eq!(char_at(&engine, "g1"), 'K');
        assert_eq!(char_at(&engine, "f1"), 'R');
        assert_eq!(char_at(&engine, "h1"), BLANK);

        engine.make_move(pos("e8"), pos("c8"));
        assert_eq!(char_at(&engine, "c8"), 'k');
        assert_eq!(char_at(&engine, "d8"), 'r');
        assert_eq!(char_at(&engine, "a8"), BLANK);
    }

    #[test]
    fn test_king_dropped_on_own_rook_is_ignored() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut engine = CozyEngine::from_fen(fen).unwrap();
        engine.make_move(pos("e1"), pos("h1"));
        assert_eq!(engine.fen(), fen);
        assert_eq!(char_at(&engine, "e1"), 'K');
        assert_eq!(char_at(&engine, "h1"), 'R');
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut engine = CozyEngine::from_fen("8/P7/8/8/8/8/8/k6K w - - 0 1").unwrap();
        assert!(engine.can_drop(pos("a7"), pos("a8")));
        engine.make_move(pos("a7"), pos("a8"));
        assert_eq!(char_at(&engine, "a8"), 'Q');
    }

    #[test]
    fn test_checkmate_status() {
        let mut engine = CozyEngine::new();
        play(
            &mut engine,
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );
        assert_eq!(engine.game_status(), "Game Over (Black Won)");
        assert!(!engine.can_drop(pos("e1"), pos("f2")));
    }

    #[test]
    fn test_stalemate_status() {
        let engine = CozyEngine::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(engine.game_status(), "Game Over (Draw)");
    }

    #[test]
    fn test_rejected_position_keeps_current() {
        let mut engine = CozyEngine::new();
        engine.make_move(pos("d2"), pos("d4"));
        let before = engine.fen();

        let err = engine.set_position("not a fen");
        assert!(err.is_some_and(|m| !m.is_empty()));
        assert_eq!(engine.fen(), before);
    }

    #[test]
    fn test_fen_round_trip_after_play() {
        let mut engine = CozyEngine::new();
        play(&mut engine, &[("e2", "e4"), ("c7", "c5"), ("g1", "f3")]);
        let fen = engine.fen();

        let mut other = CozyEngine::new();
        assert_eq!(other.set_position(&fen), None);
        assert_eq!(other.fen(), fen);
        assert_eq!(other.linear_board(), engine.linear_board());
    }

    #[test]
    fn test_from_fen_fails_fast() {
        assert!(matches!(
            CozyEngine::from_fen(""),
            Err(EngineError::Startup(_))
        ));
    }
}
