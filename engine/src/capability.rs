use chess::Pos;

/// Operations an external rules engine must provide.
///
/// Engines own all chess knowledge: legality, move application and game outcome.
/// Queries must not change the position; `set_position` must leave the position
/// untouched when it rejects the input.
pub trait RulesEngine {
    /// 64 characters, `a8` first and `h1` last, one piece letter or a blank per square.
    fn linear_board(&self) -> String;

    /// Canonical FEN of the current position.
    fn fen(&self) -> String;

    /// Replace the current position. Returns a description of the problem on rejection.
    fn set_position(&mut self, fen: &str) -> Option<String>;

    fn can_drag(&self, pos: Pos) -> bool;

    fn can_drop(&self, from: Pos, to: Pos) -> bool;

    /// Play `from` -> `to` if the engine considers it legal; otherwise do nothing.
    fn make_move(&mut self, from: Pos, to: Pos);

    /// Free-form classification of the current position, e.g. "In Progress".
    fn game_status(&self) -> String;
}
