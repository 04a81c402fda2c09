use cozy_chess::Board;

pub const STANDARD_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Defaults for the side-to-move, castling, en passant and move counter fields.
const FIELD_DEFAULTS: [&str; 5] = ["w", "-", "-", "0", "1"];

/// Bring FEN text into six-field form, filling omitted trailing fields with defaults.
pub fn normalize_fen(fen: &str) -> Result<String, FenError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    match parts.len() {
        0 => Err(FenError::Empty),
        n if n > 6 => Err(FenError::TooManyFields(n)),
        n => {
            let mut fields = parts;
            fields.extend_from_slice(&FIELD_DEFAULTS[n - 1..]);
            Ok(fields.join(" "))
        }
    }
}

/// Parse a FEN string into a Board
pub fn parse_fen(fen: &str) -> Result<Board, FenError> {
    let normalized = normalize_fen(fen)?;
    normalized
        .parse()
        .map_err(|e| FenError::Rejected(format!("{:?}", e)))
}

/// Format a Board as a FEN string
pub fn format_fen(board: &Board) -> String {
    board.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    #[error("Empty FEN")]
    Empty,
    #[error("Too many FEN fields: {0}")]
    TooManyFields(usize),
    #[error("Invalid FEN: {0}")]
    Rejected(String),
}
