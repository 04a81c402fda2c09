pub mod board_display;
pub mod codec;
pub mod fen;
pub mod types;

pub use board_display::{render_board, DisplayOptions};
pub use codec::{
    index_to_square, square_to_index, Board, BoardSquare, CodecError, Pos, PosParseError,
    BOARD_SIZE,
};
pub use fen::{format_fen, normalize_fen, parse_fen, FenError, STANDARD_FEN};
pub use types::{Piece, PieceColor, PieceKind, BLANK};
