//! Position codec: the one place that maps the engine's linear board order
//! onto algebraic squares.
//!
//! Linear index 0 is the top-left square as the engine sees it, i.e. `a8`;
//! indices advance file by file, then rank by rank towards `h1`.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::types::{Piece, BLANK};

/// Number of squares in a linear board.
pub const BOARD_SIZE: usize = 64;

/// An algebraic square such as `e4`.
///
/// `file` is 0 for `a` through 7 for `h`; `rank` is 0 for rank `1` through 7 for rank `8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    file: u8,
    rank: u8,
}

impl Pos {
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    pub fn file(self) -> u8 {
        self.file
    }

    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Linear board index of this square.
    pub fn index(self) -> usize {
        square_to_index(self)
    }
}

/// Map a linear index (0..64) to its square and whether that square is light.
pub fn index_to_square(index: usize) -> (Pos, bool) {
    debug_assert!(index < BOARD_SIZE, "linear index {index} out of range");
    let row = (index >> 3) & 7;
    let col = index & 7;
    let pos = Pos {
        file: col as u8,
        rank: (7 - row) as u8,
    };
    (pos, (row + col) % 2 == 0)
}

/// Reverse of [`index_to_square`].
pub fn square_to_index(pos: Pos) -> usize {
    (7 - pos.rank as usize) * 8 + pos.file as usize
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, (b'1' + self.rank) as char)
    }
}

impl FromStr for Pos {
    type Err = PosParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(PosParseError(s.to_string()));
        }
        match (bytes[0], bytes[1]) {
            (f @ b'a'..=b'h', r @ b'1'..=b'8') => Ok(Self {
                file: f - b'a',
                rank: r - b'1',
            }),
            _ => Err(PosParseError(s.to_string())),
        }
    }
}

impl Serialize for Pos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid square \"{0}\"")]
pub struct PosParseError(pub String);

/// One square of the UI-facing board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSquare {
    #[serde(serialize_with = "serialize_piece")]
    pub piece: Option<Piece>,
    pub pos: Pos,
    pub is_light_square: bool,
}

fn serialize_piece<S: Serializer>(
    piece: &Option<Piece>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_char(piece.map_or(BLANK, Piece::to_char))
}

/// Exactly 64 squares in linear order. Built only from an engine's linear board
/// string and never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    squares: Vec<BoardSquare>,
}

impl Board {
    pub fn from_linear(linear: &str) -> Result<Self, CodecError> {
        let len = linear.chars().count();
        if len != BOARD_SIZE {
            return Err(CodecError::WrongLength(len));
        }

        let squares = linear
            .chars()
            .enumerate()
            .map(|(index, c)| {
                let piece = match c {
                    BLANK => None,
                    c => Some(Piece::from_char(c).ok_or(CodecError::InvalidPiece(c))?),
                };
                let (pos, is_light_square) = index_to_square(index);
                Ok(BoardSquare {
                    piece,
                    pos,
                    is_light_square,
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;

        Ok(Self { squares })
    }

    pub fn squares(&self) -> &[BoardSquare] {
        &self.squares
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoardSquare> {
        self.squares.iter()
    }

    pub fn square(&self, pos: Pos) -> &BoardSquare {
        &self.squares[square_to_index(pos)]
    }

    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        self.square(pos).piece
    }
}

impl Index<usize> for Board {
    type Output = BoardSquare;

    fn index(&self, index: usize) -> &BoardSquare {
        &self.squares[index]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Linear board has {0} squares, expected 64")]
    WrongLength(usize),
    #[error("Invalid piece character: {0:?}")]
    InvalidPiece(char),
}
