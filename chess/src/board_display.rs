//! Plain-text rendering of a [`Board`] for terminal front ends.

use crate::codec::{Board, BoardSquare};
use crate::types::Piece;

const EMPTY_SQUARE: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Show the board from black's side by reversing the square order.
    pub flip: bool,
    /// Print rank digits and file letters around the board.
    pub labels: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            flip: false,
            labels: true,
        }
    }
}

pub fn render_board(board: &Board, options: DisplayOptions) -> String {
    let mut squares: Vec<&BoardSquare> = board.iter().collect();
    if options.flip {
        squares.reverse();
    }

    let mut out = String::new();
    for row in squares.chunks(8) {
        if options.labels {
            out.push((b'1' + row[0].pos.rank()) as char);
            out.push(' ');
        }
        let cells: Vec<String> = row
            .iter()
            .map(|sq| sq.piece.map_or(EMPTY_SQUARE, Piece::to_char).to_string())
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    if options.labels {
        if let Some(bottom) = squares.chunks(8).last() {
            let files: Vec<String> = bottom
                .iter()
                .map(|sq| ((b'a' + sq.pos.file()) as char).to_string())
                .collect();
            out.push_str("  ");
            out.push_str(&files.join(" "));
            out.push('\n');
        }
    }

    out
}
