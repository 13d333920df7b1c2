//////////////////////////
// board.rs
//////////////////////////

use colored::*;
use std::fmt;

use crate::types::{Color, Piece, PieceType};

/// 8x8 grid of squares, each holding at most one piece. The board owns every
/// piece in play; a captured piece is simply dropped from its cell.
///
/// Reads are defensive (out-of-range lookups return nothing); writes assume
/// in-range coordinates from validated callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub(crate) squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard chess starting layout. White occupies ranks 0 and 1, Black
    /// ranks 6 and 7, mirrored.
    pub fn starting_position() -> Self {
        let mut board = Board::empty();

        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (x, &piece_type) in back_rank.iter().enumerate() {
            board.place(Piece::new(piece_type, Color::White), x, 0);
            board.place(Piece::new(piece_type, Color::Black), x, 7);
        }
        for x in 0..8 {
            board.place(Piece::new(PieceType::Pawn, Color::White), x, 1);
            board.place(Piece::new(PieceType::Pawn, Color::Black), x, 6);
        }
        board
    }

    pub fn is_within_bounds(pos: (usize, usize)) -> bool {
        pos.0 < 8 && pos.1 < 8
    }

    pub fn piece_at(&self, x: usize, y: usize) -> Option<&Piece> {
        if Self::is_within_bounds((x, y)) {
            self.squares[x][y].as_ref()
        } else {
            None
        }
    }

    /// Puts `piece` on `(x, y)`, overwriting whatever was there and stamping
    /// the piece's stored position. Setup and move application only.
    pub fn place(&mut self, mut piece: Piece, x: usize, y: usize) {
        piece.pos = (x, y);
        self.squares[x][y] = Some(piece);
    }

    pub fn remove(&mut self, x: usize, y: usize) -> Option<Piece> {
        self.squares[x][y].take()
    }

    /// Moves the piece on `from` to `to` in one step: clears the source,
    /// overwrites the destination and returns its previous occupant as the
    /// capture, and updates the piece's stored position and moved flag.
    /// An empty source is a no-op.
    pub fn apply_move(&mut self, from: (usize, usize), to: (usize, usize)) -> Option<Piece> {
        let mut piece = match self.squares[from.0][from.1].take() {
            Some(p) => p,
            None => return None,
        };
        let captured = self.squares[to.0][to.1].take();
        piece.pos = to;
        piece.has_moved = true;
        self.squares[to.0][to.1] = Some(piece);
        captured
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // File labels (a-h) at top
        write!(f, "  ")?;
        for file in 0..8 {
            write!(f, " {} ", ((file as u8 + b'a') as char).to_string().cyan())?;
        }
        writeln!(f)?;

        writeln!(f, "  {}", "─".repeat(24).bright_magenta())?;

        for rank in (0..8).rev() {
            write!(
                f,
                "{} {}",
                (rank + 1).to_string().cyan(),
                "│".bright_magenta()
            )?;

            for file in 0..8 {
                let symbol = match self.squares[file][rank] {
                    Some(piece) => match piece.piece_type {
                        PieceType::Pawn => {
                            if piece.color == Color::White {
                                'P'
                            } else {
                                'p'
                            }
                        }
                        PieceType::Knight => {
                            if piece.color == Color::White {
                                'N'
                            } else {
                                'n'
                            }
                        }
                        PieceType::Bishop => {
                            if piece.color == Color::White {
                                'B'
                            } else {
                                'b'
                            }
                        }
                        PieceType::Rook => {
                            if piece.color == Color::White {
                                'R'
                            } else {
                                'r'
                            }
                        }
                        PieceType::Queen => {
                            if piece.color == Color::White {
                                'Q'
                            } else {
                                'q'
                            }
                        }
                        PieceType::King => {
                            if piece.color == Color::White {
                                'K'
                            } else {
                                'k'
                            }
                        }
                    },
                    None => '·',
                };

                let colored_symbol = match self.squares[file][rank] {
                    Some(piece) => {
                        if piece.color == Color::White {
                            symbol.to_string().bright_red()
                        } else {
                            symbol.to_string().bright_blue()
                        }
                    }
                    None => symbol.to_string().bright_magenta(),
                };

                write!(f, " {} ", colored_symbol)?;
            }

            writeln!(
                f,
                "{} {}",
                "│".bright_magenta(),
                (rank + 1).to_string().cyan()
            )?;
        }

        writeln!(f, "  {}", "─".repeat(24).bright_magenta())?;

        // File labels (a-h) at bottom
        write!(f, "  ")?;
        for file in 0..8 {
            write!(f, " {} ", ((file as u8 + b'a') as char).to_string().cyan())?;
        }
        writeln!(f)?;

        Ok(())
    }
}
