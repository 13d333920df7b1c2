//////////////////////////
// check.rs
//////////////////////////

use crate::board::Board;
use crate::rules::is_legal_move;
use crate::types::{Color, PieceType, Rule};

pub fn find_king(board: &Board, color: Color) -> Option<(usize, usize)> {
    for x in 0..8 {
        for y in 0..8 {
            if let Some(piece) = board.piece_at(x, y) {
                if piece.piece_type == PieceType::King && piece.color == color {
                    return Some((x, y));
                }
            }
        }
    }
    None
}

/// True when any piece of the side opposing `defender` has a legal move onto
/// `target` under the active rule. Reusing move legality as the attack
/// predicate keeps attacks consistent with every modifier, BishopPhase
/// included.
pub fn is_square_attacked(
    board: &Board,
    target: (usize, usize),
    defender: Color,
    rule: Option<Rule>,
) -> bool {
    for x in 0..8 {
        for y in 0..8 {
            if let Some(piece) = board.piece_at(x, y) {
                if piece.color != defender && is_legal_move(board, piece, target, rule) {
                    return true;
                }
            }
        }
    }
    false
}

/// A color with no king on the board reports "not in check" rather than
/// faulting.
pub fn is_king_in_check(board: &Board, color: Color, rule: Option<Rule>) -> bool {
    match find_king(board, color) {
        Some(pos) => is_square_attacked(board, pos, color, rule),
        None => false,
    }
}

/// Simulates `from` -> `to` on the live board, asks whether the mover's own
/// king is then attacked, and restores both squares to their exact prior
/// contents before returning. The restore runs on every path, including when
/// the destination was empty.
pub fn would_expose_own_king(
    board: &mut Board,
    from: (usize, usize),
    to: (usize, usize),
    rule: Option<Rule>,
) -> bool {
    let piece = match board.piece_at(from.0, from.1).copied() {
        Some(p) => p,
        None => return false,
    };
    let displaced = board.squares[to.0][to.1];

    let mut probe = piece;
    probe.pos = to;
    board.squares[from.0][from.1] = None;
    board.squares[to.0][to.1] = Some(probe);

    let exposed = is_king_in_check(board, piece.color, rule);

    board.squares[from.0][from.1] = Some(piece);
    board.squares[to.0][to.1] = displaced;

    exposed
}

/// Brute force over every (own piece, destination) pair, short-circuiting on
/// the first move that is legal and does not expose the mover's king. At
/// most 16 pieces x 64 squares, which is fine at this board size.
pub fn has_any_legal_move(board: &mut Board, color: Color, rule: Option<Rule>) -> bool {
    for fx in 0..8 {
        for fy in 0..8 {
            let piece = match board.piece_at(fx, fy).copied() {
                Some(p) if p.color == color => p,
                _ => continue,
            };
            for tx in 0..8 {
                for ty in 0..8 {
                    if is_legal_move(board, &piece, (tx, ty), rule)
                        && !would_expose_own_king(board, (fx, fy), (tx, ty), rule)
                    {
                        return true;
                    }
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Piece;

    fn put(board: &mut Board, piece_type: PieceType, color: Color, x: usize, y: usize) {
        board.place(Piece::new(piece_type, color), x, y);
    }

    #[test]
    fn finds_each_king() {
        let board = Board::starting_position();
        assert_eq!(find_king(&board, Color::White), Some((4, 0)));
        assert_eq!(find_king(&board, Color::Black), Some((4, 7)));
        assert_eq!(find_king(&Board::empty(), Color::White), None);
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let mut board = Board::empty();
        put(&mut board, PieceType::Queen, Color::Black, 4, 4);
        assert!(!is_king_in_check(&board, Color::White, None));
    }

    #[test]
    fn rook_checks_along_an_open_file() {
        let mut board = Board::empty();
        put(&mut board, PieceType::King, Color::White, 4, 0);
        put(&mut board, PieceType::Rook, Color::Black, 4, 6);
        assert!(is_king_in_check(&board, Color::White, None));

        put(&mut board, PieceType::Pawn, Color::White, 4, 3);
        assert!(!is_king_in_check(&board, Color::White, None));
    }

    #[test]
    fn bishop_phase_checks_through_blockers() {
        let mut board = Board::empty();
        put(&mut board, PieceType::King, Color::White, 4, 0);
        put(&mut board, PieceType::Bishop, Color::Black, 7, 3);
        put(&mut board, PieceType::Pawn, Color::White, 5, 1);

        assert!(!is_king_in_check(&board, Color::White, None));
        assert!(is_king_in_check(
            &board,
            Color::White,
            Some(Rule::BishopPhase)
        ));
    }

    #[test]
    fn moving_a_pinned_piece_exposes_the_king() {
        let mut board = Board::empty();
        put(&mut board, PieceType::King, Color::White, 4, 0);
        put(&mut board, PieceType::Rook, Color::White, 4, 2);
        put(&mut board, PieceType::Rook, Color::Black, 4, 6);

        assert!(would_expose_own_king(&mut board, (4, 2), (5, 2), None));
        assert!(!would_expose_own_king(&mut board, (4, 2), (4, 3), None));
        // Capturing the attacker is fine too.
        assert!(!would_expose_own_king(&mut board, (4, 2), (4, 6), None));
    }

    #[test]
    fn simulation_restores_the_board_exactly() {
        let mut board = Board::empty();
        put(&mut board, PieceType::King, Color::White, 4, 0);
        put(&mut board, PieceType::Rook, Color::White, 4, 2);
        put(&mut board, PieceType::Rook, Color::Black, 4, 6);
        let before = board.clone();

        // Probe onto an empty square and onto an occupied one.
        would_expose_own_king(&mut board, (4, 2), (5, 2), None);
        assert_eq!(board, before);
        would_expose_own_king(&mut board, (4, 2), (4, 6), None);
        assert_eq!(board, before);
        assert_eq!(board.piece_at(4, 2).unwrap().pos, (4, 2));
        assert!(!board.piece_at(4, 2).unwrap().has_moved);
    }

    #[test]
    fn white_has_moves_at_the_start() {
        let mut board = Board::starting_position();
        assert!(has_any_legal_move(&mut board, Color::White, None));
        assert!(has_any_legal_move(&mut board, Color::Black, None));
    }

    #[test]
    fn cornered_king_has_no_moves() {
        // Classic queen-and-king stalemate net: not in check, nowhere to go.
        let mut board = Board::empty();
        put(&mut board, PieceType::King, Color::Black, 7, 7);
        put(&mut board, PieceType::King, Color::White, 5, 6);
        put(&mut board, PieceType::Queen, Color::White, 6, 5);

        assert!(!is_king_in_check(&board, Color::Black, None));
        assert!(!has_any_legal_move(&mut board, Color::Black, None));
    }
}
