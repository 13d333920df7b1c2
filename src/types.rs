//////////////////////////
// types.rs
//////////////////////////

use serde::{Deserialize, Serialize};
use std::fmt;

// ----- Basic Chess Types -----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction this side's pawns advance in. Coordinates increase
    /// "forward" for White.
    pub fn forward(&self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn home_pawn_rank(&self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    /// The square the board last placed this piece on. Must always agree
    /// with the board's own record of it.
    pub pos: (usize, usize),
    pub has_moved: bool,
}

impl Piece {
    /// Position is assigned when the piece is placed on a board.
    pub fn new(piece_type: PieceType, color: Color) -> Self {
        Piece {
            piece_type,
            color,
            pos: (0, 0),
            has_moved: false,
        }
    }
}

// ----- Shifting Rules -----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    PawnForwardCapture,
    AllPiecesMoveAsPawn,
    KnightsSlide,
    BishopPhase,
}

impl Rule {
    /// Activation order, consumed once before the random draws begin.
    pub const ORDERED: [Rule; 4] = [
        Rule::PawnForwardCapture,
        Rule::AllPiecesMoveAsPawn,
        Rule::KnightsSlide,
        Rule::BishopPhase,
    ];

    /// Panel text shown to the players when the rule activates.
    pub fn description(&self) -> &'static str {
        match self {
            Rule::PawnForwardCapture => "Pawns can attack the piece directly in front of them.",
            Rule::AllPiecesMoveAsPawn => "All pieces except the king move like pawns.",
            Rule::KnightsSlide => {
                "Knights forgot how to jump. They move 2 squares in a straight line."
            }
            Rule::BishopPhase => "Bishops pass through pieces.",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::PawnForwardCapture => write!(f, "Pawns capture forward"),
            Rule::AllPiecesMoveAsPawn => write!(f, "Everything moves like a pawn"),
            Rule::KnightsSlide => write!(f, "Knights slide"),
            Rule::BishopPhase => write!(f, "Bishops phase"),
        }
    }
}

// ----- Outcomes and rejections -----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Checkmate(Color),
    Stalemate,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate(winner) => write!(f, "Checkmate! {} wins!", winner),
            GameOutcome::Stalemate => write!(f, "Stalemate! Game is a draw!"),
        }
    }
}

/// Why a `select_or_move` input was ignored. Rejections never change game
/// state; the variant is purely a diagnostic for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    GameOver,
    RuleUnacknowledged,
    OutOfBounds,
    EmptySquare,
    NotYourTurn,
    IllegalMove,
    WouldExposeKing,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRejection::GameOver => write!(f, "The game is over"),
            MoveRejection::RuleUnacknowledged => write!(f, "Confirm the new rule first"),
            MoveRejection::OutOfBounds => write!(f, "Square is off the board"),
            MoveRejection::EmptySquare => write!(f, "No piece on that square"),
            MoveRejection::NotYourTurn => write!(f, "That's not your piece"),
            MoveRejection::IllegalMove => write!(f, "Move is not legal under the current rules"),
            MoveRejection::WouldExposeKing => {
                write!(f, "Move would put or leave your king in check")
            }
        }
    }
}

// ----- Outbound events -----

/// Everything the rendering/UI/audio collaborators need to hear about one
/// committed half-move, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PieceMoved {
        piece: Piece,
        from: (usize, usize),
        to: (usize, usize),
        captured: Option<Piece>,
    },
    TurnChanged {
        side_to_move: Color,
    },
    RuleActivated {
        rule: Rule,
        rounds_remaining: u32,
    },
    RuleEnded,
    CheckWarning {
        color: Color,
    },
    CheckCleared,
    GameEnded {
        outcome: GameOutcome,
    },
}
