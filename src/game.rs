//////////////////////////
// game.rs
//////////////////////////

use crate::board::Board;
use crate::check::{has_any_legal_move, is_king_in_check, would_expose_own_king};
use crate::rules::is_legal_move;
use crate::timeline::{PhaseShift, RuleTimeline, TimelineConfig};
use crate::types::{Color, GameEvent, GameOutcome, MoveRejection, Piece, Rule};

/// Orchestrates one playthrough: board, turn state and rule timeline are
/// plain values owned here, and every mutation funnels through
/// `select_or_move`, `acknowledge_rule` or `reset`.
pub struct Game {
    board: Board,
    side_to_move: Color,
    half_move_count: u32,
    game_over: bool,
    outcome: Option<GameOutcome>,
    selected: Option<(usize, usize)>,
    timeline: RuleTimeline,
    check_warning: Option<Color>,
}

impl Game {
    pub fn new() -> Self {
        Game::with_config(TimelineConfig::default())
    }

    pub fn with_config(config: TimelineConfig) -> Self {
        Game::from_position(Board::starting_position(), Color::White, config)
    }

    /// Builds a game from an arbitrary position, for scenario setups.
    pub fn from_position(board: Board, side_to_move: Color, config: TimelineConfig) -> Self {
        Game {
            board,
            side_to_move,
            half_move_count: 0,
            game_over: false,
            outcome: None,
            selected: None,
            timeline: RuleTimeline::new(config),
            check_warning: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn half_move_count(&self) -> u32 {
        self.half_move_count
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    pub fn timeline(&self) -> &RuleTimeline {
        &self.timeline
    }

    pub fn active_rule(&self) -> Option<Rule> {
        self.timeline.active_rule()
    }

    pub fn awaiting_acknowledgement(&self) -> bool {
        self.timeline.awaiting_acknowledgement()
    }

    /// The external confirm signal for a freshly activated rule.
    pub fn acknowledge_rule(&mut self) {
        self.timeline.acknowledge();
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Discards the current playthrough and reinitializes everything to the
    /// starting position.
    pub fn reset(&mut self) {
        *self = Game::with_config(self.timeline.config());
    }

    /// One board-coordinate click. The first click selects a piece of the
    /// side to move, the second either re-selects (own-color target) or
    /// attempts the move. Rejections leave the game unchanged apart from the
    /// selection itself.
    pub fn select_or_move(&mut self, x: usize, y: usize) -> Result<Vec<GameEvent>, MoveRejection> {
        if self.game_over {
            return Err(MoveRejection::GameOver);
        }
        if self.timeline.awaiting_acknowledgement() {
            return Err(MoveRejection::RuleUnacknowledged);
        }
        if !Board::is_within_bounds((x, y)) {
            return Err(MoveRejection::OutOfBounds);
        }

        let from = match self.selected {
            None => return self.select(x, y),
            Some(from) => from,
        };

        // A same-color destination switches the selection instead of moving.
        if let Some(target) = self.board.piece_at(x, y) {
            if target.color == self.side_to_move {
                self.selected = Some((x, y));
                return Ok(Vec::new());
            }
        }

        let piece = match self.board.piece_at(from.0, from.1).copied() {
            Some(p) => p,
            None => {
                self.selected = None;
                return Err(MoveRejection::EmptySquare);
            }
        };

        let rule = self.timeline.active_rule();
        if !is_legal_move(&self.board, &piece, (x, y), rule) {
            self.selected = None;
            return Err(MoveRejection::IllegalMove);
        }
        if would_expose_own_king(&mut self.board, from, (x, y), rule) {
            self.selected = None;
            return Err(MoveRejection::WouldExposeKing);
        }

        Ok(self.commit(piece, from, (x, y)))
    }

    fn select(&mut self, x: usize, y: usize) -> Result<Vec<GameEvent>, MoveRejection> {
        match self.board.piece_at(x, y) {
            None => Err(MoveRejection::EmptySquare),
            Some(piece) if piece.color != self.side_to_move => Err(MoveRejection::NotYourTurn),
            Some(_) => {
                self.selected = Some((x, y));
                Ok(Vec::new())
            }
        }
    }

    fn commit(&mut self, piece: Piece, from: (usize, usize), to: (usize, usize)) -> Vec<GameEvent> {
        let captured = self.board.apply_move(from, to);
        self.selected = None;
        self.side_to_move = self.side_to_move.opposite();
        self.half_move_count += 1;

        let mut events = vec![
            GameEvent::PieceMoved {
                piece,
                from,
                to,
                captured,
            },
            GameEvent::TurnChanged {
                side_to_move: self.side_to_move,
            },
        ];

        match self.timeline.advance() {
            Some(PhaseShift::RuleActivated(rule)) => events.push(GameEvent::RuleActivated {
                rule,
                rounds_remaining: self.timeline.rounds_remaining(),
            }),
            Some(PhaseShift::RuleEnded) => events.push(GameEvent::RuleEnded),
            None => {}
        }

        self.evaluate_terminal(&mut events);
        events
    }

    /// Checkmate / stalemate / check re-evaluation for the side now to move,
    /// under whichever modifier the timeline advance left in force. On a
    /// terminal result the timeline is halted and its pending panel state
    /// force-closed.
    fn evaluate_terminal(&mut self, events: &mut Vec<GameEvent>) {
        let rule = self.timeline.active_rule();
        let in_check = is_king_in_check(&self.board, self.side_to_move, rule);
        let can_move = has_any_legal_move(&mut self.board, self.side_to_move, rule);

        if !can_move {
            let outcome = if in_check {
                GameOutcome::Checkmate(self.side_to_move.opposite())
            } else {
                GameOutcome::Stalemate
            };
            self.game_over = true;
            self.outcome = Some(outcome);
            self.timeline.force_close();
            if self.check_warning.take().is_some() {
                events.push(GameEvent::CheckCleared);
            }
            events.push(GameEvent::GameEnded { outcome });
            return;
        }

        if in_check {
            self.check_warning = Some(self.side_to_move);
            events.push(GameEvent::CheckWarning {
                color: self.side_to_move,
            });
        } else if self.check_warning.take().is_some() {
            events.push(GameEvent::CheckCleared);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
