use flux_chess::{
    has_any_legal_move, is_king_in_check, Board, Color, Game, GameEvent, GameOutcome,
    MoveRejection, Piece, PieceType, TimelineConfig,
};

fn play(game: &mut Game, from: (usize, usize), to: (usize, usize)) -> Vec<GameEvent> {
    game.select_or_move(from.0, from.1)
        .unwrap_or_else(|r| panic!("select {:?} rejected: {}", from, r));
    game.select_or_move(to.0, to.1)
        .unwrap_or_else(|r| panic!("move {:?} -> {:?} rejected: {}", from, to, r))
}

#[test]
fn fools_mate_is_checkmate_for_black() {
    let mut game = Game::new();

    // 1. f3 e5  2. g4 Qh4# -- all before the first rule activates.
    play(&mut game, (5, 1), (5, 2));
    play(&mut game, (4, 6), (4, 4));
    play(&mut game, (6, 1), (6, 3));
    let events = play(&mut game, (3, 7), (7, 3));

    assert!(game.game_over());
    assert_eq!(game.outcome(), Some(GameOutcome::Checkmate(Color::Black)));
    assert!(events.contains(&GameEvent::GameEnded {
        outcome: GameOutcome::Checkmate(Color::Black)
    }));

    // The losing side is in check with no way out.
    let mut board = game.board().clone();
    assert!(is_king_in_check(&board, Color::White, None));
    assert!(!has_any_legal_move(&mut board, Color::White, None));

    // The finished game ignores further input.
    assert_eq!(game.select_or_move(4, 1), Err(MoveRejection::GameOver));
    assert!(!game.awaiting_acknowledgement());
}

#[test]
fn queen_stalemate_ends_in_a_draw() {
    let mut board = Board::empty();
    board.place(Piece::new(PieceType::King, Color::White), 5, 6);
    board.place(Piece::new(PieceType::Queen, Color::White), 6, 4);
    board.place(Piece::new(PieceType::King, Color::Black), 7, 7);
    let mut game = Game::from_position(board, Color::White, TimelineConfig::default());

    let events = play(&mut game, (6, 4), (6, 5));

    assert!(game.game_over());
    assert_eq!(game.outcome(), Some(GameOutcome::Stalemate));
    assert!(events.contains(&GameEvent::GameEnded {
        outcome: GameOutcome::Stalemate
    }));

    let mut board = game.board().clone();
    assert!(!is_king_in_check(&board, Color::Black, None));
    assert!(!has_any_legal_move(&mut board, Color::Black, None));
}

#[test]
fn restart_after_a_finished_game_starts_over() {
    let mut game = Game::new();
    play(&mut game, (5, 1), (5, 2));
    play(&mut game, (4, 6), (4, 4));
    play(&mut game, (6, 1), (6, 3));
    play(&mut game, (3, 7), (7, 3));
    assert!(game.game_over());

    game.reset();
    assert!(!game.game_over());
    assert_eq!(game.outcome(), None);
    assert_eq!(game.half_move_count(), 0);
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.board(), &Board::starting_position());
}
