//////////////////////////
// main.rs
//////////////////////////
//
// flux_chess - an 8x8 chess variant where the movement rules drift while
// you play. Hot-seat games in the terminal, or a WebSocket server for
// remote front ends.

use std::io::{self, Write};

use colored::*;
use tokio::task::JoinHandle;

use flux_chess::game::Game;
use flux_chess::server::start_server;
use flux_chess::types::{GameEvent, GameOutcome};

#[tokio::main]
async fn main() {
    println!("Welcome to {}!", "flux_chess".bright_magenta().bold());

    ctrlc::set_handler(|| {
        println!("\n[Ctrl+C] Shutting down...");
        std::process::exit(0);
    })
    .expect("Error setting Ctrl-C handler");

    let mut server_task: Option<JoinHandle<()>> = None;

    loop {
        println!("\nCommands:");
        println!("  play          - Start a local hot-seat game");
        if server_task.is_some() {
            println!("  server stop   - Stop the WebSocket server");
        } else {
            println!("  server start  - Start WebSocket server on ws://127.0.0.1:8000/chess");
        }
        println!("  quit          - Exit");
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            println!("Read error!");
            continue;
        }
        let cmd = line.trim();

        match cmd {
            "quit" => {
                if let Some(task) = server_task.take() {
                    println!("Stopping server first...");
                    task.abort();
                }
                println!("Goodbye!");
                break;
            }
            "play" => play_local_game(),
            "server start" if server_task.is_none() => {
                println!("Starting WebSocket server...");
                server_task = Some(tokio::spawn(start_server()));
            }
            "server stop" if server_task.is_some() => {
                if let Some(task) = server_task.take() {
                    task.abort();
                }
                println!("Server stopped.");
            }
            "" => continue,
            _ => println!("Unknown command: {}", cmd),
        }
    }
}

fn play_local_game() {
    let mut game = Game::new();
    println!("Local hot-seat game. Enter moves like 'e2e4', or 'quit' to leave.");

    loop {
        println!("{}", game.board());
        if let Some(rule) = game.active_rule() {
            println!(
                "{} {}  |  Rounds left: {}",
                "Active rule:".bright_magenta(),
                rule,
                game.timeline().rounds_remaining()
            );
        }

        if game.game_over() {
            if let Some(outcome) = game.outcome() {
                let banner = match outcome {
                    GameOutcome::Checkmate(_) => "CHECKMATE".bright_red().bold(),
                    GameOutcome::Stalemate => "STALEMATE".bright_yellow().bold(),
                };
                println!("{}", banner);
                println!("{}", outcome);
            }
            println!("Type 'restart' for a rematch, anything else to leave.");
            let mut line = String::new();
            let _ = io::stdin().read_line(&mut line);
            if line.trim() == "restart" {
                game.reset();
                continue;
            }
            break;
        }

        if game.awaiting_acknowledgement() {
            if let Some(rule) = game.active_rule() {
                println!("{}", "NEW RULE".bright_magenta().bold());
                println!("{}", rule.description().bright_magenta());
            }
            println!("Press Enter to continue...");
            let mut line = String::new();
            let _ = io::stdin().read_line(&mut line);
            game.acknowledge_rule();
            continue;
        }

        print!("{} to move> ", game.side_to_move());
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() {
            println!("Read error!");
            break;
        }
        let cmd = line.trim();
        match cmd {
            "quit" => break,
            "restart" => {
                game.reset();
                continue;
            }
            "" => continue,
            _ => {}
        }

        let ((fx, fy), (tx, ty)) = match parse_move(cmd) {
            Some(squares) => squares,
            None => {
                println!("Moves look like 'e2e4'.");
                continue;
            }
        };

        // Each typed move is two clicks at the engine boundary.
        game.clear_selection();
        if let Err(rejection) = game.select_or_move(fx, fy) {
            println!("{}", rejection.to_string().yellow());
            continue;
        }
        match game.select_or_move(tx, ty) {
            Err(rejection) => println!("{}", rejection.to_string().yellow()),
            Ok(events) => {
                if game.selected().is_some() {
                    // The target held one of the mover's own pieces.
                    game.clear_selection();
                    println!("{}", "That square holds your own piece.".yellow());
                } else {
                    print_events(&events);
                }
            }
        }
    }
}

fn print_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::PieceMoved {
                piece, to, captured, ..
            } => {
                if let Some(captured) = captured {
                    println!(
                        "{:?} takes {:?} on {}",
                        piece.piece_type,
                        captured.piece_type,
                        square_name(*to)
                    );
                }
            }
            GameEvent::RuleActivated {
                rule,
                rounds_remaining,
            } => println!(
                "{} {} ({} rounds)",
                "Rule activated:".bright_magenta(),
                rule,
                rounds_remaining
            ),
            GameEvent::RuleEnded => {
                println!("{}", "The active rule has ended.".bright_magenta())
            }
            GameEvent::CheckWarning { color } => println!(
                "{}",
                format!("CHECK! The {} king is under attack", color).bright_red()
            ),
            GameEvent::TurnChanged { .. }
            | GameEvent::CheckCleared
            | GameEvent::GameEnded { .. } => {}
        }
    }
}

fn square_name(pos: (usize, usize)) -> String {
    format!("{}{}", (b'a' + pos.0 as u8) as char, pos.1 + 1)
}

fn parse_square(file: char, rank: char) -> Option<(usize, usize)> {
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Some(((file as u8 - b'a') as usize, (rank as u8 - b'1') as usize))
}

fn parse_move(input: &str) -> Option<((usize, usize), (usize, usize))> {
    let chars: Vec<char> = input.chars().collect();
    if chars.len() != 4 {
        return None;
    }
    let from = parse_square(chars[0], chars[1])?;
    let to = parse_square(chars[2], chars[3])?;
    Some((from, to))
}
