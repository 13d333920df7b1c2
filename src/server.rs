//////////////////////////
// server.rs
//////////////////////////

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warp::ws::{Message, WebSocket};
use warp::Filter;

use crate::game::Game;
use crate::types::GameEvent;

/// Inbound commands, one JSON object per WebSocket text frame.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum ClientMessage {
    CreateGame,
    JoinGame { game_id: String },
    Select { x: usize, y: usize },
    AcknowledgeRule,
    Restart,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum ServerMessage {
    GameCreated { game_id: String },
    GameJoined { color: String },
    Events { events: Vec<GameEvent> },
    Rejected { reason: String },
    Error { message: String },
}

#[derive(Clone)]
pub struct GameSession {
    pub id: String,
    pub white_player: Option<String>,
    pub black_player: Option<String>,
    pub game: Arc<Mutex<Game>>,
}

pub type Games = Arc<Mutex<HashMap<String, GameSession>>>;

async fn handle_connection(ws: WebSocket, games: Games) {
    let (mut ws_tx, mut ws_rx) = ws.split();
    let client_id = Uuid::new_v4().to_string();
    println!("New client connected: {}", client_id);

    while let Some(result) = ws_rx.next().await {
        let msg = match result {
            Ok(m) => m,
            Err(e) => {
                eprintln!("WebSocket error: {}", e);
                break;
            }
        };

        let text = match msg.to_str() {
            Ok(s) => s,
            Err(_) => continue,
        };

        let client_msg: ClientMessage = match serde_json::from_str(text) {
            Ok(c) => c,
            Err(_) => continue,
        };

        // All locking happens inside dispatch, before the await below.
        let response = dispatch(&client_id, client_msg, &games);

        match serde_json::to_string(&response) {
            Ok(json) => {
                let _ = ws_tx.send(Message::text(json)).await;
            }
            Err(e) => eprintln!("Serialize error: {}", e),
        }
    }

    println!("Client {} disconnected", client_id);
    cleanup_player(&client_id, &games);
}

fn dispatch(client_id: &str, msg: ClientMessage, games: &Games) -> ServerMessage {
    match msg {
        ClientMessage::CreateGame => {
            let game_id = Uuid::new_v4().to_string();
            let session = GameSession {
                id: game_id.clone(),
                white_player: Some(client_id.to_string()),
                black_player: None,
                game: Arc::new(Mutex::new(Game::new())),
            };
            println!("Game {} created by {}", session.id, client_id);
            games.lock().unwrap().insert(game_id.clone(), session);
            ServerMessage::GameCreated { game_id }
        }
        ClientMessage::JoinGame { game_id } => {
            let mut map = games.lock().unwrap();
            match map.get_mut(&game_id) {
                Some(session) if session.black_player.is_none() => {
                    session.black_player = Some(client_id.to_string());
                    ServerMessage::GameJoined {
                        color: "black".to_string(),
                    }
                }
                Some(_) => ServerMessage::Error {
                    message: "Game full".to_string(),
                },
                None => ServerMessage::Error {
                    message: "No such game".to_string(),
                },
            }
        }
        ClientMessage::Select { x, y } => with_player_game(client_id, games, |game| {
            match game.select_or_move(x, y) {
                Ok(events) => ServerMessage::Events { events },
                Err(rejection) => ServerMessage::Rejected {
                    reason: rejection.to_string(),
                },
            }
        }),
        ClientMessage::AcknowledgeRule => with_player_game(client_id, games, |game| {
            game.acknowledge_rule();
            ServerMessage::Events { events: Vec::new() }
        }),
        ClientMessage::Restart => with_player_game(client_id, games, |game| {
            game.reset();
            ServerMessage::Events { events: Vec::new() }
        }),
    }
}

fn with_player_game(
    client_id: &str,
    games: &Games,
    f: impl FnOnce(&mut Game) -> ServerMessage,
) -> ServerMessage {
    let map = games.lock().unwrap();
    for session in map.values() {
        if session.white_player.as_deref() == Some(client_id)
            || session.black_player.as_deref() == Some(client_id)
        {
            let mut game = session.game.lock().unwrap();
            return f(&mut game);
        }
    }
    ServerMessage::Error {
        message: "Not in a game".to_string(),
    }
}

fn cleanup_player(client_id: &str, games: &Games) {
    let mut map = games.lock().unwrap();
    map.retain(|_, session| {
        session.white_player.as_deref() != Some(client_id)
            && session.black_player.as_deref() != Some(client_id)
    });
}

pub async fn start_server() {
    let games: Games = Arc::new(Mutex::new(HashMap::new()));

    let games = warp::any().map(move || games.clone());

    let routes = warp::path("chess")
        .and(warp::ws())
        .and(games)
        .map(|ws: warp::ws::Ws, games| {
            ws.on_upgrade(move |socket| handle_connection(socket, games))
        });

    println!("Server started on ws://127.0.0.1:8000/chess");

    warp::serve(routes).run(([127, 0, 0, 1], 8000)).await;
}
