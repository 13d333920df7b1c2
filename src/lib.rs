//////////////////////////
// lib.rs
//////////////////////////

pub mod board;
pub mod check;
pub mod game;
pub mod rules;
pub mod server;
pub mod timeline;
pub mod types;

pub use board::Board;
pub use check::{find_king, has_any_legal_move, is_king_in_check, is_square_attacked, would_expose_own_king};
pub use game::Game;
pub use rules::is_legal_move;
pub use server::start_server;
pub use timeline::{RuleTimeline, TimelineConfig};
pub use types::*;
