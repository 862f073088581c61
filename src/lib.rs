//! Terminal 2048: a board engine that slides and merges tiles, a spawner that drops in new ones,
//! and the crossterm plumbing to play it.

mod board;
mod events;
mod game;
mod input;
mod render;
mod spawn;

pub use board::{Board, BoardError, Direction, Tile, SIZE};
pub use events::EventLog;
pub use game::{Game, Observer};
pub use input::{command_for, Command};
pub use render::Renderer;
pub use spawn::{Spawn, SPAWN_RATE};
