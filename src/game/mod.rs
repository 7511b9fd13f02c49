//! Connect Four board model: grid representation, move generation with
//! ordering, in-place apply/undo, and win/draw detection.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Move, MoveList, COLS, ROWS};
pub use player::Player;
pub use state::{GameOutcome, GameState};

pub use crate::error::MoveError;
