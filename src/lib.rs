//! # Connect Four Solver
//!
//! Picks moves for an automated Connect Four player using minimax search with
//! alpha-beta pruning, static terminal evaluation and a transposition cache
//! keyed by the full board.
//!
//! ## Modules
//!
//! - [`game`]: Board model: grid, ordered move generation, apply/undo, win/draw detection
//! - [`ai`]: Evaluator, transposition cache, minimax search engine and agents
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types
//!
//! ## Example
//!
//! ```
//! use connect_four_solver::ai::{MinimaxAgent, Score};
//! use connect_four_solver::game::{GameState, Player};
//!
//! // Red has three on the bottom row and is to move.
//! let state = GameState::from_moves("112233").unwrap();
//! let mut agent = MinimaxAgent::new(Player::Red);
//! let outcome = agent.pick_best_move(state.board()).unwrap();
//! assert_eq!(outcome.best_move.col, 3);
//! assert_eq!(outcome.score, Score::Win);
//! ```

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
