//! Core game logic: board representation, win detection, the per-set state
//! machine with immutable transitions, and the best-of-N match controller.

mod board;
mod match_state;
mod player;
mod state;

pub use board::{Board, Cell, COLS, CONNECT, ROWS};
pub use match_state::{MatchEvent, MatchPhase, MatchState, SetOutcome};
pub use player::Player;
pub use state::{GameOutcome, GameState, MoveError};
