mod agent;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use minimax::{CenterColumnHeuristic, Heuristic, MinimaxAgent};
pub use random::RandomAgent;
