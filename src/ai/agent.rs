use crate::game::GameState;

/// Universal interface for move-selecting opponents.
pub trait Agent {
    /// Select a column given the current set state. Only called on
    /// non-terminal states with at least one legal column.
    fn select_action(&mut self, state: &GameState) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
