use crate::error::SearchError;
use crate::game::GameState;

/// Anything that can choose a column for the side to move.
pub trait Agent {
    /// Select a legal column for `state.current_player()`.
    ///
    /// Fails with [`SearchError::NoLegalMove`] once the game is over.
    fn select_action(&mut self, state: &GameState) -> Result<usize, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
