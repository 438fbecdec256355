//! Game trait for turn-based play.
//!
//! A host (agent driver, search, self-play loop) programs against this
//! seam rather than a concrete game:
//! - What actions are legal for the player to move
//! - How an action modifies state
//! - When the game is over, and who won

use crate::core::PlayerId;
use crate::error::RuleError;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Draw => false,
        }
    }
}

/// Turn-based two-player game.
///
/// Games implement this trait to be driven by agents and searched by MCTS.
///
/// ## Implementation Notes
///
/// - `possible_actions`: deterministic order; empty exactly when over
/// - `apply`: rejects illegal moves with a `RuleError`, leaving state valid
/// - `fork`: decorrelates internal randomness so search branches diverge
/// - `determinize`: perfect-information games keep the default no-op
pub trait Game {
    /// Move type of the game.
    type Action: Copy + Eq + std::fmt::Debug;

    /// The player to move.
    fn current_player(&self) -> PlayerId;

    /// Every legal action for the player to move, in presentation order.
    ///
    /// Returns empty if the game is over.
    fn possible_actions(&self) -> Vec<Self::Action>;

    /// Apply an action for the player to move.
    fn apply(&mut self, action: Self::Action) -> Result<(), RuleError>;

    /// The final result, or `None` while the game is running.
    fn result(&self) -> Option<GameResult>;

    /// Check if the game is over.
    fn is_over(&self) -> bool {
        self.result().is_some()
    }

    /// Heuristic standing of `player`, higher is better.
    ///
    /// Used when search is cut off before a terminal state.
    fn utility(&self, player: PlayerId) -> f64;

    /// Clone this game for a search branch.
    ///
    /// Takes `&mut self` because internal RNG forking advances a counter
    /// on the original, so repeated forks give independent branches.
    fn fork(&mut self) -> Self;

    /// Resample everything `viewer` cannot see into a random consistent
    /// world. Perfect-information games have nothing to hide.
    fn determinize(&mut self, viewer: PlayerId) {
        let _ = viewer;
    }

    /// The move an agent makes when it cannot or will not deliberate:
    /// the first possible action.
    fn fallback_action(&self) -> Option<Self::Action> {
        self.possible_actions().into_iter().next()
    }
}
