//! # schnapsen
//!
//! A complete engine for the card game Schnapsen: deals, trick rules,
//! marriages, talon handling, bummerl scoring across rounds, and an MCTS
//! player that searches under hidden information.
//!
//! ## Design Principles
//!
//! 1. **Rules Are the API**: Every move goes through the board, which
//!    either applies it or reports the specific rule it broke. Callers
//!    never mutate hands or scores directly.
//!
//! 2. **Deterministic Matches**: One seed fixes every deal in a match.
//!    Forks advance a counter so simulation branches draw independent
//!    but reproducible randomness.
//!
//! 3. **One Observer Per View**: A player's view of the match contains
//!    exactly the cards that player has seen. Search runs against views,
//!    never against the hidden full state.
//!
//! ## Architecture
//!
//! - **Determinized MCTS**: Nodes expand only on the searching player's
//!   turns; opponent actions are sampled. Every iteration plays in a
//!   freshly sampled world consistent with the searcher's view.
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` keeps
//!   forking cheap inside search.
//!
//! ## Modules
//!
//! - `core`: Player identity, per-player storage, deterministic RNG
//! - `cards`: The 20-card deck, suits, ranks, point values
//! - `action`: Moves and the recorded action history
//! - `error`: Rule violations and configuration errors
//! - `config`: Match parameters and their string form
//! - `board`: Deals, trick resolution, marriages, talon, scoring
//! - `game`: The `Game` trait connecting states to search
//! - `schnapsen`: The full match type implementing `Game`
//! - `mcts`: Monte Carlo Tree Search for AI

pub mod core;
pub mod cards;
pub mod action;
pub mod error;
pub mod config;
pub mod board;
pub mod game;
pub mod schnapsen;
pub mod mcts;

// Re-export commonly used types
pub use crate::core::{GameRng, GameRngState, PlayerId, PlayerPair};

pub use crate::cards::{Card, Rank, Suit};

pub use crate::action::{Action, ActionRecord};

pub use crate::error::{ConfigError, RuleError};

pub use crate::config::{MatchConfig, DEFAULT_BUMMERL_TARGET};

pub use crate::board::{
    Board, Trick, BUMMERL_COUNTDOWN, PLAIN_MARRIAGE_VALUE, TRUMP_MARRIAGE_VALUE, WINNING_SCORE,
};

pub use crate::game::{Game, GameResult};

pub use crate::schnapsen::Schnapsen;

pub use crate::mcts::{
    MCTSConfig, MCTSSearch, MCTSTree, MCTSNode, NodeId, Edge,
    SearchStats, TreeStats,
    SelectionPolicy, SimulationPolicy, OpponentPolicy,
    UCB1, PUCT, RandomSimulation, UniformOpponent,
};
