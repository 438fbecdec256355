//! Monte Carlo Tree Search for Schnapsen.
//!
//! ## Overview
//!
//! This module implements single-observer MCTS for games with hidden
//! information. Key features:
//!
//! - **Determinized search**: Every iteration runs in a fresh world
//!   sampled to be consistent with the searching player's view
//! - **Opponent Modeling**: Opponent actions sampled from configurable
//!   policies instead of being searched
//! - **Configurable Policies**: Selection (UCB1/PUCT), simulation, opponent
//! - **Serializable**: Config and stats can be saved/loaded
//!
//! ## Usage
//!
//! ```rust
//! use schnapsen::mcts::{MCTSConfig, MCTSSearch};
//! use schnapsen::{Game, Schnapsen};
//!
//! let mut game = Schnapsen::from_seed(42);
//! let player = game.current_player();
//!
//! let config = MCTSConfig::default();
//! let mut search = MCTSSearch::new(config);
//!
//! // Run 100 iterations of MCTS
//! // Note: Takes &mut Schnapsen because forking advances the match RNG
//! if let Some(action) = search.search(&mut game, player, 100) {
//!     println!("Best action: {:?}", action);
//! }
//!
//! // Get the visit distribution over the legal actions
//! let probs = search.action_probabilities();
//! for (action, prob) in probs {
//!     println!("{:?}: {:.2}%", action, prob * 100.0);
//! }
//! ```
//!
//! ## Custom Policies
//!
//! You can customize the search behavior with different policies:
//!
//! ```rust,ignore
//! use schnapsen::mcts::{MCTSSearch, MCTSConfig, PUCT};
//!
//! let search = MCTSSearch::new(config)
//!     .with_selection(PUCT);  // Use PUCT instead of UCB1
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{Edge, MCTSNode, NodeId};
pub use policy::{
    OpponentPolicy, RandomSimulation, SelectionPolicy, SimulationPolicy,
    UCB1, PUCT, UniformOpponent,
};
pub use search::MCTSSearch;
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
