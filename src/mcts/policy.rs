//! MCTS policies for selection, simulation, and opponent modeling.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to explore (UCB1, PUCT)
//! - `SimulationPolicy`: How to run rollouts (random, heuristic)
//! - `OpponentPolicy`: How to model opponent behavior
//!
//! Selection receives the candidate edge indices legal in the world being
//! played this iteration. With hidden information the same node is reached
//! through differently sampled worlds, so a node's stored edges are the
//! union over worlds and only a subset is available at a time.

use crate::core::{GameRng, PlayerId, PlayerPair};
use crate::game::{Game, GameResult};

use super::config::MCTSConfig;
use super::node::MCTSNode;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy<A>: Send + Sync {
    /// Select the best edge among `candidates`.
    ///
    /// Returns the index of the edge to follow.
    fn select(
        &self,
        node: &MCTSNode<A>,
        candidates: &[usize],
        player: PlayerId,
        config: &MCTSConfig,
    ) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Balances exploitation (high reward) with exploration (low visits).
/// Formula: Q(a) + c * sqrt(ln(N) / n(a))
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl<A> SelectionPolicy<A> for UCB1 {
    fn select(
        &self,
        node: &MCTSNode<A>,
        candidates: &[usize],
        player: PlayerId,
        config: &MCTSConfig,
    ) -> usize {
        if candidates.is_empty() {
            return 0;
        }

        let ln_parent = (node.visits.max(1) as f64).ln();

        candidates
            .iter()
            .map(|&i| {
                let edge = &node.edges[i];
                let exploitation = edge.mean_reward(player);
                let exploration = if edge.visits == 0 {
                    f64::INFINITY
                } else {
                    config.exploration_constant * (ln_parent / edge.visits as f64).sqrt()
                };
                (i, exploitation + exploration)
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

/// PUCT selection policy (Predictor + UCB for Trees).
///
/// Uses prior probabilities attached to the edges.
/// Formula: Q(a) + c * P(a) * sqrt(N) / (1 + n(a))
#[derive(Clone, Debug, Default)]
pub struct PUCT;

impl<A> SelectionPolicy<A> for PUCT {
    fn select(
        &self,
        node: &MCTSNode<A>,
        candidates: &[usize],
        player: PlayerId,
        config: &MCTSConfig,
    ) -> usize {
        if candidates.is_empty() {
            return 0;
        }

        let sqrt_parent = (node.visits.max(1) as f64).sqrt();

        candidates
            .iter()
            .map(|&i| {
                let edge = &node.edges[i];
                let q = edge.mean_reward(player);
                let u = config.exploration_constant * edge.prior as f64 * sqrt_parent
                    / (1.0 + edge.visits as f64);
                (i, q + u)
            })
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy<G: Game>: Send + Sync {
    /// Run a simulation from the given state, returning rewards per player.
    ///
    /// The state is modified during simulation.
    fn simulate(&self, state: &mut G, rng: &mut GameRng, max_depth: u32) -> PlayerPair<f64>;
}

/// Random simulation policy.
///
/// Plays random legal actions until terminal or depth limit.
#[derive(Clone, Debug, Default)]
pub struct RandomSimulation;

impl<G: Game> SimulationPolicy<G> for RandomSimulation {
    fn simulate(&self, state: &mut G, rng: &mut GameRng, max_depth: u32) -> PlayerPair<f64> {
        let mut depth = 0;

        loop {
            // Check for terminal
            if let Some(result) = state.result() {
                return result_to_rewards(&result);
            }

            // Check depth limit
            if max_depth > 0 && depth >= max_depth {
                return utility_eval(state);
            }

            let actions = state.possible_actions();
            if actions.is_empty() {
                // No legal actions - draw
                return PlayerPair::with_value(0.5);
            }

            // Random action, legal by enumeration; a refusal is a dead end
            let idx = rng.gen_range_usize(0..actions.len());
            if state.apply(actions[idx]).is_err() {
                return PlayerPair::with_value(0.5);
            }

            depth += 1;
        }
    }
}

// =============================================================================
// Opponent Policy
// =============================================================================

/// Policy for sampling opponent actions during tree traversal.
pub trait OpponentPolicy<G: Game>: Send + Sync {
    /// Choose an action for the opponent to move.
    ///
    /// Returns `None` if no legal actions exist.
    fn choose_action(&self, state: &G, rng: &mut GameRng) -> Option<G::Action>;
}

/// Uniform random opponent policy.
///
/// Selects uniformly from legal actions.
#[derive(Clone, Debug, Default)]
pub struct UniformOpponent;

impl<G: Game> OpponentPolicy<G> for UniformOpponent {
    fn choose_action(&self, state: &G, rng: &mut GameRng) -> Option<G::Action> {
        let actions = state.possible_actions();
        if actions.is_empty() {
            return None;
        }
        let idx = rng.gen_range_usize(0..actions.len());
        Some(actions[idx])
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Convert a game result to per-player rewards.
pub fn result_to_rewards(result: &GameResult) -> PlayerPair<f64> {
    PlayerPair::new(|player| match result {
        GameResult::Winner(winner) => {
            if *winner == player {
                1.0
            } else {
                0.0
            }
        }
        GameResult::Draw => 0.5,
    })
}

/// Heuristic evaluation of a running game.
///
/// Returns each player's share of the combined utility as a reward
/// estimate, so the pair sums to 1 like terminal rewards do.
pub fn utility_eval<G: Game>(state: &G) -> PlayerPair<f64> {
    let raw = PlayerPair::new(|player| state.utility(player).max(0.0));

    let total: f64 = raw.iter().map(|(_, u)| *u).sum();
    if total <= 0.0 {
        return PlayerPair::with_value(0.5);
    }

    PlayerPair::new(|player| raw[player] / total)
}
