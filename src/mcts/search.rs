//! Core MCTS search algorithm.
//!
//! Implements single-observer MCTS for games with hidden information.
//! Nodes are only expanded on the searching player's turns; opponent
//! actions are sampled from a configurable policy. Every iteration plays
//! in a freshly determinized world, so a node's stored edges are the
//! union of actions seen across worlds and each descent is restricted to
//! the actions legal in the world at hand.

use std::time::Instant;

use crate::core::{GameRng, PlayerId, PlayerPair};
use crate::game::Game;

use super::config::MCTSConfig;
use super::node::{Edge, MCTSNode, NodeId};
use super::policy::{
    result_to_rewards, utility_eval, OpponentPolicy, RandomSimulation, SelectionPolicy,
    SimulationPolicy, UniformOpponent, UCB1,
};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Main MCTS search context.
///
/// Generic over the game type. Owns the search tree and configuration,
/// and provides methods to run searches.
pub struct MCTSSearch<G: Game> {
    /// Search configuration.
    config: MCTSConfig,

    /// The search tree.
    tree: MCTSTree<G::Action>,

    /// RNG for sampling and simulations.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy<G::Action>>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<G>>,

    /// Opponent modeling policy.
    opponent: Box<dyn OpponentPolicy<G>>,

    /// Search statistics.
    stats: SearchStats,
}

impl<G: Game> MCTSSearch<G> {
    /// Create a new MCTS search context.
    pub fn new(config: MCTSConfig) -> Self {
        let rng = GameRng::new(config.seed);

        Self {
            tree: MCTSTree::with_capacity(PlayerId::new(0), config.max_nodes),
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomSimulation),
            opponent: Box::new(UniformOpponent),
            stats: SearchStats::default(),
            config,
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy<G::Action> + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<G> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Set a custom opponent policy.
    pub fn with_opponent<O: OpponentPolicy<G> + 'static>(mut self, opponent: O) -> Self {
        self.opponent = Box::new(opponent);
        self
    }

    /// Run MCTS search for a given number of iterations.
    ///
    /// Returns the best action for the searching player.
    ///
    /// Takes `&mut G` because every iteration forks the game, which
    /// advances its fork counter so branches draw independent randomness.
    pub fn search(&mut self, game: &mut G, player: PlayerId, iterations: u32) -> Option<G::Action> {
        let start = Instant::now();
        self.stats.reset();

        // Initialize tree with root
        self.tree.reset(game.current_player());

        // Expand root node
        let root = self.tree.root();
        self.expand_node(root, game);

        // Check for terminal root
        if self.tree.get(root).is_terminal {
            return None;
        }

        // Check for single action (no choice)
        if self.tree.get(root).edges.len() == 1 {
            return Some(self.tree.get(root).edges[0].action);
        }

        // Run iterations, each in a freshly sampled world
        for _ in 0..iterations {
            let mut world = game.fork();
            world.determinize(player);
            self.iteration(&mut world, player);
            self.stats.iterations += 1;

            // Check node limit
            if self.tree.len() >= self.config.max_nodes {
                break;
            }
        }

        // Record time
        self.stats.time_us = start.elapsed().as_micros() as u64;

        // Select best action
        self.best_action()
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, state: &mut G, searching_player: PlayerId) {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut current = self.tree.root();

        loop {
            // Terminal node
            if self.tree.get(current).is_terminal {
                if let Some(rewards) = self.tree.get(current).terminal_reward.clone() {
                    self.backpropagate(&path, rewards);
                }
                return;
            }

            // Depth limit
            if self.config.max_depth > 0
                && u32::from(self.tree.get(current).depth) >= self.config.max_depth
            {
                let rewards = utility_eval(state);
                self.backpropagate(&path, rewards);
                return;
            }

            // If not our turn, sample an opponent action
            if self.tree.get(current).to_move != searching_player {
                if let Some(action) = self.sample_opponent_action(state) {
                    if state.apply(action).is_err() {
                        self.backpropagate(&path, PlayerPair::with_value(0.5));
                        return;
                    }

                    // Find or create edge
                    let edge_idx = self.find_or_create_edge(current, action);
                    path.push((current, edge_idx));

                    // Ensure child exists
                    current = self.ensure_child(current, edge_idx, state);
                    continue;
                } else {
                    // No legal moves - this is effectively terminal
                    self.backpropagate(&path, PlayerPair::with_value(0.5));
                    return;
                }
            }

            // Our turn. Stored edges are the union over sampled worlds;
            // only the actions legal in this world are on the table.
            let legal = state.possible_actions();
            if legal.is_empty() {
                self.backpropagate(&path, PlayerPair::with_value(0.5));
                return;
            }
            let candidates: Vec<usize> = legal
                .into_iter()
                .map(|action| self.find_or_create_edge(current, action))
                .collect();

            // If untried options exist, expand one
            let untried: Vec<usize> = candidates
                .iter()
                .copied()
                .filter(|&i| !self.tree.get(current).edges[i].is_expanded())
                .collect();
            if !untried.is_empty() {
                let edge_idx = if untried.len() == 1 {
                    untried[0]
                } else {
                    untried[self.rng.gen_range_usize(0..untried.len())]
                };
                let action = self.tree.get(current).edges[edge_idx].action;
                path.push((current, edge_idx));

                if state.apply(action).is_err() {
                    self.backpropagate(&path, PlayerPair::with_value(0.5));
                    return;
                }

                // Expand child, then simulate from this state
                self.expand_child(current, edge_idx, state);

                let rewards = self.simulate(state);
                self.stats.simulations += 1;
                self.backpropagate(&path, rewards);
                return;
            }

            // All options tried - select best and descend
            let edge_idx = self.selection.select(
                self.tree.get(current),
                &candidates,
                searching_player,
                &self.config,
            );
            let action = self.tree.get(current).edges[edge_idx].action;
            path.push((current, edge_idx));

            if state.apply(action).is_err() {
                self.backpropagate(&path, PlayerPair::with_value(0.5));
                return;
            }

            let child = self.tree.get(current).edges[edge_idx].child;
            if child.is_none() {
                // Custom policies may pick outside the candidates; recover
                self.expand_child(current, edge_idx, state);
                let rewards = self.simulate(state);
                self.stats.simulations += 1;
                self.backpropagate(&path, rewards);
                return;
            }

            current = child;
        }
    }

    /// Expand a node with all legal actions.
    fn expand_node(&mut self, node_id: NodeId, state: &G) {
        // Check for terminal
        if let Some(result) = state.result() {
            let node = self.tree.get_mut(node_id);
            node.is_terminal = true;
            node.terminal_reward = Some(result_to_rewards(&result));
            return;
        }

        // Add an edge per legal action
        let actions = state.possible_actions();
        let node = self.tree.get_mut(node_id);
        for action in actions {
            node.edges.push(Edge::new(action));
        }

        self.stats.nodes_expanded += 1;
    }

    /// Expand a child node for the given edge.
    fn expand_child(&mut self, parent_id: NodeId, edge_idx: usize, state: &G) -> NodeId {
        let depth = self.tree.get(parent_id).depth + 1;
        let to_move = state.current_player();

        // Track max depth
        if depth > self.stats.max_depth {
            self.stats.max_depth = depth;
        }

        let child = MCTSNode::new(parent_id, edge_idx as u16, to_move, depth);
        let child_id = self.tree.alloc(child);

        self.tree.get_mut(parent_id).edges[edge_idx].child = child_id;

        // Expand the new node
        self.expand_node(child_id, state);

        child_id
    }

    /// Ensure a child exists for the edge, creating if needed.
    fn ensure_child(&mut self, parent_id: NodeId, edge_idx: usize, state: &G) -> NodeId {
        let child = self.tree.get(parent_id).edges[edge_idx].child;
        if !child.is_none() {
            return child;
        }
        self.expand_child(parent_id, edge_idx, state)
    }

    /// Find or create an edge for an action.
    fn find_or_create_edge(&mut self, node_id: NodeId, action: G::Action) -> usize {
        // First, search for an existing edge
        let node = self.tree.get(node_id);
        for (i, edge) in node.edges.iter().enumerate() {
            if edge.action == action {
                return i;
            }
        }

        // Edge doesn't exist - create it
        let node = self.tree.get_mut(node_id);
        node.edges.push(Edge::new(action));
        node.edges.len() - 1
    }

    /// Sample an opponent action.
    fn sample_opponent_action(&mut self, state: &G) -> Option<G::Action> {
        self.opponent.choose_action(state, &mut self.rng)
    }

    /// Run a simulation from the current state.
    fn simulate(&mut self, state: &mut G) -> PlayerPair<f64> {
        let mut sim_rng = self.rng.fork();
        self.simulation.simulate(state, &mut sim_rng, self.config.max_depth)
    }

    /// Backpropagate rewards through the path.
    fn backpropagate(&mut self, path: &[(NodeId, usize)], rewards: PlayerPair<f64>) {
        for &(node_id, edge_idx) in path.iter().rev() {
            let node = self.tree.get_mut(node_id);
            node.visits += 1;

            let edge = &mut node.edges[edge_idx];
            edge.visits += 1;

            for player in PlayerId::BOTH {
                edge.total_reward[player] += rewards[player];
            }
        }

        // Update root visits
        self.tree.root_node_mut().visits += 1;
    }

    /// Select the best action from the root.
    fn best_action(&self) -> Option<G::Action> {
        let root = self.tree.root_node();

        if root.edges.is_empty() {
            return None;
        }

        if self.config.temperature <= 0.0 {
            // Greedy: select most visited
            root.best_edge_by_visits().map(|e| e.action)
        } else {
            // Temperature-based sampling
            let weights: Vec<f32> = root
                .edges
                .iter()
                .map(|e| (e.visits as f32 / self.config.temperature as f32).exp())
                .collect();

            let mut rng = self.rng.clone();
            rng.choose_weighted(&weights).map(|idx| root.edges[idx].action)
        }
    }

    /// Get search statistics.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the search tree.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree<G::Action> {
        &self.tree
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Get action visit counts from root.
    ///
    /// Returns (action, visit_count) pairs.
    pub fn action_visits(&self) -> Vec<(G::Action, u32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.action, e.visits))
            .collect()
    }

    /// Get action probabilities from root.
    ///
    /// Returns (action, probability) pairs where probabilities sum to ~1.0.
    pub fn action_probabilities(&self) -> Vec<(G::Action, f64)> {
        let root = self.tree.root_node();
        let total: u32 = root.edges.iter().map(|e| e.visits).sum();

        if total == 0 {
            let uniform = 1.0 / root.edges.len().max(1) as f64;
            return root.edges.iter().map(|e| (e.action, uniform)).collect();
        }

        root.edges
            .iter()
            .map(|e| (e.action, e.visits as f64 / total as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleError;
    use crate::game::GameResult;

    // One-move game: pick a door, only the winning one beats player 1.
    #[derive(Clone, Debug)]
    struct PickDoor {
        doors: Vec<u8>,
        winning: u8,
        chosen: Option<u8>,
    }

    impl PickDoor {
        fn new(doors: Vec<u8>, winning: u8) -> Self {
            Self {
                doors,
                winning,
                chosen: None,
            }
        }
    }

    impl Game for PickDoor {
        type Action = u8;

        fn current_player(&self) -> PlayerId {
            PlayerId::new(0)
        }

        fn possible_actions(&self) -> Vec<u8> {
            if self.chosen.is_some() {
                vec![]
            } else {
                self.doors.clone()
            }
        }

        fn apply(&mut self, door: u8) -> Result<(), RuleError> {
            self.chosen = Some(door);
            Ok(())
        }

        fn result(&self) -> Option<GameResult> {
            self.chosen.map(|door| {
                if door == self.winning {
                    GameResult::Winner(PlayerId::new(0))
                } else {
                    GameResult::Winner(PlayerId::new(1))
                }
            })
        }

        fn utility(&self, _player: PlayerId) -> f64 {
            1.0
        }

        fn fork(&mut self) -> Self {
            self.clone()
        }
    }

    // Alternating-turns game that player 0 wins after a fixed number of
    // moves, for exercising opponent sampling and deep trees.
    #[derive(Clone, Debug)]
    struct TurnGame {
        turn_number: u32,
        limit: u32,
        to_move: PlayerId,
    }

    impl TurnGame {
        fn new(limit: u32) -> Self {
            Self {
                turn_number: 0,
                limit,
                to_move: PlayerId::new(0),
            }
        }
    }

    impl Game for TurnGame {
        type Action = u8;

        fn current_player(&self) -> PlayerId {
            self.to_move
        }

        fn possible_actions(&self) -> Vec<u8> {
            if self.is_over() {
                vec![]
            } else {
                vec![0, 1, 2]
            }
        }

        fn apply(&mut self, _action: u8) -> Result<(), RuleError> {
            self.turn_number += 1;
            self.to_move = self.to_move.opponent();
            Ok(())
        }

        fn result(&self) -> Option<GameResult> {
            if self.turn_number >= self.limit {
                Some(GameResult::Winner(PlayerId::new(0)))
            } else {
                None
            }
        }

        fn utility(&self, player: PlayerId) -> f64 {
            if player == PlayerId::new(0) {
                0.6
            } else {
                0.4
            }
        }

        fn fork(&mut self) -> Self {
            self.clone()
        }
    }

    #[test]
    fn test_search_returns_action() {
        let mut game = TurnGame::new(10);
        let mut search = MCTSSearch::new(MCTSConfig::default());

        let action = search.search(&mut game, PlayerId::new(0), 100);

        assert!(action.is_some());
    }

    #[test]
    fn test_search_finds_winning_door() {
        for winning in 0..3u8 {
            let mut game = PickDoor::new(vec![0, 1, 2], winning);
            let mut search = MCTSSearch::new(MCTSConfig::default());

            let best = search.search(&mut game, PlayerId::new(0), 200);

            assert_eq!(best, Some(winning));
        }
    }

    #[test]
    fn test_single_action_shortcut() {
        let mut game = PickDoor::new(vec![7], 7);
        let mut search = MCTSSearch::new(MCTSConfig::default());

        let action = search.search(&mut game, PlayerId::new(0), 100);

        assert_eq!(action, Some(7));
        // No iterations needed when there is no choice
        assert_eq!(search.stats().iterations, 0);
    }

    #[test]
    fn test_search_none_when_terminal() {
        let mut game = PickDoor::new(vec![0, 1], 0);
        game.apply(1).unwrap();

        let mut search = MCTSSearch::new(MCTSConfig::default());
        let action = search.search(&mut game, PlayerId::new(0), 100);

        assert_eq!(action, None);
    }

    #[test]
    fn test_search_stats() {
        let mut game = TurnGame::new(10);
        let mut search = MCTSSearch::new(MCTSConfig::default());

        search.search(&mut game, PlayerId::new(0), 50);

        let stats = search.stats();
        assert_eq!(stats.iterations, 50);
        assert!(stats.simulations > 0);
        assert!(stats.nodes_expanded > 0);
    }

    #[test]
    fn test_search_deterministic() {
        let config = MCTSConfig::default().with_seed(12345);

        let mut game1 = TurnGame::new(10);
        let mut game2 = TurnGame::new(10);
        let mut search1: MCTSSearch<TurnGame> = MCTSSearch::new(config.clone());
        let mut search2: MCTSSearch<TurnGame> = MCTSSearch::new(config);

        let action1 = search1.search(&mut game1, PlayerId::new(0), 100);
        let action2 = search2.search(&mut game2, PlayerId::new(0), 100);

        assert_eq!(action1, action2);
    }

    #[test]
    fn test_action_probabilities() {
        let mut game = TurnGame::new(10);
        let mut search = MCTSSearch::new(MCTSConfig::default());

        search.search(&mut game, PlayerId::new(0), 100);

        let probs = search.action_probabilities();

        // Should have probabilities that sum to ~1.0
        let sum: f64 = probs.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_action_visits_cover_root_edges() {
        let mut game = TurnGame::new(10);
        let mut search = MCTSSearch::new(MCTSConfig::default());

        search.search(&mut game, PlayerId::new(0), 60);

        let visits = search.action_visits();
        assert_eq!(visits.len(), 3);
        assert!(visits.iter().map(|(_, v)| v).sum::<u32>() > 0);
    }

    #[test]
    fn test_tree_growth() {
        let mut game = TurnGame::new(20);
        let mut search = MCTSSearch::new(MCTSConfig::default());

        search.search(&mut game, PlayerId::new(0), 200);

        let tree_stats = search.tree().stats();
        assert!(tree_stats.node_count > 1);
        assert!(tree_stats.max_depth > 0);
    }

    #[test]
    fn test_temperature_sampling_stays_legal() {
        let mut game = PickDoor::new(vec![3, 4, 5], 4);
        let config = MCTSConfig::default().with_temperature(1.0);
        let mut search = MCTSSearch::new(config);

        let action = search.search(&mut game, PlayerId::new(0), 100);

        assert!(matches!(action, Some(3..=5)));
    }

    #[test]
    fn test_depth_limit_respected() {
        let mut game = TurnGame::new(1000);
        let config = MCTSConfig::default().with_max_depth(4);
        let mut search = MCTSSearch::new(config);

        let action = search.search(&mut game, PlayerId::new(0), 150);

        assert!(action.is_some());
        assert!(search.tree().stats().max_depth <= 4);
    }

    #[test]
    fn test_puct_policy_swap() {
        use crate::mcts::policy::PUCT;

        let mut game = PickDoor::new(vec![0, 1, 2], 2);
        let mut search = MCTSSearch::new(MCTSConfig::default()).with_selection(PUCT);

        let best = search.search(&mut game, PlayerId::new(0), 200);

        assert_eq!(best, Some(2));
    }
}
