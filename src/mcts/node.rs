//! MCTS node and edge structures.
//!
//! Uses arena-based allocation with index references (NodeId) for efficiency
//! and serializability. Nodes and edges are generic over the game's action
//! type.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, PlayerPair};

/// Index into the MCTSTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// Edge representing an action from a parent node to a child.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge<A> {
    /// The action this edge represents.
    pub action: A,

    /// Child node (NONE if not yet expanded).
    pub child: NodeId,

    /// Visit count for this action.
    pub visits: u32,

    /// Total reward accumulated for this action (per player).
    pub total_reward: PlayerPair<f64>,

    /// Prior probability from an external evaluator (for PUCT).
    /// Default is 1.0 for uniform prior.
    pub prior: f32,
}

impl<A> Edge<A> {
    /// Create a new edge with the given action.
    pub fn new(action: A) -> Self {
        Self {
            action,
            child: NodeId::NONE,
            visits: 0,
            total_reward: PlayerPair::with_value(0.0),
            prior: 1.0,
        }
    }

    /// Create an edge with a custom prior probability.
    pub fn with_prior(action: A, prior: f32) -> Self {
        Self {
            action,
            child: NodeId::NONE,
            visits: 0,
            total_reward: PlayerPair::with_value(0.0),
            prior,
        }
    }

    /// Get the mean reward for a player.
    #[must_use]
    pub fn mean_reward(&self, player: PlayerId) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward[player] / self.visits as f64
        }
    }

    /// Check if this edge has been expanded (child exists).
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSNode<A> {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Index of the edge from parent that led to this node.
    pub parent_edge_idx: u16,

    /// Player to move at this node.
    pub to_move: PlayerId,

    /// Depth in tree (root = 0).
    pub depth: u16,

    /// Total visits to this node.
    pub visits: u32,

    /// Is this a terminal game state?
    pub is_terminal: bool,

    /// Terminal rewards (if terminal).
    pub terminal_reward: Option<PlayerPair<f64>>,

    /// Outgoing edges (available actions).
    /// SmallVec optimizes for typical branching factor < 8.
    pub edges: SmallVec<[Edge<A>; 8]>,
}

impl<A> MCTSNode<A> {
    /// Create a new node.
    pub fn new(parent: NodeId, parent_edge_idx: u16, to_move: PlayerId, depth: u16) -> Self {
        Self {
            parent,
            parent_edge_idx,
            to_move,
            depth,
            visits: 0,
            is_terminal: false,
            terminal_reward: None,
            edges: SmallVec::new(),
        }
    }

    /// Create a root node.
    pub fn root(to_move: PlayerId) -> Self {
        Self::new(NodeId::NONE, 0, to_move, 0)
    }

    /// Check if all edges have been expanded.
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        !self.edges.is_empty() && self.edges.iter().all(|e| e.is_expanded())
    }

    /// Check if any edges are unexpanded.
    #[must_use]
    pub fn has_unexpanded(&self) -> bool {
        self.edges.iter().any(|e| !e.is_expanded())
    }

    /// Get indices of unexpanded edges.
    pub fn unexpanded_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_expanded())
            .map(|(i, _)| i)
    }

    /// Get the edge with the most visits.
    #[must_use]
    pub fn best_edge_by_visits(&self) -> Option<&Edge<A>> {
        self.edges.iter().max_by_key(|e| e.visits)
    }

    /// Get the edge with the highest mean reward for a player.
    #[must_use]
    pub fn best_edge_by_reward(&self, player: PlayerId) -> Option<&Edge<A>> {
        self.edges.iter().max_by(|a, b| {
            a.mean_reward(player)
                .partial_cmp(&b.mean_reward(player))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
