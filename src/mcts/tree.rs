//! Arena-based MCTS tree.
//!
//! Uses a flat `Vec<MCTSNode>` with index-based references for efficiency,
//! cache-friendliness, and serializability.

use serde::{Deserialize, Serialize};

use super::node::{MCTSNode, NodeId};
use crate::core::PlayerId;

/// Arena-based MCTS tree.
///
/// Nodes are stored in a flat vector and referenced by `NodeId` indices.
/// This avoids reference counting overhead and enables serialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MCTSTree<A> {
    /// All nodes in the tree.
    nodes: Vec<MCTSNode<A>>,

    /// The root node ID (always 0 after initialization).
    root: NodeId,
}

impl<A> MCTSTree<A> {
    /// Create a new tree with a root node.
    pub fn new(root_player: PlayerId) -> Self {
        Self::with_capacity(root_player, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root_player: PlayerId, capacity: usize) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(capacity),
            root: NodeId::new(0),
        };
        tree.nodes.push(MCTSNode::root(root_player));
        tree
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MCTSNode<A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MCTSNode<A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MCTSNode<A>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.is_terminal).count();
        let total_edges: usize = self.nodes.iter().map(|n| n.edges.len()).sum();
        let expanded_edges: usize = self
            .nodes
            .iter()
            .flat_map(|n| n.edges.iter())
            .filter(|e| e.is_expanded())
            .count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            total_edges,
            expanded_edges,
        }
    }

    /// Clear the tree and reset with a new root.
    pub fn reset(&mut self, root_player: PlayerId) {
        self.nodes.clear();
        self.nodes.push(MCTSNode::root(root_player));
        self.root = NodeId::new(0);
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &MCTSNode<A> {
        self.get(self.root)
    }

    /// Get the root node mutably.
    pub fn root_node_mut(&mut self) -> &mut MCTSNode<A> {
        self.get_mut(self.root)
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MCTSNode<A>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of terminal nodes.
    pub terminal_count: usize,

    /// Total number of edges (actions).
    pub total_edges: usize,

    /// Number of expanded edges (with children).
    pub expanded_edges: usize,
}

impl TreeStats {
    /// Get the branching factor (average edges per node).
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.node_count as f64
        }
    }

    /// Get the expansion ratio (expanded edges / total edges).
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        if self.total_edges == 0 {
            0.0
        } else {
            self.expanded_edges as f64 / self.total_edges as f64
        }
    }
}
