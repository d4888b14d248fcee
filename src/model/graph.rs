//! Weighted demonstration graph for the MST family
//!
//! The graph is a fixed 7-node, 10-edge layout; users cannot edit it.
//! `in_mst` flags on nodes and edges are per-run state. At MST completion
//! exactly `nodes.len() - 1` edges carry `in_mst`, and the induced subgraph
//! is connected and acyclic.

use serde::{Deserialize, Serialize};

/// A positioned graph vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    /// Touched by the running algorithm
    pub visited: bool,
    /// Part of the growing spanning forest
    pub in_mst: bool,
}

impl GraphNode {
    fn new(id: usize, x: f32, y: f32) -> Self {
        Self {
            id,
            x,
            y,
            visited: false,
            in_mst: false,
        }
    }
}

/// An undirected weighted edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub weight: u32,
    pub in_mst: bool,
}

impl GraphEdge {
    fn new(from: usize, to: usize, weight: u32) -> Self {
        Self {
            from,
            to,
            weight,
            in_mst: false,
        }
    }
}

/// The MST family's state model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphState {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Default for GraphState {
    fn default() -> Self {
        Self::demo()
    }
}

impl GraphState {
    /// The fixed demonstration graph (7 nodes, 10 edges, MST weight 16)
    pub fn demo() -> Self {
        Self {
            nodes: vec![
                GraphNode::new(0, 80.0, 90.0),
                GraphNode::new(1, 260.0, 40.0),
                GraphNode::new(2, 210.0, 210.0),
                GraphNode::new(3, 430.0, 100.0),
                GraphNode::new(4, 390.0, 270.0),
                GraphNode::new(5, 570.0, 180.0),
                GraphNode::new(6, 530.0, 330.0),
            ],
            edges: vec![
                GraphEdge::new(0, 1, 4),
                GraphEdge::new(0, 2, 3),
                GraphEdge::new(1, 2, 2),
                GraphEdge::new(1, 3, 5),
                GraphEdge::new(2, 3, 7),
                GraphEdge::new(2, 4, 6),
                GraphEdge::new(3, 4, 1),
                GraphEdge::new(3, 5, 4),
                GraphEdge::new(4, 6, 3),
                GraphEdge::new(5, 6, 2),
            ],
        }
    }

    /// Zero all per-run state
    pub fn clear_run_state(&mut self) {
        for node in &mut self.nodes {
            node.visited = false;
            node.in_mst = false;
        }
        for edge in &mut self.edges {
            edge.in_mst = false;
        }
    }

    /// Number of edges currently in the spanning forest
    pub fn mst_edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.in_mst).count()
    }

    /// Total weight of the spanning forest
    pub fn mst_weight(&self) -> u32 {
        self.edges.iter().filter(|e| e.in_mst).map(|e| e.weight).sum()
    }
}
