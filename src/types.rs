//! Core types shared across the engine
//!
//! This module contains the fundamental types used throughout the crate:
//! algorithm identifiers, run metrics, engine status, and the published
//! snapshot the renderer reads.
//!
//! # Main Types
//!
//! - [`Algorithm`] - A runnable algorithm, tagged by family
//! - [`Family`] - The four visualization families
//! - [`RunMetrics`] - Comparison/swap counters and the current message
//! - [`EngineSnapshot`] - The renderer-facing copy of all state models
//! - [`EngineEvent`] - Notifications pushed from the worker to the UI

use crate::model::{ArraySlot, Bst, GraphState, Grid};
use serde::{Deserialize, Serialize};

/// A group of algorithms sharing one state model and visualization surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Sorting,
    Pathfinding,
    Graph,
    Tree,
}

/// Sorting family algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl SortAlgorithm {
    /// All sorting algorithms, in menu order
    pub fn all() -> &'static [SortAlgorithm] {
        &[
            SortAlgorithm::Bubble,
            SortAlgorithm::Selection,
            SortAlgorithm::Insertion,
            SortAlgorithm::Merge,
            SortAlgorithm::Quick,
            SortAlgorithm::Heap,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Selection => "Selection Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
            SortAlgorithm::Merge => "Merge Sort",
            SortAlgorithm::Quick => "Quick Sort",
            SortAlgorithm::Heap => "Heap Sort",
        }
    }
}

/// Pathfinding family algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathAlgorithm {
    Dijkstra,
    AStar,
    Bfs,
    Dfs,
}

impl PathAlgorithm {
    pub fn all() -> &'static [PathAlgorithm] {
        &[
            PathAlgorithm::Dijkstra,
            PathAlgorithm::AStar,
            PathAlgorithm::Bfs,
            PathAlgorithm::Dfs,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PathAlgorithm::Dijkstra => "Dijkstra's Algorithm",
            PathAlgorithm::AStar => "A* Search",
            PathAlgorithm::Bfs => "Breadth-First Search",
            PathAlgorithm::Dfs => "Depth-First Search",
        }
    }
}

/// Minimum-spanning-tree family algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MstAlgorithm {
    Prim,
    Kruskal,
}

impl MstAlgorithm {
    pub fn all() -> &'static [MstAlgorithm] {
        &[MstAlgorithm::Prim, MstAlgorithm::Kruskal]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MstAlgorithm::Prim => "Prim's Algorithm",
            MstAlgorithm::Kruskal => "Kruskal's Algorithm",
        }
    }
}

/// BST traversal orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Traversal {
    Inorder,
    Preorder,
    Postorder,
}

impl Traversal {
    pub fn all() -> &'static [Traversal] {
        &[Traversal::Inorder, Traversal::Preorder, Traversal::Postorder]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Traversal::Inorder => "Inorder Traversal",
            Traversal::Preorder => "Preorder Traversal",
            Traversal::Postorder => "Postorder Traversal",
        }
    }
}

/// A runnable algorithm, tagged by family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Sort(SortAlgorithm),
    Path(PathAlgorithm),
    Mst(MstAlgorithm),
    Traverse(Traversal),
}

impl Algorithm {
    /// The family whose state model this algorithm reads and mutates
    pub fn family(&self) -> Family {
        match self {
            Algorithm::Sort(_) => Family::Sorting,
            Algorithm::Path(_) => Family::Pathfinding,
            Algorithm::Mst(_) => Family::Graph,
            Algorithm::Traverse(_) => Family::Tree,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Sort(a) => a.display_name(),
            Algorithm::Path(a) => a.display_name(),
            Algorithm::Mst(a) => a.display_name(),
            Algorithm::Traverse(t) => t.display_name(),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The algorithm ran to completion
    Completed,
    /// The run was cancelled at a checkpoint
    Cancelled,
}

/// Whether the engine is currently executing a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EngineStatus {
    #[default]
    Idle,
    Running(Algorithm),
}

impl EngineStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, EngineStatus::Running(_))
    }
}

/// Counters and the human-readable message surfaced alongside each run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Value comparisons performed so far
    pub comparisons: u64,
    /// Swaps / placements performed so far
    pub swaps: u64,
    /// Last human-readable progress message
    pub message: String,
}

impl RunMetrics {
    pub fn reset(&mut self) {
        *self = RunMetrics::default();
    }
}

/// The renderer-facing copy of all engine state.
///
/// Written by the worker at every checkpoint, read by any number of
/// renderer threads through the handle's accessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub status: EngineStatus,
    pub array: Vec<ArraySlot>,
    pub grid: Grid,
    pub graph: GraphState,
    pub tree: Bst,
    pub metrics: RunMetrics,
}

/// Notification pushed from the worker to the UI.
///
/// Events are advisory: they are delivered with `try_send` on a bounded
/// channel and may be dropped under backpressure. The snapshot accessors
/// are the source of truth; a dropped `StateChanged` only means the
/// renderer repaints one checkpoint later.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A run was accepted and is starting
    RunStarted(Algorithm),
    /// A run finished, completed or cancelled
    RunFinished {
        algorithm: Algorithm,
        outcome: RunOutcome,
    },
    /// A family's state model changed; re-read its snapshot
    StateChanged(Family),
    /// A human-readable progress message was emitted
    Message(String),
    /// The worker is shutting down
    Shutdown,
}
