//! State models for the four algorithm families
//!
//! Each family owns one data structure: an array of annotated bars
//! (sorting), a 2-D grid of cells (pathfinding), a small weighted graph
//! (MST), and an unbalanced binary search tree (BST). The models carry
//! shape and invariants only; all stepping behavior lives in
//! [`crate::algorithms`].
//!
//! # Lifecycle
//!
//! Models are created/reset by explicit initialize operations (new random
//! array, cleared grid, cleared tree, fixed demo graph), mutated exclusively
//! by the currently running algorithm, and read by the renderer through
//! published snapshots.

pub mod array;
pub mod graph;
pub mod grid;
pub mod tree;

pub use array::{random_array, Annotation, ArraySlot};
pub use graph::{GraphEdge, GraphNode, GraphState};
pub use grid::{CellToggle, Grid, GridCell, GRID_COLS, GRID_ROWS};
pub use tree::{Bst, TreeNode};
