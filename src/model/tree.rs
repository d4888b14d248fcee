//! Unbalanced binary search tree for the BST family
//!
//! Nodes carry layout coordinates computed at insert time: the x-offset to
//! a child halves with each level so the rendered tree stays readable.
//! There is no rebalancing; pathological insert orders degrade into a
//! visibly skewed tree, which is the intended teaching artifact.
//!
//! Duplicate values are routed right (`value < node.value` goes left,
//! everything else right), consistently for all inserts; this defines the
//! ordering traversals observe.

use serde::{Deserialize, Serialize};

/// X coordinate of the root node
pub const ROOT_X: f32 = 400.0;

/// Y coordinate of the root node
pub const ROOT_Y: f32 = 40.0;

/// Horizontal offset between the root and its children; halves per level
pub const ROOT_DX: f32 = 200.0;

/// Vertical distance between tree levels
pub const LEVEL_DY: f32 = 70.0;

/// Which child to descend into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A BST node with layout coordinates and a transient highlight flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub value: f64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
    pub x: f32,
    pub y: f32,
    pub highlighted: bool,
}

impl TreeNode {
    pub fn new(value: f64, x: f32, y: f32) -> Self {
        Self {
            value,
            left: None,
            right: None,
            x,
            y,
            highlighted: false,
        }
    }

    fn child(&self, side: Side) -> Option<&TreeNode> {
        match side {
            Side::Left => self.left.as_deref(),
            Side::Right => self.right.as_deref(),
        }
    }

    fn child_mut(&mut self, side: Side) -> Option<&mut TreeNode> {
        match side {
            Side::Left => self.left.as_deref_mut(),
            Side::Right => self.right.as_deref_mut(),
        }
    }

    fn count(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.count())
            + self.right.as_ref().map_or(0, |n| n.count())
    }
}

/// The BST family's state model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bst {
    pub root: Option<Box<TreeNode>>,
    /// Visit order produced by the most recent traversal run
    pub last_traversal: Vec<f64>,
}

impl Bst {
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.count())
    }

    /// Node at the given root-relative path
    pub fn node_at(&self, path: &[Side]) -> Option<&TreeNode> {
        let mut node = self.root.as_deref()?;
        for &side in path {
            node = node.child(side)?;
        }
        Some(node)
    }

    /// Mutable node at the given root-relative path
    pub fn node_at_mut(&mut self, path: &[Side]) -> Option<&mut TreeNode> {
        let mut node = self.root.as_deref_mut()?;
        for &side in path {
            node = node.child_mut(side)?;
        }
        Some(node)
    }

    /// Attach a node as the `side` child at `path`; replaces nothing (the
    /// slot must be empty). Used by the instrumented insert after its
    /// descent settles on a position.
    pub fn attach(&mut self, path: &[Side], side: Side, node: TreeNode) -> bool {
        if path.is_empty() && self.root.is_none() {
            // attaching the root ignores `side`
            self.root = Some(Box::new(node));
            return true;
        }
        let Some(parent) = self.node_at_mut(path) else {
            return false;
        };
        let slot = match side {
            Side::Left => &mut parent.left,
            Side::Right => &mut parent.right,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(Box::new(node));
        true
    }

    /// Attach the root node of an empty tree
    pub fn attach_root(&mut self, node: TreeNode) -> bool {
        if self.root.is_some() {
            return false;
        }
        self.root = Some(Box::new(node));
        true
    }

    /// Clear every highlight flag
    pub fn clear_highlights(&mut self) {
        fn clear(node: &mut TreeNode) {
            node.highlighted = false;
            if let Some(left) = node.left.as_deref_mut() {
                clear(left);
            }
            if let Some(right) = node.right.as_deref_mut() {
                clear(right);
            }
        }
        if let Some(root) = self.root.as_deref_mut() {
            clear(root);
        }
    }
}
