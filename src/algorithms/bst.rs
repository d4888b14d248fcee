//! BST family: instrumented insert and the three classic traversals
//!
//! Insert descends recursively, highlighting each compared node for one
//! checkpoint, and places the new node with an x-offset that halves per
//! level. Traversals highlight each visited node for one checkpoint and
//! append its value to the tree's `last_traversal` list as they go, so
//! the renderer can show the visit order building up.

use crate::model::tree::{Bst, Side, TreeNode, LEVEL_DY, ROOT_DX, ROOT_X, ROOT_Y};
use crate::step::{Cancelled, StepContext, StepResult};
use crate::types::Traversal;

/// Insert `value` into the tree, animating the descent.
///
/// Non-finite values are silently ignored. Duplicates are routed right.
pub fn insert(tree: &mut Bst, value: f64, ctx: &mut StepContext) -> StepResult {
    if !value.is_finite() {
        return Ok(());
    }
    if tree.attach_root(TreeNode::new(value, ROOT_X, ROOT_Y)) {
        return ctx.yield_tree(tree);
    }
    let mut path = Vec::new();
    insert_rec(tree, &mut path, value, ROOT_X, ROOT_Y, ROOT_DX, ctx)
}

/// Descend at the node addressed by `path`, placed at `(x, y)` with child
/// offset `dx`.
fn insert_rec(
    tree: &mut Bst,
    path: &mut Vec<Side>,
    value: f64,
    x: f32,
    y: f32,
    dx: f32,
    ctx: &mut StepContext,
) -> StepResult {
    let (node_value, occupied_left, occupied_right) = {
        let Some(node) = tree.node_at_mut(path) else {
            return Ok(());
        };
        node.highlighted = true;
        (node.value, node.left.is_some(), node.right.is_some())
    };
    ctx.count_comparison();
    ctx.yield_tree(tree)?;
    if let Some(node) = tree.node_at_mut(path) {
        node.highlighted = false;
    }

    let side = if value < node_value {
        Side::Left
    } else {
        Side::Right
    };
    let (child_x, occupied) = match side {
        Side::Left => (x - dx, occupied_left),
        Side::Right => (x + dx, occupied_right),
    };
    let child_y = y + LEVEL_DY;

    if occupied {
        path.push(side);
        insert_rec(tree, path, value, child_x, child_y, dx / 2.0, ctx)
    } else {
        tree.attach(path, side, TreeNode::new(value, child_x, child_y));
        ctx.yield_tree(tree)
    }
}

/// Run one traversal, returning the visit order.
///
/// The order is also left on `tree.last_traversal` for the renderer.
pub fn traverse(
    tree: &mut Bst,
    order: Traversal,
    ctx: &mut StepContext,
) -> Result<Vec<f64>, Cancelled> {
    tree.last_traversal.clear();
    tree.clear_highlights();
    let mut path = Vec::new();
    traverse_rec(tree, &mut path, order, ctx)?;
    Ok(tree.last_traversal.clone())
}

fn traverse_rec(
    tree: &mut Bst,
    path: &mut Vec<Side>,
    order: Traversal,
    ctx: &mut StepContext,
) -> StepResult {
    if tree.node_at(path).is_none() {
        return Ok(());
    }
    match order {
        Traversal::Inorder => {
            descend(tree, path, Side::Left, order, ctx)?;
            visit_node(tree, path, ctx)?;
            descend(tree, path, Side::Right, order, ctx)
        }
        Traversal::Preorder => {
            visit_node(tree, path, ctx)?;
            descend(tree, path, Side::Left, order, ctx)?;
            descend(tree, path, Side::Right, order, ctx)
        }
        Traversal::Postorder => {
            descend(tree, path, Side::Left, order, ctx)?;
            descend(tree, path, Side::Right, order, ctx)?;
            visit_node(tree, path, ctx)
        }
    }
}

fn descend(
    tree: &mut Bst,
    path: &mut Vec<Side>,
    side: Side,
    order: Traversal,
    ctx: &mut StepContext,
) -> StepResult {
    path.push(side);
    let result = traverse_rec(tree, path, order, ctx);
    path.pop();
    result
}

/// Highlight the node for one checkpoint and record its value
fn visit_node(tree: &mut Bst, path: &[Side], ctx: &mut StepContext) -> StepResult {
    let value = {
        let Some(node) = tree.node_at_mut(path) else {
            return Ok(());
        };
        node.highlighted = true;
        node.value
    };
    tree.last_traversal.push(value);
    ctx.yield_tree(tree)?;
    if let Some(node) = tree.node_at_mut(path) {
        node.highlighted = false;
    }
    Ok(())
}
