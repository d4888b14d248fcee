//! MST family: Prim's and Kruskal's over the fixed demo graph
//!
//! Both emit `"Added edge {i}-{j} with weight {w}"` for every accepted
//! edge and terminate after `|nodes| - 1` edges or edge exhaustion, so a
//! disconnected graph ends the run instead of looping.

use crate::model::graph::GraphState;
use crate::step::{StepContext, StepResult};
use crate::types::MstAlgorithm;

/// Run one MST algorithm over `graph` to completion or cancellation.
/// Clears per-run state first.
pub fn run(algo: MstAlgorithm, graph: &mut GraphState, ctx: &mut StepContext) -> StepResult {
    graph.clear_run_state();
    if graph.nodes.is_empty() {
        return Ok(());
    }
    match algo {
        MstAlgorithm::Prim => prim(graph, ctx),
        MstAlgorithm::Kruskal => kruskal(graph, ctx),
    }
}

/// Prim's: grow from node 0. Each iteration scans all edges for the
/// minimum-weight edge with exactly one endpoint already in the tree.
fn prim(graph: &mut GraphState, ctx: &mut StepContext) -> StepResult {
    graph.nodes[0].in_mst = true;
    graph.nodes[0].visited = true;

    for _ in 1..graph.nodes.len() {
        let mut best: Option<usize> = None;
        for (idx, edge) in graph.edges.iter().enumerate() {
            let crosses = graph.nodes[edge.from].in_mst != graph.nodes[edge.to].in_mst;
            if crosses && best.map_or(true, |b| edge.weight < graph.edges[b].weight) {
                best = Some(idx);
            }
        }
        // no crossing edge: the remaining nodes are unreachable
        let Some(idx) = best else {
            return Ok(());
        };
        accept_edge(graph, idx, ctx)?;
    }
    Ok(())
}

/// Kruskal's: edges pre-sorted ascending by weight; union-find rejects
/// edges whose endpoints are already connected.
fn kruskal(graph: &mut GraphState, ctx: &mut StepContext) -> StepResult {
    let mut order: Vec<usize> = (0..graph.edges.len()).collect();
    order.sort_by_key(|&idx| graph.edges[idx].weight);

    let mut components = DisjointSet::new(graph.nodes.len());
    let mut accepted = 0;
    for idx in order {
        let (from, to) = (graph.edges[idx].from, graph.edges[idx].to);
        if !components.union(from, to) {
            continue;
        }
        accept_edge(graph, idx, ctx)?;
        accepted += 1;
        if accepted == graph.nodes.len() - 1 {
            break;
        }
    }
    Ok(())
}

/// Mark the edge and both endpoints as part of the tree, report it, and
/// checkpoint.
fn accept_edge(graph: &mut GraphState, idx: usize, ctx: &mut StepContext) -> StepResult {
    let edge = graph.edges[idx];
    graph.edges[idx].in_mst = true;
    for id in [edge.from, edge.to] {
        graph.nodes[id].in_mst = true;
        graph.nodes[id].visited = true;
    }
    ctx.emit_message(format!(
        "Added edge {}-{} with weight {}",
        edge.from, edge.to, edge.weight
    ));
    ctx.yield_graph(graph)
}

/// Union-find over node ids with path compression and union by size
struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            size: vec![1; len],
        }
    }

    fn find(&mut self, mut node: usize) -> usize {
        while self.parent[node] != node {
            // halve the path as we walk it
            self.parent[node] = self.parent[self.parent[node]];
            node = self.parent[node];
        }
        node
    }

    /// Merge the components of `a` and `b`; false if already joined
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepContext;

    /// Minimum spanning weight of the demo graph, computed independently
    /// by brute force over all 6-edge subsets.
    fn brute_force_mst_weight(graph: &GraphState) -> u32 {
        let n = graph.nodes.len();
        let m = graph.edges.len();
        let mut best = u32::MAX;
        for mask in 0u32..(1 << m) {
            if mask.count_ones() as usize != n - 1 {
                continue;
            }
            let mut components = DisjointSet::new(n);
            let mut weight = 0;
            let mut acyclic = true;
            for idx in 0..m {
                if mask & (1 << idx) == 0 {
                    continue;
                }
                let edge = graph.edges[idx];
                if !components.union(edge.from, edge.to) {
                    acyclic = false;
                    break;
                }
                weight += edge.weight;
            }
            if acyclic && (0..n).all(|i| components.find(i) == components.find(0)) {
                best = best.min(weight);
            }
        }
        best
    }

    #[test]
    fn test_demo_graph_minimum_weight_is_16() {
        assert_eq!(brute_force_mst_weight(&GraphState::demo()), 16);
    }

    #[test]
    fn test_both_algorithms_find_the_minimum() {
        for &algo in MstAlgorithm::all() {
            let mut graph = GraphState::demo();
            let mut ctx = StepContext::detached();
            run(algo, &mut graph, &mut ctx).unwrap();

            assert_eq!(graph.mst_edge_count(), 6, "{algo:?}");
            assert_eq!(graph.mst_weight(), 16, "{algo:?}");
            assert!(graph.nodes.iter().all(|n| n.in_mst), "{algo:?}");
        }
    }

    #[test]
    fn test_mst_is_connected_and_acyclic() {
        for &algo in MstAlgorithm::all() {
            let mut graph = GraphState::demo();
            let mut ctx = StepContext::detached();
            run(algo, &mut graph, &mut ctx).unwrap();

            let mut components = DisjointSet::new(graph.nodes.len());
            for edge in graph.edges.iter().filter(|e| e.in_mst) {
                assert!(components.union(edge.from, edge.to), "{algo:?} has a cycle");
            }
            let root = components.find(0);
            assert!(
                (0..graph.nodes.len()).all(|i| components.find(i) == root),
                "{algo:?} is disconnected"
            );
        }
    }

    #[test]
    fn test_edge_messages_reported() {
        let mut graph = GraphState::demo();
        let mut ctx = StepContext::detached();
        run(MstAlgorithm::Prim, &mut graph, &mut ctx).unwrap();
        assert!(ctx.metrics.message.starts_with("Added edge"));
        assert!(ctx.metrics.message.contains("with weight"));
    }

    #[test]
    fn test_disconnected_graph_terminates() {
        let mut graph = GraphState::demo();
        // cut node 6 off entirely
        graph.edges.retain(|e| e.from != 6 && e.to != 6);
        for &algo in MstAlgorithm::all() {
            let mut g = graph.clone();
            let mut ctx = StepContext::detached();
            run(algo, &mut g, &mut ctx).unwrap();
            assert_eq!(g.mst_edge_count(), 5, "{algo:?}");
            assert!(!g.nodes[6].in_mst, "{algo:?}");
        }
    }

    #[test]
    fn test_union_find() {
        let mut set = DisjointSet::new(4);
        assert!(set.union(0, 1));
        assert!(set.union(2, 3));
        assert!(!set.union(1, 0));
        assert!(set.union(0, 3));
        assert!(!set.union(2, 1));
        assert_eq!(set.find(0), set.find(2));
    }
}
