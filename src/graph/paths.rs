use ahash::AHashSet;
use petgraph::algo::has_path_connecting;
use petgraph::visit::{Dfs, Reversed};
use statrs::statistics::Statistics;

use crate::graph::debruijn::{DeBruijnGraph, NodeId};

/// Ordered node sequence of a simple path
pub type Path = Vec<NodeId>;

/// A candidate path with the metrics used to rank it
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPath {
    pub nodes: Path,
    /// Number of nodes on the path
    pub length: usize,
    /// Mean weight of consecutive edges
    pub average_weight: f64,
}

impl ScoredPath {
    pub fn score(graph: &DeBruijnGraph, nodes: Path) -> Self {
        let average_weight = path_average_weight(graph, &nodes);
        Self {
            length: nodes.len(),
            nodes,
            average_weight,
        }
    }
}

/// Scores every path against the same graph state
pub fn score_paths(graph: &DeBruijnGraph, paths: Vec<Path>) -> Vec<ScoredPath> {
    paths
        .into_iter()
        .map(|nodes| ScoredPath::score(graph, nodes))
        .collect()
}

/// Mean weight of the edges joining consecutive nodes of `path`.
/// NaN for a path without edges.
pub fn path_average_weight(graph: &DeBruijnGraph, path: &[NodeId]) -> f64 {
    path.windows(2)
        .filter_map(|pair| graph.edge_weight(pair[0], pair[1]))
        .map(f64::from)
        .collect::<Vec<f64>>()
        .mean()
}

/// Enumerate every simple path from `from` to `to` in depth-first order.
///
/// Paths have at least one edge, so `from == to` yields nothing. Successors
/// are explored in graph adjacency order.
pub fn all_simple_paths(graph: &DeBruijnGraph, from: NodeId, to: NodeId) -> Vec<Path> {
    let mut paths = Vec::new();
    if from == to || !graph.contains_node(from) || !graph.contains_node(to) {
        return paths;
    }

    let mut current: Path = vec![from];
    let mut on_path: AHashSet<NodeId> = AHashSet::new();
    on_path.insert(from);
    let mut stack = vec![graph.successors(from).collect::<Vec<_>>().into_iter()];

    while !stack.is_empty() {
        let next = stack.last_mut().and_then(Iterator::next);
        match next {
            Some(child) if child == to => {
                let mut found = current.clone();
                found.push(to);
                paths.push(found);
            }
            Some(child) => {
                if on_path.insert(child) {
                    current.push(child);
                    stack.push(graph.successors(child).collect::<Vec<_>>().into_iter());
                }
            }
            None => {
                stack.pop();
                if let Some(node) = current.pop() {
                    on_path.remove(&node);
                }
            }
        }
    }

    paths
}

pub fn has_path(graph: &DeBruijnGraph, from: NodeId, to: NodeId) -> bool {
    has_path_connecting(graph.as_graphmap(), from, to, None)
}

/// Every node from which `node` is reachable, `node` included
pub fn ancestors(graph: &DeBruijnGraph, node: NodeId) -> AHashSet<NodeId> {
    let reversed = Reversed(graph.as_graphmap());
    let mut dfs = Dfs::new(reversed, node);
    let mut seen = AHashSet::new();
    while let Some(n) = dfs.next(reversed) {
        seen.insert(n);
    }
    seen
}
