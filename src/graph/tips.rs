use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::graph::debruijn::{DeBruijnGraph, NodeId};
use crate::graph::paths::{all_simple_paths, score_paths, Path};
use crate::graph::select::{EndpointPolicy, PathSelector};

/// Which end of the graph a tip dangles from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipKind {
    /// Branches entering a convergence node from a source
    Entry,
    /// Branches leaving a divergence node towards a sink
    Exit,
}

impl TipKind {
    fn policy(self) -> EndpointPolicy {
        match self {
            TipKind::Entry => EndpointPolicy::ENTRY,
            TipKind::Exit => EndpointPolicy::SINK,
        }
    }

    fn is_branching(self, graph: &DeBruijnGraph, node: NodeId) -> bool {
        match self {
            TipKind::Entry => graph.in_degree(node) > 1,
            TipKind::Exit => graph.out_degree(node) > 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TipReport {
    pub candidates: usize,
    pub nodes_removed: usize,
}

/// Collect every tip candidate against the current graph.
///
/// For entry tips these are all simple paths from each `anchor` (source) to
/// each node with several predecessors; for exit tips, from each node with
/// several successors to each `anchor` (sink). Order is branching node first,
/// then anchor. Enumeration is read-only and runs on the rayon pool.
pub fn collect_tip_paths(graph: &DeBruijnGraph, kind: TipKind, anchors: &[NodeId]) -> Vec<Path> {
    let branching: Vec<NodeId> = graph
        .nodes()
        .into_iter()
        .filter(|&n| kind.is_branching(graph, n))
        .collect();

    branching
        .par_iter()
        .flat_map_iter(|&node| {
            anchors.iter().flat_map(move |&anchor| match kind {
                TipKind::Entry => all_simple_paths(graph, anchor, node),
                TipKind::Exit => all_simple_paths(graph, node, anchor),
            })
        })
        .collect()
}

/// One tip-trimming pass.
///
/// Candidates and their scores all come from the graph as it stands before
/// any removal; a single selection then keeps the best candidate and trims
/// every other one.
pub fn solve_tips(
    graph: &mut DeBruijnGraph,
    selector: &mut PathSelector,
    kind: TipKind,
    anchors: &[NodeId],
) -> TipReport {
    let paths = collect_tip_paths(graph, kind, anchors);
    if paths.is_empty() {
        return TipReport::default();
    }

    let candidates = score_paths(graph, paths);
    let nodes_removed = selector
        .select_best_path(graph, &candidates, kind.policy())
        .map(|selection| selection.nodes_removed)
        .unwrap_or(0);

    info!(
        "{:?} tips: {} candidate paths, removed {} nodes",
        kind,
        candidates.len(),
        nodes_removed
    );
    TipReport { candidates: candidates.len(), nodes_removed }
}

pub fn solve_entry_tips(graph: &mut DeBruijnGraph, selector: &mut PathSelector, starting_nodes: &[NodeId]) -> TipReport {
    solve_tips(graph, selector, TipKind::Entry, starting_nodes)
}

pub fn solve_out_tips(graph: &mut DeBruijnGraph, selector: &mut PathSelector, ending_nodes: &[NodeId]) -> TipReport {
    solve_tips(graph, selector, TipKind::Exit, ending_nodes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_tip_removes_only_dangling_node() {
        let mut graph = DeBruijnGraph::from_weighted_edges(vec![
            ("S", "X", 3),
            ("X", "Y", 3),
            ("Y", "Z", 3),
            ("Z", "W", 3),
            ("T", "Z", 1),
        ]);
        let sources = graph.source_nodes();

        let report = solve_entry_tips(&mut graph, &mut PathSelector::default(), &sources);
        assert_eq!(report, TipReport { candidates: 2, nodes_removed: 1 });
        assert_eq!(graph.node_labels(), vec!["S", "W", "X", "Y", "Z"]);
    }

    #[test]
    fn test_out_tip_removes_only_dead_end() {
        let mut graph = DeBruijnGraph::from_weighted_edges(vec![
            ("A", "B", 3),
            ("B", "C", 3),
            ("C", "D", 3),
            ("B", "E", 1),
        ]);
        let sinks = graph.sink_nodes();

        let report = solve_out_tips(&mut graph, &mut PathSelector::default(), &sinks);
        assert_eq!(report.nodes_removed, 1);
        assert_eq!(graph.node_labels(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_linear_graph_has_no_tips() {
        let mut graph = DeBruijnGraph::from_weighted_edges(vec![("A", "B", 1), ("B", "C", 1)]);
        let sources = graph.source_nodes();
        let sinks = graph.sink_nodes();
        let mut selector = PathSelector::default();

        assert_eq!(solve_entry_tips(&mut graph, &mut selector, &sources), TipReport::default());
        assert_eq!(solve_out_tips(&mut graph, &mut selector, &sinks), TipReport::default());
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_all_tips_judged_against_one_snapshot() {
        let mut graph = DeBruijnGraph::from_weighted_edges(vec![
            ("S", "X", 4),
            ("X", "M", 4),
            ("M", "N", 4),
            ("N", "O", 4),
            ("T", "M", 1),
            ("U", "N", 1),
        ]);
        let sources = graph.source_nodes();

        let paths = collect_tip_paths(&graph, TipKind::Entry, &sources);
        assert_eq!(paths.len(), 5);

        let report = solve_entry_tips(&mut graph, &mut PathSelector::default(), &sources);
        assert_eq!(report, TipReport { candidates: 5, nodes_removed: 2 });
        assert_eq!(graph.node_labels(), vec!["M", "N", "O", "S", "X"]);
    }
}
