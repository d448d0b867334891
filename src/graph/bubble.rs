use ahash::AHashSet;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_MAX_BUBBLE_ITERATIONS;
use crate::graph::debruijn::{DeBruijnGraph, NodeId};
use crate::graph::paths::{all_simple_paths, ancestors, score_paths};
use crate::graph::select::{EndpointPolicy, PathSelector};

/// Divergent branches leaving `ancestor` and reconverging at `node`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bubble {
    pub ancestor: NodeId,
    pub node: NodeId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BubbleReport {
    /// Bubbles whose resolution removed at least one node
    pub resolved: usize,
    pub nodes_removed: usize,
    pub iterations: usize,
    /// True when the iteration cap stopped the loop with bubbles left
    pub capped: bool,
}

/// Lowest common ancestor of `a` and `b`.
///
/// Starts from the first common ancestor in graph order and walks down
/// through successors that are also common ancestors until none is left.
pub fn lowest_common_ancestor(graph: &DeBruijnGraph, a: NodeId, b: NodeId) -> Option<NodeId> {
    let above_a = ancestors(graph, a);
    let above_b = ancestors(graph, b);
    let is_common = |n: &NodeId| above_a.contains(n) && above_b.contains(n);

    let mut current = graph.nodes().into_iter().find(|n| is_common(n))?;
    let mut visited = AHashSet::new();
    visited.insert(current);

    loop {
        let lower = graph
            .successors(current)
            .find(|s| is_common(s) && !visited.contains(s));
        match lower {
            Some(next) => {
                visited.insert(next);
                current = next;
            }
            None => return Some(current),
        }
    }
}

/// First bubble in node order, then predecessor-pair order `(i, j)` with `i < j`.
/// Pairs listed in `skip` are ignored.
pub fn find_bubble(graph: &DeBruijnGraph, skip: &AHashSet<Bubble>) -> Option<Bubble> {
    for node in graph.nodes() {
        let preds: Vec<NodeId> = graph.predecessors(node).collect();
        if preds.len() < 2 {
            continue;
        }
        for i in 0..preds.len() - 1 {
            for j in i + 1..preds.len() {
                let Some(ancestor) = lowest_common_ancestor(graph, preds[i], preds[j]) else {
                    continue;
                };
                let bubble = Bubble { ancestor, node };
                if ancestor != node && !skip.contains(&bubble) {
                    return Some(bubble);
                }
            }
        }
    }
    None
}

/// Keeps the best path through `bubble` and prunes the interiors of the others.
/// Returns the number of nodes removed.
pub fn solve_bubble(graph: &mut DeBruijnGraph, selector: &mut PathSelector, bubble: Bubble) -> usize {
    let paths = all_simple_paths(graph, bubble.ancestor, bubble.node);
    let candidates = score_paths(graph, paths);
    selector
        .select_best_path(graph, &candidates, EndpointPolicy::INTERIOR)
        .map(|selection| selection.nodes_removed)
        .unwrap_or(0)
}

/// Collapses bubbles until a scan finds none.
///
/// A bubble whose resolution removes nothing is remembered and skipped by
/// later scans, and the loop stops after `max_iterations` resolutions.
#[derive(Debug, Clone)]
pub struct BubbleResolver {
    pub max_iterations: usize,
}

impl Default for BubbleResolver {
    fn default() -> Self {
        Self { max_iterations: DEFAULT_MAX_BUBBLE_ITERATIONS }
    }
}

impl BubbleResolver {
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    pub fn resolve(&self, graph: &mut DeBruijnGraph, selector: &mut PathSelector) -> BubbleReport {
        let mut report = BubbleReport::default();
        let mut futile: AHashSet<Bubble> = AHashSet::new();

        while let Some(bubble) = find_bubble(graph, &futile) {
            if report.iterations >= self.max_iterations {
                warn!(
                    "Bubble resolution stopped after {} iterations with bubbles remaining",
                    report.iterations
                );
                report.capped = true;
                break;
            }
            report.iterations += 1;

            let removed = solve_bubble(graph, selector, bubble);
            if removed == 0 {
                debug!(
                    "Bubble {} -> {} did not shrink the graph; skipping it",
                    graph.label(bubble.ancestor),
                    graph.label(bubble.node)
                );
                futile.insert(bubble);
            } else {
                report.resolved += 1;
                report.nodes_removed += removed;
            }
        }

        info!(
            "Resolved {} bubbles, removed {} nodes",
            report.resolved, report.nodes_removed
        );
        report
    }
}
