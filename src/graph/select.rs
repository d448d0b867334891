use ahash::AHashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::statistics::Statistics;
use tracing::debug;

use crate::config::DEFAULT_SEED;
use crate::graph::debruijn::{DeBruijnGraph, NodeId};
use crate::graph::paths::ScoredPath;

/// Deviation at or below this counts as "all equal"
const STD_DEV_EPSILON: f64 = 1e-9;

/// Which ends of a losing path are removed along with its interior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndpointPolicy {
    pub delete_entry: bool,
    pub delete_sink: bool,
}

impl EndpointPolicy {
    /// Keep both ends; used for bubbles
    pub const INTERIOR: Self = Self { delete_entry: false, delete_sink: false };
    /// Drop the dangling start; used for entry tips
    pub const ENTRY: Self = Self { delete_entry: true, delete_sink: false };
    /// Drop the dangling end; used for exit tips
    pub const SINK: Self = Self { delete_entry: false, delete_sink: true };

    /// Slice of `path` that this policy deletes
    pub fn doomed<'a>(&self, path: &'a [NodeId]) -> &'a [NodeId] {
        let n = path.len();
        match (self.delete_entry, self.delete_sink) {
            (true, true) => path,
            (true, false) => &path[..n.saturating_sub(1)],
            (false, true) => &path[n.min(1)..],
            (false, false) if n >= 2 => &path[1..n - 1],
            (false, false) => &[],
        }
    }
}

/// Removes each path's nodes from the graph according to `policy`, sparing
/// any node in `protected`. Returns the number of nodes actually removed.
pub fn remove_paths<'a, I>(
    graph: &mut DeBruijnGraph,
    paths: I,
    policy: EndpointPolicy,
    protected: &AHashSet<NodeId>,
) -> usize
where
    I: IntoIterator<Item = &'a [NodeId]>,
{
    let mut removed = 0;
    for path in paths {
        for node in policy.doomed(path) {
            if !protected.contains(node) && graph.remove_node(*node) {
                removed += 1;
            }
        }
    }
    removed
}

/// Outcome of one selection
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Index of the kept candidate
    pub best: usize,
    pub nodes_removed: usize,
}

/// Picks the best of several alternative paths and prunes the rest.
///
/// Ranking: highest average weight when averages differ, otherwise longest
/// path when lengths differ, otherwise a seeded random pick. Ties on the
/// deciding metric go to the earliest candidate.
#[derive(Debug, Clone)]
pub struct PathSelector {
    rng: StdRng,
}

impl Default for PathSelector {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl PathSelector {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Index of the candidate to keep, or None when there are no candidates
    pub fn choose(&mut self, candidates: &[ScoredPath]) -> Option<usize> {
        match candidates.len() {
            0 => return None,
            1 => return Some(0),
            _ => {}
        }

        let weights: Vec<f64> = candidates.iter().map(|c| c.average_weight).collect();
        if weights.iter().population_std_dev() > STD_DEV_EPSILON {
            return Some(first_max(&weights));
        }

        let lengths: Vec<f64> = candidates.iter().map(|c| c.length as f64).collect();
        if lengths.iter().population_std_dev() > STD_DEV_EPSILON {
            return Some(first_max(&lengths));
        }

        Some(self.rng.gen_range(0..candidates.len()))
    }

    /// Keeps the best candidate and removes every other one from `graph`.
    ///
    /// Nodes of the kept path are never removed, even when a losing candidate
    /// shares them. A single candidate is kept without touching the graph.
    pub fn select_best_path(
        &mut self,
        graph: &mut DeBruijnGraph,
        candidates: &[ScoredPath],
        policy: EndpointPolicy,
    ) -> Option<Selection> {
        let best = self.choose(candidates)?;
        let kept = &candidates[best].nodes;
        let protected: AHashSet<NodeId> = kept.iter().copied().collect();

        let losers = candidates
            .iter()
            .filter(|c| &c.nodes != kept)
            .map(|c| c.nodes.as_slice());
        let nodes_removed = remove_paths(graph, losers, policy, &protected);

        debug!(
            "Kept path {} of {} (length {}, avg weight {:.2}), removed {} nodes",
            best,
            candidates.len(),
            candidates[best].length,
            candidates[best].average_weight,
            nodes_removed
        );
        Some(Selection { best, nodes_removed })
    }
}

/// Index of the first maximum
fn first_max(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = i;
        }
    }
    best
}
