// src/graph/debruijn.rs
use ahash::AHashMap;
use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;
use tracing::info;

use crate::kmer::KmerCounts;

/// Interned id of a (k-1)-mer node
pub type NodeId = u32;

/// Weighted de Bruijn graph over (k-1)-mers.
///
/// Node labels are interned: every distinct (k-1)-mer gets one `NodeId`, and
/// edges carry the summed occurrence count of the k-mer joining their ends.
/// Ids are never reused, so a removed node's label stays resolvable.
#[derive(Debug, Clone, Default)]
pub struct DeBruijnGraph {
    graph: DiGraphMap<NodeId, u32>,
    labels: Vec<String>,
    index: AHashMap<String, NodeId>,
}

impl DeBruijnGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from labelled edges, accumulating repeated pairs
    pub fn from_weighted_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, u32)>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            let from = graph.add_node(from);
            let to = graph.add_node(to);
            graph.add_weight(from, to, weight);
        }
        graph
    }

    /// Returns the node for `label`, inserting it if absent
    pub fn add_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.labels.len() as NodeId;
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        self.graph.add_node(id);
        id
    }

    /// Adds `count` to the edge `from -> to`, creating it if needed
    pub fn add_weight(&mut self, from: NodeId, to: NodeId, count: u32) {
        match self.graph.edge_weight_mut(from, to) {
            Some(weight) => *weight += count,
            None => {
                self.graph.add_edge(from, to, count);
            }
        }
    }

    /// Removes a node and every edge touching it. Returns false if it was absent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        if !self.graph.remove_node(id) {
            return false;
        }
        if let Some(label) = self.labels.get(id as usize) {
            self.index.remove(label);
        }
        true
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id as usize]
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.graph.contains_node(id)
    }

    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<u32> {
        self.graph.edge_weight(from, to).copied()
    }

    /// Current nodes in graph order
    pub fn nodes(&self) -> Vec<NodeId> {
        self.graph.nodes().collect()
    }

    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors_directed(id, Direction::Incoming)
    }

    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.neighbors_directed(id, Direction::Outgoing)
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.predecessors(id).count()
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.successors(id).count()
    }

    /// Nodes without predecessors
    pub fn source_nodes(&self) -> Vec<NodeId> {
        self.graph
            .nodes()
            .filter(|&n| self.in_degree(n) == 0)
            .collect()
    }

    /// Nodes without successors
    pub fn sink_nodes(&self) -> Vec<NodeId> {
        self.graph
            .nodes()
            .filter(|&n| self.out_degree(n) == 0)
            .collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, u32)> + '_ {
        self.graph.all_edges().map(|(from, to, &weight)| (from, to, weight))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn total_weight(&self) -> u64 {
        self.edges().map(|(_, _, w)| w as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Sorted node labels; stable across builds of the same graph
    pub fn node_labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.graph.nodes().map(|n| self.label(n).to_string()).collect();
        labels.sort_unstable();
        labels
    }

    /// Sorted `(from, to, weight)` triples by label
    pub fn labelled_edges(&self) -> Vec<(String, String, u32)> {
        let mut edges: Vec<(String, String, u32)> = self
            .edges()
            .map(|(from, to, w)| (self.label(from).to_string(), self.label(to).to_string(), w))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Underlying petgraph map, for running petgraph algorithms
    pub fn as_graphmap(&self) -> &DiGraphMap<NodeId, u32> {
        &self.graph
    }
}

/// (prefix, suffix) of a k-mer, split on character boundaries.
/// None for k-mers shorter than two characters.
fn split_kmer(kmer: &str) -> Option<(&str, &str)> {
    let (second, _) = kmer.char_indices().nth(1)?;
    let (last, _) = kmer.char_indices().last()?;
    Some((&kmer[..last], &kmer[second..]))
}

/// Build the weighted overlap graph from k-mer counts.
///
/// Each k-mer links its (k-1)-prefix to its (k-1)-suffix. K-mers are inserted
/// in lexicographic order so node order does not depend on hash iteration.
pub fn build_graph(kmer_counts: &KmerCounts) -> DeBruijnGraph {
    let mut kmers: Vec<(&str, u32)> = kmer_counts
        .iter()
        .map(|(kmer, &count)| (kmer.as_str(), count))
        .collect();
    kmers.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let mut graph = DeBruijnGraph::new();
    for (kmer, count) in kmers {
        if count == 0 {
            continue;
        }
        let Some((prefix, suffix)) = split_kmer(kmer) else {
            continue;
        };
        let prefix = graph.add_node(prefix);
        let suffix = graph.add_node(suffix);
        graph.add_weight(prefix, suffix, count);
    }

    info!(
        "Built de Bruijn graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}
