use tracing::info;

use crate::graph::debruijn::{DeBruijnGraph, NodeId};
use crate::graph::paths::{all_simple_paths, has_path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contig {
    pub id: usize,
    pub sequence: String,
    /// Nodes the contig was spelled from
    pub path: Vec<NodeId>,
}

impl Contig {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Spell a path: the first node in full, then the last base of each following node
pub fn path_to_sequence(graph: &DeBruijnGraph, path: &[NodeId]) -> String {
    let mut sequence = String::new();
    for (i, &node) in path.iter().enumerate() {
        let label = graph.label(node);
        if i == 0 {
            sequence.push_str(label);
        } else if let Some(last) = label.chars().last() {
            sequence.push(last);
        }
    }
    sequence
}

/// Extract one contig per simple path between every (source, sink) pair.
///
/// Pairs are visited source-major; pairs without a connecting path are
/// skipped. Identical sequences reached from different pairs are all kept.
pub fn get_contigs(graph: &DeBruijnGraph, starting_nodes: &[NodeId], ending_nodes: &[NodeId]) -> Vec<Contig> {
    let mut contigs = Vec::new();

    for &start in starting_nodes {
        for &end in ending_nodes {
            if start == end || !has_path(graph, start, end) {
                continue;
            }
            for path in all_simple_paths(graph, start, end) {
                contigs.push(Contig {
                    id: contigs.len(),
                    sequence: path_to_sequence(graph, &path),
                    path,
                });
            }
        }
    }

    info!("Extracted {} contigs", contigs.len());
    contigs
}
