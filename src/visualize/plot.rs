use std::path::Path;

use ahash::AHashMap;
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::error::{AssemblyError, Result};
use crate::graph::debruijn::{DeBruijnGraph, NodeId};

/// Edges heavier than this are drawn as solid, thick lines
pub const HEAVY_EDGE_WEIGHT: u32 = 3;

type Edge = (NodeId, NodeId);

/// Split edges into (weight > threshold, weight <= threshold)
pub fn partition_edges(graph: &DeBruijnGraph, threshold: u32) -> (Vec<Edge>, Vec<Edge>) {
    let mut heavy = Vec::new();
    let mut light = Vec::new();
    for (from, to, weight) in graph.edges() {
        if weight > threshold {
            heavy.push((from, to));
        } else {
            light.push((from, to));
        }
    }
    (heavy, light)
}

fn plot_err<E: std::fmt::Display>(e: E) -> AssemblyError {
    AssemblyError::Plot(e.to_string())
}

/// Render the graph as a PNG with a seeded random layout
pub fn draw_graph(graph: &DeBruijnGraph, output: &Path, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let layout: AHashMap<NodeId, (f64, f64)> = graph
        .nodes()
        .into_iter()
        .map(|n| (n, (rng.gen::<f64>(), rng.gen::<f64>())))
        .collect();
    let (heavy, light) = partition_edges(graph, HEAVY_EDGE_WEIGHT);

    let root = BitMapBackend::new(output, (1024, 768)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(0f64..1f64, 0f64..1f64)
        .map_err(plot_err)?;

    let segment = |&(from, to): &Edge| vec![layout[&from], layout[&to]];

    chart
        .draw_series(light.iter().map(|e| PathElement::new(segment(e), BLUE.mix(0.5).stroke_width(2))))
        .map_err(plot_err)?;
    chart
        .draw_series(heavy.iter().map(|e| PathElement::new(segment(e), BLACK.stroke_width(6))))
        .map_err(plot_err)?;
    chart
        .draw_series(layout.values().map(|&pos| Circle::new(pos, 3, RED.filled())))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    info!(
        "Graph image written to {} ({} heavy, {} light edges)",
        output.display(),
        heavy.len(),
        light.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_edges_by_weight() {
        let graph = DeBruijnGraph::from_weighted_edges(vec![("A", "B", 3), ("B", "C", 4), ("C", "D", 1)]);
        let (heavy, light) = partition_edges(&graph, HEAVY_EDGE_WEIGHT);

        let b = graph.node_id("B").unwrap();
        let c = graph.node_id("C").unwrap();
        assert_eq!(heavy, vec![(b, c)]);
        assert_eq!(light.len(), 2);
    }

    #[test]
    fn test_draw_graph_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.png");
        let graph = DeBruijnGraph::from_weighted_edges(vec![("A", "B", 5), ("B", "C", 1)]);

        draw_graph(&graph, &path, 9001).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
