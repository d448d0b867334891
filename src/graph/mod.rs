//! Graph module - de Bruijn graph construction, simplification and contig extraction

pub mod debruijn;
pub mod paths;
pub mod select;
pub mod bubble;
pub mod tips;
pub mod contigs;

pub use debruijn::{build_graph, DeBruijnGraph, NodeId};
pub use contigs::{get_contigs, Contig};
