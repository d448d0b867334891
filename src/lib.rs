//! De Bruijn graph assembly of short reads into contigs.
//!
//! Reads are cut into k-mers, the k-mers link (k-1)-mer nodes in a weighted
//! graph, bubbles and tips left by sequencing errors are pruned, and every
//! source-to-sink path of what remains is spelled out as a contig.

pub mod config;
pub mod error;
pub mod graph;
pub mod io;
pub mod kmer;
pub mod pipeline;
pub mod stats;
pub mod visualize;

pub use config::AssemblyConfig;
pub use error::{AssemblyError, Result};
