//! K-mer extraction and counting
pub mod counter;

pub type Kmer = String;

pub use counter::{count_kmers, cut_kmers, try_count_kmers, KmerCounts};
