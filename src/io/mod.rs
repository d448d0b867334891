//! IO module - FASTQ read sources and FASTA contig output

pub mod fastq;
pub mod fasta;
