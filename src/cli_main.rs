use std::path::PathBuf;
use clap::Parser;

use dbgasm::config::{AssemblyConfig, DEFAULT_KMER_SIZE, DEFAULT_MAX_BUBBLE_ITERATIONS, DEFAULT_SEED};
use dbgasm::pipeline::assemble::RunOptions;

#[derive(Parser, Debug)]
#[command(name = "dbgasm", version, about = "Assemble reads into contigs with a de Bruijn graph", long_about = None)]
pub struct Cli {
    /// Input FASTQ(.gz) file
    #[arg(short, long)]
    pub input: PathBuf,

    /// K-mer size
    #[arg(short, long, default_value_t = DEFAULT_KMER_SIZE)]
    pub kmer_size: usize,

    /// Output FASTA(.gz) file
    #[arg(short, long, default_value = "contigs.fasta")]
    pub output: PathBuf,

    /// Save the simplified graph as a PNG image
    #[arg(short = 'f', long)]
    pub graph_image: Option<PathBuf>,

    /// Write a JSON run report
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Number of threads
    #[arg(long, default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Seed for breaking ties between equivalent paths
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Upper bound on bubble resolution rounds
    #[arg(long, default_value_t = DEFAULT_MAX_BUBBLE_ITERATIONS)]
    pub max_bubble_iterations: usize,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            graph_image: self.graph_image.clone(),
            report: self.report.clone(),
            config: AssemblyConfig {
                kmer_size: self.kmer_size,
                seed: self.seed,
                max_bubble_iterations: self.max_bubble_iterations,
                threads: self.threads,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["dbgasm", "-i", "reads.fq"]);
        let options = cli.run_options();

        assert_eq!(options.config.kmer_size, 22);
        assert_eq!(options.output, PathBuf::from("contigs.fasta"));
        assert!(options.graph_image.is_none());
        assert_eq!(options.config.seed, 9001);
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["dbgasm", "-k", "21"]).is_err());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["dbgasm", "-i", "r.fq", "-k", "31", "-o", "out.fa", "-f", "g.png"]);
        assert_eq!(cli.kmer_size, 31);
        assert_eq!(cli.output, PathBuf::from("out.fa"));
        assert_eq!(cli.graph_image, Some(PathBuf::from("g.png")));
    }
}
