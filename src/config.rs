use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{AssemblyError, Result};

pub const DEFAULT_KMER_SIZE: usize = 22;
pub const DEFAULT_SEED: u64 = 9001;
pub const DEFAULT_MAX_BUBBLE_ITERATIONS: usize = 1000;

/// Parameters for one assembly run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssemblyConfig {
    /// K-mer length; graph nodes are (k-1)-mers
    pub kmer_size: usize,
    /// Seed for the path selector's tie-breaking
    pub seed: u64,
    /// Upper bound on bubble resolution rounds
    pub max_bubble_iterations: usize,
    /// Worker threads for path enumeration; 0 lets rayon decide
    pub threads: usize,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            kmer_size: DEFAULT_KMER_SIZE,
            seed: DEFAULT_SEED,
            max_bubble_iterations: DEFAULT_MAX_BUBBLE_ITERATIONS,
            threads: num_cpus::get(),
        }
    }
}

impl AssemblyConfig {
    pub fn with_kmer_size(mut self, kmer_size: usize) -> Self {
        self.kmer_size = kmer_size;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Rayon pool sized by `threads`
    pub fn thread_pool(&self) -> Result<ThreadPool> {
        Ok(ThreadPoolBuilder::new().num_threads(self.threads).build()?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kmer_size < 2 {
            return Err(AssemblyError::InvalidKmerSize(self.kmer_size));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AssemblyConfig::default();
        assert_eq!(config.kmer_size, 22);
        assert_eq!(config.seed, 9001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_thread_pool_uses_configured_threads() {
        let pool = AssemblyConfig::default().with_threads(2).thread_pool().unwrap();
        assert_eq!(pool.current_num_threads(), 2);
    }

    #[test]
    fn test_kmer_size_below_two_is_rejected() {
        let config = AssemblyConfig::default().with_kmer_size(1);
        assert!(matches!(config.validate(), Err(AssemblyError::InvalidKmerSize(1))));
    }
}
