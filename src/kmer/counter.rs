use std::convert::Infallible;

use ahash::AHashMap;
use tracing::debug;

use crate::kmer::Kmer;

/// Occurrence count per k-mer across all reads
pub type KmerCounts = AHashMap<Kmer, u32>;

/// Iterates every length-`k` window of `read` with step 1.
/// Reads shorter than `k` produce nothing; windows holding a non-ASCII
/// byte are skipped.
pub fn cut_kmers(read: &str, k: usize) -> impl Iterator<Item = &str> {
    debug_assert!(k > 0, "k-mer size must be positive");
    read.as_bytes()
        .windows(k.max(1))
        .filter(|window| window.is_ascii())
        .filter_map(|window| std::str::from_utf8(window).ok())
}

/// Counts k-mers over an infallible read source
pub fn count_kmers<I, S>(reads: I, k: usize) -> KmerCounts
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match try_count_kmers(reads.into_iter().map(Ok::<S, Infallible>), k) {
        Ok(counts) => counts,
        Err(never) => match never {},
    }
}

/// Counts k-mers over a read source whose records may fail to load.
/// Stops at the first error.
pub fn try_count_kmers<I, S, E>(reads: I, k: usize) -> Result<KmerCounts, E>
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<str>,
{
    let mut counts = KmerCounts::new();
    let mut num_reads = 0usize;

    for read in reads {
        let read = read?;
        for kmer in cut_kmers(read.as_ref(), k) {
            match counts.get_mut(kmer) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(kmer.to_string(), 1);
                }
            }
        }
        num_reads += 1;
    }

    debug!("Counted {} distinct {}-mers from {} reads", counts.len(), k, num_reads);
    Ok(counts)
}
