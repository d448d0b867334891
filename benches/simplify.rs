use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dbgasm::config::AssemblyConfig;
use dbgasm::kmer::count_kmers;
use dbgasm::pipeline::assemble::assemble_kmers;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Reads tiled across a random genome, with an occasional substitution
fn generate_reads(genome_len: usize, read_len: usize, step: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bases = ['A', 'C', 'G', 'T'];
    let genome: Vec<char> = (0..genome_len).map(|_| bases[rng.gen_range(0..4)]).collect();

    (0..genome_len.saturating_sub(read_len))
        .step_by(step)
        .map(|start| {
            let mut read: Vec<char> = genome[start..start + read_len].to_vec();
            if rng.gen_bool(0.1) {
                let pos = rng.gen_range(0..read_len);
                read[pos] = bases[rng.gen_range(0..4)];
            }
            read.into_iter().collect()
        })
        .collect()
}

fn bench_kmer_counting(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmer_counting");
    for genome_len in [1_000, 10_000] {
        let reads = generate_reads(genome_len, 100, 10, 1);
        let total_bases: usize = reads.iter().map(|r| r.len()).sum();
        group.throughput(Throughput::Bytes(total_bases as u64));
        group.bench_with_input(BenchmarkId::from_parameter(genome_len), &reads, |b, reads| {
            b.iter(|| count_kmers(black_box(reads), 21))
        });
    }
    group.finish();
}

fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_kmers");
    group.sample_size(10);
    for genome_len in [500, 2_000] {
        let reads = generate_reads(genome_len, 100, 10, 2);
        let counts = count_kmers(&reads, 21);
        let config = AssemblyConfig::default().with_kmer_size(21);
        group.bench_with_input(BenchmarkId::from_parameter(genome_len), &counts, |b, counts| {
            b.iter(|| assemble_kmers(black_box(counts), &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_kmer_counting, bench_assembly);
criterion_main!(benches);
