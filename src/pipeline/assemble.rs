use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::AssemblyConfig;
use crate::error::Result;
use crate::graph::bubble::BubbleResolver;
use crate::graph::contigs::{get_contigs, Contig};
use crate::graph::debruijn::{build_graph, DeBruijnGraph};
use crate::graph::select::PathSelector;
use crate::graph::tips::{solve_entry_tips, solve_out_tips};
use crate::io::fasta::save_contigs;
use crate::io::fastq::FastqFile;
use crate::kmer::{count_kmers, try_count_kmers, KmerCounts};
use crate::stats::{calculate_stats, AssemblyReport, GraphSize};
use crate::visualize::plot::draw_graph;

/// Final graph, contigs and run summary
#[derive(Debug, Clone)]
pub struct Assembly {
    pub graph: DeBruijnGraph,
    pub contigs: Vec<Contig>,
    pub report: AssemblyReport,
}

fn graph_size(graph: &DeBruijnGraph) -> GraphSize {
    GraphSize { nodes: graph.node_count(), edges: graph.edge_count() }
}

/// Build, simplify and walk the graph for already-counted k-mers.
///
/// Stages run in order: bubbles to a fixpoint, one entry-tip pass, one
/// exit-tip pass, then contig extraction from the remaining sources and sinks.
pub fn assemble_kmers(kmer_counts: &KmerCounts, config: &AssemblyConfig) -> Result<Assembly> {
    config.validate()?;
    let pool = config.thread_pool()?;
    debug!("Simplifying on {} threads", pool.current_num_threads());

    let mut graph = build_graph(kmer_counts);
    let graph_built = graph_size(&graph);
    let mut selector = PathSelector::with_seed(config.seed);

    let bubbles = BubbleResolver::new(config.max_bubble_iterations).resolve(&mut graph, &mut selector);

    let (entry_tips, exit_tips) = pool.install(|| {
        let starting_nodes = graph.source_nodes();
        let entry_tips = solve_entry_tips(&mut graph, &mut selector, &starting_nodes);

        let ending_nodes = graph.sink_nodes();
        let exit_tips = solve_out_tips(&mut graph, &mut selector, &ending_nodes);
        (entry_tips, exit_tips)
    });

    let contigs = get_contigs(&graph, &graph.source_nodes(), &graph.sink_nodes());
    let report = AssemblyReport {
        config: config.clone(),
        distinct_kmers: kmer_counts.len(),
        graph_built,
        graph_simplified: graph_size(&graph),
        bubbles,
        entry_tips,
        exit_tips,
        contigs: calculate_stats(&contigs),
    };

    info!(
        "Simplified graph from {} to {} nodes; {} contigs, N50 {}",
        report.graph_built.nodes,
        report.graph_simplified.nodes,
        report.contigs.total_contigs,
        report.contigs.n50
    );
    Ok(Assembly { graph, contigs, report })
}

/// Assemble in-memory reads
pub fn assemble_reads<I, S>(reads: I, config: &AssemblyConfig) -> Result<Assembly>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    config.validate()?;
    let kmer_counts = count_kmers(reads, config.kmer_size);
    assemble_kmers(&kmer_counts, config)
}

/// Assemble reads streamed from a FASTQ file
pub fn assemble_fastq(input: &FastqFile, config: &AssemblyConfig) -> Result<Assembly> {
    config.validate()?;
    info!("Counting {}-mers in {}", config.kmer_size, input.path().display());
    let kmer_counts = try_count_kmers(input.sequences()?, config.kmer_size)?;
    assemble_kmers(&kmer_counts, config)
}

/// Everything one command-line run needs
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub graph_image: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub config: AssemblyConfig,
}

/// Assemble `input`, write contigs and the optional image and report
pub fn run(options: &RunOptions) -> Result<AssemblyReport> {
    options.config.validate()?;
    let input = FastqFile::new(&options.input)?;

    let assembly = assemble_fastq(&input, &options.config)?;

    save_contigs(&assembly.contigs, &options.output)?;
    info!("Wrote {} contigs to {}", assembly.contigs.len(), options.output.display());

    if let Some(image) = &options.graph_image {
        draw_graph(&assembly.graph, image, options.config.seed)?;
    }
    if let Some(report_path) = &options.report {
        assembly.report.write_json(report_path)?;
        info!("Report written to {}", report_path.display());
    }

    Ok(assembly.report)
}
