use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use serde::Serialize;

use crate::config::AssemblyConfig;
use crate::error::Result;
use crate::graph::bubble::BubbleReport;
use crate::graph::contigs::Contig;
use crate::graph::tips::TipReport;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total_contigs: usize,
    pub total_length: usize,
    pub average_length: f64,
    pub longest: usize,
    pub n50: usize,
}

pub fn calculate_stats(contigs: &[Contig]) -> Stats {
    let mut lengths: Vec<usize> = contigs.iter().map(Contig::len).collect();
    lengths.sort_unstable();
    let total: usize = lengths.iter().sum();
    let total_contigs = lengths.len();
    let avg = if total_contigs > 0 { total as f64 / total_contigs as f64 } else { 0.0 };

    // Calculate N50
    let mut acc = 0;
    let half_total = total.div_ceil(2);
    let n50 = lengths.iter().rev().find(|&&len| {
        acc += len;
        acc >= half_total
    }).copied().unwrap_or(0);

    Stats {
        total_contigs,
        total_length: total,
        average_length: avg,
        longest: lengths.last().copied().unwrap_or(0),
        n50,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphSize {
    pub nodes: usize,
    pub edges: usize,
}

/// Summary of one assembly run
#[derive(Debug, Clone, Serialize)]
pub struct AssemblyReport {
    pub config: AssemblyConfig,
    pub distinct_kmers: usize,
    pub graph_built: GraphSize,
    pub graph_simplified: GraphSize,
    pub bubbles: BubbleReport,
    pub entry_tips: TipReport,
    pub exit_tips: TipReport,
    pub contigs: Stats,
}

impl AssemblyReport {
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}
