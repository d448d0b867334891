// src/io/fasta.rs
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::graph::contigs::Contig;

/// Sequence lines are wrapped at this many bases
pub const LINE_WIDTH: usize = 80;

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

impl FastaWriter {
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        if path.extension().map_or(false, |ext| ext == "gz") {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(FastaWriter::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(FastaWriter::Plain(BufWriter::new(file)))
        }
    }

    fn inner(&mut self) -> &mut dyn Write {
        match self {
            FastaWriter::Plain(writer) => writer,
            FastaWriter::Compressed(writer) => writer,
        }
    }

    /// Write `>contig_<index> len=<length>` followed by the wrapped sequence
    pub fn write_contig(&mut self, contig: &Contig, index: usize) -> io::Result<()> {
        let writer = self.inner();
        writeln!(writer, ">contig_{} len={}", index, contig.len())?;
        write_wrapped(writer, &contig.sequence, LINE_WIDTH)
    }

    /// Flush buffers and, for gzip output, write the trailer
    pub fn finish(self) -> io::Result<()> {
        match self {
            FastaWriter::Plain(mut writer) => writer.flush(),
            FastaWriter::Compressed(writer) => {
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?;
                Ok(())
            }
        }
    }
}

fn write_wrapped(writer: &mut dyn Write, sequence: &str, width: usize) -> io::Result<()> {
    if sequence.is_empty() {
        return writeln!(writer);
    }
    for line in sequence.as_bytes().chunks(width) {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Write all contigs to `path`, numbered by their position in `contigs`
pub fn save_contigs(contigs: &[Contig], path: &Path) -> io::Result<()> {
    let mut writer = FastaWriter::new(path)?;
    for (index, contig) in contigs.iter().enumerate() {
        writer.write_contig(contig, index)?;
    }
    writer.finish()
}
