// src/io/fastq.rs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    pub header: String,
    pub sequence: String,
    pub plus: String,
    pub quality: String,
}

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use flate2::read::MultiGzDecoder;
use tracing::warn;

use crate::error::{AssemblyError, Result};

/// Open a FASTQ file for reading, handles gzipped files automatically
pub fn open_fastq(path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
    let file = File::open(path)?;
    if path.extension().map_or(false, |ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Stream FASTQ records for memory-efficient processing
///
/// Records are parsed four lines at a time. Blank lines between records are
/// skipped, and a trailing partial record is dropped with a warning. A record
/// without its `@` header or `+` separator, or with a non-ASCII sequence,
/// yields an `InvalidData` error and ends the stream.
pub fn stream_fastq_records<R: BufRead>(reader: R) -> FastqStreamParser<io::Lines<R>> {
    FastqStreamParser { lines: reader.lines(), line_number: 0, finished: false }
}

/// Iterator adaptor to handle streaming FASTQ parsing
pub struct FastqStreamParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    lines: I,
    line_number: usize,
    finished: bool,
}

fn malformed(line_number: usize, reason: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("FASTQ line {}: {}", line_number, reason))
}

impl<I> FastqStreamParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    fn next_line(&mut self) -> Option<io::Result<String>> {
        self.lines.next().map(|line| {
            self.line_number += 1;
            line.map(|mut l| {
                if l.ends_with('\r') {
                    l.pop();
                }
                l
            })
        })
    }

    fn read_record(&mut self) -> Option<io::Result<FastqRecord>> {
        let header = loop {
            match self.next_line()? {
                Ok(line) if line.is_empty() => continue,
                Ok(line) => break line,
                Err(e) => return Some(Err(e)),
            }
        };
        let header_line = self.line_number;
        if !header.starts_with('@') {
            return Some(Err(malformed(header_line, format!("expected '@' header, found {:?}", header))));
        }

        let mut fields: [String; 3] = Default::default();
        for (read, field) in fields.iter_mut().enumerate() {
            match self.next_line() {
                Some(Ok(line)) => *field = line,
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    warn!(
                        "Dropping truncated FASTQ record {} at line {} ({} of 4 lines)",
                        header, header_line, read + 1
                    );
                    return None;
                }
            }
        }
        let [sequence, plus, quality] = fields;

        if !plus.starts_with('+') {
            return Some(Err(malformed(
                header_line + 2,
                format!("expected '+' separator, found {:?}", plus),
            )));
        }
        if !sequence.is_ascii() {
            return Some(Err(malformed(header_line + 1, "sequence contains non-ASCII characters".to_string())));
        }
        Some(Ok(FastqRecord { header, sequence, plus, quality }))
    }
}

impl<I> Iterator for FastqStreamParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<FastqRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let record = self.read_record();
        if !matches!(record, Some(Ok(_))) {
            self.finished = true;
        }
        record
    }
}

/// A FASTQ file that can be read from the start any number of times
#[derive(Debug, Clone)]
pub struct FastqFile {
    path: PathBuf,
}

impl FastqFile {
    /// Fails if `path` is missing or is a directory
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        AssemblyError::check_input_file(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fresh pass over the read sequences
    pub fn sequences(&self) -> io::Result<impl Iterator<Item = io::Result<String>>> {
        let reader = open_fastq(&self.path)?;
        Ok(stream_fastq_records(reader).map(|record| record.map(|r| r.sequence)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use tempfile::NamedTempFile;

    const FASTQ: &str = "@r1\nACGTAC\n+\nIIIIII\n@r2\nGGCCTT\n+\nIIIIII\n";

    #[test]
    fn test_stream_records() {
        let records: Vec<FastqRecord> = stream_fastq_records(Cursor::new(FASTQ))
            .collect::<io::Result<_>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].header, "@r1");
        assert_eq!(records[1].sequence, "GGCCTT");
    }

    #[test]
    fn test_crlf_and_truncated_record() {
        let input = "@r1\r\nACGT\r\n+\r\nIIII\r\n@r2\nTT\n";
        let sequences: Vec<String> = stream_fastq_records(Cursor::new(input))
            .map(|r| r.unwrap().sequence)
            .collect();

        assert_eq!(sequences, vec!["ACGT"]);
    }

    #[test]
    fn test_blank_lines_between_records_are_skipped() {
        let input = "@r1\nACGT\n+\nIIII\n\n@r2\nGGCC\n+\nIIII\n\n";
        let sequences: Vec<String> = stream_fastq_records(Cursor::new(input))
            .map(|r| r.unwrap().sequence)
            .collect();

        assert_eq!(sequences, vec!["ACGT", "GGCC"]);
    }

    #[test]
    fn test_misframed_record_is_an_error() {
        // The blank line inside r1 lands where the '+' separator belongs.
        let input = "@r1\nACGT\n\n+\nIIII\n";
        let results: Vec<io::Result<FastqRecord>> = stream_fastq_records(Cursor::new(input)).collect();

        assert_eq!(results.len(), 1);
        let err = results.into_iter().next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("'+' separator"));
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let err = stream_fastq_records(Cursor::new("ACGT\n+\nIIII\n"))
            .next()
            .unwrap()
            .unwrap_err();
        assert!(err.to_string().contains("line 1: expected '@' header"));
    }

    #[test]
    fn test_non_ascii_sequence_is_an_error() {
        let err = stream_fastq_records(Cursor::new("@r1\nACGT\u{e9}\n+\nIIIII\n"))
            .next()
            .unwrap()
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("line 2: sequence contains non-ASCII"));
    }

    #[test]
    fn test_fastq_file_is_restartable() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", FASTQ).unwrap();
        let source = FastqFile::new(file.path()).unwrap();

        for _ in 0..2 {
            let sequences: Vec<String> = source.sequences().unwrap().map(|s| s.unwrap()).collect();
            assert_eq!(sequences, vec!["ACGTAC", "GGCCTT"]);
        }
    }

    #[test]
    fn test_gzipped_input() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(FASTQ.as_bytes()).unwrap();
        let mut file = tempfile::Builder::new().suffix(".fq.gz").tempfile().unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();

        let source = FastqFile::new(file.path()).unwrap();
        let sequences: Vec<String> = source.sequences().unwrap().map(|s| s.unwrap()).collect();
        assert_eq!(sequences, vec!["ACGTAC", "GGCCTT"]);
    }
}
