use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Writes a sequence file, one decimal integer per line.
///
/// The target is created or truncated on open. Values are buffered;
/// [`finish`](Self::finish) flushes them. Dropping without `finish` still
/// flushes on a best-effort basis but swallows the error.
pub struct SequenceWriter {
    writer: BufWriter<File>,
    written: usize,
}

impl SequenceWriter {
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(SequenceWriter {
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn append(&mut self, value: i64) -> Result<()> {
        writeln!(self.writer, "{value}")?;
        self.written += 1;
        Ok(())
    }

    /// Number of values appended so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush buffered lines to the file.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;
        Ok(self.written)
    }
}

/// Write `values` to `path` in input order, replacing any existing file.
pub fn write_long_sequence(values: &[i64], path: &Path) -> Result<()> {
    let mut writer = SequenceWriter::new(path)?;
    for &value in values {
        writer.append(value)?;
    }
    writer.finish()?;
    Ok(())
}
