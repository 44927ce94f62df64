use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

const BOM: char = '\u{FEFF}';

/// Reads a sequence file.
///
/// Loads the entire file into memory, then parses line by line.
/// Blank lines are skipped; surrounding whitespace and a leading byte-order
/// mark are stripped. The first non-numeric line ends iteration with
/// [`Error::Parse`].
pub struct SequenceReader {
    data: String,
}

impl SequenceReader {
    /// Open a sequence file for reading.
    pub fn new(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(SequenceReader { data })
    }

    /// Parse from an in-memory string.
    pub fn from_text(data: impl Into<String>) -> Self {
        SequenceReader { data: data.into() }
    }

    pub fn iter(&self) -> SequenceIterator<'_> {
        SequenceIterator {
            lines: self.data.lines().enumerate(),
            failed: false,
        }
    }
}

/// Iterator over parsed values. Yields at most one error, then stops.
pub struct SequenceIterator<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    failed: bool,
}

impl Iterator for SequenceIterator<'_> {
    type Item = Result<i64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for (index, raw) in self.lines.by_ref() {
            let line = raw.trim().trim_start_matches(BOM).trim();
            if line.is_empty() {
                continue;
            }
            return match line.parse::<i64>() {
                Ok(value) => Some(Ok(value)),
                Err(_) => {
                    self.failed = true;
                    Some(Err(Error::Parse {
                        line: index + 1,
                        content: line.to_owned(),
                    }))
                }
            };
        }
        None
    }
}

/// Read every value from `path`, in file order.
pub fn read_long_sequence(path: &Path) -> Result<Vec<i64>> {
    SequenceReader::new(path)?.iter().collect()
}
