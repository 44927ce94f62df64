use std::io::{self, Write};
use std::time::Instant;

use log::debug;

/// Write the time elapsed since `start` under `label`, in nanoseconds.
///
/// Purely observational: the measured operation has already finished.
pub fn report_elapsed<W: Write>(out: &mut W, start: Instant, label: &str) -> io::Result<()> {
    let nanos = start.elapsed().as_nanos();
    debug!("{label}: {nanos} ns");
    writeln!(out, "  [time] {label}: {nanos} ns")
}
