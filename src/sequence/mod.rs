//! Line-oriented files of 64-bit integers.
//!
//! Not part of the keyed tables: the demonstration binary uses these to
//! sort an external data file. One decimal integer per line.

pub mod reader;
pub mod writer;

pub use reader::{read_long_sequence, SequenceReader};
pub use writer::{write_long_sequence, SequenceWriter};
