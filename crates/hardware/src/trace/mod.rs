//! Memory trace input.
//!
//! Traces are text files with one access per line, in the format produced by
//! `valgrind --log-fd=1 --tool=lackey --trace-mem=yes`:
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```
//!
//! Data accesses are conventionally indented by one space; instruction
//! fetches are not. Lines that do not match the format are skipped.

/// Line-oriented trace file reader.
pub mod reader;

/// A single decoded trace line.
pub mod record;

pub use reader::TraceReader;
pub use record::{AccessRecord, ParseRecordError};
