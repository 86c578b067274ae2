//! Trace Reader Tests.
//!
//! The reader must yield records for well-formed lines only, skip the rest,
//! and report an unopenable or unreadable trace instead of treating it as empty.

use std::io::{self, BufRead, Read, Write};

use csim_core::SimError;
use csim_core::common::AccessKind;
use csim_core::trace::{AccessRecord, TraceReader};
use pretty_assertions::assert_eq;

use crate::common::reader;

fn collect(trace: &str) -> Vec<AccessRecord> {
    reader(trace).map(Result::unwrap).collect()
}

#[test]
fn yields_records_in_order() {
    let records = collect("I 0400d7d4,8\n L 7ff000398,8\n S 7ff000398,4\n M 0421c7f0,4\n");
    let kinds: Vec<AccessKind> = records.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            AccessKind::Instruction,
            AccessKind::Load,
            AccessKind::Store,
            AccessKind::Modify
        ]
    );
    assert_eq!(records[1].address, 0x7_ff00_0398);
    assert_eq!(records[2].size, 4);
}

#[test]
fn skips_blank_and_malformed_lines() {
    let trace = "==31== Lackey\n\n L 10,1\ngarbage\n S 20\n M 30,2\n";
    let mut rdr = reader(trace);
    let records: Vec<AccessRecord> = rdr.by_ref().map(Result::unwrap).collect();

    assert_eq!(
        records,
        [
            AccessRecord::new(AccessKind::Load, 0x10, 1),
            AccessRecord::new(AccessKind::Modify, 0x30, 2),
        ]
    );
    assert_eq!(rdr.lines_read(), 6);
    assert_eq!(rdr.skipped(), 3, "blank lines are not counted as malformed");
}

#[test]
fn invalid_utf8_line_is_skipped() {
    let trace: &[u8] = b" L 10,1\n==1== \xff\xfe bad\n L 20,1\n";
    let mut rdr = TraceReader::new(trace);
    let records: Vec<AccessRecord> = rdr.by_ref().map(Result::unwrap).collect();

    assert_eq!(
        records,
        [
            AccessRecord::new(AccessKind::Load, 0x10, 1),
            AccessRecord::new(AccessKind::Load, 0x20, 1),
        ]
    );
    assert_eq!(rdr.lines_read(), 3);
    assert_eq!(rdr.skipped(), 1);
}

#[test]
fn last_line_without_newline_is_read() {
    assert_eq!(collect(" L 10,1\n S 18,1").len(), 2);
}

#[test]
fn empty_trace_yields_nothing() {
    assert!(collect("").is_empty());
}

#[test]
fn open_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, " L 10,1").unwrap();
    writeln!(file, " M 20,1").unwrap();

    let records: Vec<AccessRecord> = TraceReader::open(file.path())
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(records.len(), 2);
}

#[test]
fn open_missing_file_is_trace_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.trace");

    let err = TraceReader::open(&path).unwrap_err();
    match err {
        SimError::TraceUnavailable { path: p, source } => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), io::ErrorKind::NotFound);
        }
        other => panic!("expected TraceUnavailable, got {other:?}"),
    }
}

/// Source that yields `good` and then fails.
struct FailingSource {
    good: io::Cursor<Vec<u8>>,
}

impl Read for FailingSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.good.read(buf)?;
        if n == 0 {
            Err(io::Error::other("device unplugged"))
        } else {
            Ok(n)
        }
    }
}

impl BufRead for FailingSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.good.position() as usize >= self.good.get_ref().len() {
            return Err(io::Error::other("device unplugged"));
        }
        self.good.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.good.consume(amt);
    }
}

#[test]
fn read_error_is_reported_once_then_stream_ends() {
    let source = FailingSource {
        good: io::Cursor::new(b" L 10,1\n".to_vec()),
    };
    let mut rdr = TraceReader::with_path(source, "flaky.trace");

    assert!(matches!(rdr.next(), Some(Ok(_))));
    match rdr.next() {
        Some(Err(SimError::TraceUnavailable { path, .. })) => {
            assert_eq!(path.to_str(), Some("flaky.trace"));
        }
        other => panic!("expected TraceUnavailable, got {other:?}"),
    }
    assert!(rdr.next().is_none());
}
