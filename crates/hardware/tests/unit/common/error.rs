//! Error Formatting Tests.

use std::error::Error;
use std::io;

use csim_core::SimError;

#[test]
fn configuration_invalid_message() {
    let e = SimError::config("associativity (E) must be at least 1");
    assert_eq!(
        e.to_string(),
        "invalid cache configuration: associativity (E) must be at least 1"
    );
    assert!(e.source().is_none());
}

#[test]
fn trace_unavailable_names_path_and_keeps_source() {
    let e = SimError::trace(
        "traces/missing.trace",
        io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
    );
    let msg = e.to_string();
    assert!(msg.starts_with("trace 'traces/missing.trace' unavailable"), "{msg}");
    assert!(msg.contains("No such file or directory"), "{msg}");
    assert!(e.source().is_some());
}

#[test]
fn io_errors_convert_to_output() {
    let e: SimError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
    assert!(matches!(e, SimError::Output(_)));
    assert_eq!(e.to_string(), "output failed: pipe closed");
}
