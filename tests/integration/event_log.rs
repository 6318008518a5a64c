//! Event log tee: a second copy of the stream, never a source of emitter failures.

use std::io;
use std::sync::Arc;
use stepcast::config::EventsConfig;
use stepcast::telemetry::{Emitter, EventLog, MemorySink, OutputSink, StepRegistry};
use stepcast::EventError;
use tempfile::TempDir;

struct ClosedPipe;

impl io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "reader went away"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_event_log_mirrors_stdout_stream() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("events.jsonl");
    let buffer = MemorySink::new();
    let emitter = Emitter::new(Arc::new(StepRegistry::with_steps(["Fetch"])))
        .with_sink(OutputSink::new(buffer.clone()))
        .with_event_log(EventLog::open(&path).unwrap());

    emitter.set_step("Fetch").unwrap();
    emitter.print_step("fetching").unwrap();
    emitter.print_info("fetched").unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), buffer.contents());
}

#[test]
fn test_sink_failure_surfaces_and_skips_event_log() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("events.jsonl");
    let emitter = Emitter::new(Arc::new(StepRegistry::new()))
        .with_sink(OutputSink::new(ClosedPipe))
        .with_event_log(EventLog::open(&path).unwrap());

    let err = emitter.print_warning("lost").unwrap_err();
    assert!(matches!(err, EventError::SinkWrite(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_config_built_emitter_tees_to_configured_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("events.jsonl");
    let events = EventsConfig {
        event_log: Some(path.clone()),
        steps: vec!["Fetch".to_string()],
        ..EventsConfig::default()
    };
    let emitter = events.build_emitter().unwrap();
    let buffer = MemorySink::new();
    let emitter = emitter.with_sink(OutputSink::new(buffer.clone()));

    emitter.print_info("hello").unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), buffer.contents());
}
