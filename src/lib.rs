//! Stepcast: Structured Step Events
//!
//! Emits one machine-parseable JSON event per call so that supervisors (IDE plugins,
//! dashboards, automation scripts) can follow multi-step command-line operations
//! without scraping human-readable output.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod telemetry;

pub use error::{ApiError, EventError};
pub use telemetry::{Emitter, Event, EventKind, OutputSink, Step, StepRegistry};
