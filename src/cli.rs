//! CLI domain: parse, route, and output only.
//! Event semantics live in `telemetry`; the route table just maps commands onto emitters.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use route::{parse_context, CommandOutcome, RunContext};
