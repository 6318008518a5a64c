//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, EventError};

/// Map domain errors to a one-line message for stderr.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Event(EventError::UnknownStep(name)) => {
            format!("Unknown step {:?}. Run `stepcast steps` to list the catalog.", name)
        }
        other => other.to_string(),
    }
}
