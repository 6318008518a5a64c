//! CLI route: single route table and run context. Dispatches commands to the emitter.

use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, StepcastConfig};
use crate::error::ApiError;
use crate::telemetry::Emitter;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Result of a command: optional text for stdout and an optional exit code request.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    pub output: Option<String>,
    pub exit_code: Option<i32>,
}

/// Runtime context for CLI execution: loaded configuration and the emitter built from it.
pub struct RunContext {
    config: StepcastConfig,
    emitter: Emitter,
}

impl RunContext {
    /// Load configuration (global file, optional explicit file, environment) and build
    /// a stdout emitter from it.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        let emitter = config.events.build_emitter()?;
        Ok(Self { config, emitter })
    }

    /// Context around an already built emitter.
    pub fn with_emitter(config: StepcastConfig, emitter: Emitter) -> Self {
        Self { config, emitter }
    }

    pub fn config(&self) -> &StepcastConfig {
        &self.config
    }

    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    pub fn execute(&self, command: &Commands) -> Result<CommandOutcome, ApiError> {
        debug!(?command, "executing command");
        match command {
            Commands::Step { name, message } => {
                self.emitter.print_step_at(name, message)?;
                Ok(CommandOutcome::default())
            }
            Commands::Info { message } => {
                self.emitter.print_info(message)?;
                Ok(CommandOutcome::default())
            }
            Commands::Warning { message } => {
                self.emitter.print_warning(message)?;
                Ok(CommandOutcome::default())
            }
            Commands::Error {
                message,
                exit_code,
                context,
                exit,
            } => self.handle_error(message, *exit_code, context, *exit),
            Commands::Download {
                artifact,
                step,
                progress,
            } => {
                if let Some(step) = step {
                    self.emitter.set_step(step)?;
                }
                match progress {
                    Some(percent) => self.emitter.print_download_progress(artifact, *percent)?,
                    None => self.emitter.print_download(artifact)?,
                }
                Ok(CommandOutcome::default())
            }
            Commands::Steps => {
                let listing = self
                    .emitter
                    .registry()
                    .steps()
                    .iter()
                    .enumerate()
                    .map(|(index, step)| format!("{}\t{}", index, step.name))
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(CommandOutcome {
                    output: Some(listing),
                    exit_code: None,
                })
            }
        }
    }

    fn handle_error(
        &self,
        message: &str,
        exit_code: Option<i32>,
        context: &[String],
        exit: bool,
    ) -> Result<CommandOutcome, ApiError> {
        match exit_code {
            Some(code) => {
                let contexts = context
                    .iter()
                    .map(|pair| parse_context(pair))
                    .collect::<Result<Vec<_>, _>>()?;
                self.emitter.print_error_exit_code(message, code, &contexts)?;
            }
            None if !context.is_empty() => {
                return Err(ApiError::InvalidArgument(
                    "--context requires --exit-code".to_string(),
                ));
            }
            None if exit => {
                return Err(ApiError::InvalidArgument(
                    "--exit requires --exit-code".to_string(),
                ));
            }
            None => self.emitter.print_error(message)?,
        }
        Ok(CommandOutcome {
            output: None,
            exit_code: if exit { exit_code } else { None },
        })
    }
}

/// Parse one `KEY=VALUE` argument into a single-entry context map.
pub fn parse_context(pair: &str) -> Result<HashMap<String, String>, ApiError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.is_empty() => {
            Ok(HashMap::from([(key.to_string(), value.to_string())]))
        }
        _ => Err(ApiError::InvalidArgument(format!(
            "context must be KEY=VALUE, got '{}'",
            pair
        ))),
    }
}
