//! Step registry: the ordered step catalog and the current-step cursor.

use parking_lot::Mutex;
use tracing::debug;

use crate::error::EventError;

/// One entry of the step catalog. Its index is its position in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
}

impl Step {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<&str> for Step {
    fn from(name: &str) -> Self {
        Step::new(name)
    }
}

impl From<String> for Step {
    fn from(name: String) -> Self {
        Step { name }
    }
}

/// Snapshot of the cursor taken under a single lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepPosition {
    pub index: Option<usize>,
    pub total: usize,
    pub name: Option<String>,
}

#[derive(Debug, Default)]
struct RegistryState {
    steps: Vec<Step>,
    current: Option<usize>,
}

impl RegistryState {
    fn move_to(&mut self, name: &str) -> Result<(), EventError> {
        let index = self
            .steps
            .iter()
            .position(|step| step.name == name)
            .ok_or_else(|| EventError::UnknownStep(name.to_string()))?;
        self.current = Some(index);
        Ok(())
    }

    fn position(&self) -> StepPosition {
        StepPosition {
            index: self.current,
            total: self.steps.len(),
            name: self
                .current
                .and_then(|i| self.steps.get(i))
                .map(|step| step.name.clone()),
        }
    }
}

/// Ordered step catalog plus cursor. Shared between emitters behind an `Arc`.
#[derive(Debug, Default)]
pub struct StepRegistry {
    state: Mutex<RegistryState>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_steps<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        let registry = Self::new();
        registry.register(steps);
        registry
    }

    /// Replace the catalog. The cursor returns to unset.
    pub fn register<I, S>(&self, steps: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        let mut state = self.state.lock();
        state.steps = steps.into_iter().map(Into::into).collect();
        state.current = None;
        debug!(total_steps = state.steps.len(), "registered step catalog");
    }

    /// Move the cursor to the step named `name`.
    ///
    /// Unknown names leave the cursor where it was.
    pub fn set_step(&self, name: &str) -> Result<(), EventError> {
        self.state.lock().move_to(name)
    }

    /// Move the cursor and snapshot the resulting position under the same lock, so
    /// no concurrent `set_step` can land in between.
    pub fn set_step_position(&self, name: &str) -> Result<StepPosition, EventError> {
        let mut state = self.state.lock();
        state.move_to(name)?;
        Ok(state.position())
    }

    pub fn total_steps(&self) -> usize {
        self.state.lock().steps.len()
    }

    /// Zero-based cursor position, `None` before the first successful `set_step`.
    pub fn current_step_index(&self) -> Option<usize> {
        self.state.lock().current
    }

    pub fn current_step(&self) -> Option<Step> {
        let state = self.state.lock();
        state.current.and_then(|i| state.steps.get(i).cloned())
    }

    pub fn position(&self) -> StepPosition {
        self.state.lock().position()
    }

    pub fn steps(&self) -> Vec<Step> {
        self.state.lock().steps.clone()
    }
}
