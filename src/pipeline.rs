//! Sequential, fail-fast execution of migration steps.

use std::path::Path;

use anyhow::Result;
use thiserror::Error;

/// One stateless unit of migration work.
///
/// Steps share no mutable state other than the filesystem; ordering in the
/// pipeline is what guarantees each step's preconditions. Every step must be
/// re-runnable: against an already-migrated tree it either no-ops or fails
/// with a clear "already migrated" message, never corrupting files.
pub trait MigrationStep {
    fn name(&self) -> &'static str;

    /// Apply the step. All file references are relative to `working_dir`.
    fn apply(&self, working_dir: &Path) -> Result<()>;
}

/// Failure of a single step, halting the pipeline.
#[derive(Debug, Error)]
#[error("step `{step}` failed: {source:#}")]
pub struct PipelineError {
    pub step: &'static str,
    #[source]
    pub source: anyhow::Error,
}

/// Where the pipeline currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Pending,
    Running(usize),
    Failed(usize),
    Completed,
}

/// An explicitly assembled, ordered list of steps.
pub struct Pipeline {
    steps: Vec<Box<dyn MigrationStep>>,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(steps: Vec<Box<dyn MigrationStep>>) -> Self {
        Pipeline {
            steps,
            state: PipelineState::Pending,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn step_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.steps.iter().map(|s| s.name())
    }

    /// Run every step in order. The first error halts all remaining steps;
    /// nothing is rolled back or retried.
    pub fn run(&mut self, working_dir: &Path) -> Result<(), PipelineError> {
        for i in 0..self.steps.len() {
            self.state = PipelineState::Running(i);
            let step = &self.steps[i];

            tracing::info!(step = step.name(), "running");
            if let Err(source) = step.apply(working_dir) {
                self.state = PipelineState::Failed(i);
                return Err(PipelineError {
                    step: step.name(),
                    source,
                });
            }
            tracing::debug!(step = step.name(), "done");
        }

        self.state = PipelineState::Completed;
        Ok(())
    }
}
