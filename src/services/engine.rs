//! Caller-facing façade over the state machine and formatter.

use std::sync::Arc;

use crate::domain::models::{AssessmentInput, Report};
use crate::domain::ports::{CompletionService, ModelParams};
use crate::services::report_formatter;
use crate::services::state_machine::AssessmentStateMachine;

/// One-shot assessment engine: run an input through the full pipeline and
/// project the terminal context into a report.
///
/// The engine holds no state between runs; each call builds a fresh context
/// and discards it after formatting.
pub struct AssessmentEngine {
    machine: AssessmentStateMachine,
}

impl AssessmentEngine {
    pub fn new(service: Arc<dyn CompletionService>, params: ModelParams) -> Self {
        Self {
            machine: AssessmentStateMachine::new(service, params),
        }
    }

    /// Wrap a pre-built state machine (used by tests).
    pub fn from_machine(machine: AssessmentStateMachine) -> Self {
        Self { machine }
    }

    /// Run a single assessment to completion or failure.
    pub async fn run(&self, input: AssessmentInput) -> Report {
        let ctx = self.machine.run(input).await;
        report_formatter::format(&ctx)
    }
}
