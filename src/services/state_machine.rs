//! The assessment state machine.
//!
//! A linear three-phase cycle with a single escape edge: after every stage
//! the machine inspects the context for a recorded failure and, if one is
//! present, transitions to the absorbing `Error` state without issuing any
//! further completion calls.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::models::{AssessmentContext, AssessmentInput, AssessmentStatus};
use crate::domain::ports::{CompletionService, ModelParams};
use crate::services::stages::{EvaluateStage, ReassessStage, ReflectStage, Stage};

/// Explicit machine states.
///
/// `Completed` and `Error` are absorbing; every working state routes to
/// `Error` when its stage records a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Evaluate,
    Reflect,
    Reassess,
    Completed,
    Error,
}

impl MachineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

/// Sequences the evaluate, reflect, and reassess stages over one context.
///
/// The machine never retries a stage and never runs stages concurrently:
/// each stage fully completes, including its completion call, before the
/// next begins.
pub struct AssessmentStateMachine {
    evaluate: Box<dyn Stage>,
    reflect: Box<dyn Stage>,
    reassess: Box<dyn Stage>,
}

impl AssessmentStateMachine {
    /// Wire the standard three stages to one completion service.
    pub fn new(service: Arc<dyn CompletionService>, params: ModelParams) -> Self {
        Self {
            evaluate: Box::new(EvaluateStage::new(Arc::clone(&service), params.clone())),
            reflect: Box::new(ReflectStage::new(Arc::clone(&service), params.clone())),
            reassess: Box::new(ReassessStage::new(service, params)),
        }
    }

    /// Substitute arbitrary stage implementations (used by tests).
    pub fn with_stages(
        evaluate: Box<dyn Stage>,
        reflect: Box<dyn Stage>,
        reassess: Box<dyn Stage>,
    ) -> Self {
        Self {
            evaluate,
            reflect,
            reassess,
        }
    }

    /// Run the pipeline to a terminal state and return the final context.
    #[instrument(skip_all)]
    pub async fn run(&self, input: AssessmentInput) -> AssessmentContext {
        let mut ctx = AssessmentContext::new(input);
        let mut state = MachineState::Evaluate;
        info!(run_id = %ctx.run_id, "starting assessment run");

        while !state.is_terminal() {
            state = match state {
                MachineState::Evaluate => {
                    ctx = self.evaluate.run(ctx).await;
                    Self::route(&ctx, MachineState::Reflect)
                }
                MachineState::Reflect => {
                    ctx = self.reflect.run(ctx).await;
                    Self::route(&ctx, MachineState::Reassess)
                }
                MachineState::Reassess => {
                    ctx = self.reassess.run(ctx).await;
                    Self::route(&ctx, MachineState::Completed)
                }
                MachineState::Completed | MachineState::Error => state,
            };
        }

        if state == MachineState::Completed {
            ctx.advance(AssessmentStatus::Completed);
        }
        info!(run_id = %ctx.run_id, status = %ctx.status, "assessment run finished");
        ctx
    }

    /// The routing rule: continue on success, short-circuit on failure.
    fn route(ctx: &AssessmentContext, next: MachineState) -> MachineState {
        if ctx.has_failed() {
            MachineState::Error
        } else {
            next
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StageFailure;

    #[test]
    fn routing_short_circuits_on_failure() {
        let mut ctx = AssessmentContext::new(AssessmentInput::Text("ctl".to_string()));
        assert_eq!(
            AssessmentStateMachine::route(&ctx, MachineState::Reflect),
            MachineState::Reflect
        );

        ctx.fail(StageFailure::missing_input("evaluate", "input"));
        assert_eq!(
            AssessmentStateMachine::route(&ctx, MachineState::Reflect),
            MachineState::Error
        );
    }

    #[test]
    fn terminal_states_are_absorbing() {
        assert!(MachineState::Completed.is_terminal());
        assert!(MachineState::Error.is_terminal());
        assert!(!MachineState::Reassess.is_terminal());
    }
}
