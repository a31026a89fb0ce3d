//! Pipeline stages: the units of work the state machine sequences.
//!
//! A stage takes the context by value, performs at most one completion call,
//! and hands the context back. All failure is expressed by recording a
//! [`StageFailure`](crate::domain::errors::StageFailure) in the context;
//! stages never return errors and never touch state outside the context.

pub mod evaluate;
pub mod reassess;
pub mod reflect;

use async_trait::async_trait;

use crate::domain::models::AssessmentContext;

pub use evaluate::EvaluateStage;
pub use reassess::ReassessStage;
pub use reflect::ReflectStage;

/// A named unit of pipeline work.
#[async_trait]
pub trait Stage: Send + Sync {
    /// Stage name, used in failure messages and the audit trail.
    fn name(&self) -> &'static str;

    /// Run the stage, consuming and returning the context.
    async fn run(&self, ctx: AssessmentContext) -> AssessmentContext;
}
