//! The assessment context threaded through every pipeline stage.
//!
//! The context is the only shared state in a run. It is passed by value from
//! stage to stage (exclusive ownership, no locking) and discarded once the
//! report formatter has projected it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::errors::StageFailure;
use crate::domain::models::rating::{MetricScores, Rating};

/// Caller-supplied payload for a single assessment run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssessmentInput {
    /// A free-text control description.
    Text(String),
    /// Structured data (e.g. parsed test results) to be embedded in prompts
    /// as pretty-printed JSON.
    Structured(Value),
}

impl AssessmentInput {
    /// Render the input for inclusion in a prompt.
    pub fn as_prompt_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    /// True when there is nothing to assess.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Structured(value) => value.is_null(),
        }
    }
}

/// Pipeline progress marker.
///
/// Transitions are strictly forward along `Initialized -> Evaluated ->
/// Reflected -> Reassessed -> Completed`; `Error` is absorbing and reachable
/// from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Initialized,
    Evaluated,
    Reflected,
    Reassessed,
    Completed,
    Error,
}

impl AssessmentStatus {
    /// Position in the forward order; `Error` sits outside it.
    fn rank(self) -> Option<u8> {
        match self {
            Self::Initialized => Some(0),
            Self::Evaluated => Some(1),
            Self::Reflected => Some(2),
            Self::Reassessed => Some(3),
            Self::Completed => Some(4),
            Self::Error => None,
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Initialized => "initialized",
            Self::Evaluated => "evaluated",
            Self::Reflected => "reflected",
            Self::Reassessed => "reassessed",
            Self::Completed => "completed",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// One audit-trail record: the verbatim completion response a stage received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Stage that issued the completion call.
    pub stage: String,
    /// Verbatim response text.
    pub response: String,
    /// When the response was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// The mutable record threaded through every stage of a run.
///
/// Each derived slot is written by exactly one stage and only read by later
/// stages. `error` is monotonic: once set it is never cleared or replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentContext {
    /// Identifier for this run, for log correlation.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Caller-supplied payload.
    pub input: AssessmentInput,
    /// Pipeline progress.
    pub status: AssessmentStatus,
    /// Append-only audit trail of completion responses, insertion order
    /// significant.
    pub history: Vec<HistoryEntry>,

    // Derived slots, each optional until its producing stage runs.
    /// Per-criterion scores from the evaluate stage.
    pub metrics_evaluation: Option<MetricScores>,
    /// Initial overall rating from the evaluate stage.
    pub rating: Option<Rating>,
    /// Joined per-criterion rationale from the evaluate stage.
    pub rationale: Option<String>,
    /// Initial overall assessment narrative from the evaluate stage.
    pub assessment_learned: Option<String>,
    /// Critique narrative from the reflect stage.
    pub reflection: Option<String>,
    /// Revised rating from the reassess stage.
    pub final_rating: Option<Rating>,
    /// Revised assessment narrative from the reassess stage.
    pub final_assessment: Option<String>,

    /// Terminal-failure marker; monotonic.
    pub error: Option<StageFailure>,
}

impl AssessmentContext {
    /// Create a fresh context with only the input populated.
    pub fn new(input: AssessmentInput) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            input,
            status: AssessmentStatus::Initialized,
            history: Vec::new(),
            metrics_evaluation: None,
            rating: None,
            rationale: None,
            assessment_learned: None,
            reflection: None,
            final_rating: None,
            final_assessment: None,
            error: None,
        }
    }

    /// Append a completion response to the audit trail.
    pub fn record_response(&mut self, stage: &'static str, response: &str) {
        self.history.push(HistoryEntry {
            stage: stage.to_string(),
            response: response.to_string(),
            recorded_at: Utc::now(),
        });
    }

    /// Advance the status along the forward order.
    ///
    /// Transitions backwards, out of a terminal state, or directly to
    /// `Error` are ignored (`Error` is only entered through [`Self::fail`]).
    pub fn advance(&mut self, next: AssessmentStatus) {
        if self.status.is_terminal() {
            return;
        }
        let (Some(current), Some(target)) = (self.status.rank(), next.rank()) else {
            return;
        };
        if target > current {
            self.status = next;
        }
    }

    /// Record a terminal failure.
    ///
    /// The first failure wins; later calls are ignored so the original
    /// cause is preserved. The status becomes the absorbing `Error` state.
    /// A context already in a terminal state is left untouched.
    pub fn fail(&mut self, failure: StageFailure) {
        if self.error.is_some() || self.status.is_terminal() {
            return;
        }
        self.error = Some(failure);
        self.status = AssessmentStatus::Error;
    }

    /// True once a failure has been recorded.
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StageFailure;

    fn text_context() -> AssessmentContext {
        AssessmentContext::new(AssessmentInput::Text("a control".to_string()))
    }

    #[test]
    fn new_context_is_initialized_with_empty_slots() {
        let ctx = text_context();
        assert_eq!(ctx.status, AssessmentStatus::Initialized);
        assert!(ctx.history.is_empty());
        assert!(ctx.rating.is_none());
        assert!(ctx.error.is_none());
    }

    #[test]
    fn status_only_moves_forward() {
        let mut ctx = text_context();
        ctx.advance(AssessmentStatus::Reflected);
        assert_eq!(ctx.status, AssessmentStatus::Reflected);

        // Backwards transition is ignored.
        ctx.advance(AssessmentStatus::Evaluated);
        assert_eq!(ctx.status, AssessmentStatus::Reflected);

        ctx.advance(AssessmentStatus::Completed);
        assert_eq!(ctx.status, AssessmentStatus::Completed);

        // Terminal state absorbs everything.
        ctx.advance(AssessmentStatus::Error);
        assert_eq!(ctx.status, AssessmentStatus::Completed);
    }

    #[test]
    fn error_is_monotonic() {
        let mut ctx = text_context();
        ctx.fail(StageFailure::missing_input("evaluate", "input"));
        ctx.fail(StageFailure::missing_input("reflect", "rating"));

        let failure = ctx.error.as_ref().unwrap();
        assert_eq!(failure.stage, "evaluate");
        assert_eq!(ctx.status, AssessmentStatus::Error);
    }

    #[test]
    fn completed_context_cannot_fail() {
        let mut ctx = text_context();
        ctx.advance(AssessmentStatus::Completed);
        ctx.fail(StageFailure::missing_input("reassess", "reflection"));

        assert_eq!(ctx.status, AssessmentStatus::Completed);
        assert!(ctx.error.is_none());
    }

    #[test]
    fn failed_context_cannot_advance() {
        let mut ctx = text_context();
        ctx.fail(StageFailure::missing_input("evaluate", "input"));
        ctx.advance(AssessmentStatus::Evaluated);
        assert_eq!(ctx.status, AssessmentStatus::Error);
    }

    #[test]
    fn history_preserves_insertion_order() {
        let mut ctx = text_context();
        ctx.record_response("evaluate", "first");
        ctx.record_response("reflect", "second");
        let stages: Vec<_> = ctx.history.iter().map(|e| e.stage.as_str()).collect();
        assert_eq!(stages, ["evaluate", "reflect"]);
    }

    #[test]
    fn structured_input_renders_as_pretty_json() {
        let input = AssessmentInput::Structured(serde_json::json!({"controls": []}));
        assert!(input.as_prompt_text().contains("\"controls\""));
        assert!(!input.is_empty());
        assert!(AssessmentInput::Text("  ".to_string()).is_empty());
    }
}
