//! Domain errors for the assessment pipeline.
//!
//! Stage failures are *recorded in the context*, never raised across stage
//! boundaries. The state machine inspects the recorded failure to decide
//! routing, and the report formatter surfaces the message verbatim.

use serde::Serialize;
use thiserror::Error;

/// Classification of a stage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A required context slot was absent when the stage started.
    #[error("missing input")]
    MissingInput,

    /// The completion service call failed or timed out.
    #[error("service error")]
    Service,

    /// The completion response could not be coerced into the expected shape.
    #[error("parse error")]
    Parse,
}

/// A terminal failure recorded by a pipeline stage.
///
/// Carries the identity of the failing stage, a human-readable message, and
/// (best effort) the raw completion response so callers can inspect partial
/// output after the run halts.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{stage}: {kind}: {message}")]
pub struct StageFailure {
    /// Name of the stage that failed.
    pub stage: &'static str,
    /// Failure classification.
    pub kind: FailureKind,
    /// Human-readable description.
    pub message: String,
    /// Raw completion response, when one was received before the failure.
    pub raw_response: Option<String>,
}

impl StageFailure {
    /// A required slot was missing when the stage started.
    pub fn missing_input(stage: &'static str, slot: &str) -> Self {
        Self {
            stage,
            kind: FailureKind::MissingInput,
            message: format!("required slot `{slot}` is not populated"),
            raw_response: None,
        }
    }

    /// The completion call failed.
    pub fn service(stage: &'static str, error: &impl std::fmt::Display) -> Self {
        Self {
            stage,
            kind: FailureKind::Service,
            message: error.to_string(),
            raw_response: None,
        }
    }

    /// The completion response could not be parsed; the raw text is kept
    /// for downstream inspection.
    pub fn parse(stage: &'static str, message: impl Into<String>, raw_response: String) -> Self {
        Self {
            stage,
            kind: FailureKind::Parse,
            message: message.into(),
            raw_response: Some(raw_response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_display_identifies_stage_and_kind() {
        let failure = StageFailure::missing_input("reflect", "rating");
        assert_eq!(
            failure.to_string(),
            "reflect: missing input: required slot `rating` is not populated"
        );
    }

    #[test]
    fn parse_failure_keeps_raw_response() {
        let failure = StageFailure::parse("evaluate", "bad json", "not json".to_string());
        assert_eq!(failure.kind, FailureKind::Parse);
        assert_eq!(failure.raw_response.as_deref(), Some("not json"));
    }
}
