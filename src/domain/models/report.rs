//! The stable output shape consumed by callers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::models::context::AssessmentStatus;
use crate::domain::models::rating::{MetricScores, Rating};

/// A report field that is explicitly marked rather than omitted.
///
/// Callers rely on a stable key set: a slot whose producing stage never ran
/// serializes as the literal string `"unavailable"` instead of disappearing
/// from the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportField<T> {
    Available(T),
    Unavailable,
}

impl<T> ReportField<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn as_available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for ReportField<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unavailable, Self::Available)
    }
}

impl<T: Serialize> Serialize for ReportField<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Available(value) => value.serialize(serializer),
            Self::Unavailable => serializer.serialize_str("unavailable"),
        }
    }
}

/// Terminal projection of an assessment run.
///
/// The key set is identical for success and failure runs; an error run
/// simply carries the failure message plus whatever slots were populated
/// before the pipeline halted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Run identifier, copied from the context.
    pub run_id: Uuid,
    /// Terminal pipeline status.
    pub status: AssessmentStatus,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Failure message, verbatim, when the run halted.
    pub error: ReportField<String>,
    /// Initial overall rating.
    pub rating: ReportField<Rating>,
    /// Per-criterion scores.
    pub metrics_evaluation: ReportField<MetricScores>,
    /// Joined per-criterion rationale.
    pub rationale: ReportField<String>,
    /// Initial assessment narrative.
    pub assessment_learned: ReportField<String>,
    /// Self-reflection narrative.
    pub reflection: ReportField<String>,
    /// Revised rating after reflection.
    pub final_rating: ReportField<Rating>,
    /// Revised assessment narrative.
    pub final_assessment: ReportField<String>,
    /// Signed initial-to-final rating difference.
    pub rating_delta: ReportField<i8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_field_serializes_transparently() {
        let field = ReportField::Available(3_i8);
        assert_eq!(serde_json::to_value(&field).unwrap(), serde_json::json!(3));
    }

    #[test]
    fn unavailable_field_serializes_as_marker() {
        let field: ReportField<i8> = ReportField::Unavailable;
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            serde_json::json!("unavailable")
        );
    }

    #[test]
    fn from_option_maps_none_to_unavailable() {
        assert_eq!(ReportField::from(Some(1)), ReportField::Available(1));
        assert_eq!(ReportField::<i32>::from(None), ReportField::Unavailable);
    }
}
