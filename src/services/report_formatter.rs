//! Projection of a terminal context into the stable report shape.

use crate::domain::models::{AssessmentContext, Report, ReportField};

/// Render the terminal context into a report.
///
/// Pure and idempotent: formatting the same context twice yields identical
/// reports, and no field is ever dropped. An error run carries the failure
/// message verbatim plus every slot populated before the halt.
pub fn format(ctx: &AssessmentContext) -> Report {
    let rating_delta = match (ctx.rating, ctx.final_rating) {
        (Some(initial), Some(final_)) => ReportField::Available(final_.delta_from(initial)),
        _ => ReportField::Unavailable,
    };

    Report {
        run_id: ctx.run_id,
        status: ctx.status,
        started_at: ctx.started_at,
        error: ctx.error.as_ref().map(ToString::to_string).into(),
        rating: ctx.rating.into(),
        metrics_evaluation: ctx.metrics_evaluation.clone().into(),
        rationale: ctx.rationale.clone().into(),
        assessment_learned: ctx.assessment_learned.clone().into(),
        reflection: ctx.reflection.clone().into(),
        final_rating: ctx.final_rating.into(),
        final_assessment: ctx.final_assessment.clone().into(),
        rating_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StageFailure;
    use crate::domain::models::{AssessmentInput, AssessmentStatus, Rating};

    fn context() -> AssessmentContext {
        AssessmentContext::new(AssessmentInput::Text("a control".to_string()))
    }

    #[test]
    fn format_is_idempotent() {
        let mut ctx = context();
        ctx.rating = Some(Rating::try_from(3).unwrap());
        ctx.advance(AssessmentStatus::Evaluated);

        assert_eq!(format(&ctx), format(&ctx));
    }

    #[test]
    fn missing_slots_are_marked_not_dropped() {
        let report = format(&context());
        let json = serde_json::to_value(&report).unwrap();

        for key in [
            "error",
            "rating",
            "metrics_evaluation",
            "rationale",
            "assessment_learned",
            "reflection",
            "final_rating",
            "final_assessment",
            "rating_delta",
        ] {
            assert_eq!(
                json.get(key),
                Some(&serde_json::json!("unavailable")),
                "field `{key}` should be explicitly unavailable"
            );
        }
    }

    #[test]
    fn error_report_keeps_partial_slots() {
        let mut ctx = context();
        ctx.rating = Some(Rating::try_from(4).unwrap());
        ctx.advance(AssessmentStatus::Evaluated);
        ctx.fail(StageFailure::missing_input("reflect", "rationale"));

        let report = format(&ctx);
        assert_eq!(report.status, AssessmentStatus::Error);
        assert!(report.rating.is_available());
        assert!(!report.final_rating.is_available());
        assert_eq!(
            report.error.as_available().map(String::as_str),
            Some("reflect: missing input: required slot `rationale` is not populated")
        );
    }

    #[test]
    fn rating_delta_requires_both_ratings() {
        let mut ctx = context();
        ctx.rating = Some(Rating::try_from(2).unwrap());
        assert!(!format(&ctx).rating_delta.is_available());

        ctx.final_rating = Some(Rating::try_from(4).unwrap());
        assert_eq!(
            format(&ctx).rating_delta,
            ReportField::Available(2)
        );
    }
}
