//! Evaluate stage: initial per-criterion scoring of the control.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::errors::StageFailure;
use crate::domain::models::{AssessmentContext, AssessmentStatus, MetricScores, Rating};
use crate::domain::ports::{CompletionRequest, CompletionService, ModelParams};
use crate::services::stages::Stage;
use crate::services::{extractor, prompts};

pub const STAGE_NAME: &str = "evaluate";

/// Expected shape of the evaluation response.
#[derive(Debug, Deserialize)]
struct EvaluationResponse {
    metrics: MetricScores,
    overall_score: Rating,
    overall_assessment: String,
}

/// Produces the initial rating, per-criterion scores, and assessment
/// narrative. A response that cannot be coerced into the expected shape is
/// fatal: every later stage needs the structured rating.
pub struct EvaluateStage {
    service: Arc<dyn CompletionService>,
    params: ModelParams,
}

impl EvaluateStage {
    pub fn new(service: Arc<dyn CompletionService>, params: ModelParams) -> Self {
        Self { service, params }
    }
}

#[async_trait]
impl Stage for EvaluateStage {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    async fn run(&self, mut ctx: AssessmentContext) -> AssessmentContext {
        if ctx.input.is_empty() {
            ctx.fail(StageFailure::missing_input(STAGE_NAME, "input"));
            return ctx;
        }

        let prompt = prompts::evaluation_prompt(&ctx.input.as_prompt_text());
        let request = CompletionRequest::new(&self.params, prompts::EVALUATOR_SYSTEM, prompt);

        let response = match self.service.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(run_id = %ctx.run_id, stage = STAGE_NAME, error = %e, "completion call failed");
                ctx.fail(StageFailure::service(STAGE_NAME, &e));
                return ctx;
            }
        };
        ctx.record_response(STAGE_NAME, &response);

        match extractor::extract_typed::<EvaluationResponse>(&response) {
            Ok(parsed) => {
                debug!(run_id = %ctx.run_id, rating = %parsed.overall_score, "evaluation complete");
                ctx.rationale = Some(parsed.metrics.joined_rationale());
                ctx.metrics_evaluation = Some(parsed.metrics);
                ctx.rating = Some(parsed.overall_score);
                ctx.assessment_learned = Some(parsed.overall_assessment);
                ctx.advance(AssessmentStatus::Evaluated);
            }
            Err(reason) => {
                warn!(run_id = %ctx.run_id, stage = STAGE_NAME, "unparseable evaluation response");
                ctx.fail(StageFailure::parse(STAGE_NAME, reason, response));
            }
        }
        ctx
    }
}
