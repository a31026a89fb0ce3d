//! Reassess stage: fold the critique into a revised rating and narrative.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::errors::StageFailure;
use crate::domain::models::{AssessmentContext, AssessmentStatus, Rating};
use crate::domain::ports::{CompletionRequest, CompletionService, ModelParams};
use crate::services::stages::Stage;
use crate::services::{extractor, prompts};

pub const STAGE_NAME: &str = "reassess";

/// Expected shape of the reassessment response.
#[derive(Debug, Deserialize)]
struct ReassessmentResponse {
    final_score: Rating,
    final_assessment: String,
}

/// Produces the single revised rating and narrative. The revision sees the
/// structured critique rather than re-deriving it, and an unparseable
/// response is fatal: the final rating must be a number.
pub struct ReassessStage {
    service: Arc<dyn CompletionService>,
    params: ModelParams,
}

impl ReassessStage {
    pub fn new(service: Arc<dyn CompletionService>, params: ModelParams) -> Self {
        Self { service, params }
    }
}

#[async_trait]
impl Stage for ReassessStage {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    async fn run(&self, mut ctx: AssessmentContext) -> AssessmentContext {
        let (Some(assessment), Some(rating), Some(reflection)) = (
            ctx.assessment_learned.clone(),
            ctx.rating,
            ctx.reflection.clone(),
        ) else {
            let slot = if ctx.assessment_learned.is_none() {
                "assessment_learned"
            } else if ctx.rating.is_none() {
                "rating"
            } else {
                "reflection"
            };
            ctx.fail(StageFailure::missing_input(STAGE_NAME, slot));
            return ctx;
        };

        let prompt = prompts::reassessment_prompt(
            &ctx.input.as_prompt_text(),
            &assessment,
            rating,
            &reflection,
        );
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

        match extractor::extract_typed::<ReassessmentResponse>(&response) {
            Ok(parsed) => {
                debug!(run_id = %ctx.run_id, final_rating = %parsed.final_score, "reassessment complete");
                ctx.final_rating = Some(parsed.final_score);
                ctx.final_assessment = Some(parsed.final_assessment);
                ctx.advance(AssessmentStatus::Reassessed);
            }
            Err(reason) => {
                warn!(run_id = %ctx.run_id, stage = STAGE_NAME, "unparseable reassessment response");
                ctx.fail(StageFailure::parse(STAGE_NAME, reason, response));
            }
        }
        ctx
    }
}
