//! Reflect stage: critique of the initial evaluation.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::errors::StageFailure;
use crate::domain::models::{AssessmentContext, AssessmentStatus};
use crate::domain::ports::{CompletionRequest, CompletionService, ModelParams};
use crate::services::stages::Stage;
use crate::services::{extractor, prompts};

pub const STAGE_NAME: &str = "reflect";

/// Expected shape of the reflection response.
#[derive(Debug, Deserialize)]
struct ReflectionResponse {
    feedback_points: Vec<String>,
    perspective_changes: String,
    reflection_summary: String,
}

impl ReflectionResponse {
    /// Compose the narrative stored in the context: summary, bulleted
    /// feedback, then perspective changes.
    fn narrative(&self) -> String {
        let bullets = self
            .feedback_points
            .iter()
            .map(|point| format!("- {point}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "{}\n\nKey feedback points:\n{}\n\nPerspective changes to consider: {}",
            self.reflection_summary, bullets, self.perspective_changes
        )
    }
}

/// Critiques the evaluation for blind spots without changing the rating.
///
/// Unlike the other stages, an unparseable response is tolerated here: the
/// reflection is consumed downstream as prose, so the raw text serves as
/// the narrative and the run continues.
pub struct ReflectStage {
    service: Arc<dyn CompletionService>,
    params: ModelParams,
}

impl ReflectStage {
    pub fn new(service: Arc<dyn CompletionService>, params: ModelParams) -> Self {
        Self { service, params }
    }
}

#[async_trait]
impl Stage for ReflectStage {
    fn name(&self) -> &'static str {
        STAGE_NAME
    }

    async fn run(&self, mut ctx: AssessmentContext) -> AssessmentContext {
        let (Some(assessment), Some(rating), Some(rationale)) = (
            ctx.assessment_learned.clone(),
            ctx.rating,
            ctx.rationale.clone(),
        ) else {
            let slot = if ctx.assessment_learned.is_none() {
                "assessment_learned"
            } else if ctx.rating.is_none() {
                "rating"
            } else {
                "rationale"
            };
            ctx.fail(StageFailure::missing_input(STAGE_NAME, slot));
            return ctx;
        };

        let prompt = prompts::reflection_prompt(
            &ctx.input.as_prompt_text(),
            &assessment,
            rating,
            &rationale,
        );
        let request = CompletionRequest::new(&self.params, prompts::CRITIC_SYSTEM, prompt);

        let response = match self.service.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(run_id = %ctx.run_id, stage = STAGE_NAME, error = %e, "completion call failed");
                ctx.fail(StageFailure::service(STAGE_NAME, &e));
                return ctx;
            }
        };
        ctx.record_response(STAGE_NAME, &response);

        let narrative = match extractor::extract_typed::<ReflectionResponse>(&response) {
            Ok(parsed) => parsed.narrative(),
            Err(reason) => {
                // Tolerated: downstream consumes the reflection as prose.
                debug!(run_id = %ctx.run_id, %reason, "using raw reflection text as narrative");
                response
            }
        };
        ctx.reflection = Some(narrative);
        ctx.advance(AssessmentStatus::Reflected);
        ctx
    }
}
