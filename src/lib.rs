//! Appraise - control-effectiveness assessment engine.
//!
//! Appraise runs a control description through a three-phase LLM pipeline:
//! an initial *evaluation* scores the control against five criteria, a
//! *reflection* critiques that evaluation for blind spots, and a
//! *reassessment* folds the critique into a single revised rating. Errors
//! short-circuit the pipeline and surface in the final report alongside any
//! partial results.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **Domain Layer** (`domain`): context, report, and rating models plus
//!   the completion-service port
//! - **Service Layer** (`services`): the state machine, stages, structured
//!   extractor, and report formatter
//! - **Infrastructure Layer** (`infrastructure`): the HTTP completion
//!   adapter and configuration loading
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use appraise::{AssessmentEngine, AssessmentInput};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = AssessmentEngine::new(client, params);
//!     let report = engine
//!         .run(AssessmentInput::Text("Access reviews are performed quarterly.".into()))
//!         .await;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{FailureKind, StageFailure};
pub use domain::models::{
    AssessmentContext, AssessmentInput, AssessmentStatus, CompletionConfig, Config,
    CriterionScore, LoggingConfig, MetricScores, Rating, Report, ReportField,
};
pub use domain::ports::{CompletionRequest, CompletionService, ModelParams, ServiceError};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AssessmentEngine, AssessmentStateMachine, MachineState};
