//! Domain models for the assessment pipeline.

pub mod config;
pub mod context;
pub mod rating;
pub mod report;

pub use config::{CompletionConfig, Config, LoggingConfig};
pub use context::{
    AssessmentContext, AssessmentInput, AssessmentStatus, HistoryEntry,
};
pub use rating::{CriterionScore, MetricScores, Rating, RatingOutOfRange};
pub use report::{Report, ReportField};
