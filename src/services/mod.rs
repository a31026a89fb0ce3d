//! Service layer: the assessment pipeline and its supporting pieces.

pub mod engine;
pub mod extractor;
pub mod prompts;
pub mod report_formatter;
pub mod stages;
pub mod state_machine;

pub use engine::AssessmentEngine;
pub use extractor::{extract, ExtractionResult};
pub use state_machine::{AssessmentStateMachine, MachineState};
