//! Ports: traits the domain depends on, implemented by adapters in the
//! infrastructure layer.

pub mod completion;

pub use completion::{CompletionRequest, CompletionService, ModelParams, ServiceError};
