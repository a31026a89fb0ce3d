//! Infrastructure layer: adapters for external services.

pub mod config;
pub mod openai;
