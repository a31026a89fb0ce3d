//! OpenAI-compatible chat-completions adapter.

pub mod client;
pub mod errors;
pub mod types;

pub use client::{OpenAiClient, OpenAiClientConfig};
pub use errors::OpenAiApiError;
