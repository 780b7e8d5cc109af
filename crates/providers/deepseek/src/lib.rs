//! DeepSeek chat adapter over the OpenAI-compatible chat-completions API.

pub mod api;
pub mod config;
pub mod delta;
pub mod error;
pub mod normalize;
pub mod request;
pub mod stream;
pub mod tool_calls;
pub mod transcript;

pub use api::DeepSeekApi;
pub use config::{timeout_for_model, DeepSeekConfig};
pub use stream::{StreamOrchestrator, StreamState};
pub use tool_calls::ToolCallAssembler;
pub use transcript::TranscriptRenderer;

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "../tests/normalize_tests.rs"]
mod normalize_tests;

#[cfg(test)]
#[path = "../tests/delta_tests.rs"]
mod delta_tests;

#[cfg(test)]
#[path = "../tests/tool_calls_tests.rs"]
mod tool_calls_tests;

#[cfg(test)]
#[path = "../tests/stream_tests.rs"]
mod stream_tests;

#[cfg(test)]
#[path = "../tests/chat_api_tests.rs"]
mod chat_api_tests;
