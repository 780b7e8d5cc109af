pub mod api;
pub mod callbacks;
pub mod cancel;
pub mod error;
pub mod json;
pub mod request_builder;
pub mod tools;
pub mod transport;

pub use crate::core::api::{ChatApi, ChatOptions, LlmModel, LlmUsage, SpeechOptions};
pub use crate::core::callbacks::{ChatCallbacks, ChatResponse};
pub use crate::core::cancel::{CancelHandle, TimeoutGuard};
pub use crate::core::error::{SdkError, TransportError};
pub use crate::core::request_builder::defaults::{CallConfig, ConfigLayers};
pub use crate::core::tools::ToolExecutor;
pub use crate::core::transport::{HttpTransport, TransportConfig};

#[cfg(test)]
#[path = "../tests/request_builder_defaults_tests.rs"]
mod request_builder_defaults_tests;
