//! Provider-facing chat API, after the shape chat UIs expect.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::core::callbacks::ChatCallbacks;
use crate::core::error::SdkError;
use crate::core::request_builder::defaults::{CallConfig, ConfigLayers};
use crate::core::tools::ToolExecutor;
use crate::sdk_types::ChatMessage;

/// Inputs of one chat call.
pub struct ChatOptions {
    pub messages: Vec<ChatMessage>,
    pub config: CallConfig,
    /// Configuration snapshot taken at call start.
    pub layers: ConfigLayers,
    pub callbacks: Box<dyn ChatCallbacks>,
    /// Tools offered to the model on streaming calls.
    pub tools: Option<Arc<dyn ToolExecutor>>,
}

impl ChatOptions {
    pub fn new(
        messages: Vec<ChatMessage>,
        config: CallConfig,
        callbacks: Box<dyn ChatCallbacks>,
    ) -> Self {
        Self {
            messages,
            config,
            layers: ConfigLayers::default(),
            callbacks,
            tools: None,
        }
    }

    pub fn with_layers(mut self, layers: ConfigLayers) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_tools(mut self, tools: Arc<dyn ToolExecutor>) -> Self {
        self.tools = Some(tools);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechOptions {
    pub model: String,
    pub input: String,
    pub voice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmUsage {
    pub used: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmModel {
    pub name: String,
    pub available: bool,
    pub provider: String,
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Provider name for logging/telemetry.
    fn provider_name(&self) -> &'static str;

    /// Run one chat call; the outcome is reported through `options.callbacks`.
    async fn chat(&self, options: ChatOptions);

    async fn speech(&self, options: SpeechOptions) -> Result<Bytes, SdkError>;

    async fn usage(&self) -> Result<LlmUsage, SdkError>;

    async fn models(&self) -> Result<Vec<LlmModel>, SdkError>;

    /// Final text of a buffered (non-streaming) response body.
    fn extract_message(&self, response: &JsonValue) -> String;
}
