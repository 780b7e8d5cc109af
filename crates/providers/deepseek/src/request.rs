use crate::sdk_core::request_builder::defaults::{resolve_model_config, CallConfig, ConfigLayers};
use crate::sdk_types::{Message, RequestPayload, ToolDefinition};

/// Build the chat-completions payload for one call.
///
/// Sampling values pass through unvalidated, and `max_tokens` is never sent
/// even when a layer configures it.
pub fn build_request_payload(
    messages: Vec<Message>,
    layers: &ConfigLayers,
    call: &CallConfig,
    tools: Option<Vec<ToolDefinition>>,
) -> RequestPayload {
    let merged = resolve_model_config(layers, call);
    RequestPayload {
        messages,
        stream: call.stream,
        model: merged.model.unwrap_or_else(|| call.model.clone()),
        temperature: merged.temperature,
        presence_penalty: merged.presence_penalty,
        frequency_penalty: merged.frequency_penalty,
        top_p: merged.top_p,
        tools: tools.filter(|t| !t.is_empty()),
    }
}
