//! Per-frame parsing of streamed chat-completion chunks.
//!
//! Each SSE data frame is parsed into typed chunk structs; any shape mismatch
//! is a `SdkError::Parse` that fails the whole stream.

use serde::Deserialize;

use crate::sdk_core::error::SdkError;
use crate::sdk_provider_deepseek::error::DeepSeekInnerError;
use crate::sdk_types::{ChatEmission, ToolCallFragment};

#[derive(Debug, Deserialize)]
struct ChunkPayload {
    #[serde(default)]
    choices: Option<Vec<ChunkChoice>>,
    #[serde(default)]
    error: Option<DeepSeekInnerError>,
}

#[derive(Debug, Deserialize)]
struct ChunkChoice {
    #[serde(default)]
    delta: Option<ChunkDelta>,
}

#[derive(Debug, Default, Deserialize)]
struct ChunkDelta {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning_content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCallDelta>>,
}

#[derive(Debug, Deserialize)]
struct ToolCallDelta {
    index: usize,
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    function: Option<FunctionDelta>,
}

#[derive(Debug, Default, Deserialize)]
struct FunctionDelta {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    arguments: Option<String>,
}

/// What one frame contributes to the stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedFrame {
    pub emission: ChatEmission,
    pub fragments: Vec<ToolCallFragment>,
}

/// Parse one decoded frame.
///
/// A top-level `error` object is an upstream error and a frame without a
/// `choices` field is a parse error; an empty `choices` array (usage-only
/// frames) is a no-op.
///
/// Classification of the first choice's delta, first match wins:
/// no text at all gives an empty answer emission; non-empty reasoning gives a
/// thinking emission (content in the same frame is dropped); otherwise the
/// content is the answer emission.
pub fn parse_frame(data: &str) -> Result<ParsedFrame, SdkError> {
    let payload: ChunkPayload = serde_json::from_str(data)
        .map_err(|err| SdkError::parse(format!("invalid stream chunk: {err}")))?;

    if let Some(error) = payload.error {
        return Err(SdkError::Upstream {
            status: 200,
            message: error.message,
            source: None,
        });
    }
    let choices = payload
        .choices
        .ok_or_else(|| SdkError::parse("stream chunk has no `choices` field"))?;

    let delta = choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .unwrap_or_default();

    let fragments = delta
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| {
            let function = tc.function.unwrap_or_default();
            ToolCallFragment {
                index: tc.index,
                id: tc.id.filter(|id| !id.is_empty()),
                kind: tc.kind,
                function_name: function.name,
                arguments_chunk: function.arguments.unwrap_or_default(),
            }
        })
        .collect();

    let reasoning = delta.reasoning_content.unwrap_or_default();
    let content = delta.content.unwrap_or_default();
    let emission = if !reasoning.is_empty() {
        ChatEmission::thinking(reasoning)
    } else if !content.is_empty() {
        ChatEmission::answer(content)
    } else {
        ChatEmission::empty()
    };

    Ok(ParsedFrame {
        emission,
        fragments,
    })
}
