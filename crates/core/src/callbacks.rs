use serde_json::Value;

use crate::core::cancel::CancelHandle;
use crate::core::error::SdkError;
use crate::sdk_types::{ChatEmission, ToolCallRecord};

/// Everything `on_finish` receives besides the final text.
#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    pub headers: Vec<(String, String)>,
    /// Full JSON body for buffered calls; `None` for streams.
    pub raw: Option<Value>,
    /// Tool calls assembled from the last stream that were not executed.
    pub tool_calls: Vec<ToolCallRecord>,
}

/// Caller-facing boundary of a chat call.
///
/// Per call: `on_controller` fires once before any network work, then zero or
/// more `on_update` in frame order, then exactly one of `on_finish`/`on_error`.
pub trait ChatCallbacks: Send {
    fn on_controller(&mut self, _handle: CancelHandle) {}

    fn on_update(&mut self, _emission: ChatEmission) {}

    fn on_finish(&mut self, text: String, response: ChatResponse);

    fn on_error(&mut self, error: SdkError);
}
