use async_trait::async_trait;

use crate::core::error::SdkError;
use crate::sdk_types::{ToolCallRecord, ToolDefinition};

/// Executes tool calls requested by the model during a streaming chat.
///
/// `definitions` is advertised in the request payload; `execute` receives each
/// assembled call and returns the text sent back as the tool result.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    fn definitions(&self) -> Vec<ToolDefinition>;

    async fn execute(&self, call: &ToolCallRecord) -> Result<String, SdkError>;
}
