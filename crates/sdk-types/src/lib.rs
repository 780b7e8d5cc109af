//! Type definitions shared by the chat adapter.
//!
//! Covers the conversation model handed in by the chat UI, the wire payload
//! sent to the completion endpoint, and the per-stream units (emissions and
//! tool-call fragments/records) produced while a response is consumed.

pub mod chat;
pub mod message;
pub mod payload;

use serde::{Deserialize, Serialize};

pub use chat::{ChatEmission, FunctionCall, ToolCallFragment, ToolCallRecord};
pub use message::{ChatMessage, ContentPart, ImageUrl, Message, MessageContent};
pub use payload::{FunctionDefinition, ModelConfig, RequestPayload, ToolDefinition};

/// Basic roles for chat messages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod types_tests;
