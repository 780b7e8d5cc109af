//! Message preparation: text extraction and provider ordering rules.
//!
//! DeepSeek rejects conversations whose first non-system message is not a
//! user turn, so anything before the first user message (other than system
//! prompts) is dropped. Nothing is ever reordered.

use crate::sdk_types::{ChatMessage, Message, Role};

/// Prefix the transcript renderer puts in front of reasoning lines.
pub const THINKING_LINE_PREFIX: &str = "> ";

/// Plain text of a message: the string body, or its first text part.
pub fn extract_text(message: &ChatMessage) -> String {
    message.content.text().to_string()
}

/// Text of an assistant message with its rendered reasoning removed.
///
/// Reasoning is rendered as a markdown blockquote, so every line starting
/// with `"> "` goes, along with blank lines.
pub fn extract_text_without_thinking(message: &ChatMessage) -> String {
    message
        .content
        .text()
        .split('\n')
        .filter(|line| !line.starts_with(THINKING_LINE_PREFIX) && !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Convert UI messages to text-only wire messages.
pub fn to_wire_messages(messages: &[ChatMessage]) -> Vec<Message> {
    messages
        .iter()
        .map(|m| {
            let content = match m.role {
                Role::Assistant => extract_text_without_thinking(m),
                _ => extract_text(m),
            };
            Message::new(m.role, content)
        })
        .collect()
}

/// Drop every non-system message that precedes the first user message.
pub fn normalize_messages(messages: Vec<Message>) -> Vec<Message> {
    let mut seen_user = false;
    messages
        .into_iter()
        .filter(|msg| match msg.role {
            Role::System => true,
            Role::User => {
                seen_user = true;
                true
            }
            _ => seen_user,
        })
        .collect()
}
