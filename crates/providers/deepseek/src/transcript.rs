use crate::sdk_provider_deepseek::normalize::THINKING_LINE_PREFIX;
use crate::sdk_types::ChatEmission;

/// Renders the thinking and answer channels into one markdown transcript.
///
/// Reasoning becomes a blockquote: `"> "` opens it, and paragraph breaks in
/// later reasoning chunks are re-quoted.
/// Switching back to the answer inserts a blank line. The result is what a
/// streaming call hands to `on_finish`, and what
/// `extract_text_without_thinking` strips back to the answer.
#[derive(Debug, Default)]
pub struct TranscriptRenderer {
    text: String,
    in_thinking: bool,
}

impl TranscriptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, emission: &ChatEmission) {
        if emission.is_empty() {
            return;
        }
        let content = emission.content.as_str();
        match (emission.is_thinking, self.in_thinking) {
            (true, false) => {
                self.in_thinking = true;
                if !self.text.is_empty() {
                    self.text.push('\n');
                }
                self.text.push_str(THINKING_LINE_PREFIX);
                self.text.push_str(content);
            }
            (true, true) => self.text.push_str(&quote_paragraphs(content)),
            (false, true) => {
                self.in_thinking = false;
                self.text.push_str("\n\n");
                self.text.push_str(content);
            }
            (false, false) => self.text.push_str(content),
        }
    }

    pub fn is_thinking(&self) -> bool {
        self.in_thinking
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

fn quote_paragraphs(content: &str) -> String {
    content.replace("\n\n", &format!("\n\n{THINKING_LINE_PREFIX}"))
}
