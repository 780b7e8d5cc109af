//! # Server-Sent Events decoding
//!
//! Turns the raw bytes of a streaming completion response into discrete
//! decoded text frames. Chunk boundaries may fall anywhere, including inside a
//! UTF-8 sequence or between `\r` and `\n`; the decoder buffers until a blank
//! line terminates the event.

use std::collections::VecDeque;

/// Data payload that marks the provider's explicit end of stream.
pub const DONE_MARKER: &str = "[DONE]";

/// One decoded server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Event type (optional)
    pub event: Option<String>,
    /// Event data, multi-line payloads joined with `\n`
    pub data: String,
    /// Event ID (optional)
    pub id: Option<String>,
}

impl SseFrame {
    pub fn data(data: impl Into<String>) -> Self {
        Self {
            event: None,
            data: data.into(),
            id: None,
        }
    }

    /// True when the frame is the `[DONE]` terminal signal.
    pub fn is_done(&self) -> bool {
        self.data.trim() == DONE_MARKER
    }
}

/// Incremental SSE decoder that handles chunk boundaries correctly
#[derive(Default)]
pub struct SseDecoder {
    /// Bytes of the not yet terminated event
    buffer: Vec<u8>,
    current: FrameBuilder,
    ready: VecDeque<SseFrame>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push new data chunk and get any complete frames.
    pub fn push(&mut self, chunk: &[u8]) -> impl Iterator<Item = SseFrame> + '_ {
        self.buffer.extend_from_slice(chunk);
        self.process_buffer();
        self.ready.drain(..)
    }

    /// Check if decoder has buffered data that might be incomplete
    pub fn has_buffered_data(&self) -> bool {
        !self.buffer.is_empty() || self.current.has_data()
    }

    /// Flush a trailing event the server closed without a blank line.
    pub fn finish(&mut self) -> impl Iterator<Item = SseFrame> + '_ {
        if self.has_buffered_data() {
            self.buffer.extend_from_slice(b"\n\n");
            self.process_buffer();
        }
        self.ready.drain(..)
    }

    fn process_buffer(&mut self) {
        while let Some(frame_end) = find_event_terminator(&self.buffer) {
            let frame = self.buffer.drain(..=frame_end).collect::<Vec<_>>();
            self.process_frame(&frame);
        }
    }

    fn process_frame(&mut self, frame: &[u8]) {
        let text = String::from_utf8_lossy(frame);

        for line in text.lines() {
            if line.is_empty() {
                self.flush_current();
                continue;
            }
            if line.starts_with(':') {
                // comment / keep-alive
                continue;
            }
            let (field, value) = match line.split_once(':') {
                Some((field, rest)) => (field, rest.strip_prefix(' ').unwrap_or(rest)),
                None => (line, ""),
            };
            match field {
                "data" => self.current.data_lines.push(value.to_string()),
                "event" => self.current.event = Some(value.to_string()),
                "id" => self.current.id = Some(value.to_string()),
                _ => {}
            }
        }

        self.flush_current();
    }

    fn flush_current(&mut self) {
        if self.current.has_data() {
            let builder = std::mem::take(&mut self.current);
            self.ready.push_back(builder.build());
        }
    }
}

#[derive(Default)]
struct FrameBuilder {
    event: Option<String>,
    data_lines: Vec<String>,
    id: Option<String>,
}

impl FrameBuilder {
    fn has_data(&self) -> bool {
        !self.data_lines.is_empty()
    }

    fn build(self) -> SseFrame {
        SseFrame {
            event: self.event,
            data: self.data_lines.join("\n"),
            id: self.id,
        }
    }
}

/// Find the index of the final newline character that terminates an SSE event.
fn find_event_terminator(buf: &[u8]) -> Option<usize> {
    let mut idx = 0;
    let mut line_start = 0;
    while idx < buf.len() {
        match buf[idx] {
            b'\n' => {
                if idx == line_start {
                    return Some(idx);
                }
                idx += 1;
                line_start = idx;
            }
            b'\r' => {
                // Need one more byte to tell CR from CRLF.
                if idx + 1 >= buf.len() {
                    return None;
                }
                let terminator_len = if buf[idx + 1] == b'\n' { 2 } else { 1 };
                if idx == line_start {
                    return Some(idx + terminator_len - 1);
                }
                idx += terminator_len;
                line_start = idx;
            }
            _ => idx += 1,
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/decoder_tests.rs"]
mod decoder_tests;
