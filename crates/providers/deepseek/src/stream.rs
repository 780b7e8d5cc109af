//! Streaming response orchestration.
//!
//! One [`StreamOrchestrator`] lives for one streamed response. Frames are
//! handled strictly one at a time: parse, feed tool-call fragments to the
//! assembler, forward the (non-empty) emission. The orchestrator ends in
//! exactly one closed state.

use bytes::Bytes;
use futures_core::Stream;
use futures_util::StreamExt;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::sdk_core::callbacks::ChatCallbacks;
use crate::sdk_core::cancel::CancelHandle;
use crate::sdk_core::error::{display_body_for_error, SdkError};
use crate::sdk_core::transport::{header_value, HttpTransport, TransportConfig};
use crate::sdk_provider_deepseek::delta::parse_frame;
use crate::sdk_provider_deepseek::error::map_transport_error_to_sdk_error;
use crate::sdk_provider_deepseek::tool_calls::ToolCallAssembler;
use crate::sdk_provider_deepseek::transcript::TranscriptRenderer;
use crate::sdk_streaming_sse::{SseDecoder, SseFrame};
use crate::sdk_types::{ChatEmission, ToolCallRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Open,
    ClosedOk,
    ClosedError,
}

/// What the driver should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Done,
}

#[derive(Debug)]
pub struct StreamOrchestrator {
    state: StreamState,
    assembler: ToolCallAssembler,
}

impl Default for StreamOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamOrchestrator {
    pub fn new() -> Self {
        Self {
            state: StreamState::Open,
            assembler: ToolCallAssembler::new(),
        }
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Handle one decoded frame, passing a non-empty emission to `emit`.
    ///
    /// Returns `Done` on the `[DONE]` marker. Any error moves the
    /// orchestrator to `ClosedError`; nothing already emitted is retracted.
    pub fn handle_frame<F>(&mut self, frame: &SseFrame, mut emit: F) -> Result<FrameControl, SdkError>
    where
        F: FnMut(ChatEmission),
    {
        if self.state != StreamState::Open {
            return Ok(FrameControl::Done);
        }
        if frame.is_done() {
            self.state = StreamState::ClosedOk;
            return Ok(FrameControl::Done);
        }

        let parsed = parse_frame(&frame.data).map_err(|err| self.fail(err))?;
        for fragment in parsed.fragments {
            self.assembler.apply(fragment).map_err(|err| self.fail(err))?;
        }
        if !parsed.emission.is_empty() {
            emit(parsed.emission);
        }
        Ok(FrameControl::Continue)
    }

    /// Close after the end marker or transport closure and hand off the
    /// assembled tool calls in index order.
    pub fn close(mut self) -> Vec<ToolCallRecord> {
        if self.state == StreamState::Open {
            self.state = StreamState::ClosedOk;
        }
        self.assembler.finish()
    }

    fn fail(&mut self, err: SdkError) -> SdkError {
        self.state = StreamState::ClosedError;
        err
    }
}

/// Consume a response byte stream until the end marker or closure.
///
/// Each non-empty emission goes to the transcript and then to
/// `callbacks.on_update`, in frame order. Cancellation is checked before
/// every read and every frame.
pub async fn drive_stream<S>(
    bytes: S,
    cancel: &CancelHandle,
    callbacks: &mut dyn ChatCallbacks,
    transcript: &mut TranscriptRenderer,
) -> Result<Vec<ToolCallRecord>, SdkError>
where
    S: Stream<Item = Result<Bytes, SdkError>> + Send,
{
    let mut decoder = SseDecoder::new();
    let mut orchestrator = StreamOrchestrator::new();
    let mut emit = |emission: ChatEmission| {
        transcript.push(&emission);
        callbacks.on_update(emission);
    };

    futures_util::pin_mut!(bytes);
    while let Some(chunk) = cancel.run(bytes.next()).await? {
        let chunk = chunk?;
        for frame in decoder.push(&chunk) {
            if cancel.is_cancelled() {
                return Err(SdkError::Cancelled);
            }
            if orchestrator.handle_frame(&frame, &mut emit)? == FrameControl::Done {
                return Ok(orchestrator.close());
            }
        }
    }

    for frame in decoder.finish() {
        if cancel.is_cancelled() {
            return Err(SdkError::Cancelled);
        }
        if orchestrator.handle_frame(&frame, &mut emit)? == FrameControl::Done {
            break;
        }
    }
    debug!(target: "chat_adapter::deepseek::stream", "stream closed by transport");
    Ok(orchestrator.close())
}

/// Outcome of one streamed request.
#[derive(Debug, Default)]
pub struct StreamRound {
    pub tool_calls: Vec<ToolCallRecord>,
    pub headers: Vec<(String, String)>,
}

/// Issue one streaming request and drive its response.
///
/// A `text/plain` response is read whole and appended to the transcript as
/// answer text; any other non-event-stream content type is a parse error.
pub async fn run_stream_round<T>(
    http: &T,
    url: &str,
    headers: &[(String, String)],
    body: &JsonValue,
    transport_cfg: &TransportConfig,
    cancel: &CancelHandle,
    callbacks: &mut dyn ChatCallbacks,
    transcript: &mut TranscriptRenderer,
) -> Result<StreamRound, SdkError>
where
    T: HttpTransport,
{
    let resp = cancel
        .run(http.post_json_stream(url, headers, body, transport_cfg))
        .await?
        .map_err(map_transport_error_to_sdk_error)?;
    let (bytes_stream, resp_headers) = <T as HttpTransport>::into_stream(resp);
    let bytes_stream = bytes_stream.map(|res| res.map_err(map_transport_error_to_sdk_error));

    let content_type = header_value(&resp_headers, "content-type")
        .map(|ct| ct.to_ascii_lowercase())
        .unwrap_or_default();

    if content_type.starts_with("text/plain") {
        let text = collect_body(bytes_stream, cancel).await?;
        transcript.push(&ChatEmission::answer(text));
        return Ok(StreamRound {
            tool_calls: Vec::new(),
            headers: resp_headers,
        });
    }
    if !content_type.is_empty() && !content_type.starts_with("text/event-stream") {
        let body = collect_body(bytes_stream, cancel).await?;
        warn!(
            target: "chat_adapter::deepseek::stream",
            %content_type,
            body = %display_body_for_error(&body),
            "unexpected streaming response content type"
        );
        return Err(SdkError::parse(format!(
            "unexpected stream content-type '{content_type}'"
        )));
    }

    let tool_calls = drive_stream(bytes_stream, cancel, callbacks, transcript).await?;
    Ok(StreamRound {
        tool_calls,
        headers: resp_headers,
    })
}

async fn collect_body<S>(bytes: S, cancel: &CancelHandle) -> Result<String, SdkError>
where
    S: Stream<Item = Result<Bytes, SdkError>> + Send,
{
    futures_util::pin_mut!(bytes);
    let mut buf = Vec::new();
    while let Some(chunk) = cancel.run(bytes.next()).await? {
        buf.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
