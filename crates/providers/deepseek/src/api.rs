use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::sdk_core::api::{ChatApi, ChatOptions, LlmModel, LlmUsage, SpeechOptions};
use crate::sdk_core::callbacks::{ChatCallbacks, ChatResponse};
use crate::sdk_core::cancel::CancelHandle;
use crate::sdk_core::error::SdkError;
use crate::sdk_core::json::to_request_body;
use crate::sdk_core::tools::ToolExecutor;
use crate::sdk_core::transport::HttpTransport;
use crate::sdk_provider_deepseek::config::{timeout_for_model, DeepSeekConfig, PROVIDER_NAME};
use crate::sdk_provider_deepseek::error::map_transport_error_to_sdk_error;
use crate::sdk_provider_deepseek::normalize::{normalize_messages, to_wire_messages};
use crate::sdk_provider_deepseek::request::build_request_payload;
use crate::sdk_provider_deepseek::stream::run_stream_round;
use crate::sdk_provider_deepseek::transcript::TranscriptRenderer;
use crate::sdk_types::{Message, RequestPayload};

/// DeepSeek chat-completions client.
pub struct DeepSeekApi<T: HttpTransport = crate::reqwest_transport::ReqwestTransport> {
    cfg: DeepSeekConfig,
    http: T,
}

impl DeepSeekApi {
    pub fn new(cfg: DeepSeekConfig) -> Self {
        let http = crate::reqwest_transport::ReqwestTransport::new(&cfg.transport);
        Self { cfg, http }
    }
}

impl<T: HttpTransport> DeepSeekApi<T> {
    pub fn with_transport(cfg: DeepSeekConfig, http: T) -> Self {
        Self { cfg, http }
    }

    pub fn config(&self) -> &DeepSeekConfig {
        &self.cfg
    }

    async fn chat_buffered(
        &self,
        payload: RequestPayload,
        cancel: &CancelHandle,
    ) -> Result<(String, ChatResponse), SdkError> {
        let url = self.cfg.chat_url()?;
        let body = to_request_body(&payload)?;
        let (json, headers) = cancel
            .run(self.http.post_json(
                &url,
                &self.cfg.request_headers(),
                &body,
                &self.cfg.transport,
            ))
            .await?
            .map_err(map_transport_error_to_sdk_error)?;
        let text = self.extract_message(&json);
        Ok((
            text,
            ChatResponse {
                headers,
                raw: Some(json),
                tool_calls: Vec::new(),
            },
        ))
    }

    /// Stream the response; when tools are available and the model asks for
    /// them, execute the calls, append the exchange to the conversation and
    /// stream the follow-up, all under the same cancel handle.
    async fn chat_stream(
        &self,
        mut payload: RequestPayload,
        tools: Option<Arc<dyn ToolExecutor>>,
        cancel: &CancelHandle,
        callbacks: &mut dyn ChatCallbacks,
    ) -> Result<(String, ChatResponse), SdkError> {
        let url = self.cfg.chat_url()?;
        let headers = self.cfg.request_headers();
        let mut transcript = TranscriptRenderer::new();
        let mut rounds = 0usize;

        loop {
            let body = to_request_body(&payload)?;
            let round = run_stream_round(
                &self.http,
                &url,
                &headers,
                &body,
                &self.cfg.transport,
                cancel,
                callbacks,
                &mut transcript,
            )
            .await?;

            let executor = match tools.as_ref() {
                Some(executor) if !round.tool_calls.is_empty() => executor,
                _ => {
                    return Ok((
                        transcript.into_string(),
                        ChatResponse {
                            headers: round.headers,
                            raw: None,
                            tool_calls: round.tool_calls,
                        },
                    ))
                }
            };
            if rounds >= self.cfg.max_tool_rounds {
                warn!(
                    target: "chat_adapter::deepseek",
                    rounds,
                    "tool round limit reached; finishing with pending tool calls"
                );
                return Ok((
                    transcript.into_string(),
                    ChatResponse {
                        headers: round.headers,
                        raw: None,
                        tool_calls: round.tool_calls,
                    },
                ));
            }
            rounds += 1;

            let mut results = Vec::with_capacity(round.tool_calls.len());
            for call in &round.tool_calls {
                debug!(
                    target: "chat_adapter::deepseek",
                    tool = %call.function.name,
                    id = %call.id,
                    "executing tool call"
                );
                let output = cancel.run(executor.execute(call)).await??;
                results.push(Message::tool_result(call.id.clone(), output));
            }
            payload.messages.push(Message::assistant_tool_calls(round.tool_calls));
            payload.messages.extend(results);
        }
    }
}

#[async_trait]
impl<T: HttpTransport + Send + Sync> ChatApi for DeepSeekApi<T> {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn chat(&self, options: ChatOptions) {
        let ChatOptions {
            messages,
            config,
            layers,
            mut callbacks,
            tools,
        } = options;

        let tool_definitions = match (&tools, config.stream) {
            (Some(executor), true) => Some(executor.definitions()),
            _ => None,
        };
        let messages = normalize_messages(to_wire_messages(&messages));
        let payload = build_request_payload(messages, &layers, &config, tool_definitions);
        info!(
            target: "chat_adapter::deepseek",
            model = %payload.model,
            stream = payload.stream,
            messages = payload.messages.len(),
            "[Request] deepseek payload"
        );

        let cancel = CancelHandle::new();
        callbacks.on_controller(cancel.clone());
        let timer = cancel.arm_timeout(timeout_for_model(&config.model));

        let outcome = if payload.stream {
            self.chat_stream(payload, tools, &cancel, callbacks.as_mut())
                .await
        } else {
            self.chat_buffered(payload, &cancel).await
        };
        timer.clear();

        match outcome {
            Ok((text, response)) => callbacks.on_finish(text, response),
            Err(err) => {
                warn!(
                    target: "chat_adapter::deepseek",
                    error = %err.format_details(),
                    "[Request] failed to make a chat request"
                );
                callbacks.on_error(err);
            }
        }
    }

    async fn speech(&self, _options: SpeechOptions) -> Result<Bytes, SdkError> {
        Err(SdkError::Unsupported {
            capability: "speech",
        })
    }

    async fn usage(&self) -> Result<LlmUsage, SdkError> {
        Ok(LlmUsage::default())
    }

    async fn models(&self) -> Result<Vec<LlmModel>, SdkError> {
        Ok(Vec::new())
    }

    fn extract_message(&self, response: &JsonValue) -> String {
        response
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }
}
