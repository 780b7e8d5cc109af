use crate::sdk_core::error::{display_body_for_error, TransportError};
use crate::sdk_core::json::without_null_fields;
use crate::sdk_core::transport::{
    emit_transport_event, ByteStream, HttpTransport, TransportBody, TransportConfig,
    TransportEvent,
};
use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::Value;
use std::error::Error as StdError;
use std::time::{Duration, Instant, SystemTime};
use tracing::debug;

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    fn configure_builder(
        mut builder: reqwest::ClientBuilder,
        cfg: &TransportConfig,
    ) -> reqwest::ClientBuilder {
        builder = builder
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .pool_idle_timeout(Duration::from_secs(90));
        if let Some(req_timeout) = cfg.request_timeout {
            builder = builder.timeout(req_timeout);
        }
        builder.connect_timeout(cfg.connect_timeout)
    }

    fn try_new_with_builder(
        cfg: &TransportConfig,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self, TransportError> {
        let builder = Self::configure_builder(builder, cfg);
        let client = builder.build().map_err(|err| {
            TransportError::Other(format!(
                "reqwest client build failed: {}",
                format_reqwest_error_chain(&err)
            ))
        })?;
        Ok(Self { client })
    }

    fn new_with_builder(cfg: &TransportConfig, builder: reqwest::ClientBuilder) -> Self {
        match Self::try_new_with_builder(cfg, builder) {
            Ok(transport) => transport,
            Err(err) => {
                debug!(
                    target: "chat_adapter::transport::reqwest",
                    error = %err,
                    "falling back to reqwest::Client::new after transport init failure"
                );
                Self {
                    client: Client::new(),
                }
            }
        }
    }

    pub fn try_new(cfg: &TransportConfig) -> Result<Self, TransportError> {
        Self::try_new_with_builder(cfg, Client::builder())
    }

    pub fn new(cfg: &TransportConfig) -> Self {
        Self::new_with_builder(cfg, Client::builder())
    }

    /// Send a JSON POST, emitting transport events and mapping non-success
    /// statuses to `TransportError::HttpStatus`.
    async fn send_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
        is_stream: bool,
    ) -> Result<(reqwest::Response, RequestTrace), TransportError> {
        let cleaned_body: Value = if cfg.strip_null_fields {
            without_null_fields(body)
        } else {
            body.clone()
        };

        let mut req = self.client.post(url).json(&cleaned_body);
        for (k, v) in headers {
            // .json() already sets Content-Type
            if !k.eq_ignore_ascii_case("content-type") {
                req = req.header(k, v);
            }
        }

        let request_snapshot = req.try_clone().and_then(|r| r.build().ok());
        let (method, request_url, request_headers) = match request_snapshot.as_ref() {
            Some(req) => (
                req.method().to_string(),
                req.url().to_string(),
                header_pairs(req.headers()),
            ),
            None => ("POST".to_string(), url.to_string(), headers.to_vec()),
        };
        let trace = RequestTrace {
            started_at: SystemTime::now(),
            start_instant: Instant::now(),
            method,
            url: request_url,
            request_headers,
            request_body: Some(TransportBody::Json(cleaned_body)),
            is_stream,
        };

        let resp = match req.send().await {
            Ok(r) => r,
            Err(e) => {
                let detail = format_reqwest_error_chain(&e);
                debug!(target: "chat_adapter::transport::reqwest", %detail, "reqwest send failed");
                trace.emit(None, Vec::new(), None, None, Some(detail.clone()));
                return Err(if e.is_connect() {
                    TransportError::Network(format!("connect: {detail}"))
                } else if e.is_timeout() {
                    TransportError::ConnectTimeout(cfg.connect_timeout)
                } else {
                    TransportError::Network(detail)
                });
            }
        };

        let status = resp.status();
        if !status.is_success() {
            let retry_after_ms = resp
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|h| h.to_str().ok())
                .and_then(parse_retry_after_ms);
            let res_headers = header_pairs(resp.headers());
            let body_text = resp.text().await.unwrap_or_default();
            let sanitized = display_body_for_error(&body_text);
            trace.emit(
                Some(status.as_u16()),
                res_headers.clone(),
                Some(TransportBody::Text(body_text.clone())),
                Some(body_text.len()),
                Some(format!("HTTP {}: {}", status.as_u16(), sanitized)),
            );
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                body: body_text,
                retry_after_ms,
                sanitized,
                headers: res_headers,
            });
        }

        Ok((resp, trace))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(&TransportConfig::default())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    type StreamResponse = (ByteStream, Vec<(String, String)>);

    fn into_stream(resp: Self::StreamResponse) -> (ByteStream, Vec<(String, String)>) {
        resp
    }

    async fn post_json_stream(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<Self::StreamResponse, TransportError> {
        let (resp, trace) = self.send_json(url, headers, body, cfg, true).await?;
        let res_headers = header_pairs(resp.headers());
        trace.emit(
            Some(resp.status().as_u16()),
            res_headers.clone(),
            None,
            None,
            None,
        );

        // Success: stream the bytes with idle timeout enforcement
        let idle = cfg.idle_read_timeout;
        let mut inner = resp.bytes_stream();
        let s = async_stream::try_stream! {
            loop {
                let next = tokio::time::timeout(idle, inner.next()).await;
                match next {
                    Err(_) => Err(TransportError::IdleReadTimeout(idle))?,
                    Ok(None) => break,
                    Ok(Some(Err(e))) => {
                        if e.is_timeout() { Err(TransportError::IdleReadTimeout(idle))?; }
                        else { Err(TransportError::BodyRead(e.to_string()))?; }
                    }
                    Ok(Some(Ok(bytes))) => { yield bytes; }
                }
            }
        };
        Ok((Box::pin(s), res_headers))
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(String, String)],
        body: &Value,
        cfg: &TransportConfig,
    ) -> Result<(Value, Vec<(String, String)>), TransportError> {
        let (resp, trace) = self.send_json(url, headers, body, cfg, false).await?;
        let status = resp.status().as_u16();
        let res_headers = header_pairs(resp.headers());
        let text = resp
            .text()
            .await
            .map_err(|e| TransportError::BodyRead(e.to_string()))?;
        let json: Value = serde_json::from_str(&text)
            .map_err(|_| TransportError::BodyRead("invalid json".into()))?;
        trace.emit(
            Some(status),
            res_headers.clone(),
            Some(TransportBody::Json(json.clone())),
            Some(text.len()),
            None,
        );
        Ok((json, res_headers))
    }
}

/// Request-side facts captured before sending, replayed into each emitted event.
struct RequestTrace {
    started_at: SystemTime,
    start_instant: Instant,
    method: String,
    url: String,
    request_headers: Vec<(String, String)>,
    request_body: Option<TransportBody>,
    is_stream: bool,
}

impl RequestTrace {
    fn emit(
        &self,
        status: Option<u16>,
        response_headers: Vec<(String, String)>,
        response_body: Option<TransportBody>,
        response_size: Option<usize>,
        error: Option<String>,
    ) {
        emit_transport_event(TransportEvent {
            started_at: self.started_at,
            latency: Some(self.start_instant.elapsed()),
            method: self.method.clone(),
            url: self.url.clone(),
            status,
            request_headers: self.request_headers.clone(),
            response_headers,
            request_body: self.request_body.clone(),
            response_body,
            response_size,
            error,
            is_stream: self.is_stream,
        });
    }
}

fn header_pairs(headers: &http::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect()
}

fn parse_retry_after_ms(s: &str) -> Option<u64> {
    // delta-seconds only; HTTP-date values are ignored
    s.trim().parse::<u64>().ok().map(|secs| secs * 1000)
}

fn format_reqwest_error_chain(err: &reqwest::Error) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(src) = current {
        out.push_str(": ");
        out.push_str(&src.to_string());
        current = src.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_new_returns_transport_error_when_client_build_fails() {
        let cfg = TransportConfig::default();
        let err = match ReqwestTransport::try_new_with_builder(
            &cfg,
            Client::builder().user_agent("bad\nagent"),
        ) {
            Ok(_) => panic!("invalid user-agent should fail reqwest client build"),
            Err(err) => err,
        };
        match err {
            TransportError::Other(message) => {
                assert!(
                    message.contains("reqwest client build failed"),
                    "unexpected message: {message}"
                );
            }
            other => panic!("unexpected transport error variant: {other:?}"),
        }
    }

    #[test]
    fn new_with_builder_does_not_panic_when_client_build_fails() {
        let cfg = TransportConfig::default();
        let _transport =
            ReqwestTransport::new_with_builder(&cfg, Client::builder().user_agent("bad\nagent"));
    }

    use crate::sdk_core::transport::{set_transport_observer, TransportObserver};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct CollectingObserver {
        events: Mutex<Vec<TransportEvent>>,
    }

    impl TransportObserver for CollectingObserver {
        fn on_event(&self, event: TransportEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[tokio::test]
    async fn failed_requests_emit_one_event_each() {
        let observer = Arc::new(CollectingObserver::default());
        assert!(set_transport_observer(observer.clone()));

        let url = "http://127.0.0.1:1/chat/completions";
        let cfg = TransportConfig {
            connect_timeout: Duration::from_secs(2),
            ..TransportConfig::default()
        };
        let transport = ReqwestTransport::new(&cfg);
        let body = json!({"model": "deepseek-chat", "temperature": null});
        let headers = vec![("authorization".to_string(), "Bearer sk".to_string())];

        let err = transport
            .post_json(url, &headers, &body, &cfg)
            .await
            .expect_err("nothing listens on port 1");
        assert!(matches!(
            err,
            TransportError::Network(_) | TransportError::ConnectTimeout(_)
        ));
        assert!(transport
            .post_json_stream(url, &headers, &body, &cfg)
            .await
            .is_err());

        let events = observer.events.lock().unwrap();
        let ours: Vec<_> = events.iter().filter(|e| e.url == url).collect();
        assert_eq!(ours.len(), 2);
        assert!(!ours[0].is_stream);
        assert!(ours[1].is_stream);
        for event in ours {
            assert_eq!(event.method, "POST");
            assert!(event.status.is_none());
            assert!(event.error.is_some());
            match &event.request_body {
                Some(TransportBody::Json(sent)) => {
                    assert_eq!(sent, &json!({"model": "deepseek-chat"}))
                }
                other => panic!("expected json request body, got {other:?}"),
            }
        }
    }

    #[test]
    fn retry_after_parses_delta_seconds_only() {
        assert_eq!(parse_retry_after_ms(" 3 "), Some(3000));
        assert_eq!(parse_retry_after_ms("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }
}
