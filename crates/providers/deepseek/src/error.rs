use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::sdk_core::error::{
    build_http_status_transport_error, http_status_fallback_message, SdkError, TransportError,
};

/// OpenAI-style error body returned by DeepSeek.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepSeekInnerError {
    pub message: String,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default)]
    pub param: Option<JsonValue>,
    #[serde(default)]
    pub code: Option<JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepSeekErrorData {
    pub error: DeepSeekInnerError,
}

/// Map a transport failure to an `SdkError`, lifting the upstream message
/// out of the error body when it parses.
pub fn map_transport_error_to_sdk_error(te: TransportError) -> SdkError {
    match te {
        TransportError::HttpStatus {
            status,
            body,
            retry_after_ms,
            headers,
            ..
        } => {
            if status == 429 {
                return SdkError::RateLimited {
                    retry_after_ms,
                    source: Some(Box::new(build_http_status_transport_error(
                        status,
                        body,
                        retry_after_ms,
                        headers,
                    ))),
                };
            }

            let message = serde_json::from_str::<DeepSeekErrorData>(&body)
                .map(|data| data.error.message)
                .unwrap_or_else(|_| http_status_fallback_message(status));
            SdkError::Upstream {
                status,
                message,
                source: Some(Box::new(build_http_status_transport_error(
                    status,
                    body,
                    retry_after_ms,
                    headers,
                ))),
            }
        }
        other => SdkError::Transport(other),
    }
}

#[cfg(test)]
mod tests {
    use super::map_transport_error_to_sdk_error;
    use crate::sdk_core::error::{build_http_status_transport_error, SdkError, TransportError};

    #[test]
    fn rate_limit_keeps_retry_after() {
        let mapped = map_transport_error_to_sdk_error(build_http_status_transport_error(
            429,
            "busy".into(),
            Some(1500),
            Vec::new(),
        ));
        match mapped {
            SdkError::RateLimited { retry_after_ms, .. } => assert_eq!(retry_after_ms, Some(1500)),
            other => panic!("expected rate limited, got {other:?}"),
        }
    }

    #[test]
    fn error_body_message_is_lifted() {
        let body = r#"{"error":{"message":"Insufficient Balance","type":"unknown_error","param":null,"code":"invalid_request_error"}}"#;
        let mapped = map_transport_error_to_sdk_error(build_http_status_transport_error(
            402,
            body.into(),
            None,
            Vec::new(),
        ));
        match mapped {
            SdkError::Upstream {
                status, message, ..
            } => {
                assert_eq!(status, 402);
                assert_eq!(message, "Insufficient Balance");
            }
            other => panic!("expected upstream, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_body_falls_back_to_status() {
        let mapped = map_transport_error_to_sdk_error(build_http_status_transport_error(
            500,
            "<html>oops</html>".into(),
            None,
            Vec::new(),
        ));
        match mapped {
            SdkError::Upstream { message, .. } => assert_eq!(message, "http status 500"),
            other => panic!("expected upstream, got {other:?}"),
        }
    }

    #[test]
    fn non_status_errors_stay_transport_errors() {
        let mapped = map_transport_error_to_sdk_error(TransportError::Network("reset".into()));
        assert!(matches!(mapped, SdkError::Transport(TransportError::Network(_))));
    }
}
