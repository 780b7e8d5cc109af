use std::time::Duration;

use url::Url;

use crate::sdk_core::error::SdkError;
use crate::sdk_core::transport::TransportConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const CHAT_PATH: &str = "chat/completions";
pub const PROVIDER_NAME: &str = "DeepSeek";

/// Request timeout for ordinary chat models.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
/// Request timeout for reasoning models, which think before answering.
pub const REQUEST_TIMEOUT_FOR_THINKING: Duration = Duration::from_secs(60 * 5);

const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    pub base_url: String,
    pub chat_path: String,
    pub api_key: Option<String>,
    /// Extra headers appended after the auth/content headers.
    pub headers: Vec<(String, String)>,
    pub query_params: Vec<(String, String)>,
    pub transport: TransportConfig,
    /// Upper bound on tool-call follow-up requests within one chat call.
    pub max_tool_rounds: usize,
}

impl Default for DeepSeekConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            chat_path: CHAT_PATH.into(),
            api_key: None,
            headers: Vec::new(),
            query_params: Vec::new(),
            transport: TransportConfig::default(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }
}

impl DeepSeekConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Read `DEEPSEEK_API_KEY` and optional `DEEPSEEK_BASE_URL`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.api_key = std::env::var("DEEPSEEK_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());
        if let Some(base) = std::env::var("DEEPSEEK_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            cfg.base_url = base;
        }
        cfg
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Full chat-completions URL.
    pub fn chat_url(&self) -> Result<String, SdkError> {
        let base = resolve_base_url(&self.base_url)?;
        let mut url = format!("{}/{}", base, self.chat_path.trim_start_matches('/'));
        if !self.query_params.is_empty() {
            let qp = self
                .query_params
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&qp);
        }
        Ok(url)
    }

    /// Content/accept/authorization headers followed by the configured extras.
    pub fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("content-type".to_string(), "application/json".to_string()),
            ("accept".to_string(), "application/json".to_string()),
        ];
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            headers.push(("authorization".into(), bearer(key)));
        }
        for (k, v) in &self.headers {
            let kl = k.to_ascii_lowercase();
            if kl == "content-type" || kl == "authorization" || kl == "accept" {
                continue;
            }
            headers.push((kl, v.clone()));
        }
        headers
    }
}

fn bearer(key: &str) -> String {
    if key.to_lowercase().starts_with("bearer ") {
        key.to_string()
    } else {
        format!("Bearer {key}")
    }
}

/// Normalize a configured base URL: trailing `/` removed, `https://` added
/// when no scheme is present.
pub fn resolve_base_url(raw: &str) -> Result<String, SdkError> {
    let mut base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        base = DEFAULT_BASE_URL.to_string();
    }
    if !base.starts_with("http") {
        base = format!("https://{base}");
    }
    Url::parse(&base).map_err(|err| SdkError::InvalidArgument {
        message: format!("invalid DeepSeek base url '{raw}': {err}"),
    })?;
    Ok(base)
}

/// Call timeout for `model`; reasoning models get the long timeout.
pub fn timeout_for_model(model: &str) -> Duration {
    let model = model.to_lowercase();
    let thinking = model.starts_with("dall-e")
        || model.starts_with("dalle")
        || model.starts_with("o1")
        || model.starts_with("o3")
        || model.contains("deepseek-r")
        || model.contains("-thinking");
    if thinking {
        REQUEST_TIMEOUT_FOR_THINKING
    } else {
        REQUEST_TIMEOUT
    }
}
