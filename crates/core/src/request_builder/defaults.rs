//! Layered model configuration.
//!
//! Precedence order (later wins):
//! 1) Application defaults.
//! 2) The active session's override.
//! 3) Explicit per-call values; model and provider name always come from here.
//!
//! Layers are read-only snapshots taken at call start, never live stores.

use serde_json::Value as JsonValue;

use crate::core::error::SdkError;
use crate::sdk_types::ModelConfig;

/// Snapshot of the stored configuration layers for one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigLayers {
    pub app: ModelConfig,
    pub session: ModelConfig,
}

impl ConfigLayers {
    pub fn new(app: ModelConfig, session: ModelConfig) -> Self {
        Self { app, session }
    }

    /// Build layers from stored JSON blobs (e.g. a persisted app config and the
    /// session mask's model config). Unknown keys are ignored.
    pub fn from_json(app: &JsonValue, session: Option<&JsonValue>) -> Result<Self, SdkError> {
        let app: ModelConfig = serde_json::from_value(app.clone())?;
        let session = match session {
            Some(value) => serde_json::from_value(value.clone())?,
            None => ModelConfig::default(),
        };
        Ok(Self { app, session })
    }
}

/// Explicit per-call configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallConfig {
    pub model: String,
    pub provider_name: String,
    pub stream: bool,
}

impl CallConfig {
    pub fn new(model: impl Into<String>, provider_name: impl Into<String>, stream: bool) -> Self {
        Self {
            model: model.into(),
            provider_name: provider_name.into(),
            stream,
        }
    }
}

/// Merge the layers and the call's explicit values into one model config.
pub fn resolve_model_config(layers: &ConfigLayers, call: &CallConfig) -> ModelConfig {
    let explicit = ModelConfig {
        model: Some(call.model.clone()),
        provider_name: Some(call.provider_name.clone()),
        ..ModelConfig::default()
    };
    layers
        .app
        .clone()
        .merged_with(&layers.session)
        .merged_with(&explicit)
}
