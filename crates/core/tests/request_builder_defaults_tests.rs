use crate::sdk_core::request_builder::defaults::{resolve_model_config, CallConfig, ConfigLayers};
use crate::sdk_types::ModelConfig;
use serde_json::json;

fn call(model: &str) -> CallConfig {
    CallConfig::new(model, "DeepSeek", true)
}

#[test]
fn session_overrides_app_defaults() {
    let layers = ConfigLayers::new(
        ModelConfig {
            model: Some("deepseek-chat".into()),
            temperature: Some(0.5),
            top_p: Some(1.0),
            presence_penalty: Some(0.0),
            ..ModelConfig::default()
        },
        ModelConfig {
            temperature: Some(1.3),
            ..ModelConfig::default()
        },
    );
    let merged = resolve_model_config(&layers, &call("deepseek-chat"));
    assert_eq!(merged.temperature, Some(1.3));
    assert_eq!(merged.top_p, Some(1.0));
    assert_eq!(merged.presence_penalty, Some(0.0));
}

#[test]
fn per_call_model_and_provider_always_win() {
    let layers = ConfigLayers::new(
        ModelConfig {
            model: Some("app-model".into()),
            provider_name: Some("OpenAI".into()),
            ..ModelConfig::default()
        },
        ModelConfig {
            model: Some("session-model".into()),
            ..ModelConfig::default()
        },
    );
    let merged = resolve_model_config(&layers, &call("deepseek-reasoner"));
    assert_eq!(merged.model.as_deref(), Some("deepseek-reasoner"));
    assert_eq!(merged.provider_name.as_deref(), Some("DeepSeek"));
}

#[test]
fn out_of_range_values_pass_through() {
    let layers = ConfigLayers::new(
        ModelConfig {
            temperature: Some(7.5),
            frequency_penalty: Some(-9.0),
            ..ModelConfig::default()
        },
        ModelConfig::default(),
    );
    let merged = resolve_model_config(&layers, &call("deepseek-chat"));
    assert_eq!(merged.temperature, Some(7.5));
    assert_eq!(merged.frequency_penalty, Some(-9.0));
}

#[test]
fn layers_load_from_stored_json() {
    let app = json!({"model": "deepseek-chat", "temperature": 0.5, "max_tokens": 4000, "sendMemory": true});
    let session = json!({"top_p": 0.8});
    let layers = ConfigLayers::from_json(&app, Some(&session)).expect("layers");
    assert_eq!(layers.app.temperature, Some(0.5));
    assert_eq!(layers.app.max_tokens, Some(4000));
    assert_eq!(layers.session.top_p, Some(0.8));

    let layers = ConfigLayers::from_json(&app, None).expect("layers");
    assert_eq!(layers.session, ModelConfig::default());
}

#[test]
fn malformed_stored_json_is_an_error() {
    let app = json!({"temperature": "hot"});
    assert!(ConfigLayers::from_json(&app, None).is_err());
}
