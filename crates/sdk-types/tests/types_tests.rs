use crate::sdk_types::{
    ChatEmission, ContentPart, FunctionCall, ImageUrl, Message, MessageContent, ModelConfig,
    Role, ToolCallRecord,
};
use serde_json::json;

#[test]
fn plain_message_omits_tool_fields() {
    let value = serde_json::to_value(Message::user("hello")).expect("serialize");
    assert_eq!(value, json!({"role":"user","content":"hello"}));
}

#[test]
fn tool_call_record_uses_wire_shape() {
    let record = ToolCallRecord {
        id: "call_1".into(),
        kind: "function".into(),
        function: FunctionCall {
            name: "lookup".into(),
            arguments: "{\"q\":\"rust\"}".into(),
        },
    };
    let msg = Message::assistant_tool_calls(vec![record.clone()]);
    let value = serde_json::to_value(&msg).expect("serialize");
    assert_eq!(
        value,
        json!({
            "role":"assistant",
            "content":"",
            "tool_calls":[{"id":"call_1","type":"function","function":{"name":"lookup","arguments":"{\"q\":\"rust\"}"}}]
        })
    );
    assert_eq!(record.parsed_arguments().expect("json"), json!({"q":"rust"}));
}

#[test]
fn tool_result_message_carries_call_id() {
    let value = serde_json::to_value(Message::tool_result("call_9", "42")).expect("serialize");
    assert_eq!(
        value,
        json!({"role":"tool","content":"42","tool_call_id":"call_9"})
    );
}

#[test]
fn multimodal_content_text_is_first_text_part() {
    let content = MessageContent::Parts(vec![
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: "https://example.com/cat.png".into(),
            },
        },
        ContentPart::Text {
            text: "what is this?".into(),
        },
        ContentPart::Text {
            text: "ignored".into(),
        },
    ]);
    assert_eq!(content.text(), "what is this?");
    assert_eq!(MessageContent::Parts(vec![]).text(), "");
}

#[test]
fn multimodal_content_deserializes_untagged() {
    let content: MessageContent = serde_json::from_value(json!([
        {"type":"text","text":"hi"},
        {"type":"image_url","image_url":{"url":"data:image/png;base64,AA=="}}
    ]))
    .expect("parts");
    assert_eq!(content.text(), "hi");

    let content: MessageContent = serde_json::from_value(json!("plain")).expect("text");
    assert_eq!(content, MessageContent::Text("plain".into()));
}

#[test]
fn model_config_overlay_prefers_later_layer() {
    let base = ModelConfig {
        model: Some("deepseek-chat".into()),
        temperature: Some(0.5),
        top_p: Some(1.0),
        ..ModelConfig::default()
    };
    let overlay = ModelConfig {
        temperature: Some(0.9),
        ..ModelConfig::default()
    };
    let merged = base.merged_with(&overlay);
    assert_eq!(merged.model.as_deref(), Some("deepseek-chat"));
    assert_eq!(merged.temperature, Some(0.9));
    assert_eq!(merged.top_p, Some(1.0));
}

#[test]
fn emission_helpers() {
    assert!(ChatEmission::empty().is_empty());
    assert!(!ChatEmission::empty().is_thinking);
    assert!(ChatEmission::thinking("hmm").is_thinking);
    assert_eq!(Role::Tool.as_str(), "tool");
}
