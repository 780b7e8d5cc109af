use serde_json::json;

use crate::sdk_core::error::SdkError;
use crate::sdk_provider_deepseek::tool_calls::ToolCallAssembler;
use crate::sdk_types::ToolCallFragment;

#[test]
fn fragments_concatenate_into_one_call() {
    let mut assembler = ToolCallAssembler::new();
    assembler
        .apply(ToolCallFragment::open(0, "call_a", "lookup", "{\"x\":"))
        .expect("open");
    assembler
        .apply(ToolCallFragment::append(0, "1}"))
        .expect("append");

    let calls = assembler.finish();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].id, "call_a");
    assert_eq!(calls[0].kind, "function");
    assert_eq!(calls[0].function_name(), "lookup");
    assert_eq!(calls[0].arguments(), "{\"x\":1}");
    assert_eq!(calls[0].parsed_arguments().expect("json"), json!({"x": 1}));
}

#[test]
fn interleaved_indexes_assemble_independently() {
    let mut assembler = ToolCallAssembler::new();
    for fragment in [
        ToolCallFragment::open(1, "call_b", "second", "{\"b\""),
        ToolCallFragment::open(0, "call_a", "first", "{\"a\""),
        ToolCallFragment::append(1, ":2}"),
        ToolCallFragment::append(0, ":1}"),
    ] {
        assembler.apply(fragment).expect("apply");
    }
    assert_eq!(assembler.len(), 2);

    let calls = assembler.finish();
    assert_eq!(calls[0].id, "call_a");
    assert_eq!(calls[0].arguments(), "{\"a\":1}");
    assert_eq!(calls[1].id, "call_b");
    assert_eq!(calls[1].arguments(), "{\"b\":2}");
}

#[test]
fn continuation_without_open_call_fails() {
    let mut assembler = ToolCallAssembler::new();
    let err = assembler
        .apply(ToolCallFragment::append(3, "{}"))
        .expect_err("must fail");
    assert!(matches!(err, SdkError::ToolAssembly { index: 3 }));
    assert!(assembler.is_empty());
}

#[test]
fn new_id_at_same_index_replaces_the_call() {
    let mut assembler = ToolCallAssembler::new();
    assembler
        .apply(ToolCallFragment::open(0, "old", "f", "{\"stale\""))
        .expect("open");
    assembler
        .apply(ToolCallFragment::open(0, "new", "g", "{}"))
        .expect("reopen");
    let record = assembler.get(0).expect("record");
    assert_eq!(record.id, "new");
    assert_eq!(record.function_name(), "g");
    assert_eq!(record.arguments(), "{}");
}

#[test]
fn missing_type_and_name_get_defaults() {
    let mut assembler = ToolCallAssembler::new();
    assembler
        .apply(ToolCallFragment {
            index: 0,
            id: Some("call".into()),
            ..ToolCallFragment::default()
        })
        .expect("open");
    assert!(assembler.contains(0));
    let record = assembler.get(0).expect("record");
    assert_eq!(record.kind, "function");
    assert_eq!(record.function_name(), "");
    assert_eq!(record.arguments(), "");
}
