use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One unit pushed to the caller's output channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatEmission {
    pub is_thinking: bool,
    pub content: String,
}

impl ChatEmission {
    pub fn thinking(content: impl Into<String>) -> Self {
        Self {
            is_thinking: true,
            content: content.into(),
        }
    }

    pub fn answer(content: impl Into<String>) -> Self {
        Self {
            is_thinking: false,
            content: content.into(),
        }
    }

    /// The no-op emission produced for frames without any text.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A partial tool-call delta as it arrives inside one stream frame.
///
/// `id` present opens a new invocation at `index`; `id` absent continues the
/// invocation already open there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolCallFragment {
    pub index: usize,
    pub id: Option<String>,
    pub kind: Option<String>,
    pub function_name: Option<String>,
    pub arguments_chunk: String,
}

impl ToolCallFragment {
    /// Fragment that opens the invocation at `index`.
    pub fn open(
        index: usize,
        id: impl Into<String>,
        function_name: impl Into<String>,
        arguments_chunk: impl Into<String>,
    ) -> Self {
        Self {
            index,
            id: Some(id.into()),
            kind: Some("function".into()),
            function_name: Some(function_name.into()),
            arguments_chunk: arguments_chunk.into(),
        }
    }

    /// Fragment that appends to the invocation at `index`.
    pub fn append(index: usize, arguments_chunk: impl Into<String>) -> Self {
        Self {
            index,
            arguments_chunk: arguments_chunk.into(),
            ..Self::default()
        }
    }

    pub fn opens_call(&self) -> bool {
        self.id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// A tool invocation assembled from fragments; serializes in the
/// `{"id","type","function":{"name","arguments"}}` wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionCall,
}

impl ToolCallRecord {
    pub fn function_name(&self) -> &str {
        &self.function.name
    }

    pub fn arguments(&self) -> &str {
        &self.function.arguments
    }

    /// Parse the concatenated argument text.
    pub fn parsed_arguments(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::from_str(&self.function.arguments)
    }
}
