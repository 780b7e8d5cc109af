use std::collections::BTreeMap;

use crate::sdk_core::error::SdkError;
use crate::sdk_types::{FunctionCall, ToolCallFragment, ToolCallRecord};

/// Rebuilds tool calls from fragments spread across stream frames.
///
/// Records are keyed by their stream index, so fragments of different calls
/// may interleave freely. A record is never removed while the stream runs.
#[derive(Debug, Default)]
pub struct ToolCallAssembler {
    records: BTreeMap<usize, ToolCallRecord>,
}

impl ToolCallAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one fragment: open (or reopen) the call at its index when it
    /// carries an id, otherwise append to the call already open there.
    pub fn apply(&mut self, fragment: ToolCallFragment) -> Result<(), SdkError> {
        let ToolCallFragment {
            index,
            id,
            kind,
            function_name,
            arguments_chunk,
        } = fragment;

        match id {
            Some(id) => {
                self.records.insert(
                    index,
                    ToolCallRecord {
                        id,
                        kind: kind.unwrap_or_else(|| "function".to_string()),
                        function: FunctionCall {
                            name: function_name.unwrap_or_default(),
                            arguments: arguments_chunk,
                        },
                    },
                );
            }
            None => {
                let Some(record) = self.records.get_mut(&index) else {
                    return Err(SdkError::ToolAssembly { index });
                };
                record.function.arguments.push_str(&arguments_chunk);
            }
        }
        Ok(())
    }

    pub fn contains(&self, index: usize) -> bool {
        self.records.contains_key(&index)
    }

    pub fn get(&self, index: usize) -> Option<&ToolCallRecord> {
        self.records.get(&index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Hand off the assembled calls in index order.
    pub fn finish(self) -> Vec<ToolCallRecord> {
        self.records.into_values().collect()
    }
}
