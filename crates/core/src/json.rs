use serde::Serialize;
use serde_json::Value;

use crate::core::error::SdkError;

/// Recursively remove all object fields whose value is `Value::Null`.
///
/// Array elements that are null stay in place so indices keep their meaning.
pub fn prune_null_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for v in map.values_mut() {
                prune_null_fields(v);
            }
            map.retain(|_, v| !matches!(v, Value::Null));
        }
        Value::Array(arr) => {
            for v in arr.iter_mut() {
                prune_null_fields(v);
            }
        }
        _ => {}
    }
}

/// Return a cloned JSON value with all object fields that have `null` values removed.
pub fn without_null_fields(value: &Value) -> Value {
    let mut cloned = value.clone();
    prune_null_fields(&mut cloned);
    cloned
}

/// Serialize a request payload into the JSON body handed to a transport.
pub fn to_request_body<T: Serialize>(payload: &T) -> Result<Value, SdkError> {
    let mut body = serde_json::to_value(payload)?;
    prune_null_fields(&mut body);
    Ok(body)
}
