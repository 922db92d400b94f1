use crate::utils::error::CommandError;
use serde::Serialize;
use serde_json::{Map, Value};

pub type Payload = Map<String, Value>;

/// Renders `{ok, ...payload}` as one JSON line. `ok` is inserted first and the
/// payload is merged over it, so a payload `ok` key replaces the flag in place.
pub fn json_out(ok: bool, payload: Payload) -> String {
    let mut envelope = Map::new();
    envelope.insert("ok".to_string(), Value::Bool(ok));
    for (key, value) in payload {
        envelope.insert(key, value);
    }
    Value::Object(envelope).to_string()
}

pub fn success(payload: Payload) -> String {
    json_out(true, payload)
}

pub fn failure(err: &CommandError) -> String {
    let mut payload = Map::new();
    payload.insert("error".to_string(), Value::String(err.to_string()));
    if let Some(diagnostics) = err.diagnostics() {
        for (key, value) in diagnostics {
            payload.insert(key.clone(), value.clone());
        }
    }
    json_out(false, payload)
}

/// Serializes a response struct into a payload map.
pub fn to_payload<T: Serialize>(value: &T) -> Result<Payload, CommandError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => {
            let mut map = Map::new();
            map.insert("result".to_string(), other);
            Ok(map)
        }
        Err(e) => Err(CommandError::External {
            message: format!("failed to encode response: {}", e),
            diagnostics: Map::new(),
        }),
    }
}
