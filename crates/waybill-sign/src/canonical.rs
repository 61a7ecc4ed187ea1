use std::collections::BTreeMap;

use serde_json::Value;

use crate::Method;

/// Request parameters in insertion order.
///
/// Insertion order is observable: it determines the POST canonical form.
pub type Params = serde_json::Map<String, Value>;

/// Drop every parameter whose value is `null`.
pub fn strip_nulls(params: &Params) -> Params {
    params
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Render a parameter value the way it appears in the GET canonical string.
///
/// Strings are emitted raw (no quotes, no URL encoding); every other value is
/// emitted as its compact JSON text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// GET canonical form: nulls dropped, keys sorted, `key=value` joined by `&`.
pub fn canonical_query(params: &Params) -> String {
    let sorted: BTreeMap<&str, &Value> = params
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k.as_str(), v))
        .collect();

    sorted
        .into_iter()
        .map(|(k, v)| format!("{k}={}", render_value(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// POST canonical form: compact JSON of the whole object in insertion order.
pub fn canonical_body(params: &Params) -> String { Value::Object(params.clone()).to_string() }

/// The exact message that gets signed: canonical form, `@`, then the path.
pub fn string_to_sign(method: Method, path: &str, params: &Params) -> String {
    let canonical = match method {
        Method::Get => canonical_query(params),
        Method::Post => canonical_body(params),
    };
    format!("{canonical}@{path}")
}
