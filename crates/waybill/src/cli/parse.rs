use std::str::FromStr;

use serde_json::Value;
use waybill_client::Params;

/// One `key=value` request parameter from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub key:   String,
    pub value: Value,
}

impl FromStr for Param {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, raw) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got `{s}`"))?;
        if key.is_empty() {
            return Err(format!("empty key in `{s}`"));
        }

        // `page=2` is a number, `ok=true` a bool, `x=null` a null; `name=Li` stays a string.
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        Ok(Param {
            key: key.to_string(),
            value,
        })
    }
}

/// Collect params in command-line order. A repeated key keeps its first position.
pub fn into_params(params: Vec<Param>) -> Params {
    let mut map = Params::new();
    for Param { key, value } in params {
        map.insert(key, value);
    }
    map
}
