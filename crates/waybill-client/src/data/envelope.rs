use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{ApiError, Result};

/// The `{code, msg, data}` wrapper every endpoint answers with.
///
/// `code == 0` is success; any other code is an application failure whose
/// reason is carried in `msg`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub code: i64,

    #[serde(default, deserialize_with = "nullable_string")]
    pub msg: String,

    #[serde(default)]
    pub data: Option<Value>,
}

fn nullable_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl ApiEnvelope {
    pub fn is_success(&self) -> bool { self.code == 0 }

    /// Turn a nonzero `code` into [`ApiError::Application`].
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Application {
                code: self.code,
                msg:  self.msg,
            })
        }
    }

    /// Deserialize `data` into `T`. Absent data deserializes from `null`.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        let data = self.data.clone().unwrap_or(Value::Null);
        Ok(serde_json::from_value(data)?)
    }
}
