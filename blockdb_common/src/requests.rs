use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string of `GET /get_value`
#[derive(Debug, Deserialize, Serialize)]
pub struct GetValueRequest {
    #[serde(rename = "ref")]
    pub reference: String,
}

impl GetValueRequest {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// **The `{code, result}` envelope wrapped around read responses**
#[derive(Debug, Deserialize, Serialize)]
pub struct ValueResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub result: Value,
}

/// Ref of the map holding every account, keyed by public key.
pub const ALL_ACCOUNTS_REF: &str = "/account";

/// Ref of a single account's balance.
pub fn balance_ref(address: &str) -> String {
    format!("{ALL_ACCOUNTS_REF}/{address}/balance")
}

/// **Reads a balance out of a `result` value**
///
/// The service may report it as a JSON integer or as a numeric string.
pub fn balance_from_value(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
