// FortiOS REST response envelopes.
//
// Every CMDB call answers with the same envelope; the payload sits in
// `results`, which is an array for table reads and an object for some
// singleton and monitor endpoints.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Envelope returned by `/api/v2/cmdb/...` endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CmdbResponse {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub http_status: Option<u16>,
    /// FortiOS internal error number when `status == "error"`.
    #[serde(default)]
    pub error: Option<i64>,
    #[serde(default)]
    pub cli_error: Option<String>,
    #[serde(default)]
    pub vdom: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Primary key of the object touched by a create/update.
    #[serde(default)]
    pub mkey: Option<Value>,
    #[serde(default)]
    pub revision: Option<String>,
    #[serde(default)]
    pub results: Value,
}

impl CmdbResponse {
    /// FortiOS flagged the request as failed inside a 2xx answer.
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }

    /// The mkey as a string. Integer keys are rendered in decimal.
    pub fn mkey_string(&self) -> Option<String> {
        match self.mkey.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => n
                .as_i64()
                .map(|i| i.to_string())
                .or_else(|| Some(n.to_string())),
            _ => None,
        }
    }

    /// All objects carried in `results`.
    pub fn into_results(self) -> Vec<Map<String, Value>> {
        match self.results {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect(),
            Value::Object(map) => vec![map],
            _ => Vec::new(),
        }
    }

    /// The first object carried in `results`.
    pub fn into_first_result(self) -> Option<Map<String, Value>> {
        self.into_results().into_iter().next()
    }
}

/// Subset of `/api/v2/monitor/system/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub build: Option<u32>,
    #[serde(default)]
    pub results: SystemStatusResults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemStatusResults {
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model_number: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_mkey_renders_as_decimal() {
        let resp: CmdbResponse =
            serde_json::from_value(json!({ "status": "success", "mkey": 12 })).unwrap();
        assert_eq!(resp.mkey_string().as_deref(), Some("12"));
    }

    #[test]
    fn object_results_are_wrapped() {
        let resp: CmdbResponse = serde_json::from_value(json!({
            "status": "success",
            "results": { "hostname": "FGT" }
        }))
        .unwrap();
        let results = resp.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["hostname"], "FGT");
    }

    #[test]
    fn error_status_is_detected() {
        let resp: CmdbResponse =
            serde_json::from_value(json!({ "status": "error", "error": -651 })).unwrap();
        assert!(resp.is_error());
        assert_eq!(resp.error, Some(-651));
    }

    #[test]
    fn missing_results_yield_nothing() {
        let resp: CmdbResponse =
            serde_json::from_value(json!({ "status": "success" })).unwrap();
        assert!(resp.into_first_result().is_none());
    }
}
