use serde::Deserialize;

/// One request line off the wire. The sidecar holds no state between
/// requests: every call carries the record collections it wants aggregated.
#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}
