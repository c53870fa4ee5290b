use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
pub struct Request<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: &'a Value,
    pub id: u64,

    // Pre-6.4 servers take the session token in the body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<&'a str>,
}

impl<'a> Request<'a> {
    pub fn new(method: &'a str, params: &'a Value, id: u64) -> Self {
        Request {
            jsonrpc: "2.0",
            method,
            params,
            id,
            auth: None,
        }
    }
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<String>,
}

impl Response {
    /// Turns the envelope into the call result, mapping `error` members to [`Error::Api`].
    pub fn into_result(self) -> Result<Value, Error> {
        if let Some(error) = self.error {
            return Err(Error::Api {
                code: error.code,
                message: error.message,
                data: error.data.unwrap_or_default(),
            });
        }

        self.result
            .ok_or_else(|| Error::InvalidResponse("response carries neither result nor error".to_string()))
    }
}
