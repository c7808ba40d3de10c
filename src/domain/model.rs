use crate::utils::error::ProtocolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Http request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum XhrMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl XhrMethod {
    /// True for the verbs that carry a request body.
    pub fn has_body(self) -> bool {
        matches!(self, XhrMethod::Post | XhrMethod::Put | XhrMethod::Patch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            XhrMethod::Get => "GET",
            XhrMethod::Post => "POST",
            XhrMethod::Put => "PUT",
            XhrMethod::Patch => "PATCH",
            XhrMethod::Delete => "DELETE",
            XhrMethod::Head => "HEAD",
            XhrMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for XhrMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for XhrMethod {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(XhrMethod::Get),
            "POST" => Ok(XhrMethod::Post),
            "PUT" => Ok(XhrMethod::Put),
            "PATCH" => Ok(XhrMethod::Patch),
            "DELETE" => Ok(XhrMethod::Delete),
            "HEAD" => Ok(XhrMethod::Head),
            "OPTIONS" => Ok(XhrMethod::Options),
            _ => Err(ProtocolError::UnknownMethod {
                method: s.to_string(),
            }),
        }
    }
}

/// Response body format hint. `Raw` does not parse the body at all; it
/// switches the call into full-envelope observe mode instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    #[serde(rename = "arraybuffer")]
    Buffer,
    Text,
    Blob,
    Json,
    Raw,
}

/// Whether the call yields only the parsed body or the full response
/// envelope (status, headers, body).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveMode {
    Body,
    Response,
}

/// Loosely-typed parameter bag attached to a [`ResourceRequest`].
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    /// Response type. Unset falls back to the configured server default.
    pub response_type: Option<ResponseType>,
    /// Content type. An explicit value wins over the configured default.
    pub content_type: Option<String>,
    /// Extra headers (may include Content-Type).
    pub headers: BTreeMap<String, String>,
    /// Query parameters. `None` values are undefined and never sent.
    pub queries: BTreeMap<String, Option<String>>,
    /// Request body. Only affects POST/PUT/PATCH.
    pub body: Option<Value>,
    /// Request timeout. Unset disables the timeout.
    pub timeout: Option<Duration>,
    /// Request method (default GET).
    pub method: Option<XhrMethod>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries.insert(name.into(), Some(value.into()));
        self
    }

    /// Query parameter with a possibly-undefined value. `None` is dropped
    /// during translation rather than sent as an empty string.
    pub fn query_opt(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.queries.insert(name.into(), value);
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn method(mut self, method: XhrMethod) -> Self {
        self.method = Some(method);
        self
    }
}

/// A protocol-tagged, address-bearing description of something to fetch,
/// independent of transport.
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    /// Protocol tag: `remote`, `assets`, or a literal URL scheme.
    pub protocol: String,
    pub address: String,
    pub params: RequestParams,
}

impl ResourceRequest {
    pub fn new(protocol: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            address: address.into(),
            params: RequestParams::default(),
        }
    }

    pub fn with_params(mut self, params: RequestParams) -> Self {
        self.params = params;
        self
    }
}

/// Translated request, ready for dispatch to the HTTP backend. A pure
/// function of (resource request, configuration snapshot).
#[derive(Debug, Clone)]
pub struct HttpRequestData {
    /// Defined query pairs only; each key appears exactly once.
    pub queries: Vec<(String, String)>,
    pub headers: BTreeMap<String, String>,
    pub response_type: ResponseType,
    pub observe: ObserveMode,
    pub method: XhrMethod,
    pub url: String,
    pub body: Option<Value>,
    pub timeout: Option<Duration>,
}

/// Full response envelope as returned by the HTTP backend.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

/// What a protocol call yields: the parsed body in the shape the request
/// asked for, or the full envelope when observing the whole response.
#[derive(Debug, Clone)]
pub enum ProtocolResponse {
    Json(Value),
    Text(String),
    Buffer(Vec<u8>),
    Raw(RawResponse),
}

impl ProtocolResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ProtocolResponse::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ProtocolResponse::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            ProtocolResponse::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&RawResponse> {
        match self {
            ProtocolResponse::Raw(raw) => Some(raw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!("get".parse::<XhrMethod>().unwrap(), XhrMethod::Get);
        assert_eq!("PATCH".parse::<XhrMethod>().unwrap(), XhrMethod::Patch);
        assert_eq!("Options".parse::<XhrMethod>().unwrap(), XhrMethod::Options);
    }

    #[test]
    fn unknown_method_string_is_a_call_time_error() {
        let err = "TRACE".parse::<XhrMethod>().unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::UnknownMethod { ref method } if method == "TRACE"
        ));
    }

    #[test]
    fn only_post_put_patch_carry_a_body() {
        assert!(XhrMethod::Post.has_body());
        assert!(XhrMethod::Put.has_body());
        assert!(XhrMethod::Patch.has_body());
        assert!(!XhrMethod::Get.has_body());
        assert!(!XhrMethod::Delete.has_body());
        assert!(!XhrMethod::Head.has_body());
        assert!(!XhrMethod::Options.has_body());
    }

    #[test]
    fn response_type_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&ResponseType::Buffer).unwrap(),
            "\"arraybuffer\""
        );
        assert_eq!(serde_json::to_string(&ResponseType::Json).unwrap(), "\"json\"");
        let parsed: ResponseType = serde_json::from_str("\"raw\"").unwrap();
        assert_eq!(parsed, ResponseType::Raw);
    }

    #[test]
    fn params_builder_keeps_last_value_per_query_key() {
        let params = RequestParams::new()
            .query("page", "1")
            .query("page", "2")
            .query_opt("filter", None);
        assert_eq!(params.queries.get("page"), Some(&Some("2".to_string())));
        assert_eq!(params.queries.get("filter"), Some(&None));
    }
}
