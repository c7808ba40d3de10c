use crate::config::ProtocolConfig;
use crate::domain::model::{
    HttpRequestData, ObserveMode, ProtocolResponse, RawResponse, ResourceRequest, ResponseType,
    XhrMethod,
};
use crate::domain::pipeline::TransformPipeline;
use crate::domain::ports::{HttpBackend, RequestOptions, ResourceProtocol};
use crate::utils::error::{ProtocolError, Result};
use async_trait::async_trait;
use serde_json::Value;

const SCHEMES: &[&str] = &["remote", "assets", "http", "https"];

/// Resource protocol over an injected HTTP backend.
///
/// Translates generic resource requests into backend verb calls and maps
/// the responses back. Holds a configuration snapshot taken at construction
/// time; no state is shared between calls.
pub struct HttpProtocol<B: HttpBackend> {
    backend: B,
    config: ProtocolConfig,
}

impl<B: HttpBackend> HttpProtocol<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, ProtocolConfig::default())
    }

    pub fn with_config(backend: B, config: ProtocolConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Translate a resource request into the backend shape. Pure over
    /// (request, configuration snapshot).
    fn pack_request(&self, raw: &ResourceRequest) -> Result<HttpRequestData> {
        let params = &raw.params;

        let mut headers = params.headers.clone();
        if let Some(content_type) = &params.content_type {
            // Explicit content type wins over anything else.
            headers.insert("Content-Type".to_string(), content_type.clone());
        } else if !self.config.server.content_type.is_empty() {
            headers
                .entry("Content-Type".to_string())
                .or_insert_with(|| self.config.server.content_type.clone());
        }

        let mut response_type = self.config.server.response_type;
        let mut observe = ObserveMode::Body;
        match params.response_type {
            // `raw` asks for the full envelope instead of a parse hint.
            Some(ResponseType::Raw) => observe = ObserveMode::Response,
            Some(explicit) => response_type = explicit,
            None => {}
        }

        let queries: Vec<(String, String)> = params
            .queries
            .iter()
            .filter_map(|(key, value)| value.clone().map(|v| (key.clone(), v)))
            .collect();

        let method = params.method.unwrap_or(XhrMethod::Get);

        Ok(HttpRequestData {
            queries,
            headers,
            response_type,
            observe,
            method,
            url: self.assemble_url(raw, method)?,
            body: params.body.clone().map(unwrap_body),
            timeout: params.timeout.filter(|t| !t.is_zero()),
        })
    }

    fn assemble_url(&self, request: &ResourceRequest, method: XhrMethod) -> Result<String> {
        match request.protocol.as_str() {
            "assets" => {
                if method != XhrMethod::Get {
                    return Err(ProtocolError::MethodNotAllowed {
                        method: method.to_string(),
                        address: request.address.clone(),
                    });
                }
                let base = &self.config.assets.address;
                if base.is_empty() {
                    return Err(ProtocolError::MissingBaseAddress {
                        base: "assets".to_string(),
                        address: request.address.clone(),
                    });
                }
                Ok(format!("{}{}", base, request.address))
            }
            "remote" => {
                let base = &self.config.server.address;
                if base.is_empty() {
                    return Err(ProtocolError::MissingBaseAddress {
                        base: "server".to_string(),
                        address: request.address.clone(),
                    });
                }
                Ok(format!("{}{}", base, request.address))
            }
            scheme => Ok(format!("{}://{}", scheme, request.address)),
        }
    }

    /// Fan the translated request out to the matching backend verb, racing
    /// it against the request deadline when one is set. A missed deadline
    /// is normalized into a 408-shaped timeout error carrying the request
    /// headers and the original address.
    async fn dispatch(&self, data: &HttpRequestData, address: &str) -> Result<RawResponse> {
        let opts = RequestOptions::from(data);
        let body = data.body.as_ref();
        let call = async {
            match data.method {
                XhrMethod::Get => self.backend.get(&data.url, &opts).await,
                XhrMethod::Delete => self.backend.delete(&data.url, &opts).await,
                XhrMethod::Head => self.backend.head(&data.url, &opts).await,
                XhrMethod::Options => self.backend.options(&data.url, &opts).await,
                XhrMethod::Post => self.backend.post(&data.url, body, &opts).await,
                XhrMethod::Put => self.backend.put(&data.url, body, &opts).await,
                XhrMethod::Patch => self.backend.patch(&data.url, body, &opts).await,
            }
        };
        match data.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(url = %data.url, ?limit, "request deadline elapsed");
                    Err(ProtocolError::timeout(
                        format!("no response within {limit:?}"),
                        data.headers.clone(),
                        address,
                    ))
                }
            },
            None => call.await,
        }
    }

    fn decode_response(data: &HttpRequestData, raw: RawResponse) -> Result<ProtocolResponse> {
        if data.observe == ObserveMode::Response {
            return Ok(ProtocolResponse::Raw(raw));
        }
        match data.response_type {
            ResponseType::Json => {
                if raw.body.is_empty() {
                    // HEAD and no-content responses carry no JSON document.
                    return Ok(ProtocolResponse::Json(Value::Null));
                }
                Ok(ProtocolResponse::Json(serde_json::from_slice(&raw.body)?))
            }
            ResponseType::Text => String::from_utf8(raw.body)
                .map(ProtocolResponse::Text)
                .map_err(|e| ProtocolError::Decode {
                    reason: e.to_string(),
                }),
            ResponseType::Buffer | ResponseType::Blob => Ok(ProtocolResponse::Buffer(raw.body)),
            // A configured default of `raw` behaves like full-envelope mode.
            ResponseType::Raw => Ok(ProtocolResponse::Raw(raw)),
        }
    }
}

/// A single-element JSON array body is unwrapped to its element before
/// dispatch; callers wrapping one payload in an array get the payload sent.
fn unwrap_body(body: Value) -> Value {
    match body {
        Value::Array(mut items) if items.len() == 1 => items.remove(0),
        other => other,
    }
}

#[async_trait]
impl<B: HttpBackend> ResourceProtocol for HttpProtocol<B> {
    fn schemes(&self) -> &'static [&'static str] {
        SCHEMES
    }

    async fn request(
        &self,
        request: ResourceRequest,
        pipeline: &TransformPipeline,
    ) -> Result<ProtocolResponse> {
        let data = match self.pack_request(&request) {
            Ok(data) => pipeline.apply_before(data),
            Err(e) => return pipeline.apply_after(Err(e)),
        };
        tracing::debug!(method = %data.method, url = %data.url, "dispatching resource request");
        let result = match self.dispatch(&data, &request.address).await {
            Ok(raw) => {
                tracing::debug!(status = raw.status, url = %data.url, "response received");
                Self::decode_response(&data, raw)
            }
            Err(e) => Err(e),
        };
        pipeline.apply_after(result)
    }

    fn request_blocking(&self, _request: &ResourceRequest) -> Result<ProtocolResponse> {
        Err(ProtocolError::BlockingUnsupported)
    }
}
