use crate::domain::model::{HttpRequestData, ProtocolResponse, RawResponse, ResourceRequest};
use crate::domain::pipeline::TransformPipeline;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Transport-level options passed to every backend verb: headers and the
/// defined query pairs. Everything else (method, url, body, timeout) travels
/// through the dedicated parameters.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: BTreeMap<String, String>,
    pub queries: Vec<(String, String)>,
}

impl From<&HttpRequestData> for RequestOptions {
    fn from(data: &HttpRequestData) -> Self {
        Self {
            headers: data.headers.clone(),
            queries: data.queries.clone(),
        }
    }
}

/// The injected HTTP client. One method per verb; a body parameter exists
/// only on the verbs that carry one. Implementations return the full
/// response envelope and leave body decoding to the protocol layer.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn get(&self, url: &str, opts: &RequestOptions) -> Result<RawResponse>;
    async fn delete(&self, url: &str, opts: &RequestOptions) -> Result<RawResponse>;
    async fn head(&self, url: &str, opts: &RequestOptions) -> Result<RawResponse>;
    async fn options(&self, url: &str, opts: &RequestOptions) -> Result<RawResponse>;
    async fn post(&self, url: &str, body: Option<&Value>, opts: &RequestOptions)
        -> Result<RawResponse>;
    async fn put(&self, url: &str, body: Option<&Value>, opts: &RequestOptions)
        -> Result<RawResponse>;
    async fn patch(&self, url: &str, body: Option<&Value>, opts: &RequestOptions)
        -> Result<RawResponse>;
}

/// Inbound surface of a resource protocol.
#[async_trait]
pub trait ResourceProtocol: Send + Sync {
    /// Protocol tags this implementation answers for.
    fn schemes(&self) -> &'static [&'static str];

    /// Resolve a resource request asynchronously, running the optional
    /// pre/post transforms of `pipeline` around the dispatch.
    async fn request(
        &self,
        request: ResourceRequest,
        pipeline: &TransformPipeline,
    ) -> Result<ProtocolResponse>;

    /// Blocking variant. Not every protocol can support it.
    fn request_blocking(&self, request: &ResourceRequest) -> Result<ProtocolResponse>;
}
