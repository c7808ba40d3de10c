use crate::domain::model::RawResponse;
use crate::domain::ports::{HttpBackend, RequestOptions};
use crate::utils::error::{ProtocolError, Result};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

/// Production [`HttpBackend`] over a shared `reqwest::Client`.
///
/// Non-success statuses surface as transport errors, matching the wrapped
/// client's contract. Per-request deadlines are enforced by the protocol
/// layer, not here.
pub struct ReqwestBackend {
    client: Client,
}

impl ReqwestBackend {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Reuse an externally configured client (pooling, TLS, proxies).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        opts: &RequestOptions,
    ) -> Result<RawResponse> {
        let parsed = Url::parse(url).map_err(|e| ProtocolError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = self.client.request(method, parsed);
        for (name, value) in &opts.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !opts.queries.is_empty() {
            builder = builder.query(&opts.queries);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?.error_for_status()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get(&self, url: &str, opts: &RequestOptions) -> Result<RawResponse> {
        self.execute(Method::GET, url, None, opts).await
    }

    async fn delete(&self, url: &str, opts: &RequestOptions) -> Result<RawResponse> {
        self.execute(Method::DELETE, url, None, opts).await
    }

    async fn head(&self, url: &str, opts: &RequestOptions) -> Result<RawResponse> {
        self.execute(Method::HEAD, url, None, opts).await
    }

    async fn options(&self, url: &str, opts: &RequestOptions) -> Result<RawResponse> {
        self.execute(Method::OPTIONS, url, None, opts).await
    }

    async fn post(
        &self,
        url: &str,
        body: Option<&Value>,
        opts: &RequestOptions,
    ) -> Result<RawResponse> {
        self.execute(Method::POST, url, body, opts).await
    }

    async fn put(
        &self,
        url: &str,
        body: Option<&Value>,
        opts: &RequestOptions,
    ) -> Result<RawResponse> {
        self.execute(Method::PUT, url, body, opts).await
    }

    async fn patch(
        &self,
        url: &str,
        body: Option<&Value>,
        opts: &RequestOptions,
    ) -> Result<RawResponse> {
        self.execute(Method::PATCH, url, body, opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn invalid_urls_fail_before_any_io() {
        let backend = ReqwestBackend::new();
        let err = backend
            .get("not a url", &RequestOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidUrl { .. }));
    }
}
