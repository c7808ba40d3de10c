use crate::domain::model::{HttpRequestData, ProtocolResponse};
use crate::utils::error::Result;

type RequestTransform = Box<dyn Fn(HttpRequestData) -> HttpRequestData + Send + Sync>;
type ResponseTransform =
    Box<dyn Fn(Result<ProtocolResponse>) -> Result<ProtocolResponse> + Send + Sync>;

/// Two-phase transform pipeline around a protocol dispatch.
///
/// The pre-dispatch transform may mutate or replace the translated request
/// before it is sent; the post-dispatch transform may wrap or replace the
/// outcome, including normalized errors. Both are optional and compose in
/// registration order.
#[derive(Default)]
pub struct TransformPipeline {
    before: Option<RequestTransform>,
    after: Option<ResponseTransform>,
}

impl TransformPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform to run on the translated request before
    /// dispatch. Registering again composes: earlier transforms run first.
    pub fn before_send<F>(mut self, transform: F) -> Self
    where
        F: Fn(HttpRequestData) -> HttpRequestData + Send + Sync + 'static,
    {
        self.before = Some(match self.before.take() {
            Some(prev) => Box::new(move |data| transform(prev(data))),
            None => Box::new(transform),
        });
        self
    }

    /// Register a transform to run on the outcome after dispatch.
    /// Registering again composes: earlier transforms run first.
    pub fn after_sent<F>(mut self, transform: F) -> Self
    where
        F: Fn(Result<ProtocolResponse>) -> Result<ProtocolResponse> + Send + Sync + 'static,
    {
        self.after = Some(match self.after.take() {
            Some(prev) => Box::new(move |result| transform(prev(result))),
            None => Box::new(transform),
        });
        self
    }

    pub fn apply_before(&self, data: HttpRequestData) -> HttpRequestData {
        match &self.before {
            Some(transform) => transform(data),
            None => data,
        }
    }

    pub fn apply_after(&self, result: Result<ProtocolResponse>) -> Result<ProtocolResponse> {
        match &self.after {
            Some(transform) => transform(result),
            None => result,
        }
    }
}
