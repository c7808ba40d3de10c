// Domain layer: data shapes and ports. No transport dependencies here.

pub mod model;
pub mod pipeline;
pub mod ports;

pub use crate::domain::model::{
    HttpRequestData, ObserveMode, ProtocolResponse, RawResponse, RequestParams, ResourceRequest,
    ResponseType, XhrMethod,
};
pub use crate::domain::pipeline::TransformPipeline;
pub use crate::domain::ports::{HttpBackend, RequestOptions, ResourceProtocol};
