pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::ReqwestBackend;
pub use crate::config::{AssetsConfig, ProtocolConfig, ServerConfig};
pub use crate::core::HttpProtocol;
pub use crate::domain::{
    HttpBackend, HttpRequestData, ObserveMode, ProtocolResponse, RawResponse, RequestOptions,
    RequestParams, ResourceProtocol, ResourceRequest, ResponseType, TransformPipeline, XhrMethod,
};
pub use crate::utils::error::{ProtocolError, Result};
pub use crate::utils::logger::init_logger;
