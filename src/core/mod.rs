pub mod protocol;

pub use crate::core::protocol::HttpProtocol;
