//! 基础设施层实现
//!
//! 提供应用层抽象的具体适配：基于 reqwest 的认证网关，
//! 以及基于 JSON 文件的会话存储。

pub mod http;
pub mod session_storage;

pub use http::HttpAuthGateway;
pub use session_storage::FileSessionStore;
