//! 认证协作方契约
//!
//! 核心只约定请求/响应契约；具体的 HTTP 传输在 infrastructure
//! 中实现，测试使用脚本化的替身。

use async_trait::async_trait;
use domain::{AuthToken, LoginCredentials, Profile, RegistrationDraft};
use thiserror::Error;

/// 网关错误
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    /// 认证端点拒绝了凭证（登录端点的 401）
    #[error("unauthorized")]
    Unauthorized,

    /// 其他非 2xx 状态，携带状态码与响应正文
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// 没有收到响应（连接失败或超时）
    #[error("connection failed: {0}")]
    Connectivity(String),
}

/// 认证服务接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// 用户登录，成功时返回访问令牌
    ///
    /// 401 映射为 [`GatewayError::Unauthorized`]，其余非 2xx
    /// 状态映射为 [`GatewayError::Status`]。
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthToken, GatewayError>;

    /// 提交注册请求
    ///
    /// 2xx 即成功（正文忽略）；非 2xx 的纯文本正文通过
    /// [`GatewayError::Status`] 原样带回。
    async fn signup(&self, draft: RegistrationDraft) -> Result<(), GatewayError>;

    /// 拉取用户资料
    async fn fetch_profile(&self, login: &str) -> Result<Profile, GatewayError>;
}
