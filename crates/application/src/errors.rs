//! 应用层错误定义
//!
//! 定义应用层特定的错误类型。面向用户的错误文案即各变体的
//! `Display` 输出，由视图层直接渲染。

use thiserror::Error;

use crate::gateway::GatewayError;

/// 应用层错误类型
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApplicationError {
    /// 会话相关错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),

    /// 注册相关错误
    #[error("注册错误: {0}")]
    Signup(#[from] SignupError),

    /// 网关错误
    #[error("网关错误: {0}")]
    Gateway(#[from] GatewayError),

    /// 领域层错误
    #[error("领域错误: {0}")]
    Domain(#[from] domain::DomainError),
}

/// 应用层结果类型
pub type ApplicationResult<T> = Result<T, ApplicationError>;

/// 会话服务错误
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// 本地校验失败，未联系任何协作方
    #[error("{0}")]
    Validation(String),

    /// 凭证被认证端点拒绝
    #[error("Invalid login or password")]
    InvalidCredentials,

    /// 认证端点返回了非预期状态码
    #[error("Server error: {0}")]
    Server(u16),

    /// 没有收到服务器响应
    #[error("Server connection error.")]
    Connectivity,
}

/// 注册服务错误
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SignupError {
    /// 草稿存在字段级校验问题，未发起网络调用
    ///
    /// 具体提示由表单的校验集按字段渲染。
    #[error("registration draft has invalid fields")]
    Invalid,

    /// 服务器拒绝了注册请求，正文原样透出
    #[error("{0}")]
    Rejected(String),

    /// 没有收到服务器响应
    #[error("Server connection error.")]
    Connectivity,
}
