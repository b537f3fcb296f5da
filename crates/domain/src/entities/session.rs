//! 会话实体
//!
//! 定义客户端的认证会话状态机：匿名 → 认证中 → 已认证 / 失败。
//! 令牌与用户资料由状态转换方法统一维护，保证不变量：
//! 令牌存在当且仅当会话处于已认证状态。

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::profile::Profile;
use crate::errors::{DomainError, DomainResult};

/// 会话状态枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// 未登录
    Anonymous,
    /// 登录请求进行中
    Authenticating,
    /// 已登录
    Authenticated,
    /// 登录失败
    Error,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Anonymous => write!(f, "anonymous"),
            SessionStatus::Authenticating => write!(f, "authenticating"),
            SessionStatus::Authenticated => write!(f, "authenticated"),
            SessionStatus::Error => write!(f, "error"),
        }
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Anonymous
    }
}

/// 经过验证的不透明访问令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// 解析令牌，空白字符串视为非法
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation_error("token", "令牌不能为空"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 登录凭证
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// 登录名
    pub login: String,
    /// 密码
    pub password: String,
}

/// 客户端会话实体
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// 当前状态
    pub status: SessionStatus,
    /// 提交登录时使用的标识
    pub login_id: Option<String>,
    /// 面向用户的提示信息（仅在失败状态保留）
    pub message: Option<String>,
    /// 访问令牌，仅在已认证状态存在
    token: Option<AuthToken>,
    /// 懒加载的用户资料，始终与 `login_id` 对应
    profile: Option<Profile>,
}

impl Session {
    /// 创建匿名会话
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// 进入认证中状态
    pub fn authenticating(login_id: impl Into<String>) -> Self {
        Self {
            status: SessionStatus::Authenticating,
            login_id: Some(login_id.into()),
            ..Self::default()
        }
    }

    /// 认证成功
    pub fn authenticated(login_id: impl Into<String>, token: AuthToken) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            login_id: Some(login_id.into()),
            token: Some(token),
            ..Self::default()
        }
    }

    /// 认证失败：令牌被清除，提示信息保留
    pub fn failed(login_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: SessionStatus::Error,
            login_id: Some(login_id.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated)
    }

    /// 挂载用户资料
    ///
    /// 只有已认证的会话可以挂载资料，且资料的登录标识必须与
    /// 当前会话一致，避免跨会话的过期资料。
    pub fn attach_profile(&mut self, profile: Profile) -> DomainResult<()> {
        if !self.is_authenticated() {
            return Err(DomainError::invariant_violation("未认证的会话不能挂载用户资料"));
        }
        match &self.login_id {
            Some(login_id) if *login_id == profile.login => {
                self.profile = Some(profile);
                Ok(())
            }
            _ => Err(DomainError::invariant_violation("用户资料与当前会话不匹配")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_profile(login: &str) -> Profile {
        Profile {
            login: login.to_string(),
            nickname: "Lark".to_string(),
            email: "lark@example.com".to_string(),
            roles: "user".to_string(),
            created_at: NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(10, 15, 30)
                .unwrap(),
        }
    }

    #[test]
    fn test_token_parse() {
        assert!(AuthToken::parse("fake-jwt-token-for-alice").is_ok());
        assert!(AuthToken::parse("").is_err());
        assert!(AuthToken::parse("   ").is_err());
    }

    #[test]
    fn test_session_transitions() {
        let session = Session::anonymous();
        assert_eq!(session.status, SessionStatus::Anonymous);
        assert!(session.token().is_none());

        let session = Session::authenticating("alice");
        assert_eq!(session.status, SessionStatus::Authenticating);
        assert_eq!(session.login_id.as_deref(), Some("alice"));
        assert!(session.token().is_none());

        let token = AuthToken::parse("tok").unwrap();
        let session = Session::authenticated("alice", token);
        assert!(session.is_authenticated());
        assert!(session.token().is_some());
        assert!(session.message.is_none());
    }

    #[test]
    fn test_failed_clears_token_and_keeps_message() {
        let session = Session::failed("alice", "Invalid login or password");
        assert_eq!(session.status, SessionStatus::Error);
        assert!(session.token().is_none());
        assert_eq!(session.message.as_deref(), Some("Invalid login or password"));
    }

    #[test]
    fn test_attach_profile_requires_matching_login() {
        let token = AuthToken::parse("tok").unwrap();
        let mut session = Session::authenticated("alice", token);

        assert!(session.attach_profile(test_profile("bob")).is_err());
        assert!(session.profile().is_none());

        assert!(session.attach_profile(test_profile("alice")).is_ok());
        assert_eq!(session.profile().unwrap().login, "alice");
    }

    #[test]
    fn test_attach_profile_rejected_when_anonymous() {
        let mut session = Session::anonymous();
        assert!(session.attach_profile(test_profile("alice")).is_err());
    }
}
