//! 用户资料实体
//!
//! 由 `/api/profile` 在认证成功后惰性加载；拉取失败不影响会话。

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 用户资料
///
/// 后端返回的 `createdAt` 不携带时区，按本地时间原样保留。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// 登录名
    pub login: String,
    /// 昵称
    pub nickname: String,
    /// 邮箱
    pub email: String,
    /// 后端返回的角色串
    pub roles: String,
    /// 创建时间
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_camel_case() {
        let raw = r#"{
            "login": "alice",
            "nickname": "Ally",
            "email": "alice@example.com",
            "roles": "user",
            "createdAt": "2025-03-01T10:15:30"
        }"#;

        let profile: Profile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.login, "alice");
        assert_eq!(profile.nickname, "Ally");
        assert_eq!(profile.roles, "user");
        assert_eq!(profile.created_at.to_string(), "2025-03-01 10:15:30");
    }
}
