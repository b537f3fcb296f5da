//! 统一配置中心
//!
//! 提供客户端的全局配置管理，包括：
//! - 后端 API 地址与请求超时
//! - 会话持久化策略与存储位置

use serde::{Deserialize, Serialize};
use std::env;

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// 后端 API 配置
    pub api: ApiConfig,
    /// 会话配置
    pub session: SessionConfig,
}

/// 后端 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 基地址，例如 http://127.0.0.1:8080
    pub base_url: String,
    /// 请求超时（毫秒）
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

/// 会话配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 启动时是否信任已持久化的令牌（不回访服务端确认）
    ///
    /// 关闭后，存量凭证在启动时被忽略并清除，会话以匿名开始。
    pub trust_persisted_token: bool,
    /// 会话文件路径
    pub storage_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            trust_persisted_token: true,
            storage_path: ".larktalk/session.json".to_string(),
        }
    }
}

impl AppConfig {
    /// 从环境变量加载配置
    ///
    /// 所有项都有可直接用于本地开发的缺省值；无法解析的值回退到缺省。
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api: ApiConfig {
                base_url: env::var("LARKTALK_API_BASE_URL")
                    .unwrap_or(defaults.api.base_url),
                request_timeout_ms: env::var("LARKTALK_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(defaults.api.request_timeout_ms),
            },
            session: SessionConfig {
                trust_persisted_token: env::var("LARKTALK_TRUST_PERSISTED_TOKEN")
                    .ok()
                    .and_then(|value| value.parse().ok())
                    .unwrap_or(defaults.session.trust_persisted_token),
                storage_path: env::var("LARKTALK_SESSION_FILE")
                    .unwrap_or(defaults.session.storage_path),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.api.request_timeout_ms, 5000);
        assert!(config.session.trust_persisted_token);
        assert_eq!(config.session.storage_path, ".larktalk/session.json");
    }
}
