//! HTTP 认证网关
//!
//! 用 reqwest 实现核心约定的 REST 契约。状态码映射规则：
//! 登录端点的 401 表示凭证被拒绝；所有端点的其他非 2xx 状态
//! 携带状态码与响应正文原样带回；拿不到响应则归类为连接失败。

use std::time::Duration;

use application::{AuthGateway, GatewayError};
use async_trait::async_trait;
use config::ApiConfig;
use domain::{AuthToken, LoginCredentials, Profile, RegistrationDraft};
use serde::Deserialize;
use tracing::{debug, warn};

/// 登录响应中客户端关心的字段；其余字段（用户名、昵称等）忽略
#[derive(Debug, Deserialize)]
struct LoginResponseBody {
    token: String,
}

/// 基于 reqwest 的认证网关实现
pub struct HttpAuthGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpAuthGateway {
    /// 根据 API 配置构建网关
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|err| GatewayError::Connectivity(err.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthToken, GatewayError> {
        let response = self
            .client
            .post(self.endpoint("/api/login"))
            .json(&credentials)
            .send()
            .await
            .map_err(|err| GatewayError::Connectivity(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "登录端点返回非预期状态");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // 2xx 但缺少有效令牌同样按服务端错误处理
        let body: LoginResponseBody = response.json().await.map_err(|err| GatewayError::Status {
            status: status.as_u16(),
            body: err.to_string(),
        })?;
        let token = AuthToken::parse(body.token).map_err(|err| GatewayError::Status {
            status: status.as_u16(),
            body: err.to_string(),
        })?;

        debug!("登录端点返回有效令牌");
        Ok(token)
    }

    async fn signup(&self, draft: RegistrationDraft) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.endpoint("/api/signup"))
            .json(&draft)
            .send()
            .await
            .map_err(|err| GatewayError::Connectivity(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "注册端点拒绝请求");
        Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn fetch_profile(&self, login: &str) -> Result<Profile, GatewayError> {
        let response = self
            .client
            .get(self.endpoint("/api/profile"))
            .query(&[("login", login)])
            .send()
            .await
            .map_err(|err| GatewayError::Connectivity(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<Profile>().await.map_err(|err| GatewayError::Status {
            status: status.as_u16(),
            body: err.to_string(),
        })
    }
}
