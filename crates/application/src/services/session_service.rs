//! 会话服务
//!
//! 管理认证会话的完整生命周期：启动恢复、提交登录、资料拉取、
//! 登出。持久化凭证只通过注入的 [`SessionStore`] 读写。
//!
//! 迟到的网络响应通过会话纪元被丢弃：登出递增纪元，响应的
//! 落点处比对请求发出时捕获的纪元，不一致即放弃结果。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use domain::{AuthToken, LoginCredentials, Profile, Session};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::errors::{ApplicationResult, SessionError};
use crate::gateway::{AuthGateway, GatewayError};
use crate::store::{SessionStore, TOKEN_KEY, USER_LOGIN_KEY};

/// 会话服务依赖
pub struct SessionServiceDependencies {
    /// 认证网关
    pub gateway: Arc<dyn AuthGateway>,
    /// 持久化会话存储
    pub store: Arc<dyn SessionStore>,
    /// 启动时是否信任已持久化的令牌（不回访服务端确认）
    pub trust_persisted_token: bool,
}

/// 会话服务
pub struct SessionService {
    deps: SessionServiceDependencies,
    /// 当前会话状态
    session: RwLock<Session>,
    /// 会话纪元，登出时递增
    epoch: AtomicU64,
}

impl SessionService {
    /// 创建新的会话服务，初始状态为匿名
    pub fn new(deps: SessionServiceDependencies) -> Self {
        Self {
            deps,
            session: RwLock::new(Session::anonymous()),
            epoch: AtomicU64::new(0),
        }
    }

    /// 返回当前会话的快照
    pub async fn current(&self) -> Session {
        self.session.read().await.clone()
    }

    /// 启动时从持久化存储恢复会话
    ///
    /// 两个存储键都存在且策略允许时，直接进入已认证状态，
    /// 不做服务端校验。策略关闭或凭证不完整时清除存量凭证，
    /// 以匿名启动。
    pub async fn rehydrate(&self) -> Session {
        let token = self.deps.store.get(TOKEN_KEY);
        let login = self.deps.store.get(USER_LOGIN_KEY);

        let restored = match (token, login) {
            (Some(token), Some(login)) if self.deps.trust_persisted_token => {
                match AuthToken::parse(token) {
                    Ok(token) => {
                        info!(login = %login, "从持久化存储恢复会话");
                        Session::authenticated(login, token)
                    }
                    Err(_) => {
                        warn!("持久化令牌为空，已清除");
                        self.clear_persisted();
                        Session::anonymous()
                    }
                }
            }
            (None, None) => Session::anonymous(),
            _ => {
                self.clear_persisted();
                Session::anonymous()
            }
        };

        let mut session = self.session.write().await;
        *session = restored.clone();
        restored
    }

    /// 提交登录
    ///
    /// 两个参数都非空才会联系认证网关。任何失败都会清除令牌、
    /// 保留面向用户的提示信息。登出赢得竞争时，迟到的响应被
    /// 丢弃，返回当前（匿名）会话快照。
    pub async fn submit_login(&self, login_id: &str, secret: &str) -> ApplicationResult<Session> {
        if login_id.is_empty() || secret.is_empty() {
            return Err(
                SessionError::Validation("Enter your login and password.".to_string()).into(),
            );
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        {
            let mut session = self.session.write().await;
            *session = Session::authenticating(login_id);
        }
        info!(login = %login_id, "提交登录请求");

        let credentials = LoginCredentials {
            login: login_id.to_string(),
            password: secret.to_string(),
        };
        let outcome = self.deps.gateway.login(credentials).await;

        let mut session = self.session.write().await;
        if self.epoch.load(Ordering::SeqCst) != epoch {
            warn!(login = %login_id, "丢弃迟到的登录响应");
            return Ok(session.clone());
        }

        match outcome {
            Ok(token) => {
                self.deps.store.set(TOKEN_KEY, token.as_str());
                self.deps.store.set(USER_LOGIN_KEY, login_id);
                *session = Session::authenticated(login_id, token);
                info!(login = %login_id, "登录成功");
                Ok(session.clone())
            }
            Err(err) => {
                let session_err = match err {
                    GatewayError::Unauthorized => SessionError::InvalidCredentials,
                    GatewayError::Status { status, .. } => SessionError::Server(status),
                    GatewayError::Connectivity(_) => SessionError::Connectivity,
                };
                *session = Session::failed(login_id, session_err.to_string());
                warn!(login = %login_id, error = %session_err, "登录失败");
                Err(session_err.into())
            }
        }
    }

    /// 拉取并挂载用户资料
    ///
    /// 每次登录至多需要一次网络调用：已有资料时直接返回缓存。
    /// 拉取失败只记录日志并返回 `None`，不影响认证状态；
    /// 资料面板是可选展示，不是认证的前提。
    pub async fn fetch_profile(&self) -> Option<Profile> {
        let (login, cached) = {
            let session = self.session.read().await;
            if !session.is_authenticated() {
                return None;
            }
            (session.login_id.clone()?, session.profile().cloned())
        };

        if let Some(profile) = cached {
            debug!(login = %login, "用户资料已缓存，跳过拉取");
            return Some(profile);
        }

        let epoch = self.epoch.load(Ordering::SeqCst);
        match self.deps.gateway.fetch_profile(&login).await {
            Ok(profile) => {
                let mut session = self.session.write().await;
                if self.epoch.load(Ordering::SeqCst) != epoch {
                    warn!(login = %login, "丢弃迟到的资料响应");
                    return None;
                }
                match session.attach_profile(profile.clone()) {
                    Ok(()) => Some(profile),
                    Err(err) => {
                        warn!(login = %login, error = %err, "用户资料与会话不匹配，已丢弃");
                        None
                    }
                }
            }
            Err(err) => {
                warn!(login = %login, error = %err, "用户资料拉取失败，资料面板暂不可用");
                None
            }
        }
    }

    /// 登出
    ///
    /// 对任何先前状态都无条件成立：先递增会话纪元（让在途请求
    /// 的结果失效），再清除持久化凭证，回到匿名状态。不可回滚。
    pub async fn logout(&self) -> Session {
        let mut session = self.session.write().await;
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.clear_persisted();
        *session = Session::anonymous();
        info!("已登出，持久化凭证已清除");
        session.clone()
    }

    fn clear_persisted(&self) {
        self.deps.store.remove(TOKEN_KEY);
        self.deps.store.remove(USER_LOGIN_KEY);
    }
}
