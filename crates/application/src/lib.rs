//! 应用层实现。
//!
//! 这里提供围绕领域模型的用例服务：会话生命周期、注册表单的
//! 提交门控、聊天室会话控制，以及对外部适配器（认证网关、
//! 会话存储）的抽象。

pub mod errors;
pub mod gateway;
pub mod services;
pub mod store;

pub use errors::{ApplicationError, ApplicationResult, SessionError, SignupError};
pub use gateway::{AuthGateway, GatewayError};
pub use services::{
    RoomSessionController, SessionService, SessionServiceDependencies, SignupForm,
};
pub use store::{InMemorySessionStore, SessionStore, TOKEN_KEY, USER_LOGIN_KEY};
