//! LarkTalk 客户端核心领域模型
//!
//! 包含会话、用户资料、聊天室目录、消息等核心实体，
//! 以及注册表单的字段级校验规则。

pub mod entities;
pub mod errors;

// 重新导出常用类型
pub use entities::*;
pub use errors::*;
