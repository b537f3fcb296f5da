//! 领域模型错误定义
//!
//! 定义了领域层可能出现的错误类型，提供清晰的错误上下文。

use thiserror::Error;

/// 领域模型错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// 验证错误
    #[error("验证失败: {field}: {message}")]
    ValidationError { field: String, message: String },

    /// 状态不变量被破坏
    #[error("不变量被破坏: {message}")]
    InvariantViolation { message: String },
}

impl DomainError {
    /// 创建验证错误
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// 创建不变量错误
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;
