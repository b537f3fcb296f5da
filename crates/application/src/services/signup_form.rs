//! 注册表单
//!
//! 持有注册草稿与字段级校验结果，负责提交门控：只有校验集为空
//! 时才会联系注册端点。编辑某个字段只清除该字段此前的提示。

use std::sync::Arc;

use domain::{RegistrationDraft, SignupField, ViolationSet};
use tracing::{info, warn};

use crate::errors::SignupError;
use crate::gateway::{AuthGateway, GatewayError};

/// 注册表单状态机
pub struct SignupForm {
    gateway: Arc<dyn AuthGateway>,
    draft: RegistrationDraft,
    violations: ViolationSet,
}

impl SignupForm {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            gateway,
            draft: RegistrationDraft::default(),
            violations: ViolationSet::default(),
        }
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    pub fn violations(&self) -> &ViolationSet {
        &self.violations
    }

    /// 编辑字段，并清除该字段此前的校验提示
    pub fn edit(&mut self, field: SignupField, value: impl Into<String>) {
        self.draft.set_field(field, value);
        self.violations.clear(field);
    }

    /// 提交注册
    ///
    /// 每次提交重新计算整个校验集；存在问题时不发起任何网络
    /// 调用，由调用方按字段渲染提示。服务器拒绝时正文原样透出。
    pub async fn submit(&mut self) -> Result<(), SignupError> {
        self.violations = self.draft.validate();
        if !self.violations.is_empty() {
            return Err(SignupError::Invalid);
        }

        match self.gateway.signup(self.draft.clone()).await {
            Ok(()) => {
                info!(login = %self.draft.login, "注册成功");
                Ok(())
            }
            Err(GatewayError::Status { status, body }) => {
                warn!(status, "注册端点拒绝请求");
                Err(SignupError::Rejected(body))
            }
            Err(err @ GatewayError::Unauthorized) => Err(SignupError::Rejected(err.to_string())),
            Err(GatewayError::Connectivity(reason)) => {
                warn!(reason = %reason, "注册端点不可达");
                Err(SignupError::Connectivity)
            }
        }
    }
}
