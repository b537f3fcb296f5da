//! 消息实体
//!
//! 房间内的消息只存在于当前房间会话的内存缓冲中，不做持久化。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 系统通知的发送者名称
pub const SYSTEM_SENDER: &str = "System";
/// 机器人通知的发送者名称
pub const BOT_SENDER: &str = "Bot";

/// 聊天消息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// 消息唯一ID
    pub id: Uuid,
    /// 发送者昵称
    pub sender: String,
    /// 消息正文
    pub text: String,
    /// 是否由当前用户发送
    pub is_self: bool,
    /// 发送时间
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: impl Into<String>, text: impl Into<String>, is_self: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: sender.into(),
            text: text.into(),
            is_self,
            sent_at: Utc::now(),
        }
    }

    /// 创建当前用户发送的消息
    pub fn from_self(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(sender, text, true)
    }

    /// 创建系统通知
    pub fn system_notice(text: impl Into<String>) -> Self {
        Self::new(SYSTEM_SENDER, text, false)
    }

    /// 创建机器人通知
    pub fn bot_notice(text: impl Into<String>) -> Self {
        Self::new(BOT_SENDER, text, false)
    }
}
