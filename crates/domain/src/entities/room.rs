//! 聊天室目录
//!
//! 房间目录在构建期固定，运行期只读，用户不可编辑。

use serde::{Deserialize, Serialize};

/// 聊天室静态目录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// 房间ID
    pub id: u32,
    /// 显示名称
    pub display_name: String,
    /// 图标资源引用
    pub icon_ref: String,
}

impl Room {
    pub fn new(id: u32, display_name: impl Into<String>, icon_ref: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            icon_ref: icon_ref.into(),
        }
    }
}

/// 内置的聊天室目录
pub fn room_catalog() -> Vec<Room> {
    vec![
        Room::new(1, "All in One!", "chat_logo/just_chatting.jpg"),
        Room::new(2, "History", "chat_logo/history.jpg"),
        Room::new(3, "Programming", "chat_logo/programming.jpg"),
        Room::new(4, "Video games", "chat_logo/games.jpg"),
    ]
}
