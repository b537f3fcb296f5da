//! 聊天室会话控制器
//!
//! 管理“当前打开的房间”及其内存消息缓冲。同一认证会话内同一
//! 时间至多打开一个房间；打开新房间会丢弃上一个房间的缓冲。
//! 控制器本身从不访问网络，历史消息拉取留待未来的消息流协作方。

use domain::{ChatMessage, Room};
use tracing::{debug, warn};
use uuid::Uuid;

/// 聊天室会话控制器
#[derive(Debug)]
pub struct RoomSessionController {
    /// 当前用户的发送昵称，来自会话身份，只读注入
    nickname: String,
    active_room: Option<Room>,
    messages: Vec<ChatMessage>,
    pending_input: String,
    /// 待滚动到的最新消息；每次追加后设置，由视图取走
    scroll_target: Option<Uuid>,
}

impl RoomSessionController {
    pub fn new(nickname: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            active_room: None,
            messages: Vec::new(),
            pending_input: String::new(),
            scroll_target: None,
        }
    }

    pub fn active_room(&self) -> Option<&Room> {
        self.active_room.as_ref()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// 更新待发送的输入缓冲
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// 打开房间
    ///
    /// 已有打开的房间时先丢弃其缓冲，再以固定的两条欢迎通知
    /// 初始化新房间的消息缓冲。
    pub fn open_room(&mut self, room: Room) {
        if let Some(previous) = self.active_room.take() {
            debug!(room = %previous.display_name, "切换房间，丢弃当前缓冲");
            self.messages.clear();
        }

        self.messages.push(ChatMessage::system_notice(format!(
            "Welcome in {} chat!",
            room.display_name
        )));
        self.messages.push(ChatMessage::bot_notice("Remember to be kind :)"));
        self.scroll_target = self.messages.last().map(|message| message.id);

        debug!(room = %room.display_name, "打开房间");
        self.active_room = Some(room);
    }

    /// 关闭房间，丢弃消息缓冲
    ///
    /// 没有打开的房间时为无副作用的空操作。
    pub fn close_room(&mut self) {
        if self.active_room.take().is_none() {
            return;
        }
        self.messages.clear();
        self.scroll_target = None;
        debug!("房间已关闭，缓冲已丢弃");
    }

    /// 发送消息
    ///
    /// 仅含空白的文本被静默忽略，输入缓冲保持原样。没有打开的
    /// 房间时记录日志后忽略，以容忍乱序的界面事件。
    pub fn send_message(&mut self, text: &str) -> Option<&ChatMessage> {
        if self.active_room.is_none() {
            warn!("没有打开的房间，忽略发送请求");
            return None;
        }
        if text.trim().is_empty() {
            return None;
        }

        let message = ChatMessage::from_self(self.nickname.clone(), text);
        self.scroll_target = Some(message.id);
        self.messages.push(message);
        self.pending_input.clear();
        self.messages.last()
    }

    /// 取走待滚动目标
    ///
    /// 每次消息追加后恰好返回一次 `Some`；与追加无关的重绘
    /// 不会再次触发。
    pub fn take_scroll_target(&mut self) -> Option<Uuid> {
        self.scroll_target.take()
    }
}
