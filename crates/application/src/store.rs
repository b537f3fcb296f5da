//! 持久化会话存储抽象
//!
//! 浏览器里的 localStorage 在这里被重构为可注入的键值存储能力，
//! 由会话服务统一管理，其他组件不直接访问。写入语义为最后
//! 写入者胜出，单用户场景下不需要事务或锁协议。

use std::collections::HashMap;
use std::sync::RwLock;

/// 访问令牌的存储键
pub const TOKEN_KEY: &str = "token";
/// 登录标识的存储键
pub const USER_LOGIN_KEY: &str = "userLogin";

/// 键值型会话存储接口
pub trait SessionStore: Send + Sync {
    /// 读取键值
    fn get(&self, key: &str) -> Option<String>;

    /// 写入键值
    fn set(&self, key: &str, value: &str);

    /// 删除键值
    fn remove(&self, key: &str);
}

/// 内存实现，用于测试与无持久化场景
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemorySessionStore::new();
        assert_eq!(store.get(TOKEN_KEY), None);

        store.set(TOKEN_KEY, "tok");
        assert_eq!(store.get(TOKEN_KEY), Some("tok".to_string()));

        store.remove(TOKEN_KEY);
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_last_write_wins() {
        let store = InMemorySessionStore::new();
        store.set(USER_LOGIN_KEY, "alice");
        store.set(USER_LOGIN_KEY, "bob");
        assert_eq!(store.get(USER_LOGIN_KEY), Some("bob".to_string()));
    }
}
