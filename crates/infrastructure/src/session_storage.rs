//! 基于文件的会话存储
//!
//! 把键值对以 JSON 形式写入单个文件，语义与浏览器的
//! localStorage 对齐：同步读写、最后写入者胜出。写盘失败
//! 只记录日志，不向调用方冒泡。

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use application::SessionStore;
use tracing::warn;

/// 文件实现的会话存储
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileSessionStore {
    /// 打开存储文件；文件缺失或损坏时从空映射开始
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "会话文件损坏，忽略其内容");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string_pretty(entries) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "序列化会话存储失败");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!(path = %parent.display(), error = %err, "创建会话目录失败");
                    return;
                }
            }
        }

        if let Err(err) = fs::write(&self.path, raw) {
            warn!(path = %self.path.display(), error = %err, "写入会话文件失败");
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(key.to_string(), value.to_string());
            self.persist(&entries);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.remove(key).is_some() {
                self.persist(&entries);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use application::{TOKEN_KEY, USER_LOGIN_KEY};

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("larktalk-store-{}.json", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_roundtrip_across_instances() {
        let path = temp_store_path();

        let store = FileSessionStore::open(&path);
        store.set(TOKEN_KEY, "fake-jwt-token-for-alice");
        store.set(USER_LOGIN_KEY, "alice");

        // 重新打开后键值仍然存在
        let reopened = FileSessionStore::open(&path);
        assert_eq!(
            reopened.get(TOKEN_KEY),
            Some("fake-jwt-token-for-alice".to_string())
        );
        assert_eq!(reopened.get(USER_LOGIN_KEY), Some("alice".to_string()));

        reopened.remove(TOKEN_KEY);
        reopened.remove(USER_LOGIN_KEY);
        let cleared = FileSessionStore::open(&path);
        assert_eq!(cleared.get(TOKEN_KEY), None);
        assert_eq!(cleared.get(USER_LOGIN_KEY), None);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let store = FileSessionStore::open(temp_store_path());
        assert_eq!(store.get(TOKEN_KEY), None);
    }

    #[test]
    fn test_corrupted_file_starts_empty() {
        let path = temp_store_path();
        fs::write(&path, "not-json").unwrap();

        let store = FileSessionStore::open(&path);
        assert_eq!(store.get(TOKEN_KEY), None);

        let _ = fs::remove_file(&path);
    }
}
