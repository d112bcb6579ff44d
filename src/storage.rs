//! Token / 用户资料持久化
//!
//! [`KeyValueStore`] 是底层的键值介质（浏览器 localStorage、内存表），
//! [`AuthStorage`] 在其上固定两个键：token 原文与 JSON 序列化的用户资料。
//! 所有操作同步、幂等，不校验 token 格式。

use crate::config::ClientConfig;
use natakahii_admin_shared::UserProfile;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage rejected write to `{key}`: {reason}")]
    Rejected { key: String, reason: String },
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 键值存储介质
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// 内存实现，用于测试和无持久化环境
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// 认证信息存储
///
/// 写入失败（例如配额已满）只记录警告：内存中的会话状态仍然有效，
/// 只是刷新页面后无法恢复。
#[derive(Clone)]
pub struct AuthStorage {
    kv: Rc<dyn KeyValueStore>,
    token_key: String,
    user_key: String,
}

impl AuthStorage {
    pub fn new(kv: Rc<dyn KeyValueStore>, config: &ClientConfig) -> Self {
        Self {
            kv,
            token_key: config.token_key.clone(),
            user_key: config.user_key.clone(),
        }
    }

    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.kv.set(&self.token_key, token) {
            warn!(error = %e, "failed to persist auth token");
        }
    }

    /// 当前 token；空字符串视为不存在
    pub fn token(&self) -> Option<String> {
        self.kv.get(&self.token_key).filter(|t| !t.is_empty())
    }

    pub fn clear_token(&self) {
        self.kv.remove(&self.token_key);
    }

    pub fn set_user(&self, user: &UserProfile) {
        let result = serde_json::to_string(user)
            .map_err(StorageError::from)
            .and_then(|raw| self.kv.set(&self.user_key, &raw));
        if let Err(e) = result {
            warn!(error = %e, "failed to persist user profile");
        }
    }

    /// 缓存的用户资料；内容损坏时视为不存在
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.kv.get(&self.user_key)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "ignoring corrupt cached user profile");
                None
            }
        }
    }

    pub fn clear_user(&self) {
        self.kv.remove(&self.user_key);
    }

    /// 同时清除 token 和用户资料
    pub fn clear_auth(&self) {
        self.clear_token();
        self.clear_user();
    }
}
