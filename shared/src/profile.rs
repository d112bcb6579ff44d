//! 用户资料模块
//!
//! `/api/v1/auth/me` 的返回结构并不固定，资料可能出现在以下任一位置：
//! - `{ "data": { "user": {...} } }`
//! - `{ "user": {...} }`
//! - `{ "data": {...} }`
//! - `{...}`（扁平）
//!
//! 所有兼容逻辑都集中在 [`UserProfile::from_payload`]，
//! 解析之后系统内部只使用 [`UserProfile`] 一种类型。

use crate::role::Role;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 可能承载角色信息的字段，按优先级排列
pub const ROLE_KEYS: [&str; 5] = ["admin_role", "role", "adminRole", "user_type", "type"];

/// 当前登录管理员的资料
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub profile_photo: Option<String>,
    /// 其余字段原样保留（包括角色字段）
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// 从后端任意形状的 payload 中提取资料
    ///
    /// 找不到对象节点时返回 `None`。
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let node = locate_profile(payload)?;
        serde_json::from_value(node.clone()).ok()
    }

    /// 原始角色字符串（未归一化）
    pub fn raw_role(&self) -> Option<&str> {
        ROLE_KEYS
            .iter()
            .filter_map(|key| self.extra.get(*key))
            .find_map(role_text)
    }

    /// 归一化后的角色
    pub fn role(&self) -> Option<Role> {
        self.raw_role().and_then(Role::normalize)
    }

    /// 顶栏展示用名称
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("Admin")
    }

    /// 头像占位字母
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

fn locate_profile(payload: &Value) -> Option<&Value> {
    let candidates = [
        payload.get("data").and_then(|d| d.get("user")),
        payload.get("user"),
        payload.get("data"),
        Some(payload),
    ];

    candidates.into_iter().flatten().find(|v| v.is_object())
}

// 角色可能是字符串，也可能是 { "name": "super_admin" } 之类的对象
fn role_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.as_str()),
        Value::Object(obj) => ["slug", "name"]
            .iter()
            .filter_map(|k| obj.get(*k))
            .find_map(|v| v.as_str().filter(|s| !s.trim().is_empty())),
        _ => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}
