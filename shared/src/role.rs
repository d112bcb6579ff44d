//! 管理员角色模块
//!
//! 后端返回的角色字符串格式并不统一（`SuperAdmin`、`super-admin`、`super` ...），
//! 这里把它们归一化为固定的几个值，供路由守卫和导航使用。

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// 管理员角色
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// 普通管理员 (`normal_admin`)
    NormalAdmin,
    /// 超级管理员 (`super_admin`)
    SuperAdmin,
    /// 未识别的角色，保留归一化后的原始值
    Other(String),
}

impl Role {
    pub const NORMAL_ADMIN: &'static str = "normal_admin";
    pub const SUPER_ADMIN: &'static str = "super_admin";

    /// 归一化角色字符串
    ///
    /// 规则：去首尾空白 → 小写 → 连续的空白/连字符替换为单个下划线 → 同义词映射。
    /// 空字符串返回 `None`。对已归一化的值再次调用结果不变。
    pub fn normalize(raw: &str) -> Option<Self> {
        let key = canonical_key(raw);
        if key.is_empty() {
            return None;
        }

        Some(match key.as_str() {
            "super_admin" | "superadmin" | "super" => Role::SuperAdmin,
            "normal_admin" | "normaladmin" | "admin" => Role::NormalAdmin,
            _ => Role::Other(key),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::NormalAdmin => Self::NORMAL_ADMIN,
            Role::SuperAdmin => Self::SUPER_ADMIN,
            Role::Other(raw) => raw,
        }
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// 面向界面的角色名称
    pub fn label(&self) -> &str {
        match self {
            Role::NormalAdmin => "Admin",
            Role::SuperAdmin => "Super Admin",
            Role::Other(raw) => raw,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::normalize(&raw).ok_or_else(|| serde::de::Error::custom("empty role"))
    }
}

fn canonical_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_sep = true;
            continue;
        }
        if pending_sep {
            out.push('_');
            pending_sep = false;
        }
        out.extend(ch.to_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_spellings() {
        for raw in ["SuperAdmin", "super-admin", "super_admin", "super", "  Super Admin "] {
            assert_eq!(Role::normalize(raw), Some(Role::SuperAdmin), "input: {raw:?}");
        }
    }

    #[test]
    fn test_normal_admin_spellings() {
        for raw in ["Admin", "normal-admin", "normal_admin", "NormalAdmin", "normal admin"] {
            assert_eq!(Role::normalize(raw), Some(Role::NormalAdmin), "input: {raw:?}");
        }
    }

    #[test]
    fn test_unknown_role_passes_through_normalized() {
        assert_eq!(
            Role::normalize("Support Agent"),
            Some(Role::Other("support_agent".to_string()))
        );
        assert_eq!(
            Role::normalize("finance--team"),
            Some(Role::Other("finance_team".to_string()))
        );
    }

    #[test]
    fn test_empty_role_is_none() {
        assert_eq!(Role::normalize(""), None);
        assert_eq!(Role::normalize("   "), None);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["SuperAdmin", "normal-admin", "Ops Lead", "admin"] {
            let once = Role::normalize(raw).unwrap();
            let twice = Role::normalize(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_serde_uses_normalized_string() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"super_admin\"");

        let role: Role = serde_json::from_str("\"Super-Admin\"").unwrap();
        assert_eq!(role, Role::SuperAdmin);
    }
}
