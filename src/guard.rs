//! 路由守卫
//!
//! 两个守卫都是会话状态的纯函数，自身不持有状态，可以任意嵌套：
//! 外层认证守卫通过后再交给内层角色守卫判断。

use crate::config::ClientConfig;
use crate::session::SessionState;
use natakahii_admin_shared::Role;

/// 守卫判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// 会话仍在启动，什么都不渲染
    Pending,
    Render,
    Redirect(String),
}

impl GuardDecision {
    /// 嵌套：只有当前结果为 `Render` 时才继续判断内层守卫
    pub fn and_then(self, inner: impl FnOnce() -> GuardDecision) -> GuardDecision {
        match self {
            GuardDecision::Render => inner(),
            other => other,
        }
    }
}

/// 认证守卫：未登录跳转到登录页
#[derive(Debug, Clone)]
pub struct AuthGuard {
    login_route: String,
}

impl AuthGuard {
    pub fn new(login_route: impl Into<String>) -> Self {
        Self {
            login_route: login_route.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.login_route.clone())
    }

    pub fn check(&self, state: &SessionState) -> GuardDecision {
        if state.loading {
            GuardDecision::Pending
        } else if !state.is_authenticated {
            GuardDecision::Redirect(self.login_route.clone())
        } else {
            GuardDecision::Render
        }
    }
}

/// 角色守卫：角色缺失或不在白名单内时跳转到无权限页
#[derive(Debug, Clone)]
pub struct RoleGuard {
    allow: Vec<Role>,
    forbidden_route: String,
}

impl RoleGuard {
    pub fn new(allow: impl IntoIterator<Item = Role>, forbidden_route: impl Into<String>) -> Self {
        Self {
            allow: allow.into_iter().collect(),
            forbidden_route: forbidden_route.into(),
        }
    }

    pub fn from_config(config: &ClientConfig, allow: impl IntoIterator<Item = Role>) -> Self {
        Self::new(allow, config.forbidden_route.clone())
    }

    pub fn allows(&self, role: Option<&Role>) -> bool {
        role.is_some_and(|r| self.allow.contains(r))
    }

    pub fn check(&self, state: &SessionState) -> GuardDecision {
        if state.loading {
            return GuardDecision::Pending;
        }
        if self.allows(state.role().as_ref()) {
            GuardDecision::Render
        } else {
            GuardDecision::Redirect(self.forbidden_route.clone())
        }
    }
}
