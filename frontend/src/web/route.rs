//! 路由定义模块 - 领域模型
//!
//! 纯粹的路径解析，不依赖于 DOM 或 web_sys。
//! 后台页面直接引用共享导航表中的菜单项，菜单与路由保持一致。

use natakahii_admin_shared::Role;
use natakahii_admin_shared::nav::{ADMIN_NAV, NavItem, SUPER_ADMIN_NAV};
use std::fmt::Display;

/// 登录成功后的默认落地页
pub const DEFAULT_AFTER_LOGIN: &str = "/app/admin/dashboard";

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 运营后台页面（普通管理员与超级管理员）
    Admin(&'static NavItem),
    /// 平台管理页面（仅超级管理员）
    Super(&'static NavItem),
    /// 无权限
    Forbidden,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 分区的索引路径（`/app`、`/app/admin`、`/app/super`）解析为该分区的第一个页面，
    /// 此时 [`to_path`](Self::to_path) 与输入不同，由路由服务替换地址栏。
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Self::Login,
            "/forbidden" => Self::Forbidden,
            "/app" | "/app/admin" => Self::Admin(&ADMIN_NAV[0]),
            "/app/super" => Self::Super(&SUPER_ADMIN_NAV[0]),
            _ => {
                if let Some(item) = ADMIN_NAV.iter().find(|i| i.path == path) {
                    Self::Admin(item)
                } else if let Some(item) = SUPER_ADMIN_NAV.iter().find(|i| i.path == path) {
                    Self::Super(item)
                } else {
                    Self::NotFound
                }
            }
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Admin(item) | Self::Super(item) => item.path,
            Self::Forbidden => "/forbidden",
            Self::NotFound => "/404",
        }
    }

    /// 后台页面对应的菜单项
    pub fn nav_item(&self) -> Option<&'static NavItem> {
        match self {
            Self::Admin(item) | Self::Super(item) => Some(item),
            _ => None,
        }
    }

    /// 该路由允许访问的角色；`None` 表示公开页面
    pub fn allowed_roles(&self) -> Option<Vec<Role>> {
        match self {
            Self::Admin(_) => Some(vec![Role::NormalAdmin, Role::SuperAdmin]),
            Self::Super(_) => Some(vec![Role::SuperAdmin]),
            _ => None,
        }
    }

    /// 已认证用户是否应该离开此路由（登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_public_routes() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path(""), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/forbidden/"), AppRoute::Forbidden);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/app/admin/nope"), AppRoute::NotFound);
    }

    #[test]
    fn section_index_resolves_to_first_page() {
        let admin = AppRoute::from_path("/app");
        assert_eq!(admin, AppRoute::from_path("/app/admin"));
        assert_eq!(admin.to_path(), DEFAULT_AFTER_LOGIN);

        let sup = AppRoute::from_path("/app/super/");
        assert_eq!(sup.to_path(), SUPER_ADMIN_NAV[0].path);
        assert_eq!(sup.allowed_roles(), Some(vec![Role::SuperAdmin]));
    }

    #[test]
    fn every_nav_item_round_trips() {
        for item in ADMIN_NAV.iter().chain(SUPER_ADMIN_NAV) {
            let route = AppRoute::from_path(item.path);
            assert_eq!(route.nav_item().map(|i| i.path), Some(item.path));
            assert_eq!(route.to_path(), item.path);
        }
    }

    #[test]
    fn only_login_leaves_when_authenticated() {
        assert!(AppRoute::Login.should_redirect_when_authenticated());
        assert!(!AppRoute::Forbidden.should_redirect_when_authenticated());
        assert!(AppRoute::Forbidden.allowed_roles().is_none());
        assert_eq!(
            AppRoute::from_path("/app/admin/users").allowed_roles(),
            Some(vec![Role::NormalAdmin, Role::SuperAdmin])
        );
    }
}
