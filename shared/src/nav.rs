//! 侧边栏导航表
//!
//! 普通管理员只看到运营菜单；超级管理员额外看到平台管理菜单。

use crate::role::Role;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub title: &'static str,
    pub items: &'static [NavItem],
}

const fn item(label: &'static str, path: &'static str, icon: &'static str) -> NavItem {
    NavItem { label, path, icon }
}

pub const ADMIN_NAV: &[NavItem] = &[
    item("Dashboard", "/app/admin/dashboard", "grid"),
    item("Users", "/app/admin/users", "users"),
    item("Vendors", "/app/admin/vendors", "store"),
    item("Vendor Applications", "/app/admin/vendor-applications", "clipboard"),
    item("Products", "/app/admin/products", "box"),
    item("Categories", "/app/admin/categories", "tags"),
    item("Orders", "/app/admin/orders", "receipt"),
    item("Payments", "/app/admin/payments", "credit-card"),
    item("Escrow", "/app/admin/escrow", "shield"),
    item("Refunds", "/app/admin/refunds", "rotate-ccw"),
    item("Shipments", "/app/admin/shipments", "truck"),
    item("Disputes", "/app/admin/disputes", "alert-triangle"),
    item("Support", "/app/admin/support", "life-buoy"),
    item("Reports", "/app/admin/reports", "flag"),
    item("Analytics", "/app/admin/analytics", "bar-chart"),
];

pub const SUPER_ADMIN_NAV: &[NavItem] = &[
    item("Admin Accounts", "/app/super/admins", "user-cog"),
    item("Settings", "/app/super/settings", "settings"),
    item("Platform Fees", "/app/super/platform-fees", "percent"),
    item("Subscription Plans", "/app/super/subscription-plans", "badge-dollar-sign"),
    item("Audit Logs", "/app/super/audit-logs", "scroll-text"),
];

/// 按角色生成侧边栏分组
///
/// 无角色或未识别角色返回空列表（对应页面会被角色守卫拦截）。
pub fn nav_for(role: Option<&Role>) -> Vec<NavSection> {
    let mut sections = Vec::new();
    match role {
        Some(Role::NormalAdmin) => {
            sections.push(NavSection { title: "Operations", items: ADMIN_NAV });
        }
        Some(Role::SuperAdmin) => {
            sections.push(NavSection { title: "Operations", items: ADMIN_NAV });
            sections.push(NavSection { title: "Platform", items: SUPER_ADMIN_NAV });
        }
        _ => {}
    }
    sections
}

/// 根据路径查找菜单项（用于页面标题和面包屑）
pub fn find_item(path: &str) -> Option<&'static NavItem> {
    ADMIN_NAV
        .iter()
        .chain(SUPER_ADMIN_NAV.iter())
        .find(|item| item.path == path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_by_role() {
        assert_eq!(nav_for(Some(&Role::NormalAdmin)).len(), 1);

        let super_nav = nav_for(Some(&Role::SuperAdmin));
        assert_eq!(super_nav.len(), 2);
        assert_eq!(super_nav[1].items, SUPER_ADMIN_NAV);

        assert!(nav_for(None).is_empty());
        assert!(nav_for(Some(&Role::Other("viewer".into()))).is_empty());
    }

    #[test]
    fn test_find_item() {
        assert_eq!(find_item("/app/super/audit-logs").map(|i| i.label), Some("Audit Logs"));
        assert!(find_item("/app/unknown").is_none());
    }
}
