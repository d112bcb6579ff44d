//! 守卫组件
//!
//! 判定逻辑全部在核心 crate 的 `AuthGuard` / `RoleGuard` 里，
//! 这里只把判定结果翻译成渲染或跳转。

use crate::auth::use_auth;
use crate::web::router::use_router;
use leptos::prelude::*;
use natakahii_admin::GuardDecision;
use natakahii_admin_shared::Role;
use tracing::debug;

/// 先认证、后角色的双层守卫
#[component]
pub fn ProtectedRoute(
    /// 允许访问的角色
    allow: Vec<Role>,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let services = auth.services();
    let auth_guard = services.auth_guard();
    let role_guard = services.role_guard(allow);

    let decision = Memo::new(move |_| {
        auth.state
            .with(|s| auth_guard.check(s).and_then(|| role_guard.check(s)))
    });

    Effect::new(move |_| {
        if let GuardDecision::Redirect(to) = decision.get() {
            debug!(to = %to, "guard redirect");
            router.replace(&to);
        }
    });

    move || match decision.get() {
        // 启动校验期间什么都不渲染
        GuardDecision::Pending => ().into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect(_) => ().into_any(),
    }
}
