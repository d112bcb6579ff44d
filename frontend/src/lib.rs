//! NatakaHii 管理后台前端
//!
//! 会话、守卫和列表加载的逻辑都在核心 crate 中，这里只负责：
//! - `web`: 浏览器实现（fetch 传输、localStorage、History 路由）
//! - `auth`: 把核心会话状态桥接到 Leptos 信号
//! - `hooks` / `resources`: 列表资源 Hook 与各后台页面的声明表
//! - `components`: UI 组件层

mod auth;
mod hooks;
pub mod logging;
mod resources;
mod components {
    pub mod dashboard;
    pub mod escrow;
    pub mod form_page;
    pub mod guards;
    pub mod layout;
    pub mod login;
    pub mod page;
    pub mod resource_page;
    pub mod status;
    pub mod table;
    pub mod toast;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::dashboard::{AnalyticsPage, DashboardPage};
use crate::components::escrow::EscrowPage;
use crate::components::form_page::FormPage;
use crate::components::guards::ProtectedRoute;
use crate::components::layout::AppLayout;
use crate::components::login::LoginPage;
use crate::components::resource_page::ResourcePage;
use crate::components::status::{ForbiddenPage, NotFoundPage};
use crate::components::toast::{ToastHost, provide_toaster};
use crate::resources::{Page, page_for};

use leptos::prelude::*;
use natakahii_admin::{AdminServices, ClientConfig};
use natakahii_admin_shared::nav::NavItem;
use std::rc::Rc;
use tracing::error;

// 浏览器实现
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::BrowserStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet, RouterService};
use web::{BrowserStorage, FetchHttpClient};

/// 编译期注入的配置项
fn build_env(key: &str) -> Option<String> {
    match key {
        "API_BASE_URL" => option_env!("API_BASE_URL"),
        "DEVICE_NAME" => option_env!("DEVICE_NAME"),
        _ => None,
    }
    .map(str::to_string)
}

fn load_config() -> ClientConfig {
    ClientConfig::from_lookup(build_env).unwrap_or_else(|e| {
        error!(error = %e, "invalid build configuration, using defaults");
        ClientConfig::default()
    })
}

/// 后台页面内容
fn page_view(item: &'static NavItem) -> AnyView {
    match page_for(item.path) {
        Some(Page::Dashboard) => view! { <DashboardPage /> }.into_any(),
        Some(Page::Analytics) => view! { <AnalyticsPage /> }.into_any(),
        Some(Page::Escrow) => view! { <EscrowPage /> }.into_any(),
        Some(Page::List(def)) => view! { <ResourcePage def=def /> }.into_any(),
        Some(Page::Form(def)) => view! { <FormPage def=def /> }.into_any(),
        None => view! { <NotFoundPage /> }.into_any(),
    }
}

/// 路由匹配函数
///
/// 后台页面统一经过认证 + 角色守卫，再套上后台布局。
fn route_matcher(route: AppRoute) -> AnyView {
    let (Some(item), Some(allow)) = (route.nav_item(), route.allowed_roles()) else {
        return match route {
            AppRoute::Forbidden => view! { <ForbiddenPage /> }.into_any(),
            AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
            _ => view! { <LoginPage /> }.into_any(),
        };
    };

    view! {
        <ProtectedRoute allow=allow>
            <AppLayout item=item>{page_view(item)}</AppLayout>
        </ProtectedRoute>
    }
    .into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 路由服务（会话失效跳转也经由它）
    let router = RouterService::new();

    // 2. 组装核心服务
    let services = AdminServices::connect(
        load_config(),
        Rc::new(FetchHttpClient),
        Rc::new(BrowserStorage),
        Rc::new(router.navigator()),
    );

    // 3. 认证上下文 + 启动校验
    let auth_ctx = AuthContext::new(services);
    provide_context(auth_ctx);
    init_auth(&auth_ctx);
    provide_toaster();

    let signed_in = auth_ctx.signed_in_signal();

    view! {
        <Router service=router signed_in=signed_in>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastHost />
    }
}
