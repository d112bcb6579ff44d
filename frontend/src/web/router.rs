//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 访问控制不在这里做，由页面外层的守卫组件根据会话状态决定渲染或跳转。

use leptos::prelude::*;
use natakahii_admin::Navigator;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, DEFAULT_AFTER_LOGIN};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由对应的地址栏路径；未知路径保留用户输入
fn address_for<'a>(route: &AppRoute, requested: &'a str) -> &'a str {
    match route {
        AppRoute::NotFound => requested,
        other => other.to_path(),
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 从 URL 解析初始路由；分区索引路径会被替换为规范路径。
    pub fn new() -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let canonical = address_for(&initial_route, &path);
        if canonical != path {
            debug!(from = %path, to = %canonical, "canonicalizing initial path");
            replace_history_state(canonical);
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 导航到指定路径（pushState）
    pub fn navigate(&self, path: &str) {
        self.go(path, true);
    }

    /// 重定向到指定路径（replaceState，不产生历史记录）
    pub fn replace(&self, path: &str) {
        self.go(path, false);
    }

    fn go(&self, path: &str, use_push: bool) {
        let target_route = AppRoute::from_path(path);
        let address = address_for(&target_route, path);
        if use_push {
            push_history_state(address);
        } else {
            replace_history_state(address);
        }
        self.set_route.set(target_route);
    }

    /// 供核心会话层使用的导航器
    pub fn navigator(&self) -> BrowserNavigator {
        BrowserNavigator { router: *self }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            set_route.set(AppRoute::from_path(&path));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 已登录用户停留在登录页时跳转到后台首页
    ///
    /// 只认启动校验完成后的登录状态，未验证的本地 token 不触发跳转。
    fn setup_auth_redirect(&self, signed_in: Signal<bool>) {
        let router = *self;

        Effect::new(move |_| {
            let signed_in = signed_in.get();
            let route = router.current_route.get();

            if signed_in && route.should_redirect_when_authenticated() {
                info!(to = DEFAULT_AFTER_LOGIN, "already authenticated, leaving login page");
                router.replace(DEFAULT_AFTER_LOGIN);
            }
        });
    }
}

/// 基于 History API 的导航器
///
/// 会话失效时由核心层调用，跳转同时更新路由信号。
#[derive(Clone, Copy)]
pub struct BrowserNavigator {
    router: RouterService,
}

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        current_path()
    }

    fn navigate(&self, path: &str) {
        self.router.replace(path);
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(router: RouterService, signed_in: Signal<bool>) {
    router.init_popstate_listener();
    router.setup_auth_redirect(signed_in);
    provide_context(router);
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 组合根创建的路由服务
    service: RouterService,
    /// 启动校验完成后的登录状态
    signed_in: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(service, signed_in);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接：拦截点击，走路由服务而不是整页刷新
#[component]
pub fn Link(
    /// 目标路径
    to: &'static str,
    /// 样式类
    #[prop(optional)]
    class: &'static str,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
