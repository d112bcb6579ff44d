//! 认证模块
//!
//! 把核心 crate 的 [`Session`](natakahii_admin::Session) 桥接到 Leptos 信号：
//! 会话每次变化都写入 `state` 信号，组件只读信号、只调用这里的函数。

use leptos::prelude::*;
use leptos::task::spawn_local;
use natakahii_admin::{AdminApi, AdminServices, ApiResult, Credentials, SessionState};
use natakahii_admin_shared::UserProfile;
use natakahii_admin_shared::protocol::{ResetPasswordRequest, UpdateProfileRequest};

/// 认证上下文
///
/// 服务对象不是 `Send`，放在本地存储的 `StoredValue` 中；
/// 状态信号通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    services: StoredValue<AdminServices, LocalStorage>,
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
}

impl AuthContext {
    /// 创建认证上下文并订阅会话变化
    pub fn new(services: AdminServices) -> Self {
        let (state, set_state) = signal(services.session.state());
        services.session.subscribe(move |next| {
            let _ = set_state.try_set(next.clone());
        });

        Self {
            services: StoredValue::new_local(services),
            state,
        }
    }

    pub fn services(&self) -> AdminServices {
        self.services.get_value()
    }

    pub fn api(&self) -> AdminApi {
        self.services.with_value(|s| s.api.clone())
    }

    /// 已完成启动校验的登录状态（用于路由服务注入）
    pub fn signed_in_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::is_signed_in))
    }

    /// 当前用户资料
    pub fn user(&self) -> Signal<Option<UserProfile>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 后台校验已保存的 token，完成前会话处于 loading。
pub fn init_auth(ctx: &AuthContext) {
    let session = ctx.services().session;
    spawn_local(async move {
        session.bootstrap().await;
    });
}

/// 登录
///
/// 成功后会话状态变为已认证，路由服务会自动离开登录页。
pub async fn login(ctx: &AuthContext, identifier: String, password: String) -> ApiResult<UserProfile> {
    let credentials = Credentials {
        identifier,
        password,
        device_name: None,
    };
    ctx.services().session.login(&credentials).await
}

/// 注销
///
/// 后端注销失败也会清除本地状态。
pub async fn logout(ctx: &AuthContext) {
    ctx.services().session.logout().await;
}

/// 更新个人资料并重新拉取
pub async fn update_profile(ctx: &AuthContext, changes: UpdateProfileRequest) -> ApiResult<UserProfile> {
    ctx.services().session.update_profile(&changes).await
}

/// 删除头像
pub async fn remove_photo(ctx: &AuthContext) -> ApiResult<UserProfile> {
    ctx.services().session.remove_photo().await
}

// =========================================================
// 找回密码
// =========================================================

/// 发送重置验证码；返回后端提示语
pub async fn request_password_reset(ctx: &AuthContext, email: String) -> ApiResult<Option<String>> {
    ctx.services().session.request_password_reset(&email).await
}

pub async fn resend_reset_otp(ctx: &AuthContext, email: String) -> ApiResult<Option<String>> {
    ctx.services().session.resend_reset_otp(&email).await
}

pub async fn reset_password(ctx: &AuthContext, request: ResetPasswordRequest) -> ApiResult<Option<String>> {
    ctx.services().session.reset_password(&request).await
}
