//! 会话控制器
//!
//! 持有当前登录状态（token、用户资料、是否已认证、是否仍在启动中），
//! 提供 login / logout / refresh_profile，并在状态变化时通知订阅者。
//! 角色永远从用户资料推导，不单独存储。

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::navigation::AuthEvent;
use natakahii_admin_shared::protocol::{
    DeleteProfilePhotoRequest, ForgotPasswordRequest, LoginRequest, LogoutRequest, MeRequest,
    ResendOtpRequest, ResetPasswordRequest, UpdateProfileRequest,
};
use natakahii_admin_shared::{Role, UserProfile, backend_message, extract_token};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{info, warn};

#[cfg(test)]
mod tests;

/// 会话状态快照
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// 启动检查尚未完成
    pub loading: bool,
    pub token: Option<String>,
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
}

impl SessionState {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(UserProfile::role)
    }

    /// 启动校验已完成且已认证；仅凭本地 token 恢复的状态不算
    pub fn is_signed_in(&self) -> bool {
        !self.loading && self.is_authenticated
    }

    fn signed_out() -> Self {
        Self::default()
    }
}

/// 登录凭据
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// 邮箱或手机号
    pub identifier: String,
    pub password: String,
    /// 为空时使用配置中的设备名
    pub device_name: Option<String>,
}

type Watcher = Rc<dyn Fn(&SessionState)>;

struct SessionInner {
    client: ApiClient,
    state: RefCell<SessionState>,
    watchers: RefCell<Vec<Watcher>>,
}

#[derive(Clone)]
pub struct Session {
    inner: Rc<SessionInner>,
}

impl Session {
    /// 从持久化存储恢复初始状态，并订阅客户端的认证事件
    ///
    /// 初始状态处于 `loading`，需要调用 [`bootstrap`](Self::bootstrap) 完成校验。
    pub fn new(client: ApiClient) -> Self {
        let storage = client.storage();
        let token = storage.token();
        let state = SessionState {
            loading: true,
            is_authenticated: token.is_some(),
            user: storage.user(),
            token,
        };

        let inner = Rc::new(SessionInner {
            client: client.clone(),
            state: RefCell::new(state),
            watchers: RefCell::new(Vec::new()),
        });

        let weak: Weak<SessionInner> = Rc::downgrade(&inner);
        client.subscribe(move |event| {
            if let Some(inner) = weak.upgrade() {
                inner.on_auth_event(event);
            }
        });

        Self { inner }
    }

    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.inner.state.borrow().role()
    }

    /// 订阅状态变化
    pub fn subscribe<F>(&self, watcher: F)
    where
        F: Fn(&SessionState) + 'static,
    {
        self.inner.watchers.borrow_mut().push(Rc::new(watcher));
    }

    /// 启动时校验已保存的 token
    pub async fn bootstrap(&self) {
        if self.inner.client.storage().token().is_none() {
            info!("no stored token, starting signed out");
            self.inner.update(|s| {
                *s = SessionState::signed_out();
            });
            return;
        }

        match self.fetch_me().await {
            Ok(user) => {
                info!(user = %user.display_name(), "session restored");
                self.inner.client.storage().set_user(&user);
                let token = self.inner.client.storage().token();
                self.inner.update(|s| {
                    s.token = token;
                    s.user = Some(user);
                    s.is_authenticated = true;
                    s.loading = false;
                });
            }
            Err(e) => {
                warn!(error = %e, "stored session is invalid, clearing");
                self.inner.client.storage().clear_auth();
                self.inner.update(|s| {
                    *s = SessionState::signed_out();
                });
            }
        }
    }

    /// 登录并获取权威用户资料
    ///
    /// 登录响应中附带的用户对象会被忽略，资料总是来自 `/auth/me`。
    /// 第二步失败时回滚已保存的 token。
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<UserProfile> {
        let client = &self.inner.client;
        let device = credentials
            .device_name
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(client.config().device_name.as_str());
        let request = LoginRequest::new(&credentials.identifier, &credentials.password, device);

        let response = client
            .request(&request)
            .await
            .map_err(|e| e.in_op("session.login"))?;
        let token = extract_token(&response).ok_or_else(|| {
            ApiError::malformed("No token returned from server.").in_op("session.login")
        })?;

        client.storage().set_token(&token);
        self.inner.update(|s| s.token = Some(token.clone()));

        let user = match self.fetch_me().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "profile fetch after login failed, rolling back");
                client.storage().clear_auth();
                self.inner.update(|s| {
                    *s = SessionState::signed_out();
                });
                return Err(e.in_op("session.login"));
            }
        };

        client.storage().set_user(&user);
        info!(user = %user.display_name(), role = ?user.role(), "logged in");
        self.inner.update(|s| {
            s.user = Some(user.clone());
            s.is_authenticated = true;
            s.loading = false;
        });
        Ok(user)
    }

    /// 注销：后端调用尽力而为，本地状态无条件清除
    pub async fn logout(&self) {
        let client = &self.inner.client;
        if let Err(e) = client.request(&LogoutRequest).await {
            warn!(error = %e, "backend logout failed, clearing local session anyway");
        }
        client.storage().clear_auth();
        self.inner.update(|s| {
            *s = SessionState::signed_out();
        });
        info!("logged out");
    }

    /// 重新拉取用户资料
    pub async fn refresh_profile(&self) -> ApiResult<UserProfile> {
        let user = self
            .fetch_me()
            .await
            .map_err(|e| e.in_op("session.refresh_profile"))?;
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// 修改个人资料后刷新缓存
    pub async fn update_profile(&self, changes: &UpdateProfileRequest) -> ApiResult<UserProfile> {
        self.inner
            .client
            .request(changes)
            .await
            .map_err(|e| e.in_op("session.update_profile"))?;
        self.refresh_profile().await
    }

    /// 删除头像后刷新缓存
    pub async fn remove_photo(&self) -> ApiResult<UserProfile> {
        self.inner
            .client
            .request(&DeleteProfilePhotoRequest)
            .await
            .map_err(|e| e.in_op("session.remove_photo"))?;
        info!("profile photo removed");
        self.refresh_profile().await
    }

    // --- 找回密码（未登录可用，不改变会话状态）---

    /// 向邮箱发送重置验证码，返回后端提示语
    pub async fn request_password_reset(&self, email: &str) -> ApiResult<Option<String>> {
        let request = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        let body = self
            .inner
            .client
            .request(&request)
            .await
            .map_err(|e| e.in_op("session.forgot_password"))?;
        Ok(backend_message(&body))
    }

    pub async fn resend_reset_otp(&self, email: &str) -> ApiResult<Option<String>> {
        let request = ResendOtpRequest {
            email: email.trim().to_string(),
        };
        let body = self
            .inner
            .client
            .request(&request)
            .await
            .map_err(|e| e.in_op("session.resend_otp"))?;
        Ok(backend_message(&body))
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ApiResult<Option<String>> {
        let body = self
            .inner
            .client
            .request(request)
            .await
            .map_err(|e| e.in_op("session.reset_password"))?;
        info!("password reset completed");
        Ok(backend_message(&body))
    }

    /// 直接替换本地缓存的用户资料（None 表示清除）
    pub fn set_user(&self, user: Option<UserProfile>) {
        let storage = self.inner.client.storage();
        match &user {
            Some(user) => storage.set_user(user),
            None => storage.clear_user(),
        }
        self.inner.update(|s| s.user = user);
    }

    async fn fetch_me(&self) -> ApiResult<UserProfile> {
        let payload = self.inner.client.request(&MeRequest).await?;
        UserProfile::from_payload(&payload).ok_or_else(|| {
            ApiError::malformed("No user profile returned from server.").in_op("session.me")
        })
    }
}

impl SessionInner {
    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            f(&mut state);
            state.clone()
        };
        let watchers: Vec<Watcher> = self.watchers.borrow().clone();
        for watcher in watchers {
            watcher(&snapshot);
        }
    }

    fn on_auth_event(&self, event: &AuthEvent) {
        match event {
            AuthEvent::TokenRefreshed(token) => {
                let token = token.clone();
                self.update(|s| s.token = Some(token));
            }
            AuthEvent::SessionExpired => self.update(|s| {
                s.token = None;
                s.user = None;
                s.is_authenticated = false;
            }),
        }
    }
}
