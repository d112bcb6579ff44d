//! 带认证的 API 客户端
//!
//! 负责三件事：
//! 1. 发送时从存储读取当前 token 并附加 `Authorization: Bearer`；
//! 2. 收到 401 时执行一次静默刷新，成功后用新 token 重发原请求；
//! 3. 会话不可恢复时清空存储并发出 [`AuthEvent::SessionExpired`]。
//!
//! 并发的 401 共享同一个刷新 future（single-flight），
//! 刷新结束（无论成败）后槽位清空，下一次 401 才会发起新的刷新。

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::navigation::AuthEvent;
use crate::query::QueryParams;
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::storage::AuthStorage;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use natakahii_admin_shared::protocol::RefreshRequest;
use natakahii_admin_shared::{ApiRequest, HttpMethod, extract_token, paths};
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

type RefreshFuture = Shared<LocalBoxFuture<'static, ApiResult<String>>>;
type Listener = Rc<dyn Fn(&AuthEvent)>;

const PRE_LOGIN_PATHS: &[&str] = &[
    paths::LOGIN,
    paths::FORGOT_PASSWORD,
    paths::RESEND_OTP,
    paths::RESET_PASSWORD,
];

// =========================================================
// 出站请求描述
// =========================================================

/// 一次 API 调用（相对路径 + 方法 + 参数）
///
/// 不包含 token：token 在真正发送时才从存储中读取。
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub method: HttpMethod,
    pub path: String,
    pub query: QueryParams,
    pub body: Option<Value>,
}

impl ApiCall {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<T: Serialize>(mut self, body: &T) -> ApiResult<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// 登录前可用的接口：401 是业务失败，不触发刷新
    fn is_pre_login(&self) -> bool {
        PRE_LOGIN_PATHS.contains(&self.path.as_str())
    }
}

// =========================================================
// 客户端
// =========================================================

struct ClientInner {
    config: ClientConfig,
    transport: Rc<dyn HttpClient>,
    storage: AuthStorage,
    /// 进行中的刷新；None 表示当前没有刷新
    refresh_slot: RefCell<Option<RefreshFuture>>,
    listeners: RefCell<Vec<Listener>>,
}

/// 认证 API 客户端，克隆开销很小（共享内部状态）
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ClientInner>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, transport: Rc<dyn HttpClient>, storage: AuthStorage) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                config,
                transport,
                storage,
                refresh_slot: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn storage(&self) -> &AuthStorage {
        &self.inner.storage
    }

    /// 订阅认证事件
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&AuthEvent) + 'static,
    {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// 调用预定义接口
    pub async fn request<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let mut call = ApiCall::new(R::METHOD, R::PATH);
        if R::HAS_BODY {
            call = call.with_json(req)?;
        }
        let response = self.send(&call).await?;
        response.json::<R::Response>()
    }

    /// 发送调用并把响应体解析为 JSON
    pub async fn execute(&self, call: &ApiCall) -> ApiResult<Value> {
        self.send(call).await?.json()
    }

    /// `GET path?query`
    pub async fn get(&self, path: &str, query: &QueryParams) -> ApiResult<Value> {
        self.execute(&ApiCall::get(path).with_query(query.clone()))
            .await
    }

    /// 发送调用，必要时执行刷新协议
    ///
    /// 成功（2xx）返回响应；其他状态码转换为 [`ApiError`]。
    pub async fn send(&self, call: &ApiCall) -> ApiResult<HttpResponse> {
        let token = self.inner.storage.token();
        let response = self.inner.dispatch(call, token.as_deref()).await?;

        if response.status != 401 {
            return ensure_success(call, response);
        }
        self.recover_unauthorized(call, token, response).await
    }

    async fn recover_unauthorized(
        &self,
        call: &ApiCall,
        sent_with: Option<String>,
        response: HttpResponse,
    ) -> ApiResult<HttpResponse> {
        let error = ApiError::from_response(&response).in_op_with("client.send", &call.path);

        // 登录 / 找回密码失败直接返回，绝不刷新
        if call.is_pre_login() {
            return Err(error);
        }

        let Some(current) = self.inner.storage.token() else {
            self.inner.expire_session();
            return Err(error);
        };

        // 发送期间已有别的请求完成了刷新，直接用新 token 重发
        let new_token = if sent_with.as_deref() != Some(current.as_str()) {
            current
        } else {
            self.refresh_token(current).await?
        };

        // 原请求只重发一次；再次 401 视为不可恢复
        let retried = self.inner.dispatch(call, Some(&new_token)).await?;
        if retried.status == 401 {
            self.inner.expire_session();
            return Err(ApiError::from_response(&retried).in_op_with("client.retry", &call.path));
        }
        ensure_success(call, retried)
    }

    /// 加入或发起唯一的刷新
    async fn refresh_token(&self, current: String) -> ApiResult<String> {
        let pending = {
            let mut slot = self.inner.refresh_slot.borrow_mut();
            match slot.as_ref() {
                Some(pending) => {
                    debug!("joining in-flight token refresh");
                    pending.clone()
                }
                None => {
                    debug!("starting token refresh");
                    let fut = run_refresh(Rc::downgrade(&self.inner), current)
                        .boxed_local()
                        .shared();
                    *slot = Some(fut.clone());
                    fut
                }
            }
        };
        pending.await
    }
}

async fn run_refresh(inner: Weak<ClientInner>, current: String) -> ApiResult<String> {
    let Some(inner) = inner.upgrade() else {
        return Err(ApiError::network("client dropped during token refresh"));
    };

    let result = inner.perform_refresh(&current).await;
    inner.refresh_slot.borrow_mut().take();

    match &result {
        Ok(token) => {
            inner.storage.set_token(token);
            info!("token refreshed");
            inner.emit(&AuthEvent::TokenRefreshed(token.clone()));
        }
        Err(e) => {
            warn!(error = %e, "token refresh failed");
            inner.expire_session();
        }
    }
    result
}

impl ClientInner {
    async fn dispatch(&self, call: &ApiCall, token: Option<&str>) -> ApiResult<HttpResponse> {
        let url = call.query.apply_to(&self.config.url(&call.path));
        let mut req = HttpRequest::new(&url, call.method)
            .with_header("Accept", "application/json")
            .with_header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.with_bearer(token);
        }
        if let Some(body) = &call.body {
            req = req.with_body(body);
        }

        self.transport
            .send(req)
            .await
            .map_err(|e| e.in_op_with("client.dispatch", &call.path))
    }

    /// 用当前 token 换取新 token
    ///
    /// 直接走传输层，不经过刷新协议；刷新本身的 401 由调用方走失效流程。
    async fn perform_refresh(&self, current: &str) -> ApiResult<String> {
        let call = ApiCall::new(RefreshRequest::METHOD, RefreshRequest::PATH);
        let response = self.dispatch(&call, Some(current)).await?;
        if !response.is_success() {
            return Err(ApiError::from_response(&response).in_op("client.refresh"));
        }

        let body: Value = response.json()?;
        extract_token(&body).ok_or_else(|| {
            ApiError::malformed("No token returned from refresh.").in_op("client.refresh")
        })
    }

    fn expire_session(&self) {
        info!("session expired, clearing auth storage");
        self.storage.clear_auth();
        self.emit(&AuthEvent::SessionExpired);
    }

    fn emit(&self, event: &AuthEvent) {
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(event);
        }
    }
}

fn ensure_success(call: &ApiCall, response: HttpResponse) -> ApiResult<HttpResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_response(&response).in_op_with("client.send", &call.path))
    }
}
