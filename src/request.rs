use crate::error::{ApiError, ApiResult};
use natakahii_admin_shared::HttpMethod;
use serde::de::DeserializeOwned;

#[cfg(test)]
pub use mock::MockHttpClient;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_bearer(self, token: &str) -> Self {
        self.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token))
    }

    pub fn with_body(mut self, body: &serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// 请求携带的 bearer token
    pub fn bearer(&self) -> Option<&str> {
        self.header(HEADER_AUTHORIZATION)?.strip_prefix("Bearer ")
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 解析 JSON 响应体；空响应体（如 204）解析为 `null`
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let body = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(body).map_err(ApiError::from)
    }
}

/// HTTP 客户端特性 (Trait)
///
/// 浏览器环境下的 future 不是 `Send` 的，因此使用 `?Send`。
/// 只有在拿不到响应时才返回 `Err`，任何状态码都作为 `Ok` 返回。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::rc::Rc;

    pub const MOCK_BASE: &str = "http://api.test";

    type Handler = Rc<dyn Fn(&HttpRequest) -> ApiResult<HttpResponse>>;

    /// 按 (方法, 路径) 分发到处理函数的模拟客户端
    pub struct MockHttpClient {
        handlers: RefCell<HashMap<(&'static str, String), Handler>>,
        /// 记录所有发出的请求
        pub requests: RefCell<Vec<HttpRequest>>,
        /// 每次响应前让出一次执行权，用于模拟并发交错
        yield_before_reply: Cell<bool>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                handlers: RefCell::new(HashMap::new()),
                requests: RefCell::new(Vec::new()),
                yield_before_reply: Cell::new(false),
            }
        }

        pub fn with_latency(self) -> Self {
            self.yield_before_reply.set(true);
            self
        }

        pub fn on<F>(&self, method: HttpMethod, path: &str, handler: F)
        where
            F: Fn(&HttpRequest) -> ApiResult<HttpResponse> + 'static,
        {
            self.handlers
                .borrow_mut()
                .insert((method.as_str(), path.to_string()), Rc::new(handler));
        }

        /// 固定 JSON 响应
        pub fn reply(&self, method: HttpMethod, path: &str, status: u16, body: serde_json::Value) {
            self.on(method, path, move |_| Ok(json_response(status, &body)));
        }

        /// 统计某个路径被请求的次数
        pub fn count(&self, method: HttpMethod, path: &str) -> usize {
            self.requests
                .borrow()
                .iter()
                .filter(|r| r.method == method && path_of(&r.url) == path)
                .count()
        }

        pub fn requests_to(&self, path: &str) -> Vec<HttpRequest> {
            self.requests
                .borrow()
                .iter()
                .filter(|r| path_of(&r.url) == path)
                .cloned()
                .collect()
        }
    }

    pub fn json_response(status: u16, body: &serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    /// 去掉 base 与查询串后的路径
    pub fn path_of(url: &str) -> String {
        let without_base = url.strip_prefix(MOCK_BASE).unwrap_or(url);
        without_base
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
            self.requests.borrow_mut().push(req.clone());

            if self.yield_before_reply.get() {
                tokio::task::yield_now().await;
            }

            let handler = self
                .handlers
                .borrow()
                .get(&(req.method.as_str(), path_of(&req.url)))
                .cloned();

            match handler {
                Some(handler) => handler(&req),
                None => Ok(HttpResponse {
                    status: 404,
                    body: r#"{"message":"Not Found"}"#.to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
pub(crate) use mock::{MOCK_BASE, json_response};
