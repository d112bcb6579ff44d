use std::fmt;

use natakahii_admin_shared::backend_message;
use serde::{Deserialize, Serialize};

use crate::request::HttpResponse;

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    /// 请求未得到响应（断网、CORS、DNS 等）
    Network,
    /// 非 2xx 且非 401 的响应
    Http,
    /// 401: 无法通过刷新恢复的鉴权失败
    Unauthorized,
    /// 登录/刷新响应缺少 token，或资料响应无法解析
    MalformedAuth,
    /// JSON 解析或序列化错误
    Serialization,
    /// 请求发出前的本地校验失败（缺少行 id、数字格式错误等）
    InvalidInput,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Http => "HTTP_ERROR",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::MalformedAuth => "MALFORMED_AUTH_RESPONSE",
            ApiErrorKind::Serialization => "JSON_PARSE_ERROR",
            ApiErrorKind::InvalidInput => "INVALID_INPUT",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "session.login", "client.refresh"
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 客户端错误
///
/// 实现了 `Clone`：一次 token 刷新的结果需要广播给所有等待中的请求。
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// 响应状态码（无响应时为 None）
    pub status: Option<u16>,
    pub message: String,
    /// 后端返回的可读消息
    backend_message: Option<String>,
    spans: Vec<ErrorSpan>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            backend_message: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::MalformedAuth, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Serialization, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidInput, message)
    }

    /// 由失败响应构造，优先提取后端消息
    pub fn from_response(response: &HttpResponse) -> Self {
        let kind = if response.status == 401 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::Http
        };
        let backend = serde_json::from_str(&response.body)
            .ok()
            .and_then(|body| backend_message(&body));

        Self {
            kind,
            status: Some(response.status),
            message: format!("Request failed with status {}", response.status),
            backend_message: backend,
            spans: Vec::new(),
        }
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn backend_message(&self) -> Option<&str> {
        self.backend_message.as_deref()
    }

    /// 面向界面的错误文本：后端消息优先，其次内部消息
    pub fn display_message(&self) -> &str {
        self.backend_message().unwrap_or(&self.message)
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.display_message())?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::serialization(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
