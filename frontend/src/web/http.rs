//! HTTP 传输层
//!
//! 使用 `gloo-net` 发送请求，实现核心 crate 的 [`HttpClient`] 特性。
//! 任何状态码都原样返回，只有拿不到响应时才报错。

use gloo_net::http::{Method, RequestBuilder};
use natakahii_admin::{ApiError, ApiResult, HttpClient, HttpRequest, HttpResponse};
use natakahii_admin_shared::HttpMethod;

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// 基于浏览器 fetch 的客户端
pub struct FetchHttpClient;

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = RequestBuilder::new(&req.url).method(method_of(req.method));
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::network(format!("请求构建失败: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(format!("网络错误: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::network(format!("响应读取失败: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
