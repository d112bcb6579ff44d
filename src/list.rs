//! 列表资源加载
//!
//! 每个列表页持有一个 [`ListLoader`]。每次加载都会领取一个递增序号，
//! 响应返回时若序号已被后续加载取代，则丢弃该响应，
//! 避免快速切换筛选条件时旧结果覆盖新结果。

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::query::QueryParams;
use natakahii_admin_shared::unwrap_list;
use serde_json::Value;
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data.";

/// 列表状态
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Vec<Value>,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            loading: true,
            error: None,
            data: Vec::new(),
        }
    }
}

impl ListState {
    /// 由请求结果得到最终状态
    pub fn settle(result: ApiResult<Value>) -> Self {
        match result {
            Ok(body) => Self {
                loading: false,
                error: None,
                data: unwrap_list(body),
            },
            Err(e) => {
                let message = e
                    .backend_message()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(LOAD_FAILED_MESSAGE);
                Self {
                    loading: false,
                    error: Some(message.to_string()),
                    data: Vec::new(),
                }
            }
        }
    }

    /// 开始新的加载：保留已有数据，清除错误
    pub fn begin(&self) -> Self {
        Self {
            loading: true,
            error: None,
            data: self.data.clone(),
        }
    }
}

/// 列表请求（资源地址 + 查询参数）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub url: String,
    pub params: QueryParams,
}

impl ListQuery {
    pub fn new(url: impl Into<String>, params: QueryParams) -> Self {
        Self {
            url: url.into(),
            params,
        }
    }

    /// 缓存键：地址 + 序列化后的参数，参数内容相同则键相同
    pub fn key(&self) -> String {
        self.params.apply_to(&self.url)
    }
}

/// 列表加载器
#[derive(Clone)]
pub struct ListLoader {
    client: ApiClient,
    seq: Rc<Cell<u64>>,
}

impl ListLoader {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            seq: Rc::new(Cell::new(0)),
        }
    }

    /// 领取新的序号，之前领取的序号全部失效
    pub fn begin(&self) -> u64 {
        let next = self.seq.get() + 1;
        self.seq.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.seq.get() == ticket
    }

    /// 加载列表；若返回时已被新的加载取代，返回 `None`
    pub async fn load(&self, query: &ListQuery) -> Option<ListState> {
        let ticket = self.begin();
        let result = self.client.get(&query.url, &query.params).await;

        if !self.is_current(ticket) {
            debug!(key = %query.key(), ticket, "dropping stale list response");
            return None;
        }
        Some(ListState::settle(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::error::ApiError;
    use crate::request::{MOCK_BASE, MockHttpClient, json_response};
    use crate::storage::{AuthStorage, MemoryStore};
    use natakahii_admin_shared::{HttpMethod, paths};
    use serde_json::json;

    fn loader(http: Rc<MockHttpClient>) -> ListLoader {
        let config = ClientConfig {
            api_base_url: MOCK_BASE.to_string(),
            ..ClientConfig::default()
        };
        let storage = AuthStorage::new(Rc::new(MemoryStore::new()), &config);
        ListLoader::new(ApiClient::new(config, http, storage))
    }

    #[test]
    fn test_settle_unwraps_shapes() {
        let cases = [
            (json!([1, 2]), vec![json!(1), json!(2)]),
            (json!({ "data": [1] }), vec![json!(1)]),
            (json!({ "data": { "data": [3], "total": 1 } }), vec![json!(3)]),
            (json!({}), vec![]),
            (json!({ "data": "nope" }), vec![]),
        ];
        for (body, expected) in cases {
            let state = ListState::settle(Ok(body.clone()));
            assert_eq!(state.data, expected, "{body}");
            assert_eq!(state.error, None);
            assert!(!state.loading);
        }
    }

    #[test]
    fn test_settle_error_message() {
        let backend = ApiError::from_response(&json_response(422, &json!({ "message": "Bad filter" })));
        assert_eq!(
            ListState::settle(Err(backend)).error.as_deref(),
            Some("Bad filter")
        );

        let state = ListState::settle(Err(ApiError::network("offline")));
        assert_eq!(state.error.as_deref(), Some(LOAD_FAILED_MESSAGE));
        assert!(state.data.is_empty());
    }

    #[test]
    fn test_query_key_follows_serialized_params() {
        let a = ListQuery::new(paths::ADMIN_USERS, QueryParams::new().with("status", "active"));
        let b = ListQuery::new(
            paths::ADMIN_USERS,
            QueryParams::new().with("search", "").with("status", "active"),
        );
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key(), "/api/v1/admin/users?status=active");
    }

    #[tokio::test]
    async fn test_load_sends_params() {
        let http = Rc::new(MockHttpClient::new());
        http.reply(HttpMethod::Get, paths::ADMIN_ORDERS, 200, json!({ "data": [{ "id": 9 }] }));
        let loader = loader(http.clone());

        let state = loader
            .load(&ListQuery::new(
                paths::ADMIN_ORDERS,
                QueryParams::new().with("status", "paid"),
            ))
            .await
            .unwrap();

        assert_eq!(state.data, vec![json!({ "id": 9 })]);
        assert!(http.requests_to(paths::ADMIN_ORDERS)[0].url.ends_with("?status=paid"));
    }

    #[tokio::test]
    async fn test_superseded_response_is_dropped() {
        let http = Rc::new(MockHttpClient::new().with_latency());
        http.on(HttpMethod::Get, paths::ADMIN_USERS, |req| {
            let body = if req.url.contains("status=blocked") {
                json!([{ "id": "blocked" }])
            } else {
                json!([{ "id": "all" }])
            };
            Ok(json_response(200, &body))
        });
        let loader = loader(http);

        let first = ListQuery::new(paths::ADMIN_USERS, QueryParams::new());
        let second = ListQuery::new(paths::ADMIN_USERS, QueryParams::new().with("status", "blocked"));
        let (stale, fresh) = tokio::join!(loader.load(&first), loader.load(&second));

        assert_eq!(stale, None);
        assert_eq!(fresh.unwrap().data, vec![json!({ "id": "blocked" })]);
    }

    #[test]
    fn test_begin_keeps_data() {
        let state = ListState::settle(Ok(json!([1])));
        let reloading = state.begin();
        assert!(reloading.loading);
        assert_eq!(reloading.data, vec![json!(1)]);
    }
}
