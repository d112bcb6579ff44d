//! 查询参数
//!
//! 键有序存储，序列化结果稳定，可直接作为列表请求的缓存键。
//! 空值不会进入查询串。

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct QueryParams(BTreeMap<String, Vec<String>>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置单值参数；值为空白时移除该键
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if value.trim().is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), vec![value]);
        }
        self
    }

    /// 链式版本的 [`set`](Self::set)
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// 追加数组参数（重复键）
    pub fn append(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.0.entry(key.to_string()).or_default().push(value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `a=1&b=x%20y`，不含前导 `?`
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |v| (key, v)))
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// 在路径后附加查询串
    pub fn apply_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.to_query_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_skipped() {
        let mut params = QueryParams::new();
        params.set("search", "").set("status", "active");
        assert_eq!(params.to_query_string(), "status=active");

        params.set("status", "  ");
        assert!(params.is_empty());
        assert_eq!(params.apply_to("/api/v1/admin/users"), "/api/v1/admin/users");
    }

    #[test]
    fn test_sorted_and_encoded() {
        let params = QueryParams::new()
            .with("search", "john doe")
            .with("page", "2");
        assert_eq!(params.to_query_string(), "page=2&search=john%20doe");
    }

    #[test]
    fn test_array_values_repeat_key() {
        let mut params = QueryParams::new();
        params.append("status[]", "open").append("status[]", "escalated");
        assert_eq!(
            params.to_query_string(),
            "status%5B%5D=open&status%5B%5D=escalated"
        );
        assert_eq!(params.get("status[]"), Some("open"));
    }
}
