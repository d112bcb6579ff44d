//! 后端响应体的容错解析
//!
//! 后端不同接口的包装层级不一致，这里集中处理：
//! token 字段名、列表的 `data` 嵌套、错误消息字段。

use serde_json::Value;

/// 从登录/刷新响应中提取 token（`token` 优先，其次 `access_token`）
///
/// 空字符串视为缺失。
pub fn extract_token(body: &Value) -> Option<String> {
    ["token", "access_token"]
        .iter()
        .filter_map(|key| body.get(*key))
        .filter_map(Value::as_str)
        .find(|t| !t.trim().is_empty())
        .map(str::to_string)
}

/// 展开列表响应
///
/// 依次接受：裸数组、`{data: [...]}`、`{data: {data: [...]}}`（分页包装）。
/// 都不匹配时返回空列表。
pub fn unwrap_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("data") {
            Some(Value::Array(items)) => items,
            Some(Value::Object(mut inner)) => match inner.remove("data") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// 后端提供的可读错误消息（`message`，其次 `error`）
pub fn backend_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key))
        .filter_map(Value::as_str)
        .find(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_token_prefers_token() {
        assert_eq!(
            extract_token(&json!({ "token": "a", "access_token": "b" })),
            Some("a".to_string())
        );
        assert_eq!(
            extract_token(&json!({ "access_token": "b" })),
            Some("b".to_string())
        );
        assert_eq!(
            extract_token(&json!({ "token": "", "access_token": "b" })),
            Some("b".to_string())
        );
    }

    #[test]
    fn test_extract_token_missing() {
        assert_eq!(extract_token(&json!({})), None);
        assert_eq!(extract_token(&json!({ "token": null })), None);
        assert_eq!(extract_token(&json!({ "user": { "token": "nested" } })), None);
    }

    #[test]
    fn test_unwrap_list_shapes() {
        assert_eq!(unwrap_list(json!([1, 2])), vec![json!(1), json!(2)]);
        assert_eq!(unwrap_list(json!({ "data": [1, 2] })), vec![json!(1), json!(2)]);
        assert_eq!(
            unwrap_list(json!({ "data": { "data": [1, 2], "current_page": 1 } })),
            vec![json!(1), json!(2)]
        );
    }

    #[test]
    fn test_unwrap_list_falls_back_to_empty() {
        assert!(unwrap_list(json!({})).is_empty());
        assert!(unwrap_list(json!({ "data": "oops" })).is_empty());
        assert!(unwrap_list(json!({ "data": { "items": [1] } })).is_empty());
        assert!(unwrap_list(Value::Null).is_empty());
    }

    #[test]
    fn test_backend_message() {
        assert_eq!(
            backend_message(&json!({ "message": "Invalid credentials." })),
            Some("Invalid credentials.".to_string())
        );
        assert_eq!(
            backend_message(&json!({ "error": "Forbidden" })),
            Some("Forbidden".to_string())
        );
        assert_eq!(backend_message(&json!({ "message": "  " })), None);
    }
}
