//! 表格单元格的展示格式
//!
//! 后端字段类型不稳定（数字可能是字符串，时间可能带或不带时区），
//! 这里统一把 `serde_json::Value` 转成展示文本。

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

pub const EMPTY_CELL: &str = "-";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 空值（null、空字符串）显示为 `-`
pub fn safe_text(value: &Value) -> String {
    match value {
        Value::Null => EMPTY_CELL.to_string(),
        Value::String(s) if s.trim().is_empty() => EMPTY_CELL.to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 金额格式化为 `12,500 TZS`（不保留小数）
pub fn format_tzs(value: &Value) -> String {
    let amount = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    format!("{} TZS", group_thousands(amount.round() as i64))
}

/// 时间格式化为 `YYYY-MM-DD HH:MM`
///
/// 支持 RFC 3339 和 `YYYY-MM-DD HH:MM:SS`；无法解析时原样返回，空值返回 `-`。
pub fn format_date_time(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() {
        return EMPTY_CELL.to_string();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(v) {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S") {
        return dt.format(DISPLAY_FORMAT).to_string();
    }
    v.to_string()
}

/// 名称转为 URL slug：小写字母数字，其余字符折叠为单个 `-`
pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_text() {
        assert_eq!(safe_text(&Value::Null), "-");
        assert_eq!(safe_text(&json!("")), "-");
        assert_eq!(safe_text(&json!("active")), "active");
        assert_eq!(safe_text(&json!(42)), "42");
        assert_eq!(safe_text(&json!(true)), "true");
    }

    #[test]
    fn test_format_tzs() {
        assert_eq!(format_tzs(&json!(12500)), "12,500 TZS");
        assert_eq!(format_tzs(&json!("1234567.6")), "1,234,568 TZS");
        assert_eq!(format_tzs(&json!(999)), "999 TZS");
        assert_eq!(format_tzs(&json!(-4500)), "-4,500 TZS");
        assert_eq!(format_tzs(&Value::Null), "0 TZS");
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time("2025-03-01T09:30:00+03:00"), "2025-03-01 09:30");
        assert_eq!(format_date_time("2025-03-01T09:30:00.000000Z"), "2025-03-01 09:30");
        assert_eq!(format_date_time("2025-03-01 18:05:59"), "2025-03-01 18:05");
        assert_eq!(format_date_time("yesterday"), "yesterday");
        assert_eq!(format_date_time(""), "-");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("  Home & Kitchen "), "home-kitchen");
        assert_eq!(slugify("--Phones--"), "phones");
        assert_eq!(slugify("Vitenge 2026"), "vitenge-2026");
        assert_eq!(slugify("!!!"), "");
    }
}
