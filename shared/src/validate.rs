//! 登录表单校验
//!
//! 与后端校验规则保持一致：标识可以是邮箱、E.164 手机号，
//! 或坦桑尼亚本地手机号（06/07 开头共 10 位）。

use regex::Regex;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LEN: usize = 6;
/// 重置密码时新密码的最小长度
pub const MIN_RESET_PASSWORD_LEN: usize = 8;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+\d{10,15}$").expect("valid e164 regex"));
static LOCAL_TZ_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[67]\d{8}$").expect("valid local phone regex"));

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

pub fn is_email_or_phone(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && (is_email(v) || E164_RE.is_match(v) || LOCAL_TZ_RE.is_match(v))
}

/// 本地号码 `07xxxxxxxx` 转为 `+2557xxxxxxx`，其余原样返回（去空白）
pub fn normalize_email_or_phone(value: &str) -> String {
    let v = value.trim();
    if LOCAL_TZ_RE.is_match(v) {
        format!("+255{}", &v[1..])
    } else {
        v.to_string()
    }
}

/// 登录表单的字段错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub identifier: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    pub fn is_valid(&self) -> bool {
        self.identifier.is_none() && self.password.is_none()
    }

    /// 第一条错误，用于单行提示
    pub fn first(&self) -> Option<&'static str> {
        self.identifier.or(self.password)
    }
}

pub fn validate_login(identifier: &str, password: &str) -> LoginErrors {
    let identifier = if identifier.trim().is_empty() {
        Some("Email or phone is required.")
    } else if !is_email_or_phone(identifier) {
        Some("Enter a valid email or phone number.")
    } else {
        None
    };

    let password = if password.trim().is_empty() {
        Some("Password is required.")
    } else if password.trim().chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters.")
    } else {
        None
    };

    LoginErrors { identifier, password }
}

// =========================================================
// 找回密码
// =========================================================

/// 发送 / 重发验证码前只要求邮箱非空
pub fn validate_reset_email(email: &str) -> Option<&'static str> {
    email.trim().is_empty().then_some("Email is required.")
}

/// 重置密码表单的字段错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetErrors {
    pub email: Option<&'static str>,
    pub otp: Option<&'static str>,
    pub password: Option<&'static str>,
    pub confirmation: Option<&'static str>,
}

impl ResetErrors {
    pub fn is_valid(&self) -> bool {
        self.first().is_none()
    }

    pub fn first(&self) -> Option<&'static str> {
        self.email
            .or(self.otp)
            .or(self.password)
            .or(self.confirmation)
    }
}

/// 新密码不去空白，按原样比较
pub fn validate_password_reset(email: &str, otp: &str, password: &str, confirmation: &str) -> ResetErrors {
    let password_error = if password.is_empty() {
        Some("New password is required.")
    } else if password.chars().count() < MIN_RESET_PASSWORD_LEN {
        Some("Password must be at least 8 characters.")
    } else {
        None
    };

    let confirmation_error = if confirmation.is_empty() {
        Some("Confirm your new password.")
    } else if confirmation != password {
        Some("Passwords do not match.")
    } else {
        None
    };

    ResetErrors {
        email: validate_reset_email(email),
        otp: otp.trim().is_empty().then_some("OTP is required."),
        password: password_error,
        confirmation: confirmation_error,
    }
}
