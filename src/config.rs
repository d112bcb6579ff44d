//! 客户端运行时配置
//!
//! 通过一个键查找函数读取配置，前端传入编译期的 `option_env!` 值，
//! 测试传入内存表。缺失的键使用默认值。

use thiserror::Error;

pub const DEFAULT_DEVICE_NAME: &str = "natakahii-admin-web";
pub const DEFAULT_LOGIN_ROUTE: &str = "/";
pub const DEFAULT_FORBIDDEN_ROUTE: &str = "/forbidden";
pub const DEFAULT_TOKEN_KEY: &str = "natakahii_admin_token";
pub const DEFAULT_USER_KEY: &str = "natakahii_admin_user";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API_BASE_URL must be an http(s) URL or empty, got `{0}`")]
    InvalidBaseUrl(String),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{key} must be an absolute route starting with `/`, got `{value}`")]
    InvalidRoute { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 后端根地址（不含结尾 `/`）；为空时请求同源相对路径
    pub api_base_url: String,
    /// 登录时上报的设备名
    pub device_name: String,
    /// 会话失效时跳转的路由
    pub login_route: String,
    /// 角色不符时跳转的路由
    pub forbidden_route: String,
    pub token_key: String,
    pub user_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            forbidden_route: DEFAULT_FORBIDDEN_ROUTE.to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
        }
    }
}

impl ClientConfig {
    /// 从键值查找函数构建配置
    ///
    /// 支持的键：`API_BASE_URL`、`DEVICE_NAME`、`LOGIN_ROUTE`、`FORBIDDEN_ROUTE`、
    /// `TOKEN_STORAGE_KEY`、`USER_STORAGE_KEY`。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str, default: String| lookup(key).unwrap_or(default);

        let api_base_url = read("API_BASE_URL", defaults.api_base_url)
            .trim()
            .trim_end_matches('/')
            .to_string();
        if !api_base_url.is_empty()
            && !api_base_url.starts_with("http://")
            && !api_base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidBaseUrl(api_base_url));
        }

        let config = Self {
            api_base_url,
            device_name: read("DEVICE_NAME", defaults.device_name),
            login_route: read("LOGIN_ROUTE", defaults.login_route),
            forbidden_route: read("FORBIDDEN_ROUTE", defaults.forbidden_route),
            token_key: read("TOKEN_STORAGE_KEY", defaults.token_key),
            user_key: read("USER_STORAGE_KEY", defaults.user_key),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("DEVICE_NAME", &self.device_name),
            ("TOKEN_STORAGE_KEY", &self.token_key),
            ("USER_STORAGE_KEY", &self.user_key),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(key));
            }
        }
        for (key, value) in [
            ("LOGIN_ROUTE", &self.login_route),
            ("FORBIDDEN_ROUTE", &self.forbidden_route),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::InvalidRoute {
                    key,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }

    /// 拼接完整请求地址
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.api_base_url, path)
        } else {
            format!("{}/{}", self.api_base_url, path)
        }
    }
}
