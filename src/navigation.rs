//! 认证事件与导航抽象
//!
//! 客户端本身不做跳转，只发出 [`AuthEvent`]；
//! 组合根把 [`LoginRedirect`] 订阅到客户端上，由它通过 [`Navigator`] 完成跳转。

use std::rc::Rc;
use tracing::info;

/// 客户端发出的认证事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// 静默刷新成功，携带新 token
    TokenRefreshed(String),
    /// 会话不可恢复，本地认证信息已清除
    SessionExpired,
}

/// 导航能力（浏览器 History、测试记录器等）
pub trait Navigator {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// 会话失效时跳转到登录页（已在登录页则不动）
#[derive(Clone)]
pub struct LoginRedirect {
    navigator: Rc<dyn Navigator>,
    login_route: String,
}

impl LoginRedirect {
    pub fn new(navigator: Rc<dyn Navigator>, login_route: impl Into<String>) -> Self {
        Self {
            navigator,
            login_route: login_route.into(),
        }
    }

    pub fn handle(&self, event: &AuthEvent) {
        if *event != AuthEvent::SessionExpired {
            return;
        }
        if self.navigator.current_path() != self.login_route {
            info!(to = %self.login_route, "session expired, redirecting to login");
            self.navigator.navigate(&self.login_route);
        }
    }
}

#[cfg(test)]
pub use recording::RecordingNavigator;

#[cfg(test)]
mod recording {
    use super::Navigator;
    use std::cell::RefCell;

    /// 记录所有跳转的导航器
    pub struct RecordingNavigator {
        current: RefCell<String>,
        pub visits: RefCell<Vec<String>>,
    }

    impl RecordingNavigator {
        pub fn at(path: &str) -> Self {
            Self {
                current: RefCell::new(path.to_string()),
                visits: RefCell::new(Vec::new()),
            }
        }
    }

    impl Navigator for RecordingNavigator {
        fn current_path(&self) -> String {
            self.current.borrow().clone()
        }

        fn navigate(&self, path: &str) {
            *self.current.borrow_mut() = path.to_string();
            self.visits.borrow_mut().push(path.to_string());
        }
    }
}
