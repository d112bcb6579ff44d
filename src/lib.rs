//! NatakaHii 管理后台核心
//!
//! 与浏览器无关的会话层：token 存储、带刷新协议的 API 客户端、
//! 会话控制器、路由守卫和列表加载。前端只需要提供 HTTP 传输、
//! 键值存储和导航三个实现，再通过 [`AdminServices::connect`] 组装。

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod list;
pub mod navigation;
pub mod query;
pub mod request;
pub mod session;
pub mod storage;

pub use api::AdminApi;
pub use client::{ApiCall, ApiClient};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use guard::{AuthGuard, GuardDecision, RoleGuard};
pub use list::{LOAD_FAILED_MESSAGE, ListLoader, ListQuery, ListState};
pub use navigation::{AuthEvent, LoginRedirect, Navigator};
pub use query::QueryParams;
pub use request::{HttpClient, HttpRequest, HttpResponse};
pub use session::{Credentials, Session, SessionState};
pub use storage::{AuthStorage, KeyValueStore, MemoryStore, StorageError};

use natakahii_admin_shared::Role;
use std::rc::Rc;

// =========================================================
// 组合根 (Composition Root)
// =========================================================

/// 组装好的服务集合，整个应用只创建一份
#[derive(Clone)]
pub struct AdminServices {
    pub client: ApiClient,
    pub session: Session,
    pub api: AdminApi,
}

impl AdminServices {
    /// 连接传输层、存储和导航
    ///
    /// 会话失效时由 [`LoginRedirect`] 负责跳转到登录页。
    pub fn connect(
        config: ClientConfig,
        transport: Rc<dyn HttpClient>,
        kv: Rc<dyn KeyValueStore>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let storage = AuthStorage::new(kv, &config);
        let redirect = LoginRedirect::new(navigator, config.login_route.clone());
        let client = ApiClient::new(config, transport, storage);
        client.subscribe(move |event| redirect.handle(event));

        Self {
            session: Session::new(client.clone()),
            api: AdminApi::new(client.clone()),
            client,
        }
    }

    pub fn auth_guard(&self) -> AuthGuard {
        AuthGuard::from_config(self.client.config())
    }

    pub fn role_guard(&self, allow: impl IntoIterator<Item = Role>) -> RoleGuard {
        RoleGuard::from_config(self.client.config(), allow)
    }

    pub fn list_loader(&self) -> ListLoader {
        ListLoader::new(self.client.clone())
    }
}

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================
