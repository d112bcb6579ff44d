//! NatakaHii 管理后台共享领域模型
//!
//! 不依赖浏览器或网络，前端和核心客户端共用：
//! - `role` / `profile`: 身份模型与容错解析
//! - `protocol` / `payload`: 接口定义与响应体解析
//! - `nav` / `validate` / `format`: 界面层使用的纯函数

pub mod format;
pub mod nav;
pub mod payload;
pub mod profile;
pub mod protocol;
pub mod role;
pub mod validate;

pub use payload::{backend_message, extract_token, unwrap_list};
pub use profile::UserProfile;
pub use protocol::{ApiRequest, HttpMethod, paths};
pub use role::Role;
