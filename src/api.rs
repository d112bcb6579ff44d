use crate::client::{ApiCall, ApiClient};
use crate::error::ApiResult;
use crate::query::QueryParams;
use natakahii_admin_shared::{HttpMethod, paths};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

// =========================================================
// 请求体定义
// =========================================================

/// 用户状态变更（active / suspended / blocked）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// 商家审核
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewVendor {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_notes: Option<String>,
}

/// 入驻申请审核
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewApplication {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

/// 商品审核
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerateProduct {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRefund {
    pub order_id: Value,
    pub amount: f64,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// 纠纷裁决（refund_buyer / release_vendor / partial_refund ...）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveDispute {
    pub resolution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// 举报处理
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionReport {
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// 分类新建 / 编辑；`visibility` 为 public / hidden / draft
///
/// `parent_id` 与 `icon` 总会发送，`null` 表示清空。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub visibility: String,
    #[serde(default)]
    pub parent_id: Option<Value>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// 授予管理员
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantAdmin {
    pub user_id: Value,
    pub admin_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAdminRole {
    pub admin_role: String,
}

/// 平台设置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escrow_days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<bool>,
}

/// 平台费率；`fee_type` 为 percentage 或 fixed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformFee {
    pub name: String,
    #[serde(rename = "type")]
    pub fee_type: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub name: String,
    pub price: f64,
    pub duration_days: u32,
    #[serde(default)]
    pub features: Vec<String>,
    pub is_active: bool,
}

// =========================================================
// 业务接口: AdminApi
// =========================================================

/// 管理后台业务接口
///
/// 所有请求都经过 [`ApiClient`]，因此自动携带 token 并享受 401 刷新。
#[derive(Clone)]
pub struct AdminApi {
    client: ApiClient,
}

impl AdminApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    async fn call(&self, method: HttpMethod, path: String) -> ApiResult<Value> {
        self.client.execute(&ApiCall::new(method, path)).await
    }

    async fn call_with<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        body: &T,
    ) -> ApiResult<Value> {
        let call = ApiCall::new(method, path).with_json(body)?;
        self.client.execute(&call).await
    }

    // --- 概览 ---

    pub async fn dashboard(&self) -> ApiResult<Value> {
        self.client
            .get(paths::ADMIN_DASHBOARD, &QueryParams::new())
            .await
    }

    pub async fn analytics_overview(&self, query: &QueryParams) -> ApiResult<Value> {
        self.client.get(paths::ADMIN_ANALYTICS_OVERVIEW, query).await
    }

    // --- 用户 ---

    pub async fn update_user_status(&self, id: impl Display, body: &UpdateUserStatus) -> ApiResult<Value> {
        let path = format!("{}/{}/status", paths::ADMIN_USERS, id);
        self.call_with(HttpMethod::Patch, path, body).await
    }

    pub async fn verify_user(&self, id: impl Display) -> ApiResult<Value> {
        let path = format!("{}/{}/verify", paths::ADMIN_USERS, id);
        self.call(HttpMethod::Post, path).await
    }

    // --- 商家 ---

    pub async fn review_vendor(&self, id: impl Display, body: &ReviewVendor) -> ApiResult<Value> {
        let path = format!("{}/{}/verification/review", paths::ADMIN_VENDORS, id);
        self.call_with(HttpMethod::Post, path, body).await
    }

    pub async fn review_application(
        &self,
        id: impl Display,
        body: &ReviewApplication,
    ) -> ApiResult<Value> {
        let path = format!("{}/{}/review", paths::ADMIN_VENDOR_APPLICATIONS, id);
        self.call_with(HttpMethod::Post, path, body).await
    }

    // --- 商品与分类 ---

    pub async fn moderate_product(&self, id: impl Display, body: &ModerateProduct) -> ApiResult<Value> {
        let path = format!("{}/{}/moderation", paths::ADMIN_PRODUCTS, id);
        self.call_with(HttpMethod::Patch, path, body).await
    }

    pub async fn create_category(&self, body: &CategoryInput) -> ApiResult<Value> {
        self.call_with(HttpMethod::Post, paths::ADMIN_CATEGORIES.to_string(), body)
            .await
    }

    pub async fn update_category(&self, id: impl Display, body: &CategoryInput) -> ApiResult<Value> {
        let path = format!("{}/{}", paths::ADMIN_CATEGORIES, id);
        self.call_with(HttpMethod::Patch, path, body).await
    }

    pub async fn delete_category(&self, id: impl Display) -> ApiResult<Value> {
        let path = format!("{}/{}", paths::ADMIN_CATEGORIES, id);
        self.call(HttpMethod::Delete, path).await
    }

    // --- 订单、托管与退款 ---

    pub async fn escrow_for_order(&self, order_id: impl Display) -> ApiResult<Value> {
        let path = format!("{}/{}", paths::ADMIN_ESCROW_ORDERS, order_id);
        self.call(HttpMethod::Get, path).await
    }

    pub async fn create_refund(&self, body: &CreateRefund) -> ApiResult<Value> {
        self.call_with(HttpMethod::Post, paths::ADMIN_REFUNDS.to_string(), body)
            .await
    }

    pub async fn shipment_inspections(&self, shipment_id: impl Display) -> ApiResult<Value> {
        let path = format!("{}/{}/inspections", paths::ADMIN_CARGO_SHIPMENTS, shipment_id);
        self.call(HttpMethod::Get, path).await
    }

    // --- 纠纷与举报 ---

    pub async fn resolve_dispute(&self, id: impl Display, body: &ResolveDispute) -> ApiResult<Value> {
        let path = format!("{}/{}/resolve", paths::ADMIN_DISPUTES, id);
        self.call_with(HttpMethod::Post, path, body).await
    }

    pub async fn action_report(&self, id: impl Display, body: &ActionReport) -> ApiResult<Value> {
        let path = format!("{}/{}/action", paths::ADMIN_REPORTS, id);
        self.call_with(HttpMethod::Post, path, body).await
    }

    // --- 超级管理员 ---

    pub async fn grant_admin(&self, body: &GrantAdmin) -> ApiResult<Value> {
        self.call_with(HttpMethod::Post, paths::SUPER_ADMINS.to_string(), body)
            .await
    }

    pub async fn update_admin_role(&self, user_id: impl Display, body: &UpdateAdminRole) -> ApiResult<Value> {
        let path = format!("{}/{}", paths::SUPER_ADMINS, user_id);
        self.call_with(HttpMethod::Patch, path, body).await
    }

    pub async fn revoke_admin(&self, user_id: impl Display) -> ApiResult<Value> {
        let path = format!("{}/{}", paths::SUPER_ADMINS, user_id);
        self.call(HttpMethod::Delete, path).await
    }

    pub async fn settings(&self) -> ApiResult<PlatformSettings> {
        let body = self
            .call(HttpMethod::Get, paths::SUPER_SETTINGS.to_string())
            .await?;
        // 设置可能直接返回，也可能包在 data 中
        let inner = body.get("data").cloned().unwrap_or(body);
        Ok(serde_json::from_value(inner)?)
    }

    pub async fn update_settings(&self, body: &PlatformSettings) -> ApiResult<Value> {
        self.call_with(HttpMethod::Put, paths::SUPER_SETTINGS.to_string(), body)
            .await
    }

    /// 保存费率规则
    pub async fn save_platform_fee(&self, body: &PlatformFee) -> ApiResult<Value> {
        self.call_with(HttpMethod::Post, paths::SUPER_PLATFORM_FEES.to_string(), body)
            .await
    }

    pub async fn save_subscription_plan(&self, body: &SubscriptionPlan) -> ApiResult<Value> {
        self.call_with(
            HttpMethod::Post,
            paths::SUPER_SUBSCRIPTION_PLANS.to_string(),
            body,
        )
        .await
    }
}

/// 行数据中的 id 可能是数字或字符串
pub fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => urlencoding::encode(s).into_owned(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::request::{MOCK_BASE, MockHttpClient, json_response};
    use crate::storage::{AuthStorage, MemoryStore};
    use serde_json::json;
    use std::rc::Rc;

    fn api() -> (AdminApi, Rc<MockHttpClient>) {
        let config = ClientConfig {
            api_base_url: MOCK_BASE.to_string(),
            ..ClientConfig::default()
        };
        let http = Rc::new(MockHttpClient::new());
        let storage = AuthStorage::new(Rc::new(MemoryStore::new()), &config);
        storage.set_token("t");
        (AdminApi::new(ApiClient::new(config, http.clone(), storage)), http)
    }

    fn sent_body(http: &MockHttpClient, path: &str) -> Value {
        let req = &http.requests_to(path)[0];
        serde_json::from_str(req.body.as_deref().unwrap_or("null")).unwrap()
    }

    #[tokio::test]
    async fn test_update_user_status() {
        let (api, http) = api();
        http.reply(HttpMethod::Patch, "/api/v1/admin/users/12/status", 200, json!({ "ok": true }));

        api.update_user_status(
            12,
            &UpdateUserStatus {
                status: "suspended".into(),
                reason: None,
            },
        )
        .await
        .unwrap();

        let req = &http.requests_to("/api/v1/admin/users/12/status")[0];
        assert_eq!(req.bearer(), Some("t"));
        assert_eq!(
            sent_body(&http, "/api/v1/admin/users/12/status"),
            json!({ "status": "suspended" })
        );
    }

    #[tokio::test]
    async fn test_platform_fee_payload() {
        let (api, http) = api();
        http.reply(HttpMethod::Post, paths::SUPER_PLATFORM_FEES, 201, json!({}));
        let fee = PlatformFee {
            name: "Commission".into(),
            fee_type: "percentage".into(),
            value: 5.0,
            applies_to: Some("order".into()),
            is_active: true,
        };

        api.save_platform_fee(&fee).await.unwrap();

        assert_eq!(
            sent_body(&http, paths::SUPER_PLATFORM_FEES),
            json!({
                "name": "Commission",
                "type": "percentage",
                "value": 5.0,
                "applies_to": "order",
                "is_active": true
            })
        );
    }

    #[tokio::test]
    async fn test_review_and_moderation_paths() {
        let (api, http) = api();
        http.reply(HttpMethod::Post, "/api/v1/admin/vendors/5/verification/review", 200, json!({}));
        http.reply(HttpMethod::Patch, "/api/v1/admin/products/8/moderation", 200, json!({}));

        api.review_vendor(
            5,
            &ReviewVendor {
                status: "approved".into(),
                review_notes: None,
            },
        )
        .await
        .unwrap();
        api.moderate_product(
            "8",
            &ModerateProduct {
                status: "rejected".into(),
                notes: Some("blurry photos".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(
            sent_body(&http, "/api/v1/admin/products/8/moderation"),
            json!({ "status": "rejected", "notes": "blurry photos" })
        );
    }

    #[tokio::test]
    async fn test_settings_unwraps_data() {
        let (api, http) = api();
        http.on(HttpMethod::Get, paths::SUPER_SETTINGS, |_| {
            Ok(json_response(
                200,
                &json!({ "data": { "currency": "TZS", "escrow_days": 7 } }),
            ))
        });

        let settings = api.settings().await.unwrap();
        assert_eq!(settings.currency.as_deref(), Some("TZS"));
        assert_eq!(settings.escrow_days, Some(7));
        assert_eq!(settings.maintenance_mode, None);
    }

    #[tokio::test]
    async fn test_mutation_error_carries_backend_message() {
        let (api, http) = api();
        http.reply(
            HttpMethod::Post,
            "/api/v1/admin/disputes/4/resolve",
            422,
            json!({ "message": "Amount exceeds order total" }),
        );

        let err = api
            .resolve_dispute(
                4,
                &ResolveDispute {
                    resolution: "partial_refund".into(),
                    amount: Some(1e9),
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status, Some(422));
        assert_eq!(err.display_message(), "Amount exceeds order total");
    }

    fn category(name: &str, parent_id: Option<Value>) -> CategoryInput {
        CategoryInput {
            name: name.into(),
            slug: "home-kitchen".into(),
            description: String::new(),
            visibility: "public".into(),
            parent_id,
            icon: None,
        }
    }

    #[tokio::test]
    async fn test_create_category_body() {
        let (api, http) = api();
        http.reply(HttpMethod::Post, paths::ADMIN_CATEGORIES, 201, json!({}));

        api.create_category(&category("Home & Kitchen", None)).await.unwrap();

        let req = &http.requests_to(paths::ADMIN_CATEGORIES)[0];
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            sent_body(&http, paths::ADMIN_CATEGORIES),
            json!({
                "name": "Home & Kitchen",
                "slug": "home-kitchen",
                "description": "",
                "visibility": "public",
                "parent_id": null,
                "icon": null
            })
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_category_paths() {
        let (api, http) = api();
        http.reply(HttpMethod::Patch, "/api/v1/admin/categories/3", 200, json!({}));
        http.reply(HttpMethod::Delete, "/api/v1/admin/categories/3", 200, json!({}));

        api.update_category(3, &category("Kitchen", Some(json!(1))))
            .await
            .unwrap();
        api.delete_category(3).await.unwrap();

        let sent = http.requests_to("/api/v1/admin/categories/3");
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].method, HttpMethod::Patch);
        assert_eq!(sent[1].method, HttpMethod::Delete);
        assert!(sent[1].body.is_none());
        assert_eq!(
            sent_body(&http, "/api/v1/admin/categories/3")["parent_id"],
            json!(1)
        );
    }

    #[test]
    fn test_id_segment() {
        assert_eq!(id_segment(&json!(42)), "42");
        assert_eq!(id_segment(&json!("ab c")), "ab%20c");
    }
}
