//! 页面定义表
//!
//! 列表页和表单页都是声明式的：列、筛选条件、行操作、表单字段写在静态表里，
//! 由通用组件渲染。行操作和表单提交都会先构造出核心 crate 的强类型请求体，
//! 字段不合法时在发请求之前就报错。

use natakahii_admin::api::{
    ActionReport, CategoryInput, CreateRefund, GrantAdmin, ModerateProduct, PlatformFee,
    PlatformSettings, ResolveDispute, ReviewApplication, ReviewVendor, SubscriptionPlan,
    UpdateAdminRole, UpdateUserStatus, id_segment,
};
use natakahii_admin::{AdminApi, ApiError, ApiResult};
use natakahii_admin_shared::format::{format_date_time, format_tzs, safe_text, slugify};
use natakahii_admin_shared::{Role, paths};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

// =========================================================
// 表格列
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    /// 金额，按 TZS 格式化
    Money,
    /// RFC 3339 时间
    DateTime,
    /// 状态徽章
    Badge,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
    pub kind: CellKind,
    /// 主字段缺失时读取的备用字段
    pub fallback: Option<&'static str>,
}

const fn col(key: &'static str, header: &'static str, kind: CellKind) -> Column {
    Column {
        key,
        header,
        kind,
        fallback: None,
    }
}

const fn col_or(key: &'static str, fallback: &'static str, header: &'static str) -> Column {
    Column {
        key,
        header,
        kind: CellKind::Text,
        fallback: Some(fallback),
    }
}

/// 读取一行中的字段，空值视为缺失
fn field<'a>(row: &'a Value, key: &str) -> Option<&'a Value> {
    row.get(key).filter(|v| !v.is_null() && *v != "")
}

impl Column {
    fn value<'a>(&self, row: &'a Value) -> &'a Value {
        field(row, self.key)
            .or_else(|| self.fallback.and_then(|k| field(row, k)))
            .unwrap_or(&Value::Null)
    }

    /// 单元格文本
    pub fn render(&self, row: &Value) -> String {
        let value = self.value(row);
        match self.kind {
            CellKind::Money => format_tzs(value),
            CellKind::DateTime => match value.as_str() {
                Some(s) => format_date_time(s),
                None => safe_text(value),
            },
            CellKind::Text | CellKind::Badge => safe_text(value),
        }
    }
}

/// 状态值对应的 DaisyUI 徽章样式
pub fn badge_class(status: &str) -> &'static str {
    match status {
        "active" | "approved" | "resolved" | "public" | "paid" | "delivered" | "actioned" => {
            "badge badge-success"
        }
        "pending" | "suspended" | "hidden" | "draft" | "under_review" | "open" | "reviewed" => {
            "badge badge-warning"
        }
        "blocked" | "rejected" | "flagged" | "failed" => "badge badge-error",
        _ => "badge badge-ghost",
    }
}

// =========================================================
// 筛选条件
// =========================================================

#[derive(Debug, Clone, Copy)]
pub enum FilterKind {
    Text { placeholder: &'static str },
    /// `(值, 显示文本)`；值为空表示不筛选
    Select { options: &'static [(&'static str, &'static str)] },
}

#[derive(Debug, Clone, Copy)]
pub struct Filter {
    /// 查询参数名
    pub param: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
    pub default: &'static str,
}

const fn text_filter(param: &'static str, label: &'static str, placeholder: &'static str) -> Filter {
    Filter {
        param,
        label,
        kind: FilterKind::Text { placeholder },
        default: "",
    }
}

const fn select_filter(
    param: &'static str,
    label: &'static str,
    options: &'static [(&'static str, &'static str)],
) -> Filter {
    Filter {
        param,
        label,
        kind: FilterKind::Select { options },
        default: "",
    }
}

// =========================================================
// 行操作
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    UserStatus,
    VerifyUser,
    ReviewVendor,
    ReviewApplication,
    ModerateProduct,
    DeleteCategory,
    ResolveDispute,
    ActionReport,
    ViewInspections,
    ToggleAdminRole,
    RevokeAdmin,
}

/// 行操作弹窗里填写的值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionInput {
    pub choice: String,
    pub notes: String,
    pub amount: String,
}

impl ActionInput {
    fn notes(&self) -> Option<String> {
        let notes = self.notes.trim();
        (!notes.is_empty()).then(|| notes.to_string())
    }

    fn amount(&self) -> ApiResult<Option<f64>> {
        let amount = self.amount.trim();
        if amount.is_empty() {
            return Ok(None);
        }
        amount
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ApiError::invalid_input("Amount must be a number."))
    }
}

impl ActionKind {
    /// 行主键；管理员列表优先使用 `user_id`
    pub fn row_id(&self, row: &Value) -> Value {
        let keys: &[&str] = match self {
            Self::ToggleAdminRole | Self::RevokeAdmin => &["user_id", "id"],
            _ => &["id"],
        };
        keys.iter()
            .find_map(|k| field(row, k))
            .cloned()
            .unwrap_or(Value::Null)
    }

    pub async fn run(&self, api: &AdminApi, row: &Value, input: &ActionInput) -> ApiResult<Value> {
        let id = required_id(&self.row_id(row))?;
        let status = input.choice.clone();

        match self {
            Self::UserStatus => {
                let body = UpdateUserStatus {
                    status,
                    reason: input.notes(),
                };
                api.update_user_status(&id, &body).await
            }
            Self::VerifyUser => api.verify_user(&id).await,
            Self::ReviewVendor => {
                let body = ReviewVendor {
                    status,
                    review_notes: input.notes(),
                };
                api.review_vendor(&id, &body).await
            }
            Self::ReviewApplication => {
                let rejection_reason = input.notes().filter(|_| status == "rejected");
                let body = ReviewApplication {
                    status,
                    rejection_reason,
                };
                api.review_application(&id, &body).await
            }
            Self::ModerateProduct => {
                let body = ModerateProduct {
                    status,
                    notes: input.notes(),
                };
                api.moderate_product(&id, &body).await
            }
            Self::DeleteCategory => api.delete_category(&id).await,
            Self::ResolveDispute => {
                let body = ResolveDispute {
                    resolution: input.choice.clone(),
                    amount: input.amount()?,
                    notes: input.notes(),
                };
                api.resolve_dispute(&id, &body).await
            }
            Self::ActionReport => {
                let body = ActionReport {
                    action: input.choice.clone(),
                    notes: input.notes(),
                };
                api.action_report(&id, &body).await
            }
            Self::ViewInspections => api.shipment_inspections(&id).await,
            Self::ToggleAdminRole => {
                let body = UpdateAdminRole {
                    admin_role: toggled_admin_role(row).to_string(),
                };
                api.update_admin_role(&id, &body).await
            }
            Self::RevokeAdmin => api.revoke_admin(&id).await,
        }
    }
}

/// 缺少主键的行不能发起请求
fn required_id(id: &Value) -> ApiResult<String> {
    if id.is_null() {
        return Err(ApiError::invalid_input("Selected row has no id."));
    }
    Ok(id_segment(id))
}

/// 普通管理员与超级管理员互换
fn toggled_admin_role(row: &Value) -> &'static str {
    let current = row.get("admin_role").and_then(Value::as_str).and_then(Role::normalize);
    match current {
        Some(Role::NormalAdmin) => Role::SUPER_ADMIN,
        _ => Role::NORMAL_ADMIN,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RowAction {
    pub label: &'static str,
    pub kind: ActionKind,
    /// 弹窗中的下拉选项；为空且没有备注字段时直接执行
    pub choices: &'static [&'static str],
    pub choice_label: &'static str,
    /// 以行中该字段的值作为下拉框初始值
    pub preselect: Option<&'static str>,
    pub notes_label: Option<&'static str>,
    pub amount_label: Option<&'static str>,
    /// 执行前需要用户确认
    pub confirm: Option<&'static str>,
    pub success: &'static str,
    pub failure: &'static str,
}

impl RowAction {
    const fn new(label: &'static str, kind: ActionKind, success: &'static str, failure: &'static str) -> Self {
        Self {
            label,
            kind,
            choices: &[],
            choice_label: "",
            preselect: None,
            notes_label: None,
            amount_label: None,
            confirm: None,
            success,
            failure,
        }
    }

    const fn choices(mut self, label: &'static str, choices: &'static [&'static str]) -> Self {
        self.choice_label = label;
        self.choices = choices;
        self
    }

    const fn preselect(mut self, key: &'static str) -> Self {
        self.preselect = Some(key);
        self
    }

    const fn notes(mut self, label: &'static str) -> Self {
        self.notes_label = Some(label);
        self
    }

    const fn amount(mut self, label: &'static str) -> Self {
        self.amount_label = Some(label);
        self
    }

    const fn confirm(mut self, message: &'static str) -> Self {
        self.confirm = Some(message);
        self
    }

    /// 是否需要弹窗填写
    pub fn needs_dialog(&self) -> bool {
        !self.choices.is_empty() || self.notes_label.is_some() || self.amount_label.is_some()
    }

    /// 弹窗初始值
    pub fn initial_input(&self, row: &Value) -> ActionInput {
        let preset = self
            .preselect
            .and_then(|k| row.get(k))
            .and_then(Value::as_str)
            .filter(|v| self.choices.iter().any(|c| c == v));
        ActionInput {
            choice: preset
                .or_else(|| self.choices.first().copied())
                .unwrap_or_default()
                .to_string(),
            ..ActionInput::default()
        }
    }
}

// =========================================================
// 表单
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Select(&'static [&'static str]),
    /// "1" / "0"
    Toggle,
    /// 逗号分隔的列表
    List,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    /// 请求体字段名
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
    pub default: &'static str,
    pub required: bool,
}

const fn input(key: &'static str, label: &'static str, placeholder: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef {
        key,
        label,
        placeholder,
        kind,
        default: "",
        required: true,
    }
}

const fn optional(mut f: FieldDef) -> FieldDef {
    f.required = false;
    f
}

const fn with_default(mut f: FieldDef, default: &'static str) -> FieldDef {
    f.default = default;
    f
}

pub type FormValues = BTreeMap<&'static str, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    CreateRefund,
    GrantAdmin,
    Settings,
    PlatformFee,
    SubscriptionPlan,
    /// 新建或编辑分类，取决于是否带有原记录
    Category,
}

impl FormKind {
    /// 加载表单初始值；只有平台设置需要
    pub async fn load(&self, api: &AdminApi) -> ApiResult<Option<FormValues>> {
        if *self != Self::Settings {
            return Ok(None);
        }
        let settings = api.settings().await?;
        Ok(Some(settings_values(&settings)))
    }

    /// 将表单 JSON 转换为强类型请求体并提交
    ///
    /// `record` 为正在编辑的原记录；只有分类表单会用到。
    pub async fn submit(&self, api: &AdminApi, body: Value, record: Option<&Value>) -> ApiResult<Value> {
        match self {
            Self::Category => {
                let input = category_input(body)?;
                match record {
                    Some(row) => {
                        let id = required_id(field(row, "id").unwrap_or(&Value::Null))?;
                        api.update_category(&id, &input).await
                    }
                    None => api.create_category(&input).await,
                }
            }
            Self::CreateRefund => api.create_refund(&typed::<CreateRefund>(body)?).await,
            Self::GrantAdmin => api.grant_admin(&typed::<GrantAdmin>(body)?).await,
            Self::Settings => api.update_settings(&typed::<PlatformSettings>(body)?).await,
            Self::PlatformFee => api.save_platform_fee(&typed::<PlatformFee>(body)?).await,
            Self::SubscriptionPlan => {
                api.save_subscription_plan(&typed::<SubscriptionPlan>(body)?).await
            }
        }
    }
}

fn typed<T: serde::de::DeserializeOwned>(body: Value) -> ApiResult<T> {
    Ok(serde_json::from_value(body)?)
}

/// 未填写 slug 时由名称生成
fn category_input(mut body: Value) -> ApiResult<CategoryInput> {
    if let Value::Object(map) = &mut body {
        if !map.contains_key("slug") {
            let name = map.get("name").and_then(Value::as_str).unwrap_or_default();
            let slug = slugify(name);
            map.insert("slug".to_string(), Value::String(slug));
        }
    }
    typed(body)
}

fn settings_values(settings: &PlatformSettings) -> FormValues {
    let mut values = FormValues::new();
    values.insert(
        "currency",
        settings.currency.clone().unwrap_or_else(|| "TZS".to_string()),
    );
    values.insert("escrow_days", settings.escrow_days.unwrap_or(3).to_string());
    let maintenance = if settings.maintenance_mode.unwrap_or(false) { "1" } else { "0" };
    values.insert("maintenance_mode", maintenance.to_string());
    values
}

#[derive(Debug, Clone, Copy)]
pub struct FormDef {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub submit_label: &'static str,
    pub kind: FormKind,
    pub fields: &'static [FieldDef],
    pub success: &'static str,
    pub failure: &'static str,
    /// 提交成功后恢复默认值
    pub reset_after_submit: bool,
}

impl FormDef {
    pub fn defaults(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.key, f.default.to_string()))
            .collect()
    }

    /// 以已有记录填充表单，记录中缺失的字段保留默认值
    pub fn values_from(&self, row: &Value) -> FormValues {
        let mut values = self.defaults();
        for f in self.fields {
            let text = match field(row, f.key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Bool(b)) => (if *b { "1" } else { "0" }).to_string(),
                Some(Value::Array(items)) => items.iter().map(safe_text).collect::<Vec<_>>().join(", "),
                Some(other) => other.to_string(),
                None => continue,
            };
            values.insert(f.key, text);
        }
        values
    }

    /// 把输入框的字符串值转换为请求 JSON
    ///
    /// 可选字段留空时不写入；数字字段无法解析时报错。
    pub fn to_body(&self, values: &FormValues) -> Result<Value, String> {
        let mut body = Map::new();
        for f in self.fields {
            let raw = values.get(f.key).map(|s| s.trim()).unwrap_or_default();
            if raw.is_empty() && f.kind != FieldKind::List {
                if f.required {
                    return Err(format!("{} is required.", f.label));
                }
                continue;
            }

            let value = match f.kind {
                FieldKind::Text | FieldKind::Select(_) => Value::String(raw.to_string()),
                FieldKind::Number => raw
                    .parse::<f64>()
                    .map(|n| json!(n))
                    .map_err(|_| format!("{} must be a number.", f.label))?,
                FieldKind::Integer => raw
                    .parse::<u64>()
                    .map(|n| json!(n))
                    .map_err(|_| format!("{} must be a whole number.", f.label))?,
                FieldKind::Toggle => Value::Bool(raw == "1"),
                FieldKind::List => Value::Array(
                    raw.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(|s| Value::String(s.to_string()))
                        .collect(),
                ),
            };
            body.insert(f.key.to_string(), value);
        }
        Ok(Value::Object(body))
    }
}

// =========================================================
// 列表页
// =========================================================

#[derive(Debug, Clone, Copy)]
pub struct ResourceDef {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub endpoint: &'static str,
    pub filters: &'static [Filter],
    pub columns: &'static [Column],
    pub actions: &'static [RowAction],
    pub empty_text: &'static str,
    /// 列表上方的表单（例如授予管理员）
    pub form: Option<&'static FormDef>,
    /// 行内"编辑"按钮打开的表单
    pub edit_form: Option<&'static FormDef>,
}

/// 某个后台路径对应的页面
#[derive(Debug, Clone, Copy)]
pub enum Page {
    Dashboard,
    Analytics,
    Escrow,
    List(&'static ResourceDef),
    Form(&'static FormDef),
}

pub fn page_for(path: &str) -> Option<Page> {
    let page = match path {
        "/app/admin/dashboard" => Page::Dashboard,
        "/app/admin/analytics" => Page::Analytics,
        "/app/admin/escrow" => Page::Escrow,
        "/app/admin/users" => Page::List(&USERS),
        "/app/admin/vendors" => Page::List(&VENDORS),
        "/app/admin/vendor-applications" => Page::List(&VENDOR_APPLICATIONS),
        "/app/admin/products" => Page::List(&PRODUCTS),
        "/app/admin/categories" => Page::List(&CATEGORIES),
        "/app/admin/orders" => Page::List(&ORDERS),
        "/app/admin/payments" => Page::List(&PAYMENTS),
        "/app/admin/refunds" => Page::Form(&CREATE_REFUND),
        "/app/admin/shipments" => Page::List(&SHIPMENTS),
        "/app/admin/disputes" => Page::List(&DISPUTES),
        "/app/admin/support" => Page::List(&SUPPORT_TICKETS),
        "/app/admin/reports" => Page::List(&REPORTS),
        "/app/super/admins" => Page::List(&ADMIN_ACCOUNTS),
        "/app/super/settings" => Page::Form(&SETTINGS),
        "/app/super/platform-fees" => Page::Form(&PLATFORM_FEES),
        "/app/super/subscription-plans" => Page::Form(&SUBSCRIPTION_PLANS),
        "/app/super/audit-logs" => Page::List(&AUDIT_LOGS),
        _ => return None,
    };
    Some(page)
}

/// 取出 `{ "data": ... }` 包裹的内容；没有包裹时返回原值
pub fn payload_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(|d| !d.is_null()) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// 托管记录可能位于 `holds`、`data.holds`、`data` 或顶层
pub fn escrow_holds(body: Value) -> Vec<Value> {
    let node = match body {
        Value::Object(mut map) if map.get("holds").is_some_and(|h| !h.is_null()) => {
            map.remove("holds").unwrap_or(Value::Null)
        }
        other => payload_data(other),
    };
    match node {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("holds") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// 托管记录表格的列
pub const ESCROW_COLUMNS: &[Column] = &[
    col("vendor_id", "Vendor", CellKind::Text),
    col("status", "Status", CellKind::Badge),
    col("amount", "Amount", CellKind::Money),
];

/// 首页最近订单表格的列
pub const RECENT_ORDER_COLUMNS: &[Column] = &[
    col("id", "Order ID", CellKind::Text),
    col("status", "Status", CellKind::Badge),
    col("grand_total", "Total", CellKind::Money),
];

/// 巡检记录弹窗的列
pub const INSPECTION_COLUMNS: &[Column] = &[
    col("stage", "Stage", CellKind::Text),
    col("status", "Status", CellKind::Badge),
    col("notes", "Notes", CellKind::Text),
];

const ALL: (&str, &str) = ("", "All");

pub const USERS: ResourceDef = ResourceDef {
    title: "Users",
    subtitle: "View and manage user accounts",
    endpoint: paths::ADMIN_USERS,
    filters: &[
        text_filter("search", "Search", "Name, email or phone..."),
        select_filter(
            "status",
            "Status",
            &[ALL, ("active", "active"), ("suspended", "suspended"), ("blocked", "blocked")],
        ),
        text_filter("role", "Role (optional)", "customer/vendor/admin..."),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("name", "Name", CellKind::Text),
        col("email", "Email", CellKind::Text),
        col("phone", "Phone", CellKind::Text),
        col("status", "Status", CellKind::Badge),
    ],
    actions: &[
        RowAction::new(
            "Update Status",
            ActionKind::UserStatus,
            "User status updated.",
            "Failed to update status.",
        )
        .choices("New status", &["active", "suspended", "blocked"])
        .preselect("status")
        .notes("Reason (optional)"),
        RowAction::new("Verify", ActionKind::VerifyUser, "User verified.", "Failed to verify user.")
            .confirm("Mark this user as verified?"),
    ],
    empty_text: "No users found.",
    form: None,
    edit_form: None,
};

pub const VENDORS: ResourceDef = ResourceDef {
    title: "Vendors",
    subtitle: "Vendor verification and shop status",
    endpoint: paths::ADMIN_VENDORS,
    filters: &[
        text_filter("search", "Search", "Vendor name or slug..."),
        select_filter(
            "vendor_type",
            "Vendor type",
            &[ALL, ("individual_vendor", "individual_vendor"), ("business_vendor", "business_vendor")],
        ),
        select_filter(
            "verification_status",
            "Verification status",
            &[ALL, ("pending", "pending"), ("approved", "approved"), ("rejected", "rejected")],
        ),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col_or("name", "shop_name", "Vendor"),
        col_or("slug", "shop_slug", "Slug"),
        col("verification_status", "Verification", CellKind::Badge),
    ],
    actions: &[RowAction::new(
        "Review",
        ActionKind::ReviewVendor,
        "Vendor review saved.",
        "Failed to review vendor.",
    )
    .choices("Decision", &["approved", "rejected"])
    .notes("Review notes (optional)")],
    empty_text: "No vendors found.",
    form: None,
    edit_form: None,
};

pub const VENDOR_APPLICATIONS: ResourceDef = ResourceDef {
    title: "Vendor Applications",
    subtitle: "Review new vendor onboarding requests",
    endpoint: paths::ADMIN_VENDOR_APPLICATIONS,
    filters: &[
        text_filter("search", "Search", "Business or applicant name..."),
        Filter {
            param: "status",
            label: "Status",
            kind: FilterKind::Select {
                options: &[
                    ("pending", "Pending"),
                    ("approved", "Approved"),
                    ("rejected", "Rejected"),
                    ALL,
                ],
            },
            default: "pending",
        },
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("business_name", "Business", CellKind::Text),
        col("full_name", "Applicant", CellKind::Text),
        col("region", "Region", CellKind::Text),
        col("status", "Status", CellKind::Badge),
        col("created_at", "Submitted", CellKind::DateTime),
    ],
    actions: &[RowAction::new(
        "Review",
        ActionKind::ReviewApplication,
        "Application reviewed.",
        "Failed to review application.",
    )
    .choices("Decision", &["approved", "rejected"])
    .notes("Rejection reason (required when rejecting)")],
    empty_text: "No applications found.",
    form: None,
    edit_form: None,
};

pub const PRODUCTS: ResourceDef = ResourceDef {
    title: "Products",
    subtitle: "Moderation and visibility control",
    endpoint: paths::ADMIN_PRODUCTS,
    filters: &[
        select_filter(
            "status",
            "Status",
            &[
                ALL,
                ("active", "active"),
                ("hidden", "hidden"),
                ("flagged", "flagged"),
                ("draft", "draft"),
            ],
        ),
        select_filter("reported", "Reported", &[ALL, ("1", "reported"), ("0", "not reported")]),
        text_filter("vendor_id", "Vendor ID", "e.g. 8"),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("name", "Product", CellKind::Text),
        col("vendor_id", "Vendor", CellKind::Text),
        col("status", "Status", CellKind::Badge),
    ],
    actions: &[RowAction::new(
        "Moderate",
        ActionKind::ModerateProduct,
        "Product moderation updated.",
        "Failed to moderate product.",
    )
    .choices("New status", &["active", "hidden", "flagged"])
    .preselect("status")
    .notes("Notes (optional)")],
    empty_text: "No products found.",
    form: None,
    edit_form: None,
};

pub const CATEGORIES: ResourceDef = ResourceDef {
    title: "Categories",
    subtitle: "Catalogue tree and visibility",
    endpoint: paths::ADMIN_CATEGORIES,
    filters: &[
        text_filter("search", "Search", "Name or slug..."),
        select_filter(
            "visibility",
            "Visibility",
            &[ALL, ("public", "public"), ("hidden", "hidden"), ("draft", "draft")],
        ),
        select_filter(
            "level",
            "Level",
            &[("", "Any"), ("root", "root"), ("parent", "parent"), ("child", "child")],
        ),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("name", "Name", CellKind::Text),
        col("parent_id", "Parent", CellKind::Text),
        col("products_count", "Products", CellKind::Text),
        Column {
            key: "status",
            header: "Status",
            kind: CellKind::Badge,
            fallback: Some("visibility"),
        },
    ],
    actions: &[RowAction::new(
        "Delete",
        ActionKind::DeleteCategory,
        "Category deleted.",
        "Failed to delete category.",
    )
    .confirm("Delete this category?")],
    empty_text: "No categories found.",
    form: Some(&CREATE_CATEGORY),
    edit_form: Some(&EDIT_CATEGORY),
};

pub const ORDERS: ResourceDef = ResourceDef {
    title: "Orders",
    subtitle: "Monitor all orders",
    endpoint: paths::ADMIN_ORDERS,
    filters: &[
        text_filter("status", "Status", "paid, pending, shipped..."),
        text_filter("payment_status", "Payment status", "initiated, paid..."),
        text_filter("vendor_id", "Vendor ID", "e.g. 8"),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("status", "Status", CellKind::Text),
        col("payment_status", "Payment", CellKind::Text),
        col("grand_total", "Total", CellKind::Money),
    ],
    actions: &[],
    empty_text: "No orders found.",
    form: None,
    edit_form: None,
};

pub const PAYMENTS: ResourceDef = ResourceDef {
    title: "Payments",
    subtitle: "Monitor payment activity",
    endpoint: paths::ADMIN_PAYMENTS,
    filters: &[
        text_filter("provider", "Provider", "mpesa, tigo, airtel, card..."),
        text_filter("status", "Status", "initiated, paid, failed..."),
        text_filter("order_id", "Order ID", "e.g. 900"),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("provider", "Provider", CellKind::Text),
        col("status", "Status", CellKind::Text),
        col("order_id", "Order", CellKind::Text),
    ],
    actions: &[],
    empty_text: "No payments found.",
    form: None,
    edit_form: None,
};

pub const SHIPMENTS: ResourceDef = ResourceDef {
    title: "Shipments",
    subtitle: "Track delivery flow and inspections",
    endpoint: paths::ADMIN_SHIPMENTS,
    filters: &[
        text_filter("status", "Status", "in_transit, delivered..."),
        text_filter("vendor_id", "Vendor ID", "e.g. 8"),
        text_filter("delivery_agent_id", "Delivery agent ID", "e.g. 12"),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("tracking_number", "Tracking", CellKind::Text),
        col("status", "Status", CellKind::Text),
    ],
    actions: &[RowAction::new(
        "View",
        ActionKind::ViewInspections,
        "",
        "Failed to load inspections.",
    )],
    empty_text: "No shipments found.",
    form: None,
    edit_form: None,
};

pub const DISPUTES: ResourceDef = ResourceDef {
    title: "Disputes",
    subtitle: "Review and resolve disputes",
    endpoint: paths::ADMIN_DISPUTES,
    filters: &[
        select_filter(
            "status",
            "Status",
            &[
                ALL,
                ("open", "open"),
                ("under_review", "under_review"),
                ("resolved", "resolved"),
                ("rejected", "rejected"),
            ],
        ),
        text_filter("vendor_id", "Vendor ID", "e.g. 8"),
        text_filter("order_id", "Order ID", "e.g. 900"),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("status", "Status", CellKind::Text),
        col("order_id", "Order", CellKind::Text),
        col("vendor_id", "Vendor", CellKind::Text),
    ],
    actions: &[RowAction::new(
        "Resolve",
        ActionKind::ResolveDispute,
        "Dispute resolved.",
        "Failed to resolve dispute.",
    )
    .choices(
        "Resolution",
        &["release_to_vendor", "refund_customer", "partial_split", "cancel_order", "other"],
    )
    .amount("Amount (only for partial_split)")
    .notes("Notes (optional)")],
    empty_text: "No disputes found.",
    form: None,
    edit_form: None,
};

pub const SUPPORT_TICKETS: ResourceDef = ResourceDef {
    title: "Support Tickets",
    subtitle: "Customer & vendor support queue",
    endpoint: paths::ADMIN_SUPPORT_TICKETS,
    filters: &[
        select_filter(
            "status",
            "Status",
            &[ALL, ("open", "open"), ("pending", "pending"), ("closed", "closed")],
        ),
        select_filter(
            "priority",
            "Priority",
            &[ALL, ("low", "low"), ("normal", "normal"), ("high", "high")],
        ),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("status", "Status", CellKind::Text),
        col("priority", "Priority", CellKind::Text),
        col("subject", "Subject", CellKind::Text),
    ],
    actions: &[],
    empty_text: "No tickets found.",
    form: None,
    edit_form: None,
};

pub const REPORTS: ResourceDef = ResourceDef {
    title: "Reports",
    subtitle: "Moderation queue and actions",
    endpoint: paths::ADMIN_REPORTS,
    filters: &[
        select_filter(
            "status",
            "Status",
            &[
                ALL,
                ("open", "open"),
                ("reviewed", "reviewed"),
                ("actioned", "actioned"),
                ("rejected", "rejected"),
            ],
        ),
        text_filter("type", "Type (optional)", "product, vendor, user..."),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("status", "Status", CellKind::Text),
        col("reason", "Reason", CellKind::Text),
        col("type", "Type", CellKind::Text),
    ],
    actions: &[RowAction::new(
        "Take Action",
        ActionKind::ActionReport,
        "Report actioned successfully.",
        "Failed to action report.",
    )
    .choices(
        "Action",
        &["dismiss", "hide", "block_user", "block_vendor", "request_more_info"],
    )
    .notes("Notes (optional)")],
    empty_text: "No reports found.",
    form: None,
    edit_form: None,
};

pub const ADMIN_ACCOUNTS: ResourceDef = ResourceDef {
    title: "Admin Accounts",
    subtitle: "Manage admin roles (super admin only)",
    endpoint: paths::SUPER_ADMINS,
    filters: &[text_filter("search", "Search", "Name or email...")],
    columns: &[
        col_or("user_id", "id", "User ID"),
        col("name", "Name", CellKind::Text),
        col("email", "Email", CellKind::Text),
        col("admin_role", "Role", CellKind::Text),
    ],
    actions: &[
        RowAction::new(
            "Toggle Role",
            ActionKind::ToggleAdminRole,
            "Admin role updated.",
            "Failed to update role.",
        ),
        RowAction::new(
            "Revoke",
            ActionKind::RevokeAdmin,
            "Admin access revoked.",
            "Failed to revoke admin.",
        )
        .confirm("Revoke this admin access? (Cannot revoke last super admin)"),
    ],
    empty_text: "No admin accounts found.",
    form: Some(&GRANT_ADMIN),
    edit_form: None,
};

pub const AUDIT_LOGS: ResourceDef = ResourceDef {
    title: "Audit Logs",
    subtitle: "Security & compliance actions history",
    endpoint: paths::SUPER_AUDIT_LOGS,
    filters: &[
        text_filter("actor_user_id", "Actor user ID", "e.g. 12"),
        text_filter("action", "Action", "vendor_verification_approved..."),
        text_filter("from", "From (YYYY-MM-DD)", "2026-02-01"),
        text_filter("to", "To (YYYY-MM-DD)", "2026-02-09"),
    ],
    columns: &[
        col("id", "ID", CellKind::Text),
        col("action", "Action", CellKind::Text),
        col("actor_user_id", "Actor", CellKind::Text),
        col("created_at", "Time", CellKind::DateTime),
    ],
    actions: &[],
    empty_text: "No audit logs found.",
    form: None,
    edit_form: None,
};

pub const CREATE_REFUND: FormDef = FormDef {
    title: "Refunds",
    subtitle: "Create refunds under policy rules",
    submit_label: "Submit Refund",
    kind: FormKind::CreateRefund,
    fields: &[
        input("order_id", "Order ID", "e.g. 900", FieldKind::Integer),
        input("amount", "Amount", "e.g. 50000", FieldKind::Number),
        input("reason", "Reason", "Short reason...", FieldKind::Text),
        optional(input("notes", "Notes (optional)", "More details...", FieldKind::Text)),
    ],
    success: "Refund initiated successfully.",
    failure: "Failed to initiate refund.",
    reset_after_submit: true,
};

const CATEGORY_FIELDS: &[FieldDef] = &[
    input("name", "Name", "e.g. Home & Kitchen", FieldKind::Text),
    optional(input("slug", "Slug (optional)", "Generated from the name", FieldKind::Text)),
    optional(input("description", "Description (optional)", "Short description...", FieldKind::Text)),
    with_default(
        input("visibility", "Visibility", "", FieldKind::Select(&["public", "hidden", "draft"])),
        "public",
    ),
    optional(input("parent_id", "Parent ID (optional)", "Empty for a root category", FieldKind::Integer)),
    optional(input("icon", "Icon (optional)", "e.g. kitchen", FieldKind::Text)),
];

pub const CREATE_CATEGORY: FormDef = FormDef {
    title: "New Category",
    subtitle: "Add a category to the catalogue",
    submit_label: "Create",
    kind: FormKind::Category,
    fields: CATEGORY_FIELDS,
    success: "Category created.",
    failure: "Failed to create category.",
    reset_after_submit: true,
};

pub const EDIT_CATEGORY: FormDef = FormDef {
    title: "Edit Category",
    subtitle: "",
    submit_label: "Save",
    kind: FormKind::Category,
    fields: CATEGORY_FIELDS,
    success: "Category updated.",
    failure: "Failed to update category.",
    reset_after_submit: false,
};

pub const GRANT_ADMIN: FormDef = FormDef {
    title: "Grant Admin Role",
    subtitle: "Promote an existing user",
    submit_label: "Grant",
    kind: FormKind::GrantAdmin,
    fields: &[
        input("user_id", "User ID", "Existing user id", FieldKind::Integer),
        with_default(
            input(
                "admin_role",
                "Admin role",
                "",
                FieldKind::Select(&[Role::NORMAL_ADMIN, Role::SUPER_ADMIN]),
            ),
            Role::NORMAL_ADMIN,
        ),
    ],
    success: "Admin role granted.",
    failure: "Failed to grant role.",
    reset_after_submit: true,
};

pub const SETTINGS: FormDef = FormDef {
    title: "Platform Settings",
    subtitle: "Super admin configuration",
    submit_label: "Save Settings",
    kind: FormKind::Settings,
    fields: &[
        with_default(input("currency", "Currency", "TZS", FieldKind::Text), "TZS"),
        with_default(input("escrow_days", "Escrow days", "3", FieldKind::Integer), "3"),
        with_default(
            input("maintenance_mode", "Maintenance mode", "", FieldKind::Toggle),
            "0",
        ),
    ],
    success: "Settings updated.",
    failure: "Failed to update settings.",
    reset_after_submit: false,
};

pub const PLATFORM_FEES: FormDef = FormDef {
    title: "Platform Fees",
    subtitle: "Create/update commission rules",
    submit_label: "Save Rule",
    kind: FormKind::PlatformFee,
    fields: &[
        input("name", "Name", "e.g. Standard Commission", FieldKind::Text),
        with_default(
            input("type", "Type", "", FieldKind::Select(&["percentage", "fixed"])),
            "percentage",
        ),
        input("value", "Value", "e.g. 5 (percent) or 1000 (fixed)", FieldKind::Number),
        with_default(
            input(
                "applies_to",
                "Applies to",
                "",
                FieldKind::Select(&["order", "shipping", "ads", "subscription"]),
            ),
            "order",
        ),
        with_default(input("is_active", "Active", "", FieldKind::Toggle), "1"),
    ],
    success: "Platform fee rule saved.",
    failure: "Failed to save fee rule.",
    reset_after_submit: true,
};

pub const SUBSCRIPTION_PLANS: FormDef = FormDef {
    title: "Subscription Plans",
    subtitle: "Create/update vendor subscription plans",
    submit_label: "Save Plan",
    kind: FormKind::SubscriptionPlan,
    fields: &[
        input("name", "Name", "e.g. Pro Vendor", FieldKind::Text),
        input("price", "Price", "e.g. 20000", FieldKind::Number),
        input("duration_days", "Duration (days)", "e.g. 30", FieldKind::Integer),
        input(
            "features",
            "Features (comma separated)",
            "priority support, boosted listings",
            FieldKind::List,
        ),
        with_default(input("is_active", "Active", "", FieldKind::Toggle), "1"),
    ],
    success: "Subscription plan saved.",
    failure: "Failed to save plan.",
    reset_after_submit: true,
};
