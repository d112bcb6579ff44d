use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request carries a JSON body.
    const HAS_BODY: bool = true;
}

// =========================================================
// Endpoint paths
// =========================================================

pub mod paths {
    pub const LOGIN: &str = "/api/v1/auth/login";
    pub const ME: &str = "/api/v1/auth/me";
    pub const REFRESH: &str = "/api/v1/auth/refresh";
    pub const LOGOUT: &str = "/api/v1/auth/logout";
    pub const FORGOT_PASSWORD: &str = "/api/v1/auth/forgot-password";
    pub const RESEND_OTP: &str = "/api/v1/auth/resend-otp";
    pub const RESET_PASSWORD: &str = "/api/v1/auth/reset-password";
    pub const PROFILE: &str = "/api/v1/profile";
    pub const PROFILE_PHOTO: &str = "/api/v1/profile/photo";

    pub const ADMIN_DASHBOARD: &str = "/api/v1/admin/dashboard";
    pub const ADMIN_USERS: &str = "/api/v1/admin/users";
    pub const ADMIN_VENDORS: &str = "/api/v1/admin/vendors";
    pub const ADMIN_VENDOR_APPLICATIONS: &str = "/api/v1/admin/vendor-applications";
    pub const ADMIN_ROLES: &str = "/api/v1/admin/roles";
    pub const ADMIN_PRODUCTS: &str = "/api/v1/admin/products";
    pub const ADMIN_CATEGORIES: &str = "/api/v1/admin/categories";
    pub const ADMIN_ORDERS: &str = "/api/v1/admin/orders";
    pub const ADMIN_PAYMENTS: &str = "/api/v1/admin/payments";
    pub const ADMIN_ESCROW_ORDERS: &str = "/api/v1/admin/escrow/orders";
    pub const ADMIN_REFUNDS: &str = "/api/v1/admin/refunds";
    pub const ADMIN_SHIPMENTS: &str = "/api/v1/admin/shipments";
    pub const ADMIN_CARGO_SHIPMENTS: &str = "/api/v1/admin/cargo/shipments";
    pub const ADMIN_DISPUTES: &str = "/api/v1/admin/disputes";
    pub const ADMIN_SUPPORT_TICKETS: &str = "/api/v1/admin/support/tickets";
    pub const ADMIN_REPORTS: &str = "/api/v1/admin/reports";
    pub const ADMIN_ANALYTICS_OVERVIEW: &str = "/api/v1/admin/analytics/overview";

    pub const SUPER_ADMINS: &str = "/api/v1/admin/super/admins";
    pub const SUPER_SETTINGS: &str = "/api/v1/admin/super/settings";
    pub const SUPER_PLATFORM_FEES: &str = "/api/v1/admin/super/platform-fees";
    pub const SUPER_SUBSCRIPTION_PLANS: &str = "/api/v1/admin/super/subscription-plans";
    pub const SUPER_AUDIT_LOGS: &str = "/api/v1/admin/super/audit-logs";
}

// =========================================================
// Auth Request Definitions
// =========================================================

/// Login. The identifier is sent under both the legacy (`email`)
/// and the current (`email_or_phone`) field name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub email_or_phone: String,
    pub password: String,
    pub device_name: String,
}

impl LoginRequest {
    pub fn new(identifier: &str, password: &str, device_name: &str) -> Self {
        let identifier = identifier.trim().to_string();
        Self {
            email: identifier.clone(),
            email_or_phone: identifier,
            password: password.to_string(),
            device_name: device_name.to_string(),
        }
    }
}

impl ApiRequest for LoginRequest {
    type Response = Value;
    const PATH: &'static str = paths::LOGIN;
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Who am I
#[derive(Debug, Serialize, Deserialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = Value;
    const PATH: &'static str = paths::ME;
    const METHOD: HttpMethod = HttpMethod::Get;
    const HAS_BODY: bool = false;
}

/// Exchange the current bearer token for a new one
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshRequest;

impl ApiRequest for RefreshRequest {
    type Response = Value;
    const PATH: &'static str = paths::REFRESH;
    const METHOD: HttpMethod = HttpMethod::Post;
    const HAS_BODY: bool = false;
}

/// Revoke the current token
#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = Value;
    const PATH: &'static str = paths::LOGOUT;
    const METHOD: HttpMethod = HttpMethod::Post;
    const HAS_BODY: bool = false;
}

/// Profile update. `phone` is always sent; `null` clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateProfileRequest {
    /// From the account dialog: fields are trimmed, a blank phone becomes `null`
    pub fn from_account_form(name: &str, phone: &str) -> Self {
        let present = |v: &str| Some(v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            name: present(name),
            email: None,
            phone: present(phone),
        }
    }
}

impl ApiRequest for UpdateProfileRequest {
    type Response = Value;
    const PATH: &'static str = paths::PROFILE;
    const METHOD: HttpMethod = HttpMethod::Patch;
}

/// Remove the current profile photo
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteProfilePhotoRequest;

impl ApiRequest for DeleteProfilePhotoRequest {
    type Response = Value;
    const PATH: &'static str = paths::PROFILE_PHOTO;
    const METHOD: HttpMethod = HttpMethod::Delete;
    const HAS_BODY: bool = false;
}

// =========================================================
// Password Reset
// =========================================================

/// Step one: mail a reset OTP to the account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ApiRequest for ForgotPasswordRequest {
    type Response = Value;
    const PATH: &'static str = paths::FORGOT_PASSWORD;
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Send the reset OTP again
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendOtpRequest {
    pub email: String,
}

impl ApiRequest for ResendOtpRequest {
    type Response = Value;
    const PATH: &'static str = paths::RESEND_OTP;
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Step two: set a new password with the mailed OTP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
    pub password_confirmation: String,
}

impl ApiRequest for ResetPasswordRequest {
    type Response = Value;
    const PATH: &'static str = paths::RESET_PASSWORD;
    const METHOD: HttpMethod = HttpMethod::Post;
}
