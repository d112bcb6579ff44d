use crate::auth::{login, request_password_reset, resend_reset_otp, reset_password, use_auth};
use crate::components::status::FullScreenLoader;
use crate::components::toast::{Toaster, use_toaster};
use leptos::prelude::*;
use leptos::task::spawn_local;
use natakahii_admin::ApiResult;
use natakahii_admin_shared::protocol::ResetPasswordRequest;
use natakahii_admin_shared::validate::{
    normalize_email_or_phone, validate_login, validate_password_reset, validate_reset_email,
};
use tracing::info;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (identifier, set_identifier) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let (show_reset, set_show_reset) = signal(false);

    // 启动校验完成前不渲染表单
    let is_loading = move || auth.state.with(|s| s.loading && s.is_authenticated);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let raw_identifier = identifier.get_untracked();
        let raw_password = password.get_untracked();

        let errors = validate_login(&raw_identifier, &raw_password);
        if let Some(first) = errors.first() {
            set_error_msg.set(Some(first.to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let identifier = normalize_email_or_phone(&raw_identifier);
            match login(&auth, identifier, raw_password).await {
                // 跳转由路由服务根据认证状态完成
                Ok(user) => info!(user = %user.display_name(), "signed in"),
                Err(e) => set_error_msg.set(Some(e.display_message().to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <Show when=move || !is_loading() fallback=|| view! { <FullScreenLoader /> }>
            <div class="hero min-h-screen bg-base-200">
                <div class="hero-content flex-col w-full max-w-md">
                    <div class="text-center mb-4">
                        <h1 class="text-3xl font-bold">"NatakaHii Admin"</h1>
                        <p class="text-base-content/70">"Sign in with your admin account"</p>
                    </div>

                    <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                        <form class="card-body" on:submit=on_submit novalidate>
                            <Show when=move || error_msg.get().is_some()>
                                <div role="alert" class="alert alert-error text-sm py-2">
                                    <span>{move || error_msg.get().unwrap_or_default()}</span>
                                </div>
                            </Show>

                            <div class="form-control">
                                <label class="label" for="identifier">
                                    <span class="label-text">"Email or phone"</span>
                                </label>
                                <input
                                    id="identifier"
                                    type="text"
                                    autocomplete="username"
                                    placeholder="admin@natakahii.com or 07XXXXXXXX"
                                    on:input=move |ev| set_identifier.set(event_target_value(&ev))
                                    prop:value=identifier
                                    class="input input-bordered"
                                />
                            </div>
                            <div class="form-control">
                                <label class="label" for="password">
                                    <span class="label-text">"Password"</span>
                                </label>
                                <input
                                    id="password"
                                    type="password"
                                    autocomplete="current-password"
                                    placeholder="••••••••"
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    prop:value=password
                                    class="input input-bordered"
                                />
                            </div>
                            <div class="form-control mt-6">
                                <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                    {move || if is_submitting.get() {
                                        view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                    } else {
                                        "Sign in".into_any()
                                    }}
                                </button>
                            </div>
                            <button
                                type="button"
                                class="btn btn-link btn-sm"
                                on:click=move |_| set_show_reset.set(true)
                            >
                                "Forgot password?"
                            </button>
                        </form>
                    </div>
                </div>
            </div>
            <Show when=move || show_reset.get()>
                <ResetPasswordDialog on_close=move || set_show_reset.set(false) />
            </Show>
        </Show>
    }
}

// =========================================================
// 找回密码
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResetStep {
    /// 输入邮箱，发送验证码
    Request,
    /// 输入验证码和新密码
    Reset,
}

/// 提示后端消息，缺省时用给定文案；返回是否成功
fn report(toaster: Toaster, result: ApiResult<Option<String>>, ok: &str, failed: &str) -> bool {
    match result {
        Ok(message) => {
            toaster.success(message.unwrap_or_else(|| ok.to_string()));
            true
        }
        Err(e) => {
            toaster.error(e.backend_message().unwrap_or(failed).to_string());
            false
        }
    }
}

#[component]
fn ResetPasswordDialog(on_close: impl Fn() + Copy + Send + Sync + 'static) -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();

    let step = RwSignal::new(ResetStep::Request);
    let email = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirmation = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<&'static str>::None);

    // 发送与重发共用；只有首次发送成功才进入下一步
    let send_otp = move |resend: bool| {
        if let Some(message) = validate_reset_email(&email.get_untracked()) {
            set_error_msg.set(Some(message));
            return;
        }
        set_error_msg.set(None);
        set_busy.set(true);
        let address = email.get_untracked().trim().to_string();
        spawn_local(async move {
            if resend {
                let result = resend_reset_otp(&auth, address).await;
                report(
                    toaster,
                    result,
                    "OTP resent successfully.",
                    "Failed to resend OTP. Please try again.",
                );
            } else {
                let result = request_password_reset(&auth, address).await;
                let sent = report(
                    toaster,
                    result,
                    "Password reset OTP sent to your email.",
                    "Failed to send OTP. Please try again.",
                );
                if sent {
                    step.set(ResetStep::Reset);
                }
            }
            set_busy.set(false);
        });
    };

    let on_reset = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = ResetPasswordRequest {
            email: email.get_untracked().trim().to_string(),
            otp: otp.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            password_confirmation: confirmation.get_untracked(),
        };
        let errors = validate_password_reset(
            &request.email,
            &request.otp,
            &request.password,
            &request.password_confirmation,
        );
        if let Some(first) = errors.first() {
            set_error_msg.set(Some(first));
            return;
        }

        set_error_msg.set(None);
        set_busy.set(true);
        spawn_local(async move {
            let result = reset_password(&auth, request).await;
            let done = report(
                toaster,
                result,
                "Password reset successful. You can now login with your new password.",
                "Failed to reset password. Please try again.",
            );
            set_busy.set(false);
            if done {
                info!("password reset from login page");
                on_close();
            }
        });
    };

    let text_input = move |label: &'static str, kind: &'static str, value: RwSignal<String>| {
        view! {
            <label class="form-control">
                <span class="label-text">{label}</span>
                <input
                    type=kind
                    class="input input-bordered"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <div class="modal modal-open">
            <div class="modal-box space-y-4">
                <h3 class="font-bold text-lg">"Reset password"</h3>
                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>
                {move || match step.get() {
                    ResetStep::Request => view! {
                        <form
                            class="space-y-4"
                            novalidate
                            on:submit=move |ev: leptos::web_sys::SubmitEvent| {
                                ev.prevent_default();
                                send_otp(false);
                            }
                        >
                            {text_input("Email", "email", email)}
                            <div class="modal-action">
                                <button type="button" class="btn btn-ghost" on:click=move |_| on_close()>
                                    "Cancel"
                                </button>
                                <button class="btn btn-primary" disabled=move || busy.get()>
                                    "Send OTP"
                                </button>
                            </div>
                        </form>
                    }
                    .into_any(),
                    ResetStep::Reset => view! {
                        <form class="space-y-4" novalidate on:submit=on_reset>
                            <p class="text-sm text-base-content/70">
                                {move || format!("Enter the OTP sent to {}.", email.get().trim())}
                            </p>
                            {text_input("OTP", "text", otp)}
                            {text_input("New password", "password", password)}
                            {text_input("Confirm password", "password", confirmation)}
                            <div class="modal-action">
                                <button
                                    type="button"
                                    class="btn btn-ghost"
                                    disabled=move || busy.get()
                                    on:click=move |_| send_otp(true)
                                >
                                    "Resend OTP"
                                </button>
                                <button type="button" class="btn btn-ghost" on:click=move |_| on_close()>
                                    "Cancel"
                                </button>
                                <button class="btn btn-primary" disabled=move || busy.get()>
                                    "Reset password"
                                </button>
                            </div>
                        </form>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
