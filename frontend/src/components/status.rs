use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn Loader(#[prop(optional)] label: &'static str) -> impl IntoView {
    view! {
        <div class="flex items-center gap-2 py-4 text-base-content/60">
            <span class="loading loading-spinner loading-md"></span>
            {label}
        </div>
    }
}

/// 会话启动期间的整页占位
#[component]
pub fn FullScreenLoader() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

#[component]
pub fn ForbiddenPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-warning">"403"</h1>
                <p class="text-xl">"You do not have access to this page."</p>
                <Link to="/app/admin/dashboard" class="btn btn-primary">
                    "Back to dashboard"
                </Link>
            </div>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center space-y-4">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl">"Page not found."</p>
                <Link to="/" class="btn btn-ghost">
                    "Go home"
                </Link>
            </div>
        </div>
    }
}
