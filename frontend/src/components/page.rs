use leptos::prelude::*;

#[component]
pub fn PageHeader(
    title: &'static str,
    subtitle: &'static str,
    /// 右侧按钮区
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap items-end justify-between gap-4">
            <div>
                <h2 class="text-2xl font-bold">{title}</h2>
                <p class="text-base-content/70 text-sm">{subtitle}</p>
            </div>
            <div class="flex gap-2">{children.map(|c| c())}</div>
        </div>
    }
}

#[component]
pub fn Card(
    title: &'static str,
    #[prop(optional)] subtitle: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title">{title}</h3>
                {(!subtitle.is_empty())
                    .then(|| view! { <p class="text-base-content/70 text-sm">{subtitle}</p> })}
                {children()}
            </div>
        </div>
    }
}

/// 行内错误提示
#[component]
pub fn ErrorAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|m| {
            view! {
                <div role="alert" class="alert alert-error text-sm py-2">
                    <span>{m}</span>
                </div>
            }
        })
    }
}
