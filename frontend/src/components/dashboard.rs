use crate::auth::use_auth;
use crate::components::page::{Card, ErrorAlert, PageHeader};
use crate::components::status::Loader;
use crate::components::table::DataTable;
use crate::resources::{RECENT_ORDER_COLUMNS, payload_data};
use leptos::prelude::*;
use leptos::task::spawn_local;
use natakahii_admin::QueryParams;
use natakahii_admin_shared::format::{format_tzs, safe_text};
use serde_json::Value;

/// 统计卡片：`(标题, 字段名)`
const DASHBOARD_STATS: &[(&str, &str)] = &[
    ("Total Users", "total_users"),
    ("Total Vendors", "total_vendors"),
    ("Total Products", "total_products"),
    ("Total Orders", "total_orders"),
];

const QUEUE_STATS: &[(&str, &str)] = &[
    ("Pending vendor verifications", "pending_vendor_verifications"),
    ("Open disputes", "open_disputes"),
    ("Open support tickets", "open_tickets"),
];

const ANALYTICS_STATS: &[(&str, &str)] = &[
    ("Total Users", "total_users"),
    ("Total Vendors", "total_vendors"),
    ("Total Orders", "total_orders"),
    ("Total Revenue", "total_revenue"),
];

/// 计数字段缺失时显示 0
fn count(stats: &Value, key: &str) -> String {
    match stats.get(key) {
        Some(v) if !v.is_null() => safe_text(v),
        _ => "0".to_string(),
    }
}

#[component]
fn StatGrid(stats: Value, items: &'static [(&'static str, &'static str)]) -> impl IntoView {
    view! {
        <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
            {items
                .iter()
                .map(|(label, key)| {
                    view! {
                        <div class="stat">
                            <div class="stat-title">{*label}</div>
                            <div class="stat-value text-primary">{count(&stats, key)}</div>
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let (stats, set_stats) = signal(Option::<Value>::None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);

    let load = move || {
        let api = auth.api();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api.dashboard().await {
                Ok(body) => set_stats.set(Some(payload_data(body))),
                Err(e) => set_error.set(Some(
                    e.backend_message().unwrap_or("Failed to load dashboard.").to_string(),
                )),
            }
            set_loading.set(false);
        });
    };
    load();

    view! {
        <PageHeader title="Dashboard" subtitle="Marketplace health at a glance">
            <button class="btn btn-secondary btn-sm" on:click=move |_| load()>
                "Refresh"
            </button>
        </PageHeader>
        <Show when=move || loading.get()>
            <Loader label="Loading dashboard..." />
        </Show>
        <ErrorAlert message=error />
        {move || {
            stats
                .get()
                .map(|stats| {
                    let recent = stats
                        .get("recent_orders")
                        .and_then(Value::as_array)
                        .cloned()
                        .unwrap_or_default();
                    let revenue = format_tzs(stats.get("total_revenue").unwrap_or(&Value::Null));
                    view! {
                        <StatGrid stats=stats.clone() items=DASHBOARD_STATS />
                        <div class="grid gap-6 md:grid-cols-2">
                            <Card title="Revenue" subtitle="Gross merchandise value">
                                <div class="text-3xl font-bold">{revenue}</div>
                            </Card>
                            <Card title="Work queues" subtitle="Items waiting for an admin">
                                <ul class="space-y-2">
                                    {QUEUE_STATS
                                        .iter()
                                        .map(|(label, key)| {
                                            view! {
                                                <li class="flex justify-between">
                                                    <span>{*label}</span>
                                                    <strong>{count(&stats, key)}</strong>
                                                </li>
                                            }
                                        })
                                        .collect_view()}
                                </ul>
                            </Card>
                        </div>
                        <Card title="Recent Orders">
                            <DataTable
                                columns=RECENT_ORDER_COLUMNS
                                rows=Signal::stored(recent)
                                empty_text="No recent orders."
                            />
                        </Card>
                    }
                })
        }}
    }
}

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let auth = use_auth();
    let (from, set_from) = signal(String::new());
    let (to, set_to) = signal(String::new());
    let (data, set_data) = signal(Option::<Value>::None);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);

    let load = move |_| {
        let api = auth.api();
        let params = QueryParams::new()
            .with("from", from.get_untracked())
            .with("to", to.get_untracked());
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api.analytics_overview(&params).await {
                Ok(body) => set_data.set(Some(payload_data(body))),
                Err(e) => {
                    set_data.set(None);
                    set_error.set(Some(
                        e.backend_message().unwrap_or("Failed to load analytics.").to_string(),
                    ));
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <PageHeader title="Analytics" subtitle="Platform analytics overview" />
        <Card title="Filters" subtitle="Optional date range">
            <div class="grid gap-4 md:grid-cols-3 items-end">
                <label class="form-control">
                    <span class="label-text">"From (YYYY-MM-DD)"</span>
                    <input
                        class="input input-bordered"
                        placeholder="2026-02-01"
                        prop:value=from
                        on:input=move |ev| set_from.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-control">
                    <span class="label-text">"To (YYYY-MM-DD)"</span>
                    <input
                        class="input input-bordered"
                        placeholder="2026-02-09"
                        prop:value=to
                        on:input=move |ev| set_to.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn-primary" on:click=load disabled=move || loading.get()>
                    "Load"
                </button>
            </div>
        </Card>
        <Show when=move || loading.get()>
            <Loader label="Loading analytics..." />
        </Show>
        <ErrorAlert message=error />
        {move || match data.get() {
            Some(stats) => view! { <StatGrid stats=stats items=ANALYTICS_STATS /> }.into_any(),
            None => view! {
                <Card title="No analytics loaded" subtitle="Click Load to fetch from backend">
                    <span></span>
                </Card>
            }
            .into_any(),
        }}
    }
}
