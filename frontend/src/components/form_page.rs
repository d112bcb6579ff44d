use crate::auth::use_auth;
use crate::components::page::{Card, PageHeader};
use crate::components::status::Loader;
use crate::components::toast::use_toaster;
use crate::resources::{FieldDef, FieldKind, FormDef, FormValues};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use tracing::warn;

/// 独立的表单页
#[component]
pub fn FormPage(def: &'static FormDef) -> impl IntoView {
    view! {
        <PageHeader title=def.title subtitle=def.subtitle />
        <FormCard def=def />
    }
}

/// 表单卡片
///
/// 初始值取字段默认值（编辑时取原记录）；需要从后端读取初始值的表单在加载完成前显示加载状态。
#[component]
pub fn FormCard(
    def: &'static FormDef,
    /// 正在编辑的原记录
    #[prop(optional)]
    record: Option<Value>,
    /// 提交成功后的回调
    #[prop(optional)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let initial = match &record {
        Some(row) => def.values_from(row),
        None => def.defaults(),
    };
    let values = RwSignal::new(initial);
    let record = StoredValue::new(record);
    let (loading, set_loading) = signal(true);
    let (submitting, set_submitting) = signal(false);

    let api = auth.api();
    spawn_local(async move {
        match def.kind.load(&api).await {
            Ok(Some(loaded)) => {
                let _ = values.try_update(|v| v.extend(loaded));
            }
            Ok(None) => {}
            Err(e) => {
                warn!(form = def.title, error = %e, "initial values unavailable");
                toaster.error(e.backend_message().unwrap_or("Failed to load form data.").to_string());
            }
        }
        let _ = set_loading.try_set(false);
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let body = match def.to_body(&values.get_untracked()) {
            Ok(body) => body,
            Err(message) => {
                toaster.error(message);
                return;
            }
        };

        let api = auth.api();
        let record = record.get_value();
        set_submitting.set(true);
        spawn_local(async move {
            match def.kind.submit(&api, body, record.as_ref()).await {
                Ok(_) => {
                    toaster.success(def.success);
                    if def.reset_after_submit {
                        values.set(def.defaults());
                    }
                    if let Some(callback) = on_success {
                        callback.run(());
                    }
                }
                Err(e) => toaster.error(e.backend_message().unwrap_or(def.failure).to_string()),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Card title=def.title subtitle=def.subtitle>
            <Show when=move || !loading.get() fallback=|| view! { <Loader label="Loading..." /> }>
                <form class="grid gap-4 md:grid-cols-2" on:submit=on_submit novalidate>
                    {def
                        .fields
                        .iter()
                        .map(|field| view! { <FormField field=field values=values /> })
                        .collect_view()}
                    <div class="md:col-span-2">
                        <button class="btn btn-primary" disabled=move || submitting.get()>
                            {def.submit_label}
                        </button>
                    </div>
                </form>
            </Show>
        </Card>
    }
}

#[component]
fn FormField(field: &'static FieldDef, values: RwSignal<FormValues>) -> impl IntoView {
    let key = field.key;
    let value = move || values.with(|v| v.get(key).cloned().unwrap_or_default());
    let set_value = move |next: String| {
        values.update(|v| {
            v.insert(key, next);
        });
    };

    let control = match field.kind {
        FieldKind::Select(options) => view! {
            <select class="select select-bordered" prop:value=value on:change=move |ev| set_value(event_target_value(&ev))>
                {options
                    .iter()
                    .map(|o| view! { <option value=*o>{*o}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Toggle => view! {
            <select class="select select-bordered" prop:value=value on:change=move |ev| set_value(event_target_value(&ev))>
                <option value="1">"true"</option>
                <option value="0">"false"</option>
            </select>
        }
        .into_any(),
        FieldKind::Number | FieldKind::Integer => view! {
            <input
                type="number"
                class="input input-bordered"
                placeholder=field.placeholder
                prop:value=value
                on:input=move |ev| set_value(event_target_value(&ev))
            />
        }
        .into_any(),
        FieldKind::Text | FieldKind::List => view! {
            <input
                class="input input-bordered"
                placeholder=field.placeholder
                prop:value=value
                on:input=move |ev| set_value(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <label class="form-control">
            <span class="label-text">{field.label}</span>
            {control}
        </label>
    }
}
