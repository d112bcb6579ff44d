use crate::auth::use_auth;
use crate::components::page::{Card, PageHeader};
use crate::components::status::Loader;
use crate::components::table::DataTable;
use crate::components::toast::use_toaster;
use crate::resources::{ESCROW_COLUMNS, escrow_holds};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;

#[component]
pub fn EscrowPage() -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let (order_id, set_order_id) = signal(String::new());
    let holds = RwSignal::new(Vec::<Value>::new());
    let (loading, set_loading) = signal(false);

    let on_load = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let id = order_id.get_untracked().trim().to_string();
        if id.is_empty() {
            toaster.error("Enter an order ID first.");
            return;
        }

        let api = auth.api();
        set_loading.set(true);
        spawn_local(async move {
            match api.escrow_for_order(&id).await {
                Ok(body) => holds.set(escrow_holds(body)),
                Err(e) => {
                    holds.set(Vec::new());
                    toaster.error(
                        e.backend_message().unwrap_or("Failed to load escrow holds.").to_string(),
                    );
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        <PageHeader title="Escrow" subtitle="Inspect escrow holds for an order" />
        <Card title="Lookup">
            <form class="flex flex-wrap items-end gap-4" on:submit=on_load>
                <label class="form-control">
                    <span class="label-text">"Order ID"</span>
                    <input
                        class="input input-bordered"
                        placeholder="e.g. 1024"
                        prop:value=order_id
                        on:input=move |ev| set_order_id.set(event_target_value(&ev))
                    />
                </label>
                <button class="btn btn-primary" disabled=move || loading.get()>
                    "Load"
                </button>
            </form>
        </Card>
        <Card title="Escrow Holds">
            <Show when=move || loading.get() fallback=move || {
                view! {
                    <DataTable
                        columns=ESCROW_COLUMNS
                        rows=holds
                        empty_text="No escrow holds loaded."
                    />
                }
            }>
                <Loader label="Loading escrow holds..." />
            </Show>
        </Card>
    }
}
