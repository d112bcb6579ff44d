//! 通用列表页
//!
//! 由 [`ResourceDef`] 描述：筛选条件、表格列、行操作，以及可选的新建 / 编辑表单。

use crate::auth::{AuthContext, use_auth};
use crate::components::form_page::FormCard;
use crate::components::page::{Card, ErrorAlert, PageHeader};
use crate::components::status::Loader;
use crate::components::table::DataTable;
use crate::components::toast::{Toaster, use_toaster};
use crate::hooks::{ListResource, use_list_resource};
use crate::resources::{
    ActionInput, ActionKind, Filter, FilterKind, INSPECTION_COLUMNS, ResourceDef, RowAction,
    payload_data,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use natakahii_admin::QueryParams;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

/// 正在填写的行操作
#[derive(Clone)]
struct PendingAction {
    action: RowAction,
    row: Value,
}

#[component]
pub fn ResourcePage(def: &'static ResourceDef) -> impl IntoView {
    let ctx = ActionContext {
        auth: use_auth(),
        toaster: use_toaster(),
    };
    let filters = RwSignal::new(
        def.filters
            .iter()
            .map(|f| (f.param, f.default.to_string()))
            .collect::<BTreeMap<_, _>>(),
    );
    let params = Memo::new(move |_| {
        filters.with(|values| {
            let mut params = QueryParams::new();
            for (param, value) in values {
                params.set(param, value.as_str());
            }
            params
        })
    });
    let list = use_list_resource(def.endpoint, params.into());

    let pending = RwSignal::new(Option::<PendingAction>::None);
    let inspections = RwSignal::new(Option::<Vec<Value>>::None);
    let editing = RwSignal::new(Option::<Value>::None);

    let row_actions = (!def.actions.is_empty() || def.edit_form.is_some()).then(|| {
        Callback::new(move |row: Value| {
            let edit = def.edit_form.map(|_| {
                let row = row.clone();
                view! {
                    <button
                        class="btn btn-xs btn-outline btn-primary mr-1"
                        on:click=move |_| editing.set(Some(row.clone()))
                    >
                        "Edit"
                    </button>
                }
            });
            let actions = def
                .actions
                .iter()
                .map(|action| {
                    let row = row.clone();
                    let on_click = move |_| {
                        if action.needs_dialog() {
                            pending.set(Some(PendingAction {
                                action: *action,
                                row: row.clone(),
                            }));
                        } else if action.confirm.is_none_or(confirmed) {
                            let input = action.initial_input(&row);
                            ctx.execute(*action, row.clone(), input, list, inspections);
                        }
                    };
                    view! {
                        <button class="btn btn-xs btn-outline mr-1" on:click=on_click>
                            {action.label}
                        </button>
                    }
                })
                .collect_view();
            (edit, actions).into_any()
        })
    });

    let rows = Signal::derive(move || list.state.with(|s| s.data.clone()));
    let error = Signal::derive(move || list.state.with(|s| s.error.clone()));
    let loading = move || list.state.with(|s| s.loading);

    view! {
        <PageHeader title=def.title subtitle=def.subtitle>
            <button class="btn btn-secondary btn-sm" on:click=move |_| list.reload()>
                "Refresh"
            </button>
        </PageHeader>
        {def.form.map(|form| {
            view! { <FormCard def=form on_success=Callback::new(move |_| list.reload()) /> }
        })}
        {(!def.filters.is_empty()).then(|| view! { <FilterBar filters=def.filters values=filters /> })}
        <Card title=def.title>
            <ErrorAlert message=error />
            <Show when=loading>
                <Loader label="Loading..." />
            </Show>
            <DataTable
                columns=def.columns
                rows=rows
                empty_text=def.empty_text
                row_actions=row_actions
            />
        </Card>
        {move || {
            pending.get().map(|p| {
                view! {
                    <ActionDialog
                        pending=p
                        on_close=move || pending.set(None)
                        ctx=ctx
                        list=list
                        inspections=inspections
                    />
                }
            })
        }}
        {move || {
            let form = def.edit_form?;
            editing.get().map(|row| {
                let on_saved = Callback::new(move |_| {
                    editing.set(None);
                    list.reload();
                });
                view! {
                    <div class="modal modal-open">
                        <div class="modal-box max-w-2xl">
                            <FormCard def=form record=row on_success=on_saved />
                            <div class="modal-action">
                                <button class="btn btn-ghost" on:click=move |_| editing.set(None)>
                                    "Cancel"
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
        }}
        {move || {
            inspections.get().map(|items| {
                view! {
                    <div class="modal modal-open">
                        <div class="modal-box max-w-3xl">
                            <h3 class="font-bold text-lg">"Shipment Inspections"</h3>
                            <DataTable
                                columns=INSPECTION_COLUMNS
                                rows=Signal::stored(items)
                                empty_text="No inspections recorded."
                            />
                            <div class="modal-action">
                                <button class="btn" on:click=move |_| inspections.set(None)>
                                    "Close"
                                </button>
                            </div>
                        </div>
                    </div>
                }
            })
        }}
    }
}

#[component]
fn FilterBar(
    filters: &'static [Filter],
    values: RwSignal<BTreeMap<&'static str, String>>,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body grid gap-4 md:grid-cols-3">
                {filters
                    .iter()
                    .map(|f| {
                        let param = f.param;
                        let value = move || values.with(|v| v.get(param).cloned().unwrap_or_default());
                        let set_value = move |next: String| {
                            values.update(|v| {
                                v.insert(param, next);
                            });
                        };
                        let control = match f.kind {
                            FilterKind::Text { placeholder } => view! {
                                <input
                                    class="input input-bordered"
                                    placeholder=placeholder
                                    prop:value=value
                                    on:input=move |ev| set_value(event_target_value(&ev))
                                />
                            }
                            .into_any(),
                            FilterKind::Select { options } => view! {
                                <select
                                    class="select select-bordered"
                                    prop:value=value
                                    on:change=move |ev| set_value(event_target_value(&ev))
                                >
                                    {options
                                        .iter()
                                        .map(|(v, label)| view! { <option value=*v>{*label}</option> })
                                        .collect_view()}
                                </select>
                            }
                            .into_any(),
                        };
                        view! {
                            <label class="form-control">
                                <span class="label-text">{f.label}</span>
                                {control}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// 行操作弹窗
#[component]
fn ActionDialog(
    pending: PendingAction,
    on_close: impl Fn() + Copy + Send + Sync + 'static,
    ctx: ActionContext,
    list: ListResource,
    inspections: RwSignal<Option<Vec<Value>>>,
) -> impl IntoView {
    let PendingAction { action, row } = pending;
    let input = RwSignal::new(action.initial_input(&row));

    let on_confirm = move |_| {
        ctx.execute(action, row.clone(), input.get_untracked(), list, inspections);
        on_close();
    };

    view! {
        <div class="modal modal-open">
            <div class="modal-box space-y-4">
                <h3 class="font-bold text-lg">{action.label}</h3>
                {(!action.choices.is_empty()).then(|| {
                    view! {
                        <label class="form-control">
                            <span class="label-text">{action.choice_label}</span>
                            <select
                                class="select select-bordered"
                                prop:value=move || input.with(|i| i.choice.clone())
                                on:change=move |ev| {
                                    let next = event_target_value(&ev);
                                    input.update(|i| i.choice = next);
                                }
                            >
                                {action
                                    .choices
                                    .iter()
                                    .map(|c| view! { <option value=*c>{*c}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                    }
                })}
                {action.amount_label.map(|label| {
                    view! {
                        <label class="form-control">
                            <span class="label-text">{label}</span>
                            <input
                                type="number"
                                class="input input-bordered"
                                prop:value=move || input.with(|i| i.amount.clone())
                                on:input=move |ev| {
                                    let next = event_target_value(&ev);
                                    input.update(|i| i.amount = next);
                                }
                            />
                        </label>
                    }
                })}
                {action.notes_label.map(|label| {
                    view! {
                        <label class="form-control">
                            <span class="label-text">{label}</span>
                            <textarea
                                class="textarea textarea-bordered"
                                prop:value=move || input.with(|i| i.notes.clone())
                                on:input=move |ev| {
                                    let next = event_target_value(&ev);
                                    input.update(|i| i.notes = next);
                                }
                            ></textarea>
                        </label>
                    }
                })}
                <div class="modal-action">
                    <button class="btn btn-ghost" on:click=move |_| on_close()>
                        "Cancel"
                    </button>
                    <button class="btn btn-primary" on:click=on_confirm>
                        "Submit"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// 浏览器确认框；不可用时视为取消
fn confirmed(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 执行行操作所需的上下文
#[derive(Clone, Copy)]
struct ActionContext {
    auth: AuthContext,
    toaster: Toaster,
}

impl ActionContext {
    fn execute(
        self,
        action: RowAction,
        row: Value,
        input: ActionInput,
        list: ListResource,
        inspections: RwSignal<Option<Vec<Value>>>,
    ) {
        let api = self.auth.api();
        let toaster = self.toaster;
        spawn_local(async move {
            match action.kind.run(&api, &row, &input).await {
                Ok(body) if action.kind == ActionKind::ViewInspections => {
                    let items = match payload_data(body) {
                        Value::Array(items) => items,
                        _ => Vec::new(),
                    };
                    let _ = inspections.try_set(Some(items));
                }
                Ok(_) => {
                    info!(action = action.label, "row action applied");
                    toaster.success(action.success);
                    list.reload();
                }
                Err(e) => toaster.error(e.backend_message().unwrap_or(action.failure).to_string()),
            }
        });
    }
}
