use crate::resources::{CellKind, Column, badge_class};
use leptos::prelude::*;
use serde_json::Value;

/// 通用数据表格
///
/// `row_actions` 为每一行额外渲染一列操作按钮。
#[component]
pub fn DataTable(
    columns: &'static [Column],
    #[prop(into)] rows: Signal<Vec<Value>>,
    empty_text: &'static str,
    #[prop(optional_no_strip)] row_actions: Option<Callback<Value, AnyView>>,
) -> impl IntoView {
    let has_actions = row_actions.is_some();
    let span = (columns.len() + usize::from(has_actions)).to_string();

    view! {
        <div class="overflow-x-auto w-full">
            <table class="table table-zebra w-full">
                <thead>
                    <tr>
                        {columns.iter().map(|c| view! { <th>{c.header}</th> }).collect_view()}
                        {has_actions.then(|| view! { <th>"Actions"</th> })}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let span = span.clone();
                        let rows = rows.get();
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td colspan=span class="text-center py-8 text-base-content/50">
                                        {empty_text}
                                    </td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .map(|row| {
                                let cells = columns
                                    .iter()
                                    .map(|c| {
                                        let text = c.render(&row);
                                        if c.kind == CellKind::Badge {
                                            let class = badge_class(&text);
                                            view! { <td><span class=class>{text}</span></td> }.into_any()
                                        } else {
                                            view! { <td>{text}</td> }.into_any()
                                        }
                                    })
                                    .collect_view();
                                let actions = row_actions
                                    .map(|render| view! { <td>{render.run(row.clone())}</td> });
                                view! { <tr>{cells}{actions}</tr> }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
        </div>
    }
}
