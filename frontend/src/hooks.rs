//! 列表资源 Hook
//!
//! 地址或查询参数变化、或调用 [`ListResource::reload`] 时重新加载。
//! 过期响应由核心的 [`ListLoader`] 丢弃，这里只负责把结果写进信号。

use crate::auth::use_auth;
use leptos::prelude::*;
use leptos::task::spawn_local;
use natakahii_admin::{ListLoader, ListQuery, ListState, QueryParams};

#[derive(Clone, Copy)]
pub struct ListResource {
    pub state: RwSignal<ListState>,
    version: RwSignal<u64>,
}

impl ListResource {
    /// 以相同参数重新加载
    pub fn reload(&self) {
        self.version.update(|v| *v += 1);
    }
}

pub fn use_list_resource(url: &'static str, params: Signal<QueryParams>) -> ListResource {
    let loader: StoredValue<ListLoader, LocalStorage> =
        StoredValue::new_local(use_auth().services().list_loader());
    let state = RwSignal::new(ListState::default());
    let version = RwSignal::new(0_u64);

    Effect::new(move |_| {
        version.track();
        let query = ListQuery::new(url, params.get());
        state.update(|s| *s = s.begin());

        let loader = loader.get_value();
        spawn_local(async move {
            if let Some(next) = loader.load(&query).await {
                let _ = state.try_set(next);
            }
        });
    });

    ListResource { state, version }
}
