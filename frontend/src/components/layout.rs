use crate::auth::{logout, remove_photo, update_profile, use_auth};
use crate::components::toast::use_toaster;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use natakahii_admin_shared::nav::{NavItem, nav_for};
use natakahii_admin_shared::protocol::UpdateProfileRequest;

/// 后台页面外壳：侧边栏 + 顶栏 + 内容区
#[component]
pub fn AppLayout(item: &'static NavItem, children: Children) -> impl IntoView {
    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input id="app-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col">
                <Topbar item=item />
                <main class="p-4 md:p-8 space-y-6">{children()}</main>
            </div>
            <div class="drawer-side z-40">
                <label for="app-drawer" aria-label="close sidebar" class="drawer-overlay"></label>
                <Sidebar active=item.path />
            </div>
        </div>
    }
}

#[component]
fn Sidebar(active: &'static str) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let sections = move || auth.state.with(|s| nav_for(s.role().as_ref()));

    view! {
        <aside class="w-64 min-h-full bg-base-100 border-r border-base-300">
            <div class="px-6 py-5 text-xl font-bold text-primary">"NatakaHii Admin"</div>
            {move || {
                sections()
                    .into_iter()
                    .map(|section| {
                        view! {
                            <ul class="menu w-full">
                                <li class="menu-title">{section.title}</li>
                                {section
                                    .items
                                    .iter()
                                    .map(|item| {
                                        let path = item.path;
                                        let class = if path == active { "active" } else { "" };
                                        view! {
                                            <li>
                                                <a
                                                    href=path
                                                    class=class
                                                    data-icon=item.icon
                                                    on:click=move |ev| {
                                                        ev.prevent_default();
                                                        router.navigate(path);
                                                    }
                                                >
                                                    {item.label}
                                                </a>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                    })
                    .collect_view()
            }}
        </aside>
    }
}

#[component]
fn Topbar(item: &'static NavItem) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let user = auth.user();
    let (account_open, set_account_open) = signal(false);
    let (signing_out, set_signing_out) = signal(false);

    let display_name = move || {
        user.with(|u| u.as_ref().map(|u| u.display_name().to_string()))
            .unwrap_or_else(|| "Admin".to_string())
    };
    let initials = move || user.with(|u| u.as_ref().map(|u| u.initials()).unwrap_or_default());
    let photo = move || user.with(|u| u.as_ref().and_then(|u| u.profile_photo.clone()));
    let role_label = move || {
        auth.state
            .with(|s| s.role().map(|r| r.label().to_string()))
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        set_signing_out.set(true);
        spawn_local(async move {
            logout(&auth).await;
            set_signing_out.set(false);
            router.replace("/");
        });
    };

    view! {
        <div class="navbar bg-base-100 shadow px-4">
            <div class="flex-none lg:hidden">
                <label for="app-drawer" class="btn btn-square btn-ghost">"☰"</label>
            </div>
            <div class="flex-1">
                <h1 class="text-lg font-semibold">{item.label}</h1>
            </div>
            <div class="flex-none flex items-center gap-3">
                <button class="btn btn-ghost gap-2" on:click=move |_| set_account_open.set(true)>
                    {move || match photo() {
                        Some(src) => view! {
                            <div class="avatar">
                                <div class="rounded-full w-8">
                                    <img src=src alt="Profile photo" />
                                </div>
                            </div>
                        }
                        .into_any(),
                        None => view! {
                            <div class="avatar placeholder">
                                <div class="bg-primary text-primary-content rounded-full w-8">
                                    <span class="text-xs">{initials}</span>
                                </div>
                            </div>
                        }
                        .into_any(),
                    }}
                    <div class="hidden md:flex flex-col items-start leading-tight">
                        <span class="text-sm">{display_name}</span>
                        <span class="text-xs text-base-content/60">{role_label}</span>
                    </div>
                </button>
                <button
                    class="btn btn-outline btn-error btn-sm"
                    on:click=on_logout
                    disabled=move || signing_out.get()
                >
                    "Logout"
                </button>
            </div>
        </div>
        <Show when=move || account_open.get()>
            <AccountDialog on_close=move || set_account_open.set(false) />
        </Show>
    }
}

/// 个人资料弹窗
#[component]
fn AccountDialog(on_close: impl Fn() + Copy + Send + Sync + 'static) -> impl IntoView {
    let auth = use_auth();
    let toaster = use_toaster();
    let current = auth.user().get_untracked().unwrap_or_default();

    let (name, set_name) = signal(current.name.clone().unwrap_or_default());
    let (phone, set_phone) = signal(current.phone.clone().unwrap_or_default());
    let (saving, set_saving) = signal(false);
    let user = auth.user();
    let has_photo = move || user.with(|u| u.as_ref().is_some_and(|u| u.profile_photo.is_some()));

    let on_save = move |_| {
        let changes = UpdateProfileRequest::from_account_form(&name.get_untracked(), &phone.get_untracked());
        set_saving.set(true);
        spawn_local(async move {
            match update_profile(&auth, changes).await {
                Ok(_) => {
                    toaster.success("Profile updated.");
                    on_close();
                }
                Err(e) => toaster.error(e.display_message().to_string()),
            }
            set_saving.set(false);
        });
    };

    let on_remove_photo = move |_| {
        set_saving.set(true);
        spawn_local(async move {
            match remove_photo(&auth).await {
                Ok(_) => toaster.success("Profile photo removed."),
                Err(e) => toaster.error(e.backend_message().unwrap_or("Failed to remove photo.").to_string()),
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="modal modal-open">
            <div class="modal-box space-y-4">
                <h3 class="font-bold text-lg">"My Account"</h3>
                <p class="text-sm text-base-content/60">
                    {current.email.clone().unwrap_or_default()}
                </p>
                <label class="form-control">
                    <span class="label-text">"Name"</span>
                    <input
                        class="input input-bordered"
                        prop:value=name
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-control">
                    <span class="label-text">"Phone"</span>
                    <input
                        class="input input-bordered"
                        prop:value=phone
                        on:input=move |ev| set_phone.set(event_target_value(&ev))
                    />
                </label>
                <Show when=has_photo>
                    <button
                        class="btn btn-outline btn-error btn-sm"
                        on:click=on_remove_photo
                        disabled=move || saving.get()
                    >
                        "Remove photo"
                    </button>
                </Show>
                <div class="modal-action">
                    <button class="btn btn-ghost" on:click=move |_| on_close()>
                        "Cancel"
                    </button>
                    <button class="btn btn-primary" on:click=on_save disabled=move || saving.get()>
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}
