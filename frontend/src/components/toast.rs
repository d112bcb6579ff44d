use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// 自动关闭延迟（毫秒）
const AUTO_DISMISS_MS: u32 = 3_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
struct Notice {
    id: u64,
    tone: Tone,
    message: String,
}

/// 全局提示
///
/// 同一时间只显示一条，新消息覆盖旧消息；旧消息的定时器不会关掉新消息。
#[derive(Clone, Copy)]
pub struct Toaster {
    current: RwSignal<Option<Notice>>,
    next_id: StoredValue<u64>,
}

impl Toaster {
    fn new() -> Self {
        Self {
            current: RwSignal::new(None),
            next_id: StoredValue::new(0),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Tone::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Tone::Error, message.into());
    }

    fn show(&self, tone: Tone, message: String) {
        let id = self.next_id.get_value() + 1;
        self.next_id.set_value(id);
        self.current.set(Some(Notice { id, tone, message }));

        let current = self.current;
        let timeout = Timeout::new(AUTO_DISMISS_MS, move || {
            let _ = current.try_update(|n| {
                if n.as_ref().is_some_and(|n| n.id == id) {
                    *n = None;
                }
            });
        });
        let _ = timeout.forget();
    }

    fn dismiss(&self) {
        self.current.set(None);
    }
}

pub fn provide_toaster() {
    provide_context(Toaster::new());
}

pub fn use_toaster() -> Toaster {
    use_context::<Toaster>().expect("Toaster should be provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toaster = use_toaster();

    move || {
        toaster.current.get().map(|notice| {
            let class = match notice.tone {
                Tone::Success => "alert alert-success shadow-lg",
                Tone::Error => "alert alert-error shadow-lg",
            };
            view! {
                <div class="toast toast-top toast-end z-50">
                    <div class=class role="status">
                        <span>{notice.message}</span>
                        <button class="btn btn-ghost btn-xs" on:click=move |_| toaster.dismiss()>
                            "✕"
                        </button>
                    </div>
                </div>
            }
        })
    }
}
