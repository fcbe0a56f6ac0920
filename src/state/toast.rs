//! Transient user notifications.

use leptos::*;

/// How long a toast stays on screen.
#[cfg(target_arch = "wasm32")]
const DISMISS_AFTER_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
            ToastKind::Info => "toast toast-info",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "check-circle",
            ToastKind::Error => "x-circle",
            ToastKind::Info => "alert-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub kind: ToastKind,
    pub message: String,
}

/// Notification queue; push from anywhere, rendered by the toast host.
#[derive(Clone, Copy)]
pub struct ToastContext {
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_id: StoredValue<u32>,
}

impl ToastContext {
    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));

        self.set_toasts.update(|toasts| {
            toasts.push(Toast { id, kind, message });
        });

        #[cfg(target_arch = "wasm32")]
        {
            use gloo_timers::callback::Timeout;

            let set_toasts = self.set_toasts;
            Timeout::new(DISMISS_AFTER_MS, move || {
                set_toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
            })
            .forget();
        }
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }
}

fn create_toast_context() -> ToastContext {
    let (toasts, set_toasts) = create_signal(Vec::new());

    ToastContext {
        toasts,
        set_toasts,
        next_id: store_value(0),
    }
}

/// Provide the toast context to the application. Call at the app root.
pub fn provide_toast_context() {
    provide_context(create_toast_context());
}

/// Hook to access the toast queue.
pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext must be provided by a parent component")
}
