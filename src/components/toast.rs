use leptos::*;

use crate::icons::Icon;
use crate::state::use_toast;

/// Renders the notification queue; mounted once at the app root.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toast_ctx = use_toast();

    view! {
        <div class="toast-container" role="status" aria-live="polite">
            <For
                each=move || toast_ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class()>
                            <Icon name=toast.kind.icon() size=18 />
                            <span class="toast-message">{toast.message.clone()}</span>
                            <button
                                class="toast-dismiss"
                                aria-label="Dismiss notification"
                                on:click=move |_| toast_ctx.dismiss(id)
                            >
                                <Icon name="x" size=14 />
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
