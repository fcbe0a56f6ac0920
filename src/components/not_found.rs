use leptos::*;
use leptos_router::*;

use crate::icons::Icon;
use crate::routes;

/// Catch-all for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <div class="page not-found-page">
            <div class="empty-state">
                <div class="empty-state-icon">
                    <Icon name="alert-circle" size=24 />
                </div>
                <h1>"Page not found"</h1>
                <p>"The page you are looking for does not exist or has been moved."</p>
                <A href=routes::HOME class="button button-primary">
                    "Back to dashboard"
                </A>
            </div>
        </div>
    }
}
