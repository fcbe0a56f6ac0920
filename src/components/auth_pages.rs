use leptos::*;
use leptos_router::*;

use crate::auth::AuthProvider;
use crate::icons::Icon;
use crate::routes;

fn use_auth_provider() -> AuthProvider {
    use_context::<AuthProvider>().expect("AuthProvider must be provided by the app root")
}

/// Redirect target carried in the query, if any.
fn redirect_param() -> Option<String> {
    use_query_map().with_untracked(|query| query.get("redirect").cloned())
}

/// Login page: hands the browser to the provider-hosted sign-in screen.
#[component]
pub fn Login() -> impl IntoView {
    let provider = use_auth_provider();
    let href = provider.login_href(redirect_param().as_deref());

    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <div class="brand-mark large">"S"</div>
                <h1>"Sign in to StaffSphere"</h1>
                <p>"Use your organization account to continue."</p>
                <a class="button button-primary button-block" href=href rel="external">
                    "Continue to sign in"
                </a>
                <p class="auth-switch">
                    "No account yet? "
                    <A href=routes::SIGNUP>"Create one"</A>
                </p>
            </div>
        </div>
    }
}

/// Signup page: hands the browser to the provider-hosted registration screen.
#[component]
pub fn Signup() -> impl IntoView {
    let provider = use_auth_provider();
    let href = provider.signup_href(redirect_param().as_deref());

    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <div class="brand-mark large">"S"</div>
                <h1>"Create your StaffSphere account"</h1>
                <p>"Registration happens with your organization's identity provider."</p>
                <a class="button button-primary button-block" href=href rel="external">
                    "Continue to sign up"
                </a>
                <p class="auth-switch">
                    "Already registered? "
                    <A href=routes::LOGIN>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}

/// Callback landing page. The session shell picks the session up and
/// navigates away; this view only bridges the gap.
#[component]
pub fn AuthCallback() -> impl IntoView {
    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <div class="loading">"Signing you in..."</div>
            </div>
        </div>
    }
}

/// Auth error page showing the provider's message from the query string.
#[component]
pub fn AuthErrorPage() -> impl IntoView {
    let query = use_query_map();
    let message = move || {
        query.with(|params| {
            params
                .get("message")
                .cloned()
                .unwrap_or_else(|| "Something went wrong during sign-in.".to_string())
        })
    };

    view! {
        <div class="auth-page">
            <div class="card auth-card">
                <div class="confirm-icon">
                    <Icon name="alert-triangle" size=24 />
                </div>
                <h1>"Authentication error"</h1>
                <p class="auth-error-message">{message}</p>
                <A href=routes::LOGIN class="button button-primary">
                    "Back to sign in"
                </A>
            </div>
        </div>
    }
}
