//! Session shell: configuration, auth bootstrap, redirect resolution and the
//! gated route tree.

use std::rc::Rc;

use leptos::*;
use leptos_router::*;

use crate::api::{provide_services, HttpRecordStore, RecordStore};
use crate::auth::{self, AuthProvider, UserIdentity};
use crate::components::{
    AuthCallback, AuthErrorPage, Employees, Home, Layout, Login, NotFound, Signup, ToastHost,
};
use crate::config::AppConfig;
use crate::state::{
    provide_session_context, provide_theme_context, provide_toast_context, use_session, use_toast,
    SessionWriter,
};

/// Shell-owned operations exposed to the tree. Views call these instead of
/// touching session state, which keeps the shell the only writer.
#[derive(Clone)]
pub struct ShellActions {
    pub logout: Callback<()>,
}

/// Application root: shared state, configuration, injected backend adapter,
/// and the router around the session shell.
#[component]
pub fn App() -> impl IntoView {
    provide_theme_context();
    provide_toast_context();

    match AppConfig::from_env() {
        Ok(config) => view! { <ReadyApp config=config /> }.into_view(),
        Err(err) => {
            log::error!("Refusing to start without backend configuration: {err}");
            view! { <ConfigErrorScreen message=err.to_string() /> }.into_view()
        }
    }
}

#[component]
fn ReadyApp(config: AppConfig) -> impl IntoView {
    let writer = provide_session_context();

    let store: Rc<dyn RecordStore> = Rc::new(HttpRecordStore::new(&config));
    provide_services(store);
    provide_context(AuthProvider::new(config));

    view! {
        <Router>
            <SessionShell writer=writer />
        </Router>
    }
}

/// Bootstraps the auth provider once, resolves the post-auth redirect on
/// every auth state change, and gates the route tree until initialization
/// completes.
#[component]
fn SessionShell(writer: SessionWriter) -> impl IntoView {
    let session = use_session();
    let toast = use_toast();
    let provider =
        use_context::<AuthProvider>().expect("AuthProvider must be provided by the app root");

    let location = use_location();
    let query = use_query_map();
    let navigate = use_navigate();

    // One navigation and one session write per auth event.
    let handle_auth_change: Rc<dyn Fn(Option<UserIdentity>)> = Rc::new(move |identity| {
        let path = auth::current_path(
            &location.pathname.get_untracked(),
            &location.search.get_untracked(),
        );
        let params = query.get_untracked();
        let redirect = params.get("redirect").cloned();

        let target = auth::resolve_auth_navigation(&path, redirect.as_deref(), identity.is_some());

        match identity {
            Some(user) => writer.set_identity(user),
            None => writer.clear_identity(),
        }

        navigate(&target, NavigateOptions::default());
    });

    // Bootstrap the provider once per page load. Initialization completes on
    // success and error alike so the shell never hangs on a blank screen.
    {
        let provider = provider.clone();
        let on_change = handle_auth_change.clone();
        spawn_local(async move {
            provider
                .bootstrap(
                    move |identity| on_change(identity),
                    move |err| {
                        log::error!("Auth provider error: {err}");
                        toast.error(
                            "We could not verify your session. Please try signing in again.",
                        );
                    },
                )
                .await;
            writer.complete_initialization();
        });
    }

    let logout = {
        let on_change = handle_auth_change.clone();
        Callback::new(move |_| {
            let provider = provider.clone();
            let on_change = on_change.clone();
            spawn_local(async move {
                match provider.logout().await {
                    Ok(()) => on_change(None),
                    Err(err) => {
                        log::error!("Logout failed: {err}");
                        toast.error("Sign out failed. Please try again.");
                    }
                }
            });
        })
    };
    provide_context(ShellActions { logout });

    view! {
        <ToastHost />
        <Show when=move || session.initialized.get() fallback=|| view! { <LoadingScreen /> }>
            <Routes>
                <Route path="/" view=Layout>
                    <Route path="" view=Home />
                    <Route path="employees" view=Employees />
                </Route>
                <Route path="/login" view=Login />
                <Route path="/signup" view=Signup />
                <Route path="/callback" view=AuthCallback />
                <Route path="/error" view=AuthErrorPage />
                <Route path="/*any" view=NotFound />
            </Routes>
        </Show>
    }
}

/// Neutral loading state shown until the auth bootstrap finishes.
#[component]
fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="brand-mark large">"S"</div>
            <div class="loading">"Loading..."</div>
        </div>
    }
}

/// Shown instead of the app when the backend identifiers are missing.
#[component]
fn ConfigErrorScreen(message: String) -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="card auth-card">
                <h1>"Configuration required"</h1>
                <p>
                    "StaffSphere cannot reach its record store. Set PROJECT_ID and \
                     PUBLIC_KEY in the deployment environment and reload."
                </p>
                <p class="auth-error-message">{message}</p>
            </div>
        </div>
    }
}
