use leptos::*;
use leptos_router::*;

use crate::app::ShellActions;
use crate::icons::Icon;
use crate::routes;
use crate::state::{use_session, use_theme};

/// Layout component with navbar, sidebar and content outlet.
#[component]
pub fn Layout() -> impl IntoView {
    view! {
        <div class="layout">
            <Navbar />
            <div class="layout-body">
                <Sidebar />
                <main class="main-content">
                    <Outlet />
                </main>
            </div>
        </div>
    }
}

/// Top navbar with brand, theme toggle and sign-out.
#[component]
fn Navbar() -> impl IntoView {
    let session = use_session();

    view! {
        <header class="navbar">
            <div class="navbar-content">
                <div class="navbar-brand">
                    <div class="brand-mark">"S"</div>
                    <span class="brand-name">"StaffSphere"</span>
                </div>
                <div class="navbar-actions">
                    <ThemeToggle />
                    <Show when=move || session.is_authenticated()>
                        <LogoutButton />
                    </Show>
                </div>
            </div>
        </header>
    }
}

/// Sidebar navigation.
#[component]
fn Sidebar() -> impl IntoView {
    let location = use_location();

    let link_class = move |path: &str| {
        let current = location.pathname.get();
        let active = if path == routes::HOME {
            current == routes::HOME
        } else {
            current.starts_with(path)
        };
        if active {
            "nav-link active"
        } else {
            "nav-link"
        }
    };

    view! {
        <aside class="sidebar">
            <nav class="sidebar-nav">
                <A href=routes::HOME class=move || link_class(routes::HOME)>
                    <Icon name="home" size=20 />
                    <span>"Dashboard"</span>
                </A>
                <A href=routes::EMPLOYEES class=move || link_class(routes::EMPLOYEES)>
                    <Icon name="users" size=20 />
                    <span>"Employees"</span>
                </A>
            </nav>
        </aside>
    }
}

/// Theme toggle button.
#[component]
fn ThemeToggle() -> impl IntoView {
    let theme_ctx = use_theme();

    view! {
        <button
            class="theme-toggle"
            aria-label="Toggle dark mode"
            on:click=move |_| theme_ctx.toggle()
        >
            {move || view! { <Icon name=theme_ctx.toggle_icon() size=20 /> }}
        </button>
    }
}

/// Sign-out button; the shell owns the actual state transition.
#[component]
fn LogoutButton() -> impl IntoView {
    let actions = use_context::<ShellActions>()
        .expect("ShellActions must be provided by the session shell");

    view! {
        <button
            class="logout-button"
            aria-label="Sign out"
            on:click=move |_| actions.logout.call(())
        >
            <Icon name="log-out" size=20 />
        </button>
    }
}
