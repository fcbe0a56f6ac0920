//! Dark-mode preference: one persisted boolean.

use leptos::*;

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

const STORAGE_KEY: &str = "dark_mode";

/// Theme context containing the dark-mode flag and its writer.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub dark: ReadSignal<bool>,
    pub set_dark: WriteSignal<bool>,
}

impl ThemeContext {
    /// Flip between light and dark.
    pub fn toggle(&self) {
        self.set_dark.update(|dark| *dark = !*dark);
    }

    /// Icon name for the toggle button: shows what clicking will switch to.
    pub fn toggle_icon(&self) -> &'static str {
        if self.dark.get() {
            "sun"
        } else {
            "moon"
        }
    }
}

/// Get the initial flag from localStorage or the system preference.
fn initial_dark_mode() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        if let Ok(saved) = LocalStorage::get::<bool>(STORAGE_KEY) {
            return saved;
        }

        if let Some(window) = web_sys::window() {
            if let Ok(Some(media_query)) = window.match_media("(prefers-color-scheme: dark)") {
                return media_query.matches();
            }
        }
    }

    false
}

/// Persist the flag.
fn save_dark_mode(dark: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = LocalStorage::set(STORAGE_KEY, dark);
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = dark;
    }
}

/// Apply the theme to the document root element.
fn apply_dark_mode(dark: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(root) = document.document_element() {
                let _ = root.set_attribute("data-theme", if dark { "dark" } else { "light" });
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = dark;
    }
}

/// Provide theme context to the application. Call at the app root.
pub fn provide_theme_context() {
    let initial = initial_dark_mode();
    apply_dark_mode(initial);

    let (dark, set_dark) = create_signal(initial);

    create_effect(move |_| {
        let current = dark.get();
        apply_dark_mode(current);
        save_dark_mode(current);
    });

    provide_context(ThemeContext { dark, set_dark });
}

/// Hook to access theme context.
pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext must be provided by a parent component")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_the_flag() {
        let runtime = create_runtime();

        let (dark, set_dark) = create_signal(false);
        let ctx = ThemeContext { dark, set_dark };

        ctx.toggle();
        assert!(dark.get_untracked());
        assert_eq!(ctx.toggle_icon(), "sun");

        ctx.toggle();
        assert!(!dark.get_untracked());

        runtime.dispose();
    }
}
