//! Application configuration sourced from `window.ENV`.
//!
//! The deployment injects a small `ENV` object onto `window` before the WASM
//! bundle loads. The two backend identifiers are mandatory: without them the
//! record store cannot be addressed, so initialization fails loudly instead
//! of proceeding unauthenticated.

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

const DEFAULT_API_URL: &str = "https://records.staffsphere.app";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration key {0} in window.ENV")]
    MissingKey(&'static str),
}

/// Runtime configuration for the record store and auth provider.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Opaque project identifier addressing the backend tenant.
    pub project_id: String,
    /// Opaque public key authorizing client access.
    pub public_key: String,
    /// Base URL of the record store / auth provider.
    pub api_url: String,
}

impl AppConfig {
    /// Load configuration from `window.ENV`.
    ///
    /// `PROJECT_ID` and `PUBLIC_KEY` are required; `API_URL` falls back to
    /// the hosted default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id =
            read_env_key("PROJECT_ID").ok_or(ConfigError::MissingKey("PROJECT_ID"))?;
        let public_key =
            read_env_key("PUBLIC_KEY").ok_or(ConfigError::MissingKey("PUBLIC_KEY"))?;
        let api_url = read_env_key("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            project_id,
            public_key,
            api_url,
        })
    }
}

/// Read one string value from `window.ENV`, if present.
fn read_env_key(key: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(env) = js_sys::Reflect::get(&window, &JsValue::from_str("ENV")) {
                if !env.is_undefined() {
                    if let Ok(value) = js_sys::Reflect::get(&env, &JsValue::from_str(key)) {
                        return value.as_string();
                    }
                }
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = key;

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_fails_without_required_keys() {
        // Off the browser there is no window.ENV, so both identifiers are
        // absent and loading must fail on the first of them.
        assert_eq!(
            AppConfig::from_env().unwrap_err(),
            ConfigError::MissingKey("PROJECT_ID")
        );
    }
}
