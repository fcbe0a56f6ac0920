//! Client for the hosted auth provider.
//!
//! Login and signup are full-page redirects to provider-hosted screens; the
//! provider sends the browser back to `/callback`, the page reloads, and the
//! session shell asks for the current session over the cookie it set.

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Error, Debug, Clone)]
pub enum AuthError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Auth provider error {status}: {message}")]
    Provider { status: u16, message: String },
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<gloo_net::Error> for AuthError {
    fn from(err: gloo_net::Error) -> Self {
        AuthError::Network(err.to_string())
    }
}

/// Identity record reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    authenticated: bool,
    user: Option<UserIdentity>,
}

#[derive(Clone)]
pub struct AuthProvider {
    config: AppConfig,
}

impl AuthProvider {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/{}", self.config.api_url, path)
    }

    /// Hosted login screen; the provider returns to `/callback`, carrying
    /// the caller's redirect target through when one was given.
    pub fn login_href(&self, redirect: Option<&str>) -> String {
        self.hosted_href("authorize", redirect)
    }

    /// Hosted signup screen.
    pub fn signup_href(&self, redirect: Option<&str>) -> String {
        self.hosted_href("register", redirect)
    }

    fn hosted_href(&self, screen: &str, redirect: Option<&str>) -> String {
        let callback = match redirect {
            Some(target) => format!("/callback?redirect={target}"),
            None => "/callback".to_string(),
        };
        format!(
            "{}?project_id={}&public_key={}&return_to={}",
            self.auth_url(screen),
            self.config.project_id,
            self.config.public_key,
            js_sys::encode_uri_component(&callback),
        )
    }

    /// Ask the provider who is signed in. `Ok(Some)` means authenticated,
    /// `Ok(None)` means no session.
    pub async fn current_session(&self) -> Result<Option<UserIdentity>, AuthError> {
        let response = Request::get(&self.auth_url("session"))
            .credentials(web_sys::RequestCredentials::Include)
            .header("X-Project-Id", &self.config.project_id)
            .header("X-Public-Key", &self.config.public_key)
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Ok(None);
        }
        if !response.ok() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AuthError::Provider { status, message });
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|err| AuthError::Deserialization(err.to_string()))?;

        Ok(if session.authenticated {
            session.user
        } else {
            None
        })
    }

    /// Invoke the session lookup and report through the callback contract:
    /// `on_success` with the identity (or `None`), `on_error` on provider
    /// failure.
    pub async fn bootstrap(
        &self,
        on_success: impl FnOnce(Option<UserIdentity>),
        on_error: impl FnOnce(AuthError),
    ) {
        match self.current_session().await {
            Ok(identity) => on_success(identity),
            Err(err) => on_error(err),
        }
    }

    /// End the provider session.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let response = Request::post(&self.auth_url("logout"))
            .credentials(web_sys::RequestCredentials::Include)
            .header("X-Project-Id", &self.config.project_id)
            .header("X-Public-Key", &self.config.public_key)
            .send()
            .await?;

        if !response.ok() && response.status() != 401 {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AuthError::Provider { status, message });
        }
        Ok(())
    }
}
