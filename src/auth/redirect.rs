//! Redirect resolution for authentication state changes.
//!
//! After every auth event the session shell computes exactly one navigation
//! target from the location at the moment the callback fired, the optional
//! `redirect` query parameter, and whether an identity was reported.

use crate::routes::{self, RouteKind};

/// Compose the location path the resolution works on: pathname plus query
/// string.
pub fn current_path(pathname: &str, search: &str) -> String {
    if search.is_empty() {
        pathname.to_string()
    } else if let Some(stripped) = search.strip_prefix('?') {
        format!("{pathname}?{stripped}")
    } else {
        format!("{pathname}?{search}")
    }
}

/// Decide where the user lands after an auth state change.
///
/// The branch structure is a compatibility contract; in particular the
/// unauthenticated app-page branch falls through to a bare `/login` without a
/// redirect parameter, and only paths already denoting login or signup carry
/// their target along.
pub fn resolve_auth_navigation(
    current_path: &str,
    redirect_param: Option<&str>,
    authenticated: bool,
) -> String {
    let kind = RouteKind::classify(current_path);

    if authenticated {
        if let Some(target) = redirect_param {
            target.to_string()
        } else if !kind.is_auth_page() {
            match kind {
                RouteKind::Login | RouteKind::Signup => routes::HOME.to_string(),
                _ => current_path.to_string(),
            }
        } else {
            routes::HOME.to_string()
        }
    } else if !kind.is_auth_page() {
        match kind {
            RouteKind::Signup | RouteKind::Login => {
                format!("{}?redirect={current_path}", routes::LOGIN)
            }
            _ => routes::LOGIN.to_string(),
        }
    } else if let Some(target) = redirect_param {
        if !RouteKind::classify(target).is_auth_page() {
            format!("{}?redirect={target}", routes::LOGIN)
        } else {
            current_path.to_string()
        }
    } else if kind.is_auth_page() {
        current_path.to_string()
    } else {
        routes::LOGIN.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_path_joins_query_string() {
        assert_eq!(current_path("/employees", ""), "/employees");
        assert_eq!(current_path("/employees", "q=dev"), "/employees?q=dev");
        assert_eq!(current_path("/employees", "?q=dev"), "/employees?q=dev");
    }

    // Truth table over (current path, redirect param, identity). The first
    // block pins the named scenarios, the second sweeps the remaining
    // branches.

    #[test]
    fn test_authenticated_on_login_without_redirect_goes_home() {
        assert_eq!(resolve_auth_navigation("/login", None, true), "/");
    }

    #[test]
    fn test_unauthenticated_on_app_page_gets_bare_login() {
        // "/dashboard" denotes neither signup nor login, so no redirect
        // parameter is appended.
        assert_eq!(resolve_auth_navigation("/dashboard", None, false), "/login");
        assert_eq!(resolve_auth_navigation("/", None, false), "/login");
        assert_eq!(resolve_auth_navigation("/employees", None, false), "/login");
    }

    #[test]
    fn test_authenticated_redirect_param_wins() {
        assert_eq!(
            resolve_auth_navigation("/login", Some("/employees"), true),
            "/employees"
        );
        assert_eq!(
            resolve_auth_navigation("/callback", Some("/dashboard"), true),
            "/dashboard"
        );
        // The parameter also wins on non-auth pages.
        assert_eq!(
            resolve_auth_navigation("/employees", Some("/"), true),
            "/"
        );
    }

    #[test]
    fn test_authenticated_app_page_is_a_noop_redirect() {
        assert_eq!(
            resolve_auth_navigation("/employees", None, true),
            "/employees"
        );
        assert_eq!(
            resolve_auth_navigation("/employees?q=dev", None, true),
            "/employees?q=dev"
        );
        assert_eq!(resolve_auth_navigation("/", None, true), "/");
    }

    #[test]
    fn test_authenticated_auth_pages_go_home() {
        for path in ["/login", "/signup", "/callback", "/error?message=x"] {
            assert_eq!(resolve_auth_navigation(path, None, true), "/");
        }
    }

    #[test]
    fn test_unauthenticated_auth_page_with_safe_redirect_reaches_login_with_param() {
        assert_eq!(
            resolve_auth_navigation("/callback", Some("/employees"), false),
            "/login?redirect=/employees"
        );
    }

    #[test]
    fn test_unauthenticated_auth_page_with_auth_redirect_stays_put() {
        // A redirect target that is itself an auth page must not be chained
        // into another login round trip.
        assert_eq!(
            resolve_auth_navigation("/callback", Some("/login"), false),
            "/callback"
        );
        assert_eq!(
            resolve_auth_navigation("/error?message=denied", Some("/signup"), false),
            "/error?message=denied"
        );
    }

    #[test]
    fn test_unauthenticated_auth_page_without_redirect_is_idempotent() {
        for path in ["/login", "/signup", "/callback", "/error?message=denied"] {
            assert_eq!(resolve_auth_navigation(path, None, false), path);
        }
    }

    #[test]
    fn test_unauthenticated_app_page_ignores_redirect_param() {
        // The app-page branch is evaluated before the redirect parameter is
        // consulted.
        assert_eq!(
            resolve_auth_navigation("/employees", Some("/dashboard"), false),
            "/login"
        );
    }
}
