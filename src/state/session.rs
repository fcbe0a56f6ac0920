//! Process-wide session state.
//!
//! Every view can read the session; only the session shell can write it. The
//! provider hands the write half back to its caller instead of putting it in
//! context, so child views cannot reach it.

use leptos::*;

use crate::auth::UserIdentity;

/// Read side of the session, available to the whole tree.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub user: ReadSignal<Option<UserIdentity>>,
    /// True once the auth bootstrap has run, on success or error. The route
    /// tree renders nothing but a loading view before that.
    pub initialized: ReadSignal<bool>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.with(|user| user.is_some())
    }
}

/// Write side, held by the session shell alone.
#[derive(Clone, Copy)]
pub struct SessionWriter {
    set_user: WriteSignal<Option<UserIdentity>>,
    initialized: ReadSignal<bool>,
    set_initialized: WriteSignal<bool>,
}

impl SessionWriter {
    pub fn set_identity(&self, identity: UserIdentity) {
        self.set_user.set(Some(identity));
    }

    pub fn clear_identity(&self) {
        self.set_user.set(None);
    }

    /// Mark initialization complete. Later calls are no-ops, so the flag
    /// flips exactly once per app load.
    pub fn complete_initialization(&self) {
        if !self.initialized.get_untracked() {
            self.set_initialized.set(true);
        }
    }
}

fn create_session() -> (SessionContext, SessionWriter) {
    let (user, set_user) = create_signal(None::<UserIdentity>);
    let (initialized, set_initialized) = create_signal(false);

    (
        SessionContext { user, initialized },
        SessionWriter {
            set_user,
            initialized,
            set_initialized,
        },
    )
}

/// Provide the session context; returns the writer for the session shell.
pub fn provide_session_context() -> SessionWriter {
    let (context, writer) = create_session();
    provide_context(context);
    writer
}

/// Hook to access the session.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext must be provided by a parent component")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> UserIdentity {
        UserIdentity {
            id: "user-1".to_string(),
            name: Some("Alex Morgan".to_string()),
            email: Some("alex.morgan@staffsphere.com".to_string()),
        }
    }

    #[test]
    fn test_initialization_completes_exactly_once() {
        let runtime = create_runtime();

        let (session, writer) = create_session();
        assert!(!session.initialized.get_untracked());

        // Success path.
        writer.set_identity(identity());
        writer.complete_initialization();
        assert!(session.initialized.get_untracked());

        // A second completion (e.g. a late error path) must be a no-op.
        writer.complete_initialization();
        assert!(session.initialized.get_untracked());

        runtime.dispose();
    }

    #[test]
    fn test_initialization_completes_on_error_path_too() {
        let runtime = create_runtime();

        let (session, writer) = create_session();

        // Error path: no identity stored, flag still set.
        writer.clear_identity();
        writer.complete_initialization();
        assert!(session.initialized.get_untracked());
        assert!(!session.is_authenticated());

        runtime.dispose();
    }

    #[test]
    fn test_identity_set_and_clear() {
        let runtime = create_runtime();

        let (session, writer) = create_session();

        writer.set_identity(identity());
        assert!(session.is_authenticated());
        assert_eq!(
            session.user.get_untracked().unwrap().id,
            "user-1".to_string()
        );

        writer.clear_identity();
        assert!(!session.is_authenticated());

        runtime.dispose();
    }
}
