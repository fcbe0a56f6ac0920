pub mod session;
pub mod theme;
pub mod toast;

pub use session::{provide_session_context, use_session, SessionContext, SessionWriter};
pub use theme::{provide_theme_context, use_theme, ThemeContext};
pub use toast::{provide_toast_context, use_toast, Toast, ToastContext, ToastKind};
