pub mod auth_pages;
pub mod employee_form;
pub mod employees;
pub mod home;
pub mod layout;
pub mod not_found;
pub mod quick_action;
pub mod toast;

pub use auth_pages::{AuthCallback, AuthErrorPage, Login, Signup};
pub use employees::Employees;
pub use home::Home;
pub use layout::Layout;
pub use not_found::NotFound;
pub use toast::ToastHost;
