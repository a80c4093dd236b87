pub mod admin_cookie;
pub mod classifier;
pub mod guard;

pub use classifier::{AuthErrorClassifier, AuthErrorKind};
pub use guard::{require_user, GuardError};
