use serde_json::Value;

use crate::config::AuthErrorConfig;

/// Closed set of error shapes the auth gate knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// No active session: the caller is simply not signed in
    SessionMissing,
    /// Any other error flagged by the auth service
    AuthError { status: Option<u16> },
    Unknown,
}

/// Decides whether a backend error means "no active session".
///
/// An error is session-missing when its `name` is one of the configured
/// names, or when its `__isAuthError` flag is `true` and its `status` is
/// one of the configured statuses. Inputs of any other shape, including
/// `null` and scalars, are never session-missing.
#[derive(Debug, Clone)]
pub struct AuthErrorClassifier {
    names: Vec<String>,
    statuses: Vec<u16>,
}

impl Default for AuthErrorClassifier {
    fn default() -> Self {
        Self::from_config(&AuthErrorConfig::default())
    }
}

impl AuthErrorClassifier {
    pub fn new(names: Vec<String>, statuses: Vec<u16>) -> Self {
        Self { names, statuses }
    }

    pub fn from_config(config: &AuthErrorConfig) -> Self {
        Self::new(
            config.session_missing_names.clone(),
            config.session_missing_statuses.clone(),
        )
    }

    pub fn classify(&self, error: &Value) -> AuthErrorKind {
        let Some(fields) = error.as_object() else {
            return AuthErrorKind::Unknown;
        };

        if let Some(name) = fields.get("name").and_then(Value::as_str) {
            if self.names.iter().any(|known| known == name) {
                return AuthErrorKind::SessionMissing;
            }
        }

        if fields.get("__isAuthError").and_then(Value::as_bool) != Some(true) {
            return AuthErrorKind::Unknown;
        }

        let status = fields.get("status").and_then(status_code);
        match status {
            Some(code) if self.statuses.contains(&code) => AuthErrorKind::SessionMissing,
            _ => AuthErrorKind::AuthError { status },
        }
    }

    pub fn is_session_missing(&self, error: &Value) -> bool {
        self.classify(error) == AuthErrorKind::SessionMissing
    }
}

// Integral numbers only; 400.0 counts, 400.5 and "400" do not.
fn status_code(value: &Value) -> Option<u16> {
    let number = value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0)
            .map(|f| f as u64)
    })?;
    u16::try_from(number).ok()
}
