use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub stories: StoriesConfig,
    pub security: SecurityConfig,
    pub auth_errors: AuthErrorConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Runtime environment name as reported by the debug endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

/// Connection settings for the managed identity/database backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
    /// Cookie holding the end user's backend access token
    pub access_token_cookie: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoriesConfig {
    pub table: String,
    pub order_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub secure_cookies: bool,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub admin_password: Option<String>,
}

/// Error shapes treated as "no active session"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthErrorConfig {
    pub session_missing_names: Vec<String>,
    pub session_missing_statuses: Vec<u16>,
}

impl Default for AuthErrorConfig {
    fn default() -> Self {
        Self {
            session_missing_names: vec!["AuthSessionMissingError".to_string()],
            session_missing_statuses: vec![400],
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        Self::for_environment(environment).with_env_overrides()
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("BIND_ADDRESS") {
            self.server.bind_address = v;
        }
        if let Some(port) = env::var("API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse().ok())
        {
            self.server.port = port;
        }

        // Backend overrides
        self.backend.url = non_empty_var("SUPABASE_URL");
        self.backend.anon_key = non_empty_var("SUPABASE_ANON_KEY");
        self.backend.service_role_key = non_empty_var("SUPABASE_SERVICE_ROLE_KEY");
        if let Some(v) = non_empty_var("SUPABASE_ACCESS_TOKEN_COOKIE") {
            self.backend.access_token_cookie = v;
        }
        if let Ok(v) = env::var("BACKEND_REQUEST_TIMEOUT_SECS") {
            self.backend.request_timeout_secs =
                v.parse().unwrap_or(self.backend.request_timeout_secs);
        }

        // Stories overrides
        if let Some(v) = non_empty_var("STORIES_TABLE") {
            self.stories.table = v;
        }
        if let Some(v) = non_empty_var("STORIES_ORDER_COLUMN") {
            self.stories.order_column = v;
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_SECURE_COOKIES") {
            self.security.secure_cookies = v.parse().unwrap_or(self.security.secure_cookies);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = split_list(&v);
        }
        if let Some(v) = non_empty_var("ADMIN_PASSWORD") {
            self.security.admin_password = Some(v);
        }

        // Auth error classification overrides
        if let Ok(v) = env::var("AUTH_SESSION_MISSING_NAMES") {
            self.auth_errors.session_missing_names = split_list(&v);
        }
        if let Ok(v) = env::var("AUTH_SESSION_MISSING_STATUSES") {
            self.auth_errors.session_missing_statuses = split_list(&v)
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 3000,
            },
            backend: BackendConfig::default(),
            stories: StoriesConfig::default(),
            security: SecurityConfig {
                secure_cookies: false,
                enable_cors: true,
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
                admin_password: None,
            },
            auth_errors: AuthErrorConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 3000,
            },
            backend: BackendConfig::default(),
            stories: StoriesConfig::default(),
            security: SecurityConfig {
                secure_cookies: true,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                admin_password: None,
            },
            auth_errors: AuthErrorConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                bind_address: "0.0.0.0".to_string(),
                port: 3000,
            },
            backend: BackendConfig {
                request_timeout_secs: 5,
                ..BackendConfig::default()
            },
            stories: StoriesConfig::default(),
            security: SecurityConfig {
                secure_cookies: true,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                admin_password: None,
            },
            auth_errors: AuthErrorConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            service_role_key: None,
            access_token_cookie: "sb-access-token".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for StoriesConfig {
    fn default() -> Self {
        Self {
            table: "stories".to_string(),
            order_column: "published_at".to_string(),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
