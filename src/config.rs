/// Centralized configuration constants
/// Single source of truth for app defaults

/// App name (shown in the header unless overridden)
pub const APP_NAME: &str = "Shipping Box Calculator";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default currency code for cost display
pub const DEFAULT_CURRENCY: &str = "INR";

/// Route the app opens on
pub const DEFAULT_START_PATH: &str = "/add";

/// How long a notification stays on screen
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 3000;

pub const ENV_APP_NAME: &str = "SHIPBOX_APP_NAME";
pub const ENV_CURRENCY: &str = "SHIPBOX_CURRENCY";
pub const ENV_START_PATH: &str = "SHIPBOX_START_PATH";

/// Runtime configuration resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub currency: String,
    pub start_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            start_path: DEFAULT_START_PATH.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment (and an optional `.env` file)
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve every value through `lookup`, falling back to defaults for
    /// missing or blank entries
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            app_name: read(ENV_APP_NAME, APP_NAME),
            currency: read(ENV_CURRENCY, DEFAULT_CURRENCY).to_uppercase(),
            start_path: read(ENV_START_PATH, DEFAULT_START_PATH),
        }
    }
}
