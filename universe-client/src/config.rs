//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::{ClientError, ClientResult};

/// Client configuration for talking to the UniVerse backend
///
/// # Environment variables
///
/// [`ClientConfig::from_env`] reads a `.env` file first, then:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | UNIVERSE_API_URL | http://localhost:8081/api | API root |
/// | UNIVERSE_TIMEOUT_SECS | 30 | Per-request timeout |
/// | UNIVERSE_STORE_PATH | ./universe.redb | Local draft/session store |
/// | UNIVERSE_APP_URL | http://localhost:5173 | Front end origin for return URLs |
/// | UNIVERSE_SUCCESS_URL | {APP_URL}/payment/success | Checkout success return |
/// | UNIVERSE_CANCEL_URL | {APP_URL}/payment/cancel | Checkout cancel return |
/// | UNIVERSE_CURRENCY | LKR | Membership fee currency |
/// | UNIVERSE_CONFIRM_ATTEMPTS | 5 | Confirm calls while payment is pending |
/// | UNIVERSE_CONFIRM_INTERVAL_MS | 2000 | Delay between confirm calls |
/// | UNIVERSE_CONFIRM_TIMEOUT_SECS | 30 | Overall confirmation budget |
/// | UNIVERSE_LOG_LEVEL | info | Default log level (RUST_LOG wins) |
/// | UNIVERSE_LOG_JSON | false | JSON log output |
///
/// The backend appends `session_id={CHECKOUT_SESSION_ID}` to both return URLs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root (e.g., "http://localhost:8081/api")
    pub base_url: String,

    /// Bearer token for authentication
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// redb file holding drafts, finalized payments and the auth token
    pub store_path: PathBuf,

    /// Where the checkout page sends the user after paying
    pub success_url: String,

    /// Where the checkout page sends the user after cancelling
    pub cancel_url: String,

    /// ISO currency code sent with checkout requests
    pub currency: String,

    /// Confirm attempts while the processor still reports PENDING
    pub confirm_attempts: u32,

    /// Delay between confirm attempts
    pub confirm_interval: Duration,

    /// Overall bound on one confirmation run
    pub confirm_timeout: Duration,

    pub log_level: String,
    pub log_json: bool,
}

const DEFAULT_APP_URL: &str = "http://localhost:5173";

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the API root
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            store_path: PathBuf::from("./universe.redb"),
            success_url: format!("{}/payment/success", DEFAULT_APP_URL),
            cancel_url: format!("{}/payment/cancel", DEFAULT_APP_URL),
            currency: "LKR".to_string(),
            confirm_attempts: 5,
            confirm_interval: Duration::from_millis(2000),
            confirm_timeout: Duration::from_secs(30),
            log_level: "info".to_string(),
            log_json: false,
        }
    }

    /// Load configuration from the environment (and `.env`)
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let app_url = std::env::var("UNIVERSE_APP_URL")
            .unwrap_or_else(|_| DEFAULT_APP_URL.into());
        let app_url = app_url.trim_end_matches('/');

        Self {
            base_url: std::env::var("UNIVERSE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8081/api".into()),
            token: None,
            timeout: env_or("UNIVERSE_TIMEOUT_SECS", 30),
            store_path: std::env::var("UNIVERSE_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./universe.redb")),
            success_url: std::env::var("UNIVERSE_SUCCESS_URL")
                .unwrap_or_else(|_| format!("{}/payment/success", app_url)),
            cancel_url: std::env::var("UNIVERSE_CANCEL_URL")
                .unwrap_or_else(|_| format!("{}/payment/cancel", app_url)),
            currency: std::env::var("UNIVERSE_CURRENCY").unwrap_or_else(|_| "LKR".into()),
            confirm_attempts: env_or("UNIVERSE_CONFIRM_ATTEMPTS", 5),
            confirm_interval: Duration::from_millis(env_or("UNIVERSE_CONFIRM_INTERVAL_MS", 2000)),
            confirm_timeout: Duration::from_secs(env_or("UNIVERSE_CONFIRM_TIMEOUT_SECS", 30)),
            log_level: std::env::var("UNIVERSE_LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_or("UNIVERSE_LOG_JSON", false),
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the local store location
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }

    /// Set both checkout return URLs
    pub fn with_return_urls(
        mut self,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
    ) -> Self {
        self.success_url = success_url.into();
        self.cancel_url = cancel_url.into();
        self
    }

    /// Set the fee currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the confirmation polling budget
    pub fn with_confirm_budget(mut self, attempts: u32, interval: Duration, timeout: Duration) -> Self {
        self.confirm_attempts = attempts;
        self.confirm_interval = interval;
        self.confirm_timeout = timeout;
        self
    }

    /// Reject configurations the workflow cannot run with
    pub fn validate(&self) -> ClientResult<()> {
        for (name, value) in [
            ("base_url", &self.base_url),
            ("success_url", &self.success_url),
            ("cancel_url", &self.cancel_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ClientError::Config(format!("{} `{}`: {}", name, value, e)))?;
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ClientError::Config(format!(
                "currency must be a 3-letter code, got `{}`",
                self.currency
            )));
        }
        if self.confirm_attempts == 0 {
            return Err(ClientError::Config("confirm_attempts must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8081/api")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.currency, "LKR");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.success_url, "http://localhost:5173/payment/success");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::new("https://api.uni.lk/api")
            .with_token("t")
            .with_timeout(5)
            .with_currency("USD")
            .with_confirm_budget(2, Duration::from_millis(10), Duration::from_secs(1))
            .with_return_urls("https://uni.lk/ok", "https://uni.lk/cancel");
        assert_eq!(config.token.as_deref(), Some("t"));
        assert_eq!(config.confirm_attempts, 2);
        assert_eq!(config.cancel_url, "https://uni.lk/cancel");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ClientConfig::new("not a url");
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));

        let config = ClientConfig::default().with_currency("rupees");
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));

        let config = ClientConfig::default().with_confirm_budget(0, Duration::ZERO, Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
