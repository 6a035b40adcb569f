//! Interaction layer configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LARDER_API_BASE_URL` - Base URL of the storefront JSON API
//!
//! ## Optional
//! - `LARDER_ALERT_TIMEOUT_MS` - Banner lifetime in milliseconds (default: 3000)
//! - `LARDER_RELOAD_DELAY_MS` - Delay before reloading after a cart update (default: 1000)
//! - `LARDER_LOCALE` - UI message language, `en` or `zh` (default: en)
//! - `LARDER_SESSION_COOKIE` - Session cookie forwarded with every API request

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default banner lifetime.
pub const DEFAULT_ALERT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Default delay between a successful cart update and the page reload.
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(1000);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Interaction layer configuration.
#[derive(Debug, Clone)]
pub struct InteractionConfig {
    /// Base URL every endpoint path is resolved against (always ends in `/`)
    pub api_base_url: Url,
    /// How long a banner stays in the document
    pub alert_timeout: Duration,
    /// Delay before the page reloads after a cart update
    pub reload_delay: Duration,
    /// Fixed UI messages
    pub messages: Messages,
    /// Session cookie sent with API requests
    pub session_cookie: Option<SessionCookie>,
}

/// Session cookie header value.
///
/// Implements `Debug` manually to redact the value.
#[derive(Clone)]
pub struct SessionCookie(pub SecretString);

impl std::fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionCookie").field(&"[REDACTED]").finish()
    }
}

/// Language of the fixed UI messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Self::English),
            "zh" | "zh-cn" | "chinese" => Ok(Self::Chinese),
            _ => Err(format!("unsupported locale: {s}")),
        }
    }
}

/// Fixed texts shown by the interaction layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    /// Banner after a successful add-to-cart
    pub added_to_cart: String,
    /// Banner when an add-to-cart request could not be completed
    pub add_to_cart_failed: String,
    /// Banner after a successful quantity update
    pub cart_updated: String,
    /// Confirmation prompt before changing an order status
    pub confirm_order_status: String,
    /// Dialog after a successful order status change
    pub order_status_updated: String,
}

impl Messages {
    /// Messages for a locale.
    #[must_use]
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::English => Self::english(),
            Locale::Chinese => Self::chinese(),
        }
    }

    /// English messages.
    #[must_use]
    pub fn english() -> Self {
        Self {
            added_to_cart: "Added to cart".to_string(),
            add_to_cart_failed: "Could not add to cart, please try again".to_string(),
            cart_updated: "Cart updated".to_string(),
            confirm_order_status: "Update the status of this order?".to_string(),
            order_status_updated: "Order status updated".to_string(),
        }
    }

    /// Simplified Chinese messages.
    #[must_use]
    pub fn chinese() -> Self {
        Self {
            added_to_cart: "已添加到购物车".to_string(),
            add_to_cart_failed: "添加失败，请重试".to_string(),
            cart_updated: "购物车已更新".to_string(),
            confirm_order_status: "确定要更新订单状态吗？".to_string(),
            order_status_updated: "订单状态已更新".to_string(),
        }
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::english()
    }
}

impl InteractionConfig {
    /// Configuration with default timings and English messages.
    #[must_use]
    pub fn new(api_base_url: Url) -> Self {
        Self {
            api_base_url: with_trailing_slash(api_base_url),
            alert_timeout: DEFAULT_ALERT_TIMEOUT,
            reload_delay: DEFAULT_RELOAD_DELAY,
            messages: Messages::default(),
            session_cookie: None,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = get_required(&lookup, "LARDER_API_BASE_URL")?;
        let api_base_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("LARDER_API_BASE_URL".to_string(), e.to_string())
        })?;

        let alert_timeout =
            get_millis_or_default(&lookup, "LARDER_ALERT_TIMEOUT_MS", DEFAULT_ALERT_TIMEOUT)?;
        let reload_delay =
            get_millis_or_default(&lookup, "LARDER_RELOAD_DELAY_MS", DEFAULT_RELOAD_DELAY)?;

        let locale = match lookup("LARDER_LOCALE") {
            Some(raw) => raw
                .parse::<Locale>()
                .map_err(|e| ConfigError::InvalidEnvVar("LARDER_LOCALE".to_string(), e))?,
            None => Locale::default(),
        };

        let session_cookie = lookup("LARDER_SESSION_COOKIE")
            .filter(|value| !value.is_empty())
            .map(|value| SessionCookie(SecretString::from(value)));

        Ok(Self {
            api_base_url: with_trailing_slash(api_base_url),
            alert_timeout,
            reload_delay,
            messages: Messages::for_locale(locale),
            session_cookie,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable.
fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a millisecond duration with a default value.
fn get_millis_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Endpoint paths are joined onto the base, which only keeps its last path
/// segment when it ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_base_url() {
        let result = InteractionConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(key)) if key == "LARDER_API_BASE_URL"));
    }

    #[test]
    fn test_defaults() {
        let config =
            InteractionConfig::from_lookup(lookup(&[("LARDER_API_BASE_URL", "http://shop.test")]))
                .unwrap();

        assert_eq!(config.api_base_url.as_str(), "http://shop.test/");
        assert_eq!(config.alert_timeout, Duration::from_millis(3000));
        assert_eq!(config.reload_delay, Duration::from_millis(1000));
        assert_eq!(config.messages, Messages::english());
        assert!(config.session_cookie.is_none());
    }

    #[test]
    fn test_base_url_with_prefix_gets_trailing_slash() {
        let config = InteractionConfig::new(Url::parse("http://shop.test/store").unwrap());
        assert_eq!(config.api_base_url.as_str(), "http://shop.test/store/");
    }

    #[test]
    fn test_overrides() {
        let config = InteractionConfig::from_lookup(lookup(&[
            ("LARDER_API_BASE_URL", "http://shop.test/"),
            ("LARDER_ALERT_TIMEOUT_MS", "500"),
            ("LARDER_RELOAD_DELAY_MS", "0"),
            ("LARDER_LOCALE", "zh"),
            ("LARDER_SESSION_COOKIE", "session=abc"),
        ]))
        .unwrap();

        assert_eq!(config.alert_timeout, Duration::from_millis(500));
        assert_eq!(config.reload_delay, Duration::ZERO);
        assert_eq!(config.messages.added_to_cart, "已添加到购物车");
        assert!(config.session_cookie.is_some());
    }

    #[test]
    fn test_invalid_values() {
        let result = InteractionConfig::from_lookup(lookup(&[
            ("LARDER_API_BASE_URL", "http://shop.test/"),
            ("LARDER_ALERT_TIMEOUT_MS", "soon"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "LARDER_ALERT_TIMEOUT_MS"));

        let result = InteractionConfig::from_lookup(lookup(&[("LARDER_API_BASE_URL", "not a url")]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));

        let result = InteractionConfig::from_lookup(lookup(&[
            ("LARDER_API_BASE_URL", "http://shop.test/"),
            ("LARDER_LOCALE", "fr"),
        ]));
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_session_cookie_debug_redacts_value() {
        let cookie = SessionCookie(SecretString::from("session=super_secret_value"));
        let debug_output = format!("{cookie:?}");

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_value"));
    }
}
