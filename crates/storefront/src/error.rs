//! Error types for API calls, plus Sentry breadcrumb helpers.
//!
//! Application-level failures (a reply carrying an `error` field) are *not*
//! errors at this layer: they arrive as an ordinary [`ApiReply`] and each
//! action decides how to surface them. [`ApiError`] covers only the cases
//! where no usable reply exists at all.
//!
//! [`ApiReply`]: larder_core::ApiReply

use larder_core::ReplyError;
use thiserror::Error;

/// Transport-level failure of an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection refused, DNS, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reply body could not be decoded.
    #[error("Reply error: {0}")]
    Reply(#[from] ReplyError),

    /// Endpoint URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A configured header value is not valid.
    #[error("Invalid header: {0}")]
    Header(String),
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error. Without an initialised Sentry client this is a no-op.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Add to cart clicked", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

/// Report a transport failure the user was told about.
pub fn capture_api_error(action: &str, err: &ApiError) {
    let event_id = sentry::capture_error(err);
    tracing::error!(
        action,
        error = %err,
        sentry_event_id = %event_id,
        "API request failed"
    );
}

/// Report a transport failure nothing handles.
///
/// The quantity and order-status actions deliberately leave transport
/// failures unhandled; this is the log line a host sees for them.
pub fn report_unhandled(action: &str, err: &ApiError) {
    tracing::error!(action, error = %err, "Unhandled API failure");
}
