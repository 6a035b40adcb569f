//! Subcommand implementations.

use larder_core::{Notification, NotificationKind};
use larder_storefront::{Document, HttpStorefrontApi, InteractionConfig, Page};

use crate::error::CliError;
use crate::terminal::TerminalHost;

pub mod cart;
pub mod orders;

/// A page driven from the terminal.
pub type TerminalPage = Page<HttpStorefrontApi, TerminalHost>;

/// Load configuration and open an empty page against the configured API.
pub fn load_page(assume_yes: bool) -> Result<TerminalPage, CliError> {
    let config = InteractionConfig::from_env()?;
    let api = HttpStorefrontApi::new(&config)?;
    tracing::debug!(base_url = %api.base_url(), "Using storefront API");

    Ok(Page::new(
        config,
        api,
        TerminalHost::new(assume_yes),
        Document::new(),
    ))
}

/// Print the banners currently shown on the page.
///
/// Fails with the first error banner's message, if any.
#[allow(clippy::print_stdout)]
pub fn print_notifications(page: &TerminalPage) -> Result<(), CliError> {
    let alerts = page.alerts();
    for alert in &alerts {
        println!("[{}] {}", alert.kind, alert.message);
    }
    banner_outcome(alerts, &page.config().messages.add_to_cart_failed)
}

/// Exit status for a set of banners.
///
/// The generic retry banner means no usable reply arrived; any other error
/// banner carries the server's own message.
fn banner_outcome(alerts: Vec<Notification>, retry_message: &str) -> Result<(), CliError> {
    match alerts
        .into_iter()
        .find(|alert| alert.kind == NotificationKind::Error)
    {
        Some(alert) if alert.message == retry_message => {
            Err(CliError::RequestFailed(alert.message))
        }
        Some(alert) => Err(CliError::Rejected(alert.message)),
        None => Ok(()),
    }
}

/// Exit status for an order update, from the alert it ended with.
///
/// No alert at all means the request never got a usable reply.
fn alert_outcome(alert: Option<String>, success_message: &str) -> Result<(), CliError> {
    match alert {
        Some(message) if message == success_message => Ok(()),
        Some(message) => Err(CliError::Rejected(message)),
        None => Err(CliError::RequestFailed(
            "no reply from the order API".to_string(),
        )),
    }
}
