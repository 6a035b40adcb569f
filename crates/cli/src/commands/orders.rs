//! Order commands.
//!
//! # Usage
//!
//! ```bash
//! larder orders set-status 1001 shipped
//! larder orders set-status 1001 shipped --yes
//! larder orders statuses
//! ```

use larder_admin::OrderStatusAction;
use larder_core::{OrderId, OrderStatus};

use super::{alert_outcome, load_page};
use crate::error::CliError;

/// Change the status of an order after confirmation.
///
/// The outcome is shown through the host's alert, which also decides the
/// exit status. A declined confirmation is not an error.
pub async fn set_status(
    order_id: OrderId,
    status: OrderStatus,
    assume_yes: bool,
) -> Result<(), CliError> {
    if !status.is_known() {
        tracing::warn!(%status, "Unknown order status; the server decides whether it is valid");
    }

    let page = load_page(assume_yes)?;
    let Some(task) = page.update_order_status(order_id, status) else {
        tracing::info!("Order status unchanged");
        return Ok(());
    };
    task.await?;
    alert_outcome(
        page.host().last_alert(),
        &page.config().messages.order_status_updated,
    )
}

/// Print the status names the server is known to accept.
#[allow(clippy::print_stdout)]
pub fn list_statuses() {
    for status in OrderStatus::KNOWN {
        println!("{status}");
    }
}
