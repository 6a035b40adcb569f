//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! larder cart add 42 --quantity 2
//! larder cart update 7 3
//! ```

use std::time::Duration;

use larder_core::{CartItemId, ProductId, Quantity};

use super::{load_page, print_notifications};
use crate::error::CliError;

/// Add a product to the cart.
pub async fn add(product_id: ProductId, quantity: Quantity) -> Result<(), CliError> {
    let page = load_page(false)?;
    page.add_to_cart(product_id, quantity).await?;
    print_notifications(&page)
}

/// Extra time allowed for the scheduled reload beyond its configured delay.
const RELOAD_WAIT_MARGIN: Duration = Duration::from_millis(500);

/// Change the quantity of a cart line.
///
/// On success the page schedules a reload; the command waits for it so the
/// reload shows up in the log.
pub async fn update(item_id: CartItemId, quantity: Quantity) -> Result<(), CliError> {
    let page = load_page(false)?;
    page.update_cart_item(item_id, quantity).await?;
    // A failed update shows no banner at all
    if page.alerts().is_empty() {
        return Err(CliError::RequestFailed(
            "no reply from the cart API".to_string(),
        ));
    }
    print_notifications(&page)?;

    let wait = reload_wait(page.config().reload_delay);
    if tokio::time::timeout(wait, page.host().reloaded())
        .await
        .is_err()
    {
        tracing::debug!("No reload requested");
    }
    Ok(())
}

fn reload_wait(delay: Duration) -> Duration {
    delay.saturating_add(RELOAD_WAIT_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_wait_never_zero() {
        assert_eq!(reload_wait(Duration::ZERO), RELOAD_WAIT_MARGIN);
        assert_eq!(
            reload_wait(Duration::from_secs(1)),
            Duration::from_millis(1500)
        );
    }
}
