//! Cart actions: add-to-cart and quantity updates.
//!
//! Both return as soon as the request is spawned. Replies are handled in the
//! background:
//!
//! | Outcome | add to cart | update quantity |
//! |---|---|---|
//! | reply with `error` | error banner | error banner |
//! | reply without `error` | success banner, badge refresh | success banner, delayed reload |
//! | transport failure | error log, retry banner | unhandled (log only) |

use larder_core::{
    AddToCartRequest, CartItemId, NotificationKind, ProductId, Quantity, QuantityInput,
    UpdateCartItemRequest,
};
use tokio::task::JoinHandle;

use crate::api::StorefrontApi;
use crate::error::{add_breadcrumb, capture_api_error, report_unhandled};
use crate::host::Host;
use crate::page::{Event, Page};

impl<A, H> Page<A, H>
where
    A: StorefrontApi,
    H: Host,
{
    /// Add a product to the cart.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn add_to_cart(&self, product_id: ProductId, quantity: Quantity) -> JoinHandle<()> {
        self.spawn_add_to_cart(Some(product_id), quantity)
    }

    /// Change the quantity of a cart line.
    ///
    /// Accepts a [`Quantity`] or the raw value of a quantity input; values
    /// that are not integers are sent as typed and judged by the server.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn update_cart_item(
        &self,
        item_id: CartItemId,
        quantity: impl Into<QuantityInput>,
    ) -> JoinHandle<()> {
        let page = self.clone();
        let quantity = quantity.into();
        tokio::spawn(async move { page.run_update_cart_item(item_id, quantity).await })
    }

    fn spawn_add_to_cart(
        &self,
        product_id: Option<ProductId>,
        quantity: Quantity,
    ) -> JoinHandle<()> {
        let page = self.clone();
        tokio::spawn(async move { page.run_add_to_cart(product_id, quantity).await })
    }

    async fn run_add_to_cart(&self, product_id: Option<ProductId>, quantity: Quantity) {
        let request = AddToCartRequest {
            product_id,
            quantity,
        };

        match self.api().add_to_cart(&request).await {
            Ok(reply) => match reply.error_message() {
                Some(message) => {
                    self.show_alert(&message, NotificationKind::Error);
                }
                None => {
                    self.show_alert(&self.config().messages.added_to_cart, NotificationKind::Success);
                    self.update_cart_badge();
                }
            },
            Err(err) => {
                capture_api_error("add_to_cart", &err);
                self.show_alert(
                    &self.config().messages.add_to_cart_failed,
                    NotificationKind::Error,
                );
            }
        }
    }

    async fn run_update_cart_item(&self, item_id: CartItemId, quantity: QuantityInput) {
        let request = UpdateCartItemRequest { quantity };

        match self.api().update_cart_item(&item_id, &request).await {
            Ok(reply) => match reply.error_message() {
                Some(message) => {
                    self.show_alert(&message, NotificationKind::Error);
                }
                None => {
                    self.show_alert(&self.config().messages.cart_updated, NotificationKind::Success);
                    self.schedule_reload(self.config().reload_delay);
                }
            },
            Err(err) => report_unhandled("update_cart_item", &err),
        }
    }

    /// Refresh the cart count badge.
    ///
    /// The count is rendered server-side and picked up on the next reload.
    fn update_cart_badge(&self) {
        tracing::debug!("Cart badge refresh requested");
    }

    /// Click on an `.add-to-cart` trigger.
    pub(crate) fn on_add_to_cart_click(&self, event: &mut Event) -> Option<JoinHandle<()>> {
        event.prevent_default();

        let product_id = self.with_document(|doc| {
            doc.get(event.target)
                .and_then(|el| el.data("product-id"))
                .map(ProductId::from)
        });
        match &product_id {
            Some(product_id) => add_breadcrumb(
                "cart",
                "Add to cart clicked",
                Some(&[("product_id", product_id.as_str())]),
            ),
            // Still posted; the server's error reply becomes the banner
            None => tracing::warn!(
                element = event.target.index(),
                "Add-to-cart trigger has no data-product-id"
            ),
        }
        Some(self.spawn_add_to_cart(product_id, Quantity::ONE))
    }

    /// Change of a `.cart-quantity` input.
    pub(crate) fn on_cart_quantity_change(&self, event: &Event) -> Option<JoinHandle<()>> {
        let read = self.with_document(|doc| {
            doc.get(event.target).map(|el| {
                (
                    el.data("item-id").map(CartItemId::from),
                    el.value().to_string(),
                )
            })
        });
        let (Some(item_id), raw_quantity) = read? else {
            tracing::warn!(
                element = event.target.index(),
                "Quantity input has no data-item-id"
            );
            return None;
        };

        let quantity = QuantityInput::from_input(&raw_quantity);
        if quantity.quantity().is_none() {
            tracing::debug!(item_id = %item_id, %quantity, "Forwarding non-integer quantity");
        }

        add_breadcrumb(
            "cart",
            "Cart quantity changed",
            Some(&[("item_id", item_id.as_str())]),
        );
        Some(self.update_cart_item(item_id, quantity))
    }
}
