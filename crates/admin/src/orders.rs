//! Order status updates from the admin order pages.
//!
//! Unlike cart actions this flow uses the host's blocking dialogs: a
//! confirmation before anything is sent, then an alert with the outcome. A
//! successful update reloads the page straight after the alert is closed.

use std::future::Future;

use larder_core::{ApiReply, Endpoint, OrderId, OrderStatus, UpdateOrderStatusRequest};
use larder_storefront::error::{Result, report_unhandled};
use larder_storefront::{Host, HttpStorefrontApi, Page};
use tokio::task::JoinHandle;

/// Order endpoints available to administrators.
pub trait OrderApi: Send + Sync + 'static {
    /// `PUT /api/admin/orders/{order_id}/status`
    fn update_order_status(
        &self,
        order_id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> impl Future<Output = Result<ApiReply>> + Send;
}

impl OrderApi for HttpStorefrontApi {
    async fn update_order_status(
        &self,
        order_id: &OrderId,
        request: &UpdateOrderStatusRequest,
    ) -> Result<ApiReply> {
        self.send(Endpoint::UpdateOrderStatus(order_id), request)
            .await
    }
}

/// Order status action on a loaded admin page.
pub trait OrderStatusAction {
    /// Ask for confirmation, then change the status of an order.
    ///
    /// Returns `None` without sending anything if the user declines.
    fn update_order_status(&self, order_id: OrderId, status: OrderStatus)
    -> Option<JoinHandle<()>>;
}

impl<A, H> OrderStatusAction for Page<A, H>
where
    A: OrderApi,
    H: Host,
{
    fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Option<JoinHandle<()>> {
        if !self.host().confirm(&self.config().messages.confirm_order_status) {
            tracing::debug!(%order_id, "Order status update declined");
            return None;
        }

        tracing::info!(%order_id, %status, "Updating order status");
        let page = self.clone();
        Some(tokio::spawn(async move {
            let request = UpdateOrderStatusRequest { status };
            match page.api().update_order_status(&order_id, &request).await {
                Ok(reply) => match reply.error_message() {
                    Some(message) => page.host().alert(&message),
                    None => {
                        page.host()
                            .alert(&page.config().messages.order_status_updated);
                        page.host().reload();
                    }
                },
                Err(err) => report_unhandled("update_order_status", &err),
            }
        }))
    }
}
