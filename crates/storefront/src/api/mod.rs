//! Storefront JSON API.
//!
//! [`StorefrontApi`] is the seam between page actions and the network.
//! Production code uses [`HttpStorefrontApi`]; tests substitute recording
//! fakes.

mod http;

use std::future::Future;

use larder_core::{AddToCartRequest, ApiReply, CartItemId, UpdateCartItemRequest};

pub use http::HttpStorefrontApi;

use crate::error::Result;

/// Cart endpoints used by the storefront.
///
/// A returned `Ok` only means a reply was decoded; it may still carry an
/// application-level `error` field.
pub trait StorefrontApi: Send + Sync + 'static {
    /// `POST /api/cart/add`
    fn add_to_cart(
        &self,
        request: &AddToCartRequest,
    ) -> impl Future<Output = Result<ApiReply>> + Send;

    /// `PUT /api/cart/update/{item_id}`
    fn update_cart_item(
        &self,
        item_id: &CartItemId,
        request: &UpdateCartItemRequest,
    ) -> impl Future<Output = Result<ApiReply>> + Send;
}
