//! Larder Admin - privileged storefront actions.
//!
//! Kept apart from `larder-storefront` so that public pages never link the
//! admin endpoints. Extends [`Page`](larder_storefront::Page) with
//! [`OrderStatusAction`].
//!
//! # Example
//!
//! ```rust,ignore
//! use larder_admin::OrderStatusAction;
//!
//! if let Some(task) = page.update_order_status(order_id, OrderStatus::new("shipped")) {
//!     task.await?;
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod orders;

pub use orders::{OrderApi, OrderStatusAction};
