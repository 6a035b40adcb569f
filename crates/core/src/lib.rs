//! Larder Core - Shared types library.
//!
//! This crate provides common types used across all Larder components:
//! - `storefront` - The storefront interaction layer (events, cart, banners)
//! - `admin` - Privileged order-status actions
//! - `cli` - Terminal host for driving the same actions
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no document
//! model. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for opaque IDs, quantities, and statuses
//! - [`api`] - Endpoint table, request bodies, and the reply envelope

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod types;

pub use api::*;
pub use types::*;
