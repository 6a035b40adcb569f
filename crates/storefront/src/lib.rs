//! Larder Storefront - the storefront interaction layer.
//!
//! Wires document events to the storefront JSON API and renders transient
//! feedback banners.
//!
//! # Architecture
//!
//! - [`dom`] - In-memory document: elements, classes, `data-*`, form controls
//! - [`page`] - A loaded page: listeners, event dispatch, background tasks
//! - [`bindings`] - One-time binding of `.add-to-cart`, `.cart-quantity`,
//!   `.needs-validation` and `#search-form`
//! - [`cart`] - Add-to-cart and quantity update requests
//! - [`forms`] - Submit guards
//! - [`notify`] - Auto-expiring banners
//! - [`api`] - The API seam and its `reqwest` implementation
//! - [`host`] - Blocking dialogs and reloads, provided by the embedder
//!
//! # Example
//!
//! ```rust,ignore
//! use larder_storefront::{HttpStorefrontApi, InteractionConfig, Page, ScriptedHost};
//!
//! let config = InteractionConfig::from_env()?;
//! let api = HttpStorefrontApi::new(&config)?;
//! let page = Page::new(config, api, ScriptedHost::new(), document);
//! page.init();
//!
//! let outcome = page.dispatch(button, EventKind::Click);
//! outcome.settle().await;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod bindings;
pub mod cart;
pub mod config;
pub mod dom;
pub mod error;
pub mod forms;
pub mod host;
pub mod notify;
pub mod page;

pub use api::{HttpStorefrontApi, StorefrontApi};
pub use config::{InteractionConfig, Locale, Messages};
pub use dom::{Document, Element, ElementId};
pub use error::ApiError;
pub use host::{Host, ScriptedHost};
pub use notify::ShownAlert;
pub use page::{DispatchOutcome, EventKind, Page};
