//! One-time event binding, run by the host when the page is ready.
//!
//! Only elements present at that moment get listeners. Elements inserted
//! afterwards (including by the server through a partial render) stay
//! unbound until the next full page load.

use std::sync::atomic::Ordering;

use crate::api::StorefrontApi;
use crate::forms::{NEEDS_VALIDATION_CLASS, SEARCH_FORM_ID};
use crate::host::Host;
use crate::page::{Action, EventKind, Page};

/// Class of add-to-cart triggers; they carry `data-product-id`.
pub const ADD_TO_CART_CLASS: &str = "add-to-cart";

/// Class of cart quantity inputs; they carry `data-item-id`.
pub const CART_QUANTITY_CLASS: &str = "cart-quantity";

impl<A, H> Page<A, H>
where
    A: StorefrontApi,
    H: Host,
{
    /// Attach every listener. Returns `false` if the page was already
    /// initialised, in which case nothing is bound twice.
    pub fn init(&self) -> bool {
        if self.initialized().swap(true, Ordering::SeqCst) {
            tracing::warn!("Page already initialised; ignoring");
            return false;
        }

        self.init_cart_functions();
        self.init_form_validation();
        self.init_search();

        tracing::debug!(listeners = self.listener_count(), "Page initialised");
        true
    }

    fn init_cart_functions(&self) {
        let (buttons, inputs) = self.with_document(|doc| {
            (
                doc.query_class(ADD_TO_CART_CLASS),
                doc.query_class(CART_QUANTITY_CLASS),
            )
        });

        for button in buttons {
            self.add_listener(button, EventKind::Click, Action::AddToCart);
        }
        for input in inputs {
            self.add_listener(input, EventKind::Change, Action::UpdateCartQuantity);
        }
    }

    fn init_form_validation(&self) {
        let forms = self.with_document(|doc| doc.query_class(NEEDS_VALIDATION_CLASS));
        for form in forms {
            self.add_listener(form, EventKind::Submit, Action::ValidateForm);
        }
    }

    fn init_search(&self) {
        if let Some(form) = self.with_document(|doc| doc.by_dom_id(SEARCH_FORM_ID)) {
            self.add_listener(form, EventKind::Submit, Action::GuardSearch);
        }
    }
}
