//! Submit guards: constraint validation and the empty-search check.

use crate::host::Host;
use crate::page::{Event, Page};

/// Marker class for forms validated before submission.
pub const NEEDS_VALIDATION_CLASS: &str = "needs-validation";

/// Class added to a form once submission was attempted.
pub const WAS_VALIDATED_CLASS: &str = "was-validated";

/// `id` of the site search form.
pub const SEARCH_FORM_ID: &str = "search-form";

/// `name` of the query input inside the search form.
pub const SEARCH_INPUT_NAME: &str = "search";

impl<A, H> Page<A, H>
where
    A: Send + Sync + 'static,
    H: Host,
{
    /// Submit of a `.needs-validation` form.
    ///
    /// The form is marked as validated whether or not it passes, so the
    /// browser's validity styling kicks in on the first attempt.
    pub(crate) fn on_validated_form_submit(&self, event: &mut Event) {
        let valid = self.with_document_mut(|doc| {
            let valid = doc.check_validity(event.target);
            doc.add_class(event.target, WAS_VALIDATED_CLASS);
            valid
        });

        if !valid {
            tracing::debug!(form = event.target.index(), "Blocked invalid form submission");
            event.prevent_default();
            event.stop_propagation();
        }
    }

    /// Submit of the `#search-form`.
    pub(crate) fn on_search_submit(&self, event: &mut Event) {
        let query = self.with_document(|doc| {
            doc.named_input(event.target, SEARCH_INPUT_NAME)
                .and_then(|id| doc.get(id))
                .map(|input| input.value().to_string())
        });

        match query {
            Some(query) if query.trim().is_empty() => {
                tracing::debug!("Blocked empty search");
                event.prevent_default();
            }
            Some(_) => {}
            // Nothing to check, so the submission goes ahead
            None => tracing::warn!("Search form has no input named {SEARCH_INPUT_NAME:?}"),
        }
    }
}
