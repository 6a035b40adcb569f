//! Transient notification banners.
//!
//! Banners are appended to the end of the body and expire on a timer. The
//! timer removes whichever `.alert` element comes first in the document at
//! the time it fires, which is not necessarily the banner that scheduled it:
//! overlapping banners (or a server-rendered `.alert` earlier in the page)
//! can make a banner disappear early or outlive its own timer.

use askama::Template;
use larder_core::{Notification, NotificationKind};
use tokio::task::JoinHandle;

use crate::dom::{Element, ElementId};
use crate::host::Host;
use crate::page::Page;

/// Class shared by every banner; expiry targets the first element with it.
pub const ALERT_CLASS: &str = "alert";

/// Banner markup.
#[derive(Template)]
#[template(path = "alert.html")]
struct AlertTemplate<'a> {
    message: &'a str,
    alert_class: &'a str,
}

/// A banner that was just shown.
#[derive(Debug)]
pub struct ShownAlert {
    /// The inserted banner element.
    pub element: ElementId,
    /// Expiry timer.
    pub expiry: JoinHandle<()>,
}

impl<A, H> Page<A, H>
where
    A: Send + Sync + 'static,
    H: Host,
{
    /// Show a banner and schedule its removal after the configured timeout.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn show_alert(&self, message: &str, kind: NotificationKind) -> ShownAlert {
        let html = AlertTemplate {
            message,
            alert_class: kind.alert_class(),
        }
        .render()
        .unwrap_or_else(|e| {
            tracing::error!("Failed to render alert: {e}");
            String::new()
        });

        let banner = Element::new("div")
            .with_class(ALERT_CLASS)
            .with_class(kind.alert_class())
            .with_class("alert-dismissible")
            .with_class("fade")
            .with_class("show")
            .with_class("position-fixed")
            .with_attr("role", "alert")
            .with_attr("style", "top: 20px; right: 20px; z-index: 1050;")
            .with_text(message)
            .with_html(html);

        let element = self.with_document_mut(|doc| doc.append(banner));
        tracing::debug!(%kind, element = element.index(), "Alert shown");

        let page = self.clone();
        let timeout = self.config().alert_timeout;
        let expiry = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            page.with_document_mut(|doc| {
                if let Some(first) = doc.first_with_class(ALERT_CLASS) {
                    doc.remove(first);
                }
            });
        });

        ShownAlert { element, expiry }
    }

    /// Show a [`Notification`].
    pub fn notify(&self, notification: &Notification) -> ShownAlert {
        self.show_alert(&notification.message, notification.kind)
    }

    /// The user closed a banner. Returns `false` if it was already gone.
    pub fn dismiss_alert(&self, element: ElementId) -> bool {
        self.with_document_mut(|doc| {
            let is_alert = doc.get(element).is_some_and(|el| el.has_class(ALERT_CLASS));
            is_alert && doc.remove(element).is_some()
        })
    }

    /// Banners currently in the document, in document order.
    #[must_use]
    pub fn alerts(&self) -> Vec<Notification> {
        self.with_document(|doc| {
            doc.query_class(ALERT_CLASS)
                .into_iter()
                .filter_map(|id| doc.get(id))
                .map(|el| {
                    let kind = if el.has_class(NotificationKind::Error.alert_class()) {
                        NotificationKind::Error
                    } else {
                        NotificationKind::Success
                    };
                    Notification {
                        message: el.text().to_string(),
                        kind,
                    }
                })
                .collect()
        })
    }
}
