//! Wire contract of the storefront JSON API.
//!
//! Endpoint table, request bodies, and the loosely-typed reply envelope.
//! Nothing here performs I/O; the HTTP client lives in `larder-storefront`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{CartItemId, OrderId, OrderStatus, ProductId, Quantity, QuantityInput};

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Post,
    Put,
}

impl HttpMethod {
    /// Method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed set of endpoints the interaction layer talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `POST /api/cart/add`
    AddToCart,
    /// `PUT /api/cart/update/{item_id}`
    UpdateCartItem(&'a CartItemId),
    /// `PUT /api/admin/orders/{order_id}/status`
    UpdateOrderStatus(&'a OrderId),
}

impl Endpoint<'_> {
    /// HTTP method for this endpoint.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        match self {
            Self::AddToCart => HttpMethod::Post,
            Self::UpdateCartItem(_) | Self::UpdateOrderStatus(_) => HttpMethod::Put,
        }
    }

    /// Absolute path, with identifiers percent-encoded as a single segment.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::AddToCart => "/api/cart/add".to_string(),
            Self::UpdateCartItem(item_id) => {
                format!("/api/cart/update/{}", urlencoding::encode(item_id.as_str()))
            }
            Self::UpdateOrderStatus(order_id) => format!(
                "/api/admin/orders/{}/status",
                urlencoding::encode(order_id.as_str())
            ),
        }
    }
}

/// Body of `POST /api/cart/add`.
///
/// A trigger without a product id still posts; the field is then left out
/// and the server answers with an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub quantity: Quantity,
}

/// Body of `PUT /api/cart/update/{item_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: QuantityInput,
}

/// Body of `PUT /api/admin/orders/{order_id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Errors decoding a reply body.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// Body was not JSON.
    #[error("malformed reply: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Body was the JSON literal `null`, which has no fields to inspect.
    #[error("reply body was null")]
    Null,
}

/// A decoded reply from any endpoint.
///
/// The server answers with arbitrary JSON; the only field the client acts on
/// is `error`. Replies are decoded regardless of HTTP status because the
/// server reports failures as 4xx responses with an `{"error": ...}` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiReply(Value);

impl ApiReply {
    /// Wrap an already-decoded JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ReplyError::Null`] for the JSON literal `null`.
    pub fn from_value(value: Value) -> Result<Self, ReplyError> {
        if value.is_null() {
            return Err(ReplyError::Null);
        }
        Ok(Self(value))
    }

    /// Decode a reply body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not JSON or is `null`.
    pub fn from_slice(body: &[u8]) -> Result<Self, ReplyError> {
        Self::from_value(serde_json::from_slice(body)?)
    }

    /// The application-level error carried by this reply, if any.
    ///
    /// An `error` field only counts when it is truthy: `null`, `false`, `0`
    /// and `""` mean "no error". Non-string values are rendered as JSON.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        match self.0.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Informational `message` field, when the server sends one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// Borrow the raw JSON.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Successful reply with no body fields.
    #[must_use]
    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    /// Reply carrying an application-level error.
    #[must_use]
    pub fn with_error(message: impl Into<String>) -> Self {
        Self(serde_json::json!({ "error": message.into() }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reply(value: Value) -> ApiReply {
        ApiReply::from_value(value).unwrap()
    }

    #[test]
    fn test_endpoint_methods_and_paths() {
        let item = CartItemId::new("12");
        let order = OrderId::new("5");

        assert_eq!(Endpoint::AddToCart.method(), HttpMethod::Post);
        assert_eq!(Endpoint::AddToCart.path(), "/api/cart/add");
        assert_eq!(Endpoint::UpdateCartItem(&item).method(), HttpMethod::Put);
        assert_eq!(Endpoint::UpdateCartItem(&item).path(), "/api/cart/update/12");
        assert_eq!(
            Endpoint::UpdateOrderStatus(&order).path(),
            "/api/admin/orders/5/status"
        );
    }

    #[test]
    fn test_endpoint_path_encodes_identifier() {
        let item = CartItemId::new("a/b c");
        assert_eq!(
            Endpoint::UpdateCartItem(&item).path(),
            "/api/cart/update/a%2Fb%20c"
        );
    }

    #[test]
    fn test_add_to_cart_body_shape() {
        let body = AddToCartRequest {
            product_id: Some(ProductId::new("P1")),
            quantity: Quantity::ONE,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "product_id": "P1", "quantity": 1 })
        );
    }

    #[test]
    fn test_add_to_cart_body_without_product() {
        let body = AddToCartRequest {
            product_id: None,
            quantity: Quantity::ONE,
        };
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "quantity": 1 }));
    }

    #[test]
    fn test_update_body_forwards_raw_quantity() {
        let body = UpdateCartItemRequest {
            quantity: QuantityInput::from_input("2.5"),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "quantity": "2.5" })
        );
    }

    #[test]
    fn test_status_body_shape() {
        let body = UpdateOrderStatusRequest {
            status: OrderStatus::new("shipped"),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "status": "shipped" })
        );
    }

    #[test]
    fn test_error_message_string() {
        let r = reply(json!({ "error": "Out of stock" }));
        assert_eq!(r.error_message().as_deref(), Some("Out of stock"));
    }

    #[test]
    fn test_error_message_falsy_values_mean_success() {
        for value in [json!(null), json!(false), json!(0), json!("")] {
            let r = reply(json!({ "error": value }));
            assert_eq!(r.error_message(), None, "error = {value}");
        }
    }

    #[test]
    fn test_error_message_non_string_is_rendered() {
        let r = reply(json!({ "error": 404 }));
        assert_eq!(r.error_message().as_deref(), Some("404"));
    }

    #[test]
    fn test_missing_error_and_non_object_replies_succeed() {
        assert_eq!(reply(json!({ "message": "ok" })).error_message(), None);
        assert_eq!(reply(json!([1, 2])).error_message(), None);
        assert_eq!(reply(json!("done")).error_message(), None);
    }

    #[test]
    fn test_message_field() {
        let r = reply(json!({ "message": "Added" }));
        assert_eq!(r.message(), Some("Added"));
    }

    #[test]
    fn test_from_slice_rejects_null_and_garbage() {
        assert!(matches!(ApiReply::from_slice(b"null"), Err(ReplyError::Null)));
        assert!(matches!(
            ApiReply::from_slice(b"<html>"),
            Err(ReplyError::Malformed(_))
        ));
        assert!(ApiReply::from_slice(br#"{"error":"x"}"#).is_ok());
    }

    #[test]
    fn test_constructors() {
        assert_eq!(ApiReply::empty().error_message(), None);
        assert_eq!(
            ApiReply::with_error("nope").error_message().as_deref(),
            Some("nope")
        );
    }
}
