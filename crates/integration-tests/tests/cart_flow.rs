//! Cart interactions end to end: bound elements, real HTTP, banners.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use larder_core::{CartItemId, Notification, ProductId, Quantity};
use larder_integration_tests::{
    MockApi, ScriptedReply, TEST_ALERT_TIMEOUT, TEST_RELOAD_DELAY, http_page, test_config,
    unreachable_base_url,
};
use larder_storefront::bindings::{ADD_TO_CART_CLASS, CART_QUANTITY_CLASS};
use larder_storefront::config::SessionCookie;
use larder_storefront::forms::{NEEDS_VALIDATION_CLASS, SEARCH_FORM_ID, SEARCH_INPUT_NAME};
use larder_storefront::{Document, Element, ElementId, EventKind, ScriptedHost};
use secrecy::SecretString;
use serde_json::json;

fn product_page() -> (Document, ElementId) {
    let mut doc = Document::new();
    let button = doc.append(
        Element::new("button")
            .with_class("btn")
            .with_class(ADD_TO_CART_CLASS)
            .with_data("product-id", "42")
            .with_text("Add to cart"),
    );
    (doc, button)
}

fn cart_page(item_id: &str) -> (Document, ElementId) {
    let mut doc = Document::new();
    let input = doc.append(
        Element::input("number")
            .with_class(CART_QUANTITY_CLASS)
            .with_data("item-id", item_id)
            .with_value("1"),
    );
    (doc, input)
}

#[tokio::test]
async fn test_add_to_cart_click_posts_and_shows_banner() {
    let mock = MockApi::start().await;
    mock.push_reply(ScriptedReply::ok(json!({ "message": "Added" })));
    let (doc, button) = product_page();
    let page = http_page(test_config(mock.base_url()), ScriptedHost::new(), doc);
    page.init();

    let outcome = page.dispatch(button, EventKind::Click);
    assert!(outcome.default_prevented);
    outcome.settle().await;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/api/cart/add");
    assert_eq!(requests[0].body, json!({ "product_id": "42", "quantity": 1 }));
    assert_eq!(page.alerts(), vec![Notification::success("Added to cart")]);

    tokio::time::sleep(TEST_ALERT_TIMEOUT * 2).await;
    assert!(page.alerts().is_empty());
}

#[tokio::test]
async fn test_add_to_cart_error_reply_is_shown_verbatim() {
    let mock = MockApi::start().await;
    mock.push_reply(ScriptedReply::json(
        StatusCode::BAD_REQUEST,
        json!({ "error": "库存不足" }),
    ));
    let (doc, button) = product_page();
    let page = http_page(test_config(mock.base_url()), ScriptedHost::new(), doc);
    page.init();

    page.dispatch(button, EventKind::Click).settle().await;

    assert_eq!(page.alerts(), vec![Notification::error("库存不足")]);
}

#[tokio::test]
async fn test_add_to_cart_malformed_reply_asks_to_retry() {
    let mock = MockApi::start().await;
    mock.push_reply(ScriptedReply::raw(
        StatusCode::INTERNAL_SERVER_ERROR,
        "<html>Internal Server Error</html>",
    ));
    let (doc, button) = product_page();
    let page = http_page(test_config(mock.base_url()), ScriptedHost::new(), doc);
    page.init();

    page.dispatch(button, EventKind::Click).settle().await;

    assert_eq!(
        page.alerts(),
        vec![Notification::error("Could not add to cart, please try again")]
    );
}

#[tokio::test]
async fn test_add_to_cart_unreachable_server_asks_to_retry() {
    let (doc, button) = product_page();
    let page = http_page(
        test_config(unreachable_base_url().await),
        ScriptedHost::new(),
        doc,
    );
    page.init();

    page.dispatch(button, EventKind::Click).settle().await;

    assert_eq!(
        page.alerts(),
        vec![Notification::error("Could not add to cart, please try again")]
    );
}

#[tokio::test]
async fn test_programmatic_add_uses_given_quantity() {
    let mock = MockApi::start().await;
    let page = http_page(
        test_config(mock.base_url()),
        ScriptedHost::new(),
        Document::new(),
    );

    page.add_to_cart(ProductId::new("9"), Quantity::new(3))
        .await
        .unwrap();

    assert_eq!(
        mock.requests()[0].body,
        json!({ "product_id": "9", "quantity": 3 })
    );
}

#[tokio::test]
async fn test_quantity_change_puts_and_reloads() {
    let mock = MockApi::start().await;
    let (doc, input) = cart_page("7");
    let page = http_page(test_config(mock.base_url()), ScriptedHost::new(), doc);
    page.init();

    page.with_document_mut(|doc| doc.set_value(input, "3"));
    page.dispatch(input, EventKind::Change).settle().await;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/api/cart/update/7");
    assert_eq!(requests[0].body, json!({ "quantity": 3 }));
    assert_eq!(page.alerts(), vec![Notification::success("Cart updated")]);

    tokio::time::sleep(TEST_RELOAD_DELAY * 3).await;
    assert_eq!(page.host().reload_count(), 1);
}

#[tokio::test]
async fn test_quantity_error_reply_does_not_reload() {
    let mock = MockApi::start().await;
    mock.push_reply(ScriptedReply::json(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({ "error": "Quantity exceeds stock" }),
    ));
    let (doc, input) = cart_page("7");
    let page = http_page(test_config(mock.base_url()), ScriptedHost::new(), doc);
    page.init();

    page.with_document_mut(|doc| doc.set_value(input, "99"));
    page.dispatch(input, EventKind::Change).settle().await;
    tokio::time::sleep(TEST_RELOAD_DELAY * 3).await;

    assert_eq!(
        page.alerts(),
        vec![Notification::error("Quantity exceeds stock")]
    );
    assert_eq!(page.host().reload_count(), 0);
}

#[tokio::test]
async fn test_non_integer_quantity_is_sent_as_typed() {
    let mock = MockApi::start().await;
    mock.push_reply(ScriptedReply::json(
        StatusCode::BAD_REQUEST,
        json!({ "error": "Invalid quantity" }),
    ));
    let (doc, input) = cart_page("7");
    let page = http_page(test_config(mock.base_url()), ScriptedHost::new(), doc);
    page.init();

    page.with_document_mut(|doc| doc.set_value(input, "2.5"));
    page.dispatch(input, EventKind::Change).settle().await;
    tokio::time::sleep(TEST_RELOAD_DELAY * 3).await;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, json!({ "quantity": "2.5" }));
    assert_eq!(page.alerts(), vec![Notification::error("Invalid quantity")]);
    assert_eq!(page.host().reload_count(), 0);
}

#[tokio::test]
async fn test_add_to_cart_without_product_id_posts_quantity_only() {
    let mock = MockApi::start().await;
    mock.push_reply(ScriptedReply::json(
        StatusCode::BAD_REQUEST,
        json!({ "error": "Product not found" }),
    ));
    let mut doc = Document::new();
    let button = doc.append(Element::new("button").with_class(ADD_TO_CART_CLASS));
    let page = http_page(test_config(mock.base_url()), ScriptedHost::new(), doc);
    page.init();

    page.dispatch(button, EventKind::Click).settle().await;

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].body, json!({ "quantity": 1 }));
    assert_eq!(page.alerts(), vec![Notification::error("Product not found")]);
}

#[tokio::test]
async fn test_quantity_update_transport_failure_is_silent() {
    let page = http_page(
        test_config(unreachable_base_url().await),
        ScriptedHost::new(),
        Document::new(),
    );

    page.update_cart_item(CartItemId::new("7"), Quantity::new(2))
        .await
        .unwrap();
    tokio::time::sleep(TEST_RELOAD_DELAY * 3).await;

    assert!(page.alerts().is_empty());
    assert_eq!(page.host().reload_count(), 0);
}

#[tokio::test]
async fn test_item_id_is_percent_encoded() {
    let mock = MockApi::start().await;
    let page = http_page(
        test_config(mock.base_url()),
        ScriptedHost::new(),
        Document::new(),
    );

    page.update_cart_item(CartItemId::new("a/b c"), Quantity::new(2))
        .await
        .unwrap();

    assert_eq!(mock.requests()[0].path, "/api/cart/update/a%2Fb%20c");
}

#[tokio::test]
async fn test_base_url_prefix_is_kept() {
    let mock = MockApi::start().await;
    let page = http_page(
        test_config(mock.base_url_with_prefix("shop")),
        ScriptedHost::new(),
        Document::new(),
    );

    page.add_to_cart(ProductId::new("1"), Quantity::ONE)
        .await
        .unwrap();

    assert_eq!(mock.requests()[0].path, "/shop/api/cart/add");
}

#[tokio::test]
async fn test_session_cookie_is_forwarded() {
    let mock = MockApi::start().await;
    let mut config = test_config(mock.base_url());
    config.session_cookie = Some(SessionCookie(SecretString::from("session=abc123")));
    let page = http_page(config, ScriptedHost::new(), Document::new());

    page.add_to_cart(ProductId::new("1"), Quantity::ONE)
        .await
        .unwrap();

    assert_eq!(
        mock.requests()[0].cookie.as_deref(),
        Some("session=abc123")
    );
}

#[tokio::test]
async fn test_form_guards_never_call_the_api() {
    let mock = MockApi::start().await;
    let mut doc = Document::new();
    let signup = doc.append(Element::new("form").with_class(NEEDS_VALIDATION_CLASS));
    doc.append_to_form(
        signup,
        Element::input("email").with_name("email").required(),
    )
    .unwrap();
    let search = doc.append(Element::new("form").with_id(SEARCH_FORM_ID));
    doc.append_to_form(
        search,
        Element::input("search").with_name(SEARCH_INPUT_NAME),
    )
    .unwrap();
    let page = http_page(test_config(mock.base_url()), ScriptedHost::new(), doc);
    page.init();

    assert!(!page.dispatch(signup, EventKind::Submit).proceeds());
    assert!(!page.dispatch(search, EventKind::Submit).proceeds());
    assert!(mock.requests().is_empty());
}
