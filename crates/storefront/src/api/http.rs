//! `reqwest`-backed implementation of the storefront API.

use larder_core::{
    AddToCartRequest, ApiReply, CartItemId, Endpoint, HttpMethod, UpdateCartItemRequest,
};
use reqwest::header::{ACCEPT, COOKIE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::instrument;
use url::Url;

use super::StorefrontApi;
use crate::config::InteractionConfig;
use crate::error::{ApiError, Result};

/// HTTP client for the storefront JSON API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct HttpStorefrontApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpStorefrontApi {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the session cookie is not a valid header value or
    /// the HTTP client fails to build.
    pub fn new(config: &InteractionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(cookie) = &config.session_cookie {
            let mut value = HeaderValue::from_str(cookie.0.expose_secret())
                .map_err(|e| ApiError::Header(format!("Invalid session cookie: {e}")))?;
            value.set_sensitive(true);
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Base URL endpoint paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of an endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the path cannot be joined onto the base URL.
    pub fn endpoint_url(&self, endpoint: &Endpoint<'_>) -> Result<Url> {
        let path = endpoint.path();
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Send a JSON body to an endpoint and decode the JSON reply.
    ///
    /// The reply is decoded whatever the HTTP status: error replies carry
    /// their message in the body.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is not usable JSON.
    #[instrument(skip(self, body), fields(method = %endpoint.method(), path = %endpoint.path()))]
    pub async fn send<B>(&self, endpoint: Endpoint<'_>, body: &B) -> Result<ApiReply>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.endpoint_url(&endpoint)?;
        let request = match endpoint.method() {
            HttpMethod::Post => self.client.post(url),
            HttpMethod::Put => self.client.put(url),
        };

        let response = request.json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "API replied with non-success status");
        }

        Ok(ApiReply::from_slice(&bytes)?)
    }
}

impl StorefrontApi for HttpStorefrontApi {
    async fn add_to_cart(&self, request: &AddToCartRequest) -> Result<ApiReply> {
        self.send(Endpoint::AddToCart, request).await
    }

    async fn update_cart_item(
        &self,
        item_id: &CartItemId,
        request: &UpdateCartItemRequest,
    ) -> Result<ApiReply> {
        self.send(Endpoint::UpdateCartItem(item_id), request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::SessionCookie;

    fn api(base: &str) -> HttpStorefrontApi {
        HttpStorefrontApi::new(&InteractionConfig::new(Url::parse(base).unwrap())).unwrap()
    }

    #[test]
    fn test_endpoint_url_at_root() {
        let api = api("http://shop.test");
        assert_eq!(
            api.endpoint_url(&Endpoint::AddToCart).unwrap().as_str(),
            "http://shop.test/api/cart/add"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_base_prefix() {
        let api = api("http://shop.test/store");
        let item = CartItemId::new("7");
        assert_eq!(
            api.endpoint_url(&Endpoint::UpdateCartItem(&item))
                .unwrap()
                .as_str(),
            "http://shop.test/store/api/cart/update/7"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_encoded_segment() {
        let api = api("http://shop.test/");
        let item = CartItemId::new("../admin");
        assert_eq!(
            api.endpoint_url(&Endpoint::UpdateCartItem(&item))
                .unwrap()
                .as_str(),
            "http://shop.test/api/cart/update/..%2Fadmin"
        );
    }

    #[test]
    fn test_invalid_session_cookie_is_rejected() {
        let mut config = InteractionConfig::new(Url::parse("http://shop.test").unwrap());
        config.session_cookie = Some(SessionCookie(SecretString::from("bad\nvalue")));

        let result = HttpStorefrontApi::new(&config);
        assert!(matches!(result, Err(ApiError::Header(_))));
    }
}
