//! HTTP client for the commerce backend's cart and checkout endpoints.
//!
//! Wraps `reqwest` with typed request/response bodies and a uniform
//! non-2xx-to-[`ClientError::Api`] translation that surfaces the backend's
//! own error message when the body carries one.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::types::{
    AddLineBody, ApiErrorBody, CartEnvelope, CheckoutCreated, CreateCheckoutBody, RemoveLineBody,
    SetQuantityBody,
};

/// Client for the cart/checkout REST surface.
///
/// Holds the HTTP client and base URL. The base URL is injectable so tests
/// can point at a mock server.
pub struct CartApiClient {
    client: Client,
    base_url: Url,
}

impl CartApiClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: exactly one trailing slash so Url::join treats the
        // final path segment as a directory rather than replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches the authoritative cart snapshot.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body does not match the
    ///   expected envelope.
    pub async fn fetch_cart(&self) -> Result<CartEnvelope, ClientError> {
        self.request_json(Method::GET, "cart", None::<&()>).await
    }

    /// Creates or increments a cart line.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] on a non-2xx status, [`ClientError::Http`] on
    /// network failure.
    pub async fn add_line(
        &self,
        slug: &str,
        variant_id: Option<&str>,
        quantity: u32,
    ) -> Result<(), ClientError> {
        let body = AddLineBody {
            slug,
            variant_id,
            quantity,
        };
        self.request_no_content(Method::POST, "cart", &body).await
    }

    /// Sets a line's quantity. The line is addressed by variant id when it
    /// has one, else by product slug.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] on a non-2xx status, [`ClientError::Http`] on
    /// network failure.
    pub async fn set_line_quantity(
        &self,
        product_or_variant_id: &str,
        quantity: u32,
    ) -> Result<(), ClientError> {
        let body = SetQuantityBody {
            product_or_variant_id,
            quantity,
        };
        self.request_no_content(Method::PATCH, "cart", &body).await
    }

    /// Removes a cart line.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] on a non-2xx status, [`ClientError::Http`] on
    /// network failure.
    pub async fn remove_line(&self, product_or_variant_id: &str) -> Result<(), ClientError> {
        let body = RemoveLineBody {
            product_or_variant_id,
        };
        self.request_no_content(Method::DELETE, "cart", &body).await
    }

    /// Creates a checkout for the current cart and returns its identifier.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status, carrying the response
    ///   body's reported error.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the created checkout lacks an id.
    pub async fn create_checkout(&self, channel: &str) -> Result<CheckoutCreated, ClientError> {
        let body = CreateCheckoutBody { channel };
        self.request_json(Method::POST, "checkout", Some(&body))
            .await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join \"{path}\": {e}"),
            })
    }

    /// Sends a request, triages the status, and parses the body as `T`.
    async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = self.endpoint(path)?;
        let context = format!("{method} {url}");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let response = Self::check_status(response).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::Deserialize {
            context,
            source: e,
        })
    }

    /// Sends a request and discards any success body. Mutation endpoints
    /// return nothing the client relies on; the authoritative state is
    /// re-fetched separately.
    async fn request_no_content<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ClientError>
    where
        B: Serialize + Sync,
    {
        let url = self.endpoint(path)?;
        let response = self.client.request(method, url).json(body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Passes 2xx responses through; turns anything else into
    /// [`ClientError::Api`] with the body's reported message when present.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ApiErrorBody>(&text).ok())
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| generic_status_message(status));

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

fn generic_status_message(status: StatusCode) -> String {
    format!("cart API request failed with status {status}")
}
