//! HTTP client for communicating with the remote API
//!
//! Every outbound request goes through [`ApiClient`]. It joins request paths
//! onto one fixed base address and, when the shared [`Session`] holds a
//! token, attaches it as `Authorization: Bearer <token>`. Nothing is retried.

use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use fm_admin_core::{ErrorPayload, config::ApiConfig};
use reqwest::{Client, Method, RequestBuilder, Response, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// API client for making HTTP requests to the remote service
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Create a new API client with default transport settings
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    /// Create a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be initialized.
    pub fn from_config(config: &ApiConfig, session: Session) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ClientError::Network)?;
        Ok(Self::with_client(client, config.base_url.clone(), session))
    }

    fn with_client(client: Client, base_url: impl Into<String>, session: Session) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Base address all paths are relative to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session whose token is attached to requests
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.url(path));

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token.expose());
        }

        request
    }

    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            debug!("{} {} failed before a response: {}", method, path, e);
            ClientError::Network(e)
        })?;

        let status = response.status();
        debug!("{} {} -> {}", method, path, status);

        if status.is_success() {
            return Ok(response);
        }

        // The body is best effort: a missing or foreign payload still yields a status error
        let message = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorPayload>(&body).ok())
            .and_then(|payload| payload.message)
            .filter(|message| !message.trim().is_empty());

        Err(ClientError::status(status, message))
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> ClientResult<T> {
        let body = response.bytes().await.map_err(ClientError::Network)?;
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &body
        };

        serde_json::from_slice(body).map_err(|e| ClientError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Read a collection or document
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server rejects it, or the
    /// body does not decode into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self
            .send(Method::GET, path, self.request(Method::GET, path))
            .await?;
        Self::decode(path, response).await
    }

    /// Read one record of a collection
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn get_by_id<T: DeserializeOwned>(&self, path: &str, id: &str) -> ClientResult<T> {
        self.get(&member_path(path, id)).await
    }

    /// Create a record from a JSON body
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(Method::POST, path, request).await?;
        Self::decode(path, response).await
    }

    /// Create a record from a multipart form
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> ClientResult<T> {
        let request = self.request(Method::POST, path).multipart(form);
        let response = self.send(Method::POST, path, request).await?;
        Self::decode(path, response).await
    }

    /// Replace a record
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = self.request(Method::PUT, path).json(body);
        let response = self.send(Method::PUT, path, request).await?;
        Self::decode(path, response).await
    }

    /// Partially update a record without a request body
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`].
    pub async fn patch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self
            .send(Method::PATCH, path, self.request(Method::PATCH, path))
            .await?;
        Self::decode(path, response).await
    }

    /// Delete a record; the response body is discarded
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path))
            .await
            .map(drop)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

/// Path of one member of a collection, with the identifier percent-encoded
#[must_use]
pub fn member_path(collection: &str, id: &str) -> String {
    format!(
        "{}/{}",
        collection.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}
