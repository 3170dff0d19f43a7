//! Signed request execution shared by every endpoint group

use crate::error::{RestError, RestResult};
use cbpro_auth::{Credentials, RequestSigner};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Borrowed view of the client used by endpoint groups
#[derive(Clone, Copy)]
pub(crate) struct ApiContext<'a> {
    client: &'a Client,
    base_url: &'a str,
    credentials: &'a Credentials,
}

impl<'a> ApiContext<'a> {
    pub(crate) fn new(client: &'a Client, base_url: &'a str, credentials: &'a Credentials) -> Self {
        Self {
            client,
            base_url,
            credentials,
        }
    }

    /// Authenticated GET without query parameters
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> RestResult<T> {
        self.get_with_query(path, &()).await
    }

    /// Authenticated GET with query parameters
    ///
    /// The query string is part of the signed request path.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> RestResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request_path = with_query(path, query)?;
        let body = self.execute(Method::GET, &request_path, None).await?;
        decode(&request_path, &body)
    }

    /// Authenticated POST with a JSON body
    pub(crate) async fn post<T, B>(&self, path: &str, payload: &B) -> RestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.post_raw(path, payload).await?;
        decode(path, &body)
    }

    /// Authenticated POST whose success response may have no body
    pub(crate) async fn post_optional<T, B>(&self, path: &str, payload: &B) -> RestResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = self.post_raw(path, payload).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        decode(path, &body).map(Some)
    }

    /// Authenticated DELETE with query parameters
    pub(crate) async fn delete_with_query<T, Q>(&self, path: &str, query: &Q) -> RestResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request_path = with_query(path, query)?;
        let body = self.execute(Method::DELETE, &request_path, None).await?;
        decode(&request_path, &body)
    }

    async fn post_raw<B: Serialize + ?Sized>(&self, path: &str, payload: &B) -> RestResult<String> {
        let json = serde_json::to_string(payload)
            .map_err(|e| RestError::Validation(format!("unserializable request body: {}", e)))?;
        self.execute(Method::POST, path, Some(json)).await
    }

    /// Sign, send and classify one request; returns the raw success body
    async fn execute(&self, method: Method, request_path: &str, body: Option<String>) -> RestResult<String> {
        let body = body.unwrap_or_default();
        let signer = RequestSigner::new(self.credentials, method.as_str(), request_path);
        let headers = signer.headers(&body)?;
        let url = format!("{}{}", self.base_url, request_path);

        debug!("Making authenticated {} request to {}", method, request_path);

        let mut request = self.client.request(method.clone(), &url);
        for (name, value) in headers.iter() {
            request = request.header(name, value);
        }
        if !body.is_empty() {
            request = request
                .header("Content-Type", "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "{} {} failed", method, request_path);
            return Err(RestError::from_response(status.as_u16(), &text));
        }

        Ok(text)
    }
}

/// Append an urlencoded query to a path; empty queries leave the path unchanged
fn with_query<Q: Serialize + ?Sized>(path: &str, query: &Q) -> RestResult<String> {
    let encoded = serde_urlencoded::to_string(query)
        .map_err(|e| RestError::Validation(format!("unencodable query: {}", e)))?;

    if encoded.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, encoded))
    }
}

/// Check a caller-supplied value before it is interpolated into a path
pub(crate) fn path_segment<'v>(name: &str, value: &'v str) -> RestResult<&'v str> {
    let invalid = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '%'));

    if invalid {
        Err(RestError::Validation(format!("invalid {}: {:?}", name, value)))
    } else {
        Ok(value)
    }
}

fn decode<T: DeserializeOwned>(request_path: &str, body: &str) -> RestResult<T> {
    serde_json::from_str(body)
        .map_err(|e| RestError::Parse(format!("{} returned unexpected body: {}", request_path, e)))
}
