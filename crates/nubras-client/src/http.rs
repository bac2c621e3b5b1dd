//! HTTP transport for the back-office API.
//!
//! ```text
//! BackOfficeClient ──► HttpClient::get/post/patch/delete
//!                          │  Content-Type: application/json
//!                          │  Cookie: <store> (+ configured session cookie)
//!                          │  x-request-id: <uuid v4>
//!                          ▼
//!                      reqwest (timeout from config, no retry)
//!                          │
//!                 2xx ─────┴───── non-2xx
//!                  │                │
//!     { "data": T } or T      message / error field
//!                  │                │
//!                  ▼                ▼
//!                 Ok(T)       ClientError::{Unauthorized, Forbidden,
//!                              NotFound, Validation, Server}
//! ```

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE, SET_COOKIE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::BackOfficeConfig;
use crate::error::{ClientError, ClientResult};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Response bodies arrive either bare or wrapped in `{ "data": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ApiEnvelope<T> {
    fn into_inner(self) -> T {
        match self {
            ApiEnvelope::Wrapped { data } => data,
            ApiEnvelope::Bare(data) => data,
        }
    }
}

/// A response whose status has already been checked.
pub(crate) struct RawResponse {
    pub headers: HeaderMap,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: Url,
    session_cookie: Option<HeaderValue>,
}

impl HttpClient {
    /// Builds the transport from validated configuration.
    pub fn new(config: &BackOfficeConfig) -> ClientResult<Self> {
        let base_url = config.api_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        let session_cookie = config
            .api
            .session_cookie
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(HeaderValue::from_str)
            .transpose()
            .map_err(|_| ClientError::InvalidConfig("api.session_cookie is not a valid header value".into()))?;

        Ok(Self {
            client,
            base_url,
            session_cookie,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, request_id: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id);

        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie.clone());
        }
        request
    }

    /// Sends a request and checks its status.
    pub(crate) async fn send_raw<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<RawResponse> {
        let request_id = Uuid::new_v4().to_string();
        debug!(%method, path, request_id = %request_id, "API request");

        let mut request = self.request(method.clone(), path, &request_id);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%method, path, request_id = %request_id, status = status.as_u16(), "API request failed");
            return Err(error_for_status(status, &body));
        }

        Ok(RawResponse { headers, body })
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let raw = self.send_raw::<()>(Method::GET, path, None).await?;
        decode(&raw.body)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        let raw = self.send_raw(Method::POST, path, Some(body)).await?;
        decode(&raw.body)
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        let raw = self.send_raw(Method::PATCH, path, Some(body)).await?;
        decode(&raw.body)
    }

    /// Make a DELETE request; any response body is ignored.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send_raw::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }
}

/// Decodes a success body, bare or wrapped. An empty body reads as `null`.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> ClientResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str::<ApiEnvelope<T>>(body)
        .map(ApiEnvelope::into_inner)
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

/// Maps a non-2xx status and body to an error carrying the server's message.
pub(crate) fn error_for_status(status: StatusCode, body: &str) -> ClientError {
    let message = server_message(body);
    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ClientError::Validation(message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message,
        },
    }
}

/// The `message` field of a JSON error body, else `error` (string or
/// `{ message }`).
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    let text = value
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| match value.get("error")? {
            serde_json::Value::String(s) => Some(s.as_str()),
            other => other.get("message").and_then(|m| m.as_str()),
        })?;

    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// `name=value` pairs from every `Set-Cookie` header, joined for reuse as
/// a `Cookie` header.
pub(crate) fn session_cookie_from(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect();

    (!pairs.is_empty()).then(|| pairs.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn test_decode_bare_and_wrapped() {
        let bare: Vec<Item> = decode(r#"[{"id":"a"}]"#).unwrap();
        let wrapped: Vec<Item> = decode(r#"{"data":[{"id":"a"}],"total":1}"#).unwrap();
        assert_eq!(bare, wrapped);

        let single: Item = decode(r#"{"success":true,"data":{"id":"b"}}"#).unwrap();
        assert_eq!(single.id, "b");
    }

    #[test]
    fn test_decode_garbage_is_invalid_response() {
        let result: ClientResult<Item> = decode("<html>502</html>");
        assert!(matches!(result, Err(ClientError::InvalidResponse(_))));
    }

    #[test]
    fn test_server_message() {
        assert_eq!(server_message(r#"{"message":"Order not found"}"#).as_deref(), Some("Order not found"));
        assert_eq!(server_message(r#"{"error":"Invalid amount"}"#).as_deref(), Some("Invalid amount"));
        assert_eq!(server_message(r#"{"error":{"message":"Nested"}}"#).as_deref(), Some("Nested"));
        assert_eq!(server_message(r#"{"message":"  "}"#), None);
        assert_eq!(server_message("Bad Gateway"), None);
        assert_eq!(server_message(""), None);
    }

    #[test]
    fn test_error_for_status() {
        assert!(matches!(
            error_for_status(StatusCode::UNAUTHORIZED, ""),
            ClientError::Unauthorized(None)
        ));
        assert!(matches!(
            error_for_status(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"x"}"#),
            ClientError::Validation(Some(_))
        ));
        assert!(matches!(
            error_for_status(StatusCode::CONFLICT, "{}"),
            ClientError::Server { status: 409, message: None }
        ));
    }

    #[test]
    fn test_session_cookie_from_headers() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("sid=abc123; Path=/; HttpOnly"));
        headers.append(SET_COOKIE, HeaderValue::from_static("csrf=xyz; Path=/"));
        assert_eq!(session_cookie_from(&headers).as_deref(), Some("sid=abc123; csrf=xyz"));

        assert_eq!(session_cookie_from(&HeaderMap::new()), None);
    }

    #[test]
    fn test_url_joins_paths() {
        let mut config = BackOfficeConfig::default();
        config.api.base_url = "http://localhost:4000/api/v1/".into();
        let client = HttpClient::new(&config).unwrap();
        assert_eq!(client.url("/sales"), "http://localhost:4000/api/v1/sales");
        assert_eq!(client.url("sales/overview"), "http://localhost:4000/api/v1/sales/overview");
    }

    #[test]
    fn test_bad_session_cookie_is_config_error() {
        let mut config = BackOfficeConfig::default();
        config.api.session_cookie = Some("sid=a\nb".into());
        assert!(matches!(HttpClient::new(&config), Err(ClientError::InvalidConfig(_))));
    }
}
