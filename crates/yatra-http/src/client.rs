//! JSON-over-HTTP client.

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use yatra_core::error::{AuthError, Error, ProtocolError, TransportError};
use yatra_core::{ApiUrl, Token};

use crate::endpoints::ErrorResponse;

/// Longest plain-text error body carried into an error message.
const MAX_ERROR_TEXT: usize = 200;

/// Map a `reqwest` failure onto the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl HttpClient {
    /// Create a new client for the given API.
    pub fn new(api: ApiUrl) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("yatra/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, api })
    }

    /// Returns the API URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Make an unauthenticated JSON request.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn send<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%method, %url, "API request");

        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Make an authenticated request without a body.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn send_authed<R>(&self, method: Method, path: &str, token: &Token) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%method, "Authenticated API request");

        let request = self.client.request(method, &url);
        let response = self
            .authorize(request, token)?
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Make an authenticated JSON request.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn send_authed_json<B, R>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: &Token,
    ) -> Result<R, Error>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%method, "Authenticated API request with body");

        let request = self.client.request(method, &url).json(body);
        let response = self
            .authorize(request, token)?
            .send()
            .await
            .map_err(transport_error)?;

        self.handle_response(response).await
    }

    /// Make an authenticated JSON request whose response body is ignored.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn send_authed_no_response<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        token: &Token,
    ) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.api.endpoint(path);
        debug!(%method, "Authenticated API request (no response)");

        let request = self.client.request(method, &url).json(body);
        let response = self
            .authorize(request, token)?
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "API response");
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    /// Make an unauthenticated JSON request whose response body is ignored.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn send_no_response<B>(&self, method: Method, path: &str, body: &B) -> Result<(), Error>
    where
        B: Serialize + ?Sized,
    {
        let url = self.api.endpoint(path);
        debug!(%method, %url, "API request (no response)");

        let response = self
            .client
            .request(method, &url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "API response");
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    /// Attach the bearer credential.
    fn authorize(&self, request: RequestBuilder, token: &Token) -> Result<RequestBuilder, Error> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| AuthError::InvalidCredentials("token is not a valid header value".into()))?;
        value.set_sensitive(true);
        Ok(request.header(AUTHORIZATION, value))
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport_error)
        } else {
            Err(Error::Protocol(self.parse_error_response(response).await))
        }
    }

    /// Build a protocol error from a non-success response.
    async fn parse_error_response(&self, response: reqwest::Response) -> ProtocolError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => body.message.or(body.error),
            Err(_) => {
                let text = text.trim();
                if text.is_empty() {
                    None
                } else {
                    Some(text.chars().take(MAX_ERROR_TEXT).collect())
                }
            }
        };

        ProtocolError::new(status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let api = ApiUrl::new("https://api.yatranepal.com").unwrap();
        let client = HttpClient::new(api.clone()).unwrap();
        assert_eq!(client.api(), &api);
    }

    #[test]
    fn rejects_tokens_with_newlines() {
        let api = ApiUrl::new("https://api.yatranepal.com").unwrap();
        let client = HttpClient::new(api).unwrap();
        let request = reqwest::Client::new().get("https://api.yatranepal.com");
        let result = client.authorize(request, &Token::new("abc\r\nX-Evil: 1"));
        assert!(matches!(result, Err(Error::Auth(_))));
    }
}
