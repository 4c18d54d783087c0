//! `reqwest`-backed implementation of the booking API.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use yatra_core::error::{InvalidInputError, TransportError};
use yatra_core::{
    ApiUrl, BookingApi, Credentials, LoginOutput, PasswordChange, Registration, Reservation,
    ResourceId, Result, Token, User,
};

use crate::client::HttpClient;
use crate::endpoints::*;

/// A network-backed booking API.
///
/// # Example
///
/// ```no_run
/// use yatra_core::{ApiUrl, AuthContext, Credentials, MemoryStore, flows};
/// use yatra_http::HttpApi;
///
/// # async fn example() -> Result<(), yatra_core::Error> {
/// let api = HttpApi::new(ApiUrl::new("http://localhost:8800")?)?;
/// let mut ctx = AuthContext::new(MemoryStore::new());
///
/// let user = flows::login(&mut ctx, &api, &Credentials::new("sita@example.com", "pw")).await?;
/// println!("Logged in as {:?}", user.username());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: HttpClient,
}

impl HttpApi {
    /// Create a client for the service at `api`.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the HTTP client cannot be built.
    pub fn new(api: ApiUrl) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(api)?,
        })
    }
}

/// Pick the user record out of an update response: either `{user: {...}}`
/// or the user object itself. The record must carry the id that was updated.
fn updated_user(body: Value, requested: &ResourceId) -> Result<User> {
    let user = match body {
        Value::Object(mut fields) => match fields.remove("user") {
            Some(user @ Value::Object(_)) => User::try_from(user)?,
            Some(other) => {
                fields.insert("user".to_string(), other);
                User::new(fields)
            }
            None => User::new(fields),
        },
        other => User::try_from(other)?,
    };

    match user.id() {
        Some(id) if id == requested.as_str() => Ok(user),
        Some(id) => Err(InvalidInputError::User {
            reason: format!("update response is for '{}', not '{}'", id, requested),
        }
        .into()),
        None => Err(InvalidInputError::User {
            reason: "update response carries no user id".to_string(),
        }
        .into()),
    }
}

#[async_trait]
impl BookingApi for HttpApi {
    fn url(&self) -> &ApiUrl {
        self.client.api()
    }

    #[instrument(skip(self, registration), fields(username = %registration.username()))]
    async fn register(&self, registration: &Registration) -> Result<()> {
        debug!("Registering account");
        self.client
            .send_no_response(Method::POST, REGISTER, registration)
            .await
    }

    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutput> {
        debug!("Logging in");
        let response: LoginResponse = self.client.send(Method::POST, LOGIN, credentials).await?;

        if response.token.is_empty() {
            return Err(TransportError::Http {
                message: "login response carried an empty token".to_string(),
            }
            .into());
        }

        let user = User::try_from(response.user).map_err(|_| InvalidInputError::User {
            reason: "login response 'user' is not an object".to_string(),
        })?;

        Ok(LoginOutput {
            user,
            token: Token::new(response.token),
        })
    }

    #[instrument(skip(self, token))]
    async fn list_reservations(&self, token: &Token) -> Result<Vec<Reservation>> {
        debug!("Listing reservations");
        let response: ReservationsResponse = self
            .client
            .send_authed(Method::GET, USER_RESERVATIONS, token)
            .await?;
        Ok(response.into_vec())
    }

    #[instrument(skip(self, token), fields(%reservation))]
    async fn request_cancel(
        &self,
        reservation: &ResourceId,
        reason: Option<&str>,
        token: &Token,
    ) -> Result<()> {
        debug!("Requesting cancellation");
        self.client
            .send_authed_no_response(
                Method::PUT,
                &request_cancel(reservation),
                &CancelRequest { reason },
                token,
            )
            .await
    }

    #[instrument(skip(self, changes, token), fields(%user, fields = changes.len()))]
    async fn update_user(
        &self,
        user: &ResourceId,
        changes: &Map<String, Value>,
        token: &Token,
    ) -> Result<User> {
        debug!("Updating user");
        let body: Value = self
            .client
            .send_authed_json(Method::PUT, &update_user(user), changes, token)
            .await?;
        updated_user(body, user)
    }

    #[instrument(skip(self, change, token))]
    async fn change_password(&self, change: &PasswordChange, token: &Token) -> Result<()> {
        debug!("Changing password");
        self.client
            .send_authed_no_response(Method::PUT, CHANGE_PASSWORD, change, token)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn u1() -> ResourceId {
        ResourceId::new("u1").unwrap()
    }

    #[test]
    fn updated_user_unwraps_envelope() {
        let user =
            updated_user(json!({"user": {"_id": "u1", "city": "Lalitpur"}}), &u1()).unwrap();
        assert_eq!(user.id(), Some("u1"));
        assert_eq!(user.get("city"), Some(&json!("Lalitpur")));
    }

    #[test]
    fn updated_user_accepts_bare_object() {
        let user = updated_user(json!({"_id": "u1", "username": "sita"}), &u1()).unwrap();
        assert_eq!(user.username(), Some("sita"));
    }

    #[test]
    fn updated_user_keeps_non_object_user_field() {
        let user = updated_user(json!({"_id": "u1", "user": "sita"}), &u1()).unwrap();
        assert_eq!(user.get("user"), Some(&json!("sita")));
    }

    #[test]
    fn updated_user_rejects_non_objects() {
        assert!(updated_user(json!("ok"), &u1()).is_err());
    }

    #[test]
    fn updated_user_rejects_status_bodies() {
        let err = updated_user(json!({"message": "Updated"}), &u1()).unwrap_err();
        assert!(matches!(err, yatra_core::Error::InvalidInput(_)));
    }

    #[test]
    fn updated_user_rejects_other_users() {
        assert!(updated_user(json!({"user": {"_id": "u2"}}), &u1()).is_err());
        assert!(updated_user(json!({"id": "u1"}), &u1()).is_ok());
    }
}
