//! Remote booking API trait.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::types::{ApiUrl, Reservation, ResourceId, User};
use crate::{Credentials, PasswordChange, Registration, Result, Token};

/// Output from a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutput {
    /// The logged-in user, as returned by the service.
    pub user: User,
    /// The bearer token for subsequent protected calls.
    pub token: Token,
}

/// The remote booking service.
///
/// Implementations perform one HTTP call per method and never touch
/// session state; callers dispatch the outcome into an
/// [`AuthContext`](crate::AuthContext).
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// Returns the base URL of the service.
    fn url(&self) -> &ApiUrl;

    /// Create a new account.
    async fn register(&self, registration: &Registration) -> Result<()>;

    /// Authenticate and obtain the user record and a bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<LoginOutput>;

    /// List the reservations of the token's user.
    async fn list_reservations(&self, token: &Token) -> Result<Vec<Reservation>>;

    /// Ask the service to cancel a reservation.
    async fn request_cancel(
        &self,
        reservation: &ResourceId,
        reason: Option<&str>,
        token: &Token,
    ) -> Result<()>;

    /// Update profile fields of a user, returning the updated record.
    async fn update_user(
        &self,
        user: &ResourceId,
        changes: &Map<String, Value>,
        token: &Token,
    ) -> Result<User>;

    /// Change the password of the token's user.
    async fn change_password(&self, change: &PasswordChange, token: &Token) -> Result<()>;
}
