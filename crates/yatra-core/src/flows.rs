//! Call-site flows that pair a remote call with session transitions.
//!
//! These encode the dispatch discipline: a login marks the session as
//! fetching, performs the call, then records either success (user and token)
//! or failure. Other calls leave the session alone on failure and surface the
//! error to the caller.

use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use crate::error::AuthError;
use crate::session::AuthContext;
use crate::traits::{BookingApi, KeyValueStore};
use crate::types::{ResourceId, User};
use crate::{Credentials, Registration, Result, Token};

/// Log in and record the outcome in the context.
///
/// On success the token is persisted before the user, so a guard check
/// after this returns sees both. Any failure once the attempt has started,
/// remote or storage, moves the session to its error state and is returned.
#[instrument(skip_all, fields(email = %credentials.email()))]
pub async fn login<A, S>(
    ctx: &mut AuthContext<S>,
    api: &A,
    credentials: &Credentials,
) -> Result<User>
where
    A: BookingApi + ?Sized,
    S: KeyValueStore,
{
    let outcome = match ctx.login_start() {
        Ok(()) => attempt_login(ctx, api, credentials).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(user) => {
            info!(user = user.id().unwrap_or("?"), "Logged in");
            Ok(user)
        }
        Err(e) => {
            if let Err(store_err) = ctx.login_failure() {
                warn!(error = %store_err, "Failed to persist login failure");
            }
            Err(e)
        }
    }
}

async fn attempt_login<A, S>(
    ctx: &mut AuthContext<S>,
    api: &A,
    credentials: &Credentials,
) -> Result<User>
where
    A: BookingApi + ?Sized,
    S: KeyValueStore,
{
    let output = api.login(credentials).await?;
    ctx.set_token(&output.token)?;

    // A token without its user would still pass the guard.
    if let Err(e) = ctx.login_success(output.user.clone()) {
        if let Err(clear_err) = ctx.clear_token() {
            warn!(error = %clear_err, "Failed to erase token after failed login");
        }
        return Err(e);
    }

    Ok(output.user)
}

/// Create an account.
///
/// Registration does not log in: the session is untouched and the caller is
/// expected to send the user to the login screen afterwards.
#[instrument(skip_all, fields(username = %registration.username()))]
pub async fn register<A>(api: &A, registration: &Registration) -> Result<()>
where
    A: BookingApi + ?Sized,
{
    api.register(registration).await?;
    info!("Account created");
    Ok(())
}

/// Returns the stored bearer token, or an auth error if there is none.
pub fn require_token<S: KeyValueStore>(ctx: &AuthContext<S>) -> Result<Token> {
    ctx.token().ok_or_else(|| AuthError::MissingToken.into())
}

/// Update profile fields of the logged-in user and refresh the stored
/// record with the service's answer.
///
/// The session is unchanged if the call fails.
#[instrument(skip_all, fields(fields = changes.len()))]
pub async fn update_profile<A, S>(
    ctx: &mut AuthContext<S>,
    api: &A,
    changes: &Map<String, Value>,
) -> Result<User>
where
    A: BookingApi + ?Sized,
    S: KeyValueStore,
{
    let user = ctx.user().ok_or(AuthError::NotLoggedIn)?;
    let id = ResourceId::new(user.id().ok_or(AuthError::MissingUserId)?)?;
    let token = require_token(ctx)?;

    let updated = api.update_user(&id, changes, &token).await?;
    ctx.login_success(updated.clone())?;
    info!(user = %id, "Profile updated");

    Ok(updated)
}
