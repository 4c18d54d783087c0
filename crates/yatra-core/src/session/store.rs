//! Typed access to the persisted session entries.

use tracing::{debug, instrument};

use crate::error::InvalidInputError;
use crate::traits::{KeyValueStore, TOKEN_KEY, USER_KEY};
use crate::types::User;
use crate::{Result, Token};

/// The persisted half of a session: the `user` record and the `token`,
/// stored under independent keys of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the persisted user.
    ///
    /// Returns `Ok(None)` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the stored JSON is not a user
    /// object.
    pub fn load_user(&self) -> Result<Option<User>> {
        let Some(raw) = self.store.get(USER_KEY)? else {
            return Ok(None);
        };

        let value: serde_json::Value =
            serde_json::from_str(&raw).map_err(|e| InvalidInputError::User {
                reason: e.to_string(),
            })?;

        User::try_from(value).map(Some)
    }

    #[instrument(skip_all)]
    pub fn save_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user).map_err(|e| InvalidInputError::User {
            reason: e.to_string(),
        })?;
        self.store.set(USER_KEY, &json)?;
        debug!("Persisted user record");
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn clear_user(&self) -> Result<()> {
        self.store.remove(USER_KEY)?;
        debug!("Erased user record");
        Ok(())
    }

    /// Load the persisted token. Empty values count as absent.
    pub fn load_token(&self) -> Result<Option<Token>> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(Token::new))
    }

    #[instrument(skip_all)]
    pub fn save_token(&self, token: &Token) -> Result<()> {
        self.store.set(TOKEN_KEY, token.as_str())?;
        debug!("Persisted token");
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn clear_token(&self) -> Result<()> {
        self.store.remove(TOKEN_KEY)?;
        debug!("Erased token");
        Ok(())
    }
}
