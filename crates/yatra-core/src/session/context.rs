//! Auth context: the single owner of session state.

use tracing::{debug, info, instrument, warn};

use crate::error::Error;
use crate::traits::KeyValueStore;
use crate::types::User;
use crate::{Result, Token};

use super::{Access, Location, RouteGuard, Session, SessionAction, SessionStore};

/// Holds the [`Session`] and keeps the persisted user record in step with it.
///
/// Every transition applies the reducer and then writes the store before
/// returning, so the store never lags the in-memory state. The context never
/// performs network calls: call sites fetch, then report the outcome through
/// [`login_success`](Self::login_success) or
/// [`login_failure`](Self::login_failure).
///
/// # Example
///
/// ```
/// use yatra_core::{AuthContext, MemoryStore, KeyValueStore, User, USER_KEY};
/// use serde_json::json;
///
/// let store = MemoryStore::new();
/// let mut ctx = AuthContext::new(store.clone());
///
/// ctx.login_start().unwrap();
/// assert!(ctx.session().is_fetching);
///
/// let user = User::try_from(json!({"_id": "u1", "username": "sita"})).unwrap();
/// ctx.login_success(user.clone()).unwrap();
/// assert!(store.get(USER_KEY).unwrap().is_some());
///
/// // A fresh context rehydrates the same user.
/// let ctx = AuthContext::new(store);
/// assert_eq!(ctx.user(), Some(&user));
/// ```
#[derive(Debug)]
pub struct AuthContext<S> {
    state: Session,
    store: SessionStore<S>,
}

impl<S: KeyValueStore> AuthContext<S> {
    /// Create a context, rehydrating the user from `store`.
    ///
    /// An absent, unreadable or malformed user record yields a session with
    /// no user; this constructor never fails. A malformed record is erased so
    /// the store matches the session.
    pub fn new(store: S) -> Self {
        let store = SessionStore::new(store);

        let user = match store.load_user() {
            Ok(user) => user,
            Err(e @ Error::InvalidInput(_)) => {
                warn!(error = %e, "Erasing malformed persisted user");
                if let Err(e) = store.clear_user() {
                    warn!(error = %e, "Failed to erase malformed user");
                }
                None
            }
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable persisted user");
                None
            }
        };

        debug!(authenticated = user.is_some(), "Auth context initialized");

        Self {
            state: Session {
                user,
                is_fetching: false,
                error: false,
            },
            store,
        }
    }

    /// Returns the current session.
    pub fn session(&self) -> &Session {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.state.is_fetching
    }

    pub fn error(&self) -> bool {
        self.state.error
    }

    /// Apply an action and persist the resulting user.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the user record could not be written or
    /// erased. The in-memory transition is applied regardless.
    #[instrument(skip_all, fields(action = action.tag()))]
    pub fn dispatch(&mut self, action: SessionAction) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
        self.sync_user()
    }

    pub fn login_start(&mut self) -> Result<()> {
        self.dispatch(SessionAction::LoginStart)
    }

    pub fn login_success(&mut self, user: User) -> Result<()> {
        self.dispatch(SessionAction::LoginSuccess(user))
    }

    pub fn login_failure(&mut self) -> Result<()> {
        self.dispatch(SessionAction::LoginFailure)
    }

    /// Log out: clear the session and erase both the user and the token.
    pub fn logout(&mut self) -> Result<()> {
        let user_result = self.dispatch(SessionAction::Logout);
        let token_result = self.clear_token();
        info!("Logged out");
        user_result.and(token_result)
    }

    /// Read the stored token. A store failure counts as no token.
    pub fn token(&self) -> Option<Token> {
        match self.store.load_token() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        }
    }

    /// Persist a bearer token for later protected calls.
    pub fn set_token(&self, token: &Token) -> Result<()> {
        self.store.save_token(token)
    }

    /// Erase the stored token.
    pub fn clear_token(&self) -> Result<()> {
        self.store.clear_token()
    }

    /// Gate `content` on the current session and the stored token.
    pub fn guard<T>(&self, location: &Location, content: T) -> Access<T> {
        let token = self.token();
        RouteGuard::new(&self.state, token.as_ref()).check(location, content)
    }

    fn sync_user(&self) -> Result<()> {
        match &self.state.user {
            Some(user) => self.store.save_user(user),
            None => self.store.clear_user(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, StorageError};
    use crate::traits::{TOKEN_KEY, USER_KEY};
    use crate::MemoryStore;
    use serde_json::json;

    fn sita() -> User {
        User::try_from(json!({
            "_id": "65f1",
            "username": "sita",
            "email": "sita@example.com",
            "img": null,
            "preferences": {"currency": "NPR"}
        }))
        .unwrap()
    }

    /// A store whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key)
        }

        fn set(&self, key: &str, _value: &str) -> Result<()> {
            Err(StorageError::io(key, "read-only").into())
        }

        fn remove(&self, key: &str) -> Result<()> {
            Err(StorageError::io(key, "read-only").into())
        }
    }

    /// A store whose reads always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Err(StorageError::io(key, "disk gone").into())
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Ok(())
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn starts_empty_without_stored_user() {
        let ctx = AuthContext::new(MemoryStore::new());
        assert_eq!(ctx.session(), &Session::default());
    }

    #[test]
    fn persisted_user_round_trips_through_new_context() {
        let store = MemoryStore::new();
        let mut ctx = AuthContext::new(store.clone());
        ctx.login_success(sita()).unwrap();

        let rehydrated = AuthContext::new(store);
        assert_eq!(rehydrated.user(), Some(&sita()));
        assert!(!rehydrated.is_fetching());
        assert!(!rehydrated.error());
    }

    #[test]
    fn malformed_user_fails_open() {
        for raw in ["{\"_id\": ", "null", "[1,2]", "42", ""] {
            let store = MemoryStore::with_entries([(USER_KEY, raw), (TOKEN_KEY, "jwt")]);
            let ctx = AuthContext::new(store.clone());
            assert_eq!(ctx.user(), None, "raw = {raw:?}");
            assert_eq!(store.get(USER_KEY).unwrap(), None, "raw = {raw:?}");
            assert_eq!(ctx.token(), Some(Token::new("jwt")), "raw = {raw:?}");
        }
    }

    #[test]
    fn malformed_user_on_read_only_store_still_fails_open() {
        let inner = MemoryStore::with_entries([(USER_KEY, "{")]);
        let ctx = AuthContext::new(ReadOnlyStore(inner.clone()));
        assert_eq!(ctx.user(), None);
        assert_eq!(inner.get(USER_KEY).unwrap().as_deref(), Some("{"));
    }

    #[test]
    fn unreadable_store_fails_open() {
        let ctx = AuthContext::new(BrokenStore);
        assert_eq!(ctx.user(), None);
        assert_eq!(ctx.token(), None);
    }

    #[test]
    fn store_mirrors_every_transition() {
        let store = MemoryStore::new();
        let mut ctx = AuthContext::new(store.clone());

        ctx.login_success(sita()).unwrap();
        let raw = store.get(USER_KEY).unwrap().unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
            sita().into_value()
        );

        ctx.login_start().unwrap();
        assert_eq!(store.get(USER_KEY).unwrap(), None);

        ctx.login_success(sita()).unwrap();
        ctx.login_failure().unwrap();
        assert_eq!(store.get(USER_KEY).unwrap(), None);
        assert!(ctx.error());
    }

    #[test]
    fn logout_erases_user_and_token() {
        let store = MemoryStore::new();
        let mut ctx = AuthContext::new(store.clone());
        ctx.set_token(&Token::new("bearer-1")).unwrap();
        ctx.login_success(sita()).unwrap();

        ctx.logout().unwrap();

        assert_eq!(ctx.session(), &Session::default());
        assert!(store.is_empty());
    }

    #[test]
    fn login_failure_keeps_token() {
        let store = MemoryStore::with_entries([(TOKEN_KEY, "old")]);
        let mut ctx = AuthContext::new(store);
        ctx.login_start().unwrap();
        ctx.login_failure().unwrap();
        assert_eq!(ctx.token(), Some(Token::new("old")));
    }

    #[test]
    fn storage_failure_is_reported_but_state_advances() {
        let mut ctx = AuthContext::new(ReadOnlyStore(MemoryStore::new()));
        let result = ctx.login_success(sita());

        assert!(matches!(result, Err(Error::Storage(_))));
        assert_eq!(ctx.user(), Some(&sita()));
    }

    #[test]
    fn guard_uses_session_and_token() {
        let store = MemoryStore::new();
        let mut ctx = AuthContext::new(store.clone());
        let here = Location::parse("/bookings?sort=desc");

        match ctx.guard(&here, ()) {
            Access::Redirect(r) => assert_eq!(r.from.to_string(), "/bookings?sort=desc"),
            Access::Granted(()) => panic!("expected redirect"),
        }

        ctx.set_token(&Token::new("t")).unwrap();
        assert!(ctx.guard(&here, ()).is_granted());

        store.remove(TOKEN_KEY).unwrap();
        ctx.login_success(sita()).unwrap();
        assert!(ctx.guard(&here, ()).is_granted());

        ctx.logout().unwrap();
        assert!(ctx.guard(&here, ()).is_redirect());
    }
}
