//! yatra-core - Core types and session management for the YatraNepal client.
//!
//! All authenticated state flows through an [`AuthContext`]: it owns the
//! in-memory [`Session`], applies [`SessionAction`]s through the reducer and
//! writes the user record to a [`KeyValueStore`] at every transition.
//!
//! # Example
//!
//! ```
//! use yatra_core::{AuthContext, Location, MemoryStore, User};
//! use serde_json::json;
//!
//! let mut ctx = AuthContext::new(MemoryStore::new());
//! assert!(ctx.guard(&Location::parse("/bookings"), "bookings").is_redirect());
//!
//! let user = User::try_from(json!({"_id": "u1", "username": "sita"})).unwrap();
//! ctx.login_success(user).unwrap();
//! assert!(ctx.guard(&Location::parse("/bookings"), "bookings").is_granted());
//! ```

pub mod credentials;
pub mod error;
pub mod flows;
pub mod loading;
pub mod memory;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::{Credentials, PasswordChange, Registration};
pub use error::Error;
pub use loading::LoadingIndicator;
pub use memory::MemoryStore;
pub use session::{
    Access, AuthContext, LOGIN_PATH, Location, Redirect, RouteGuard, Session, SessionAction,
    SessionStore,
};
pub use tokens::Token;
pub use traits::{BookingApi, KeyValueStore, LoginOutput, TOKEN_KEY, USER_KEY};
pub use types::{ApiUrl, Reservation, ResourceId, User};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
