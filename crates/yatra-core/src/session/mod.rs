//! Authentication session management.
//!
//! - [`Session`] and [`SessionAction`]: the pure state machine.
//! - [`SessionStore`]: typed access to the persisted `user` and `token` keys.
//! - [`AuthContext`]: owns the session and keeps the store in step with it.
//! - [`RouteGuard`]: render-time gate for protected content.

mod context;
mod guard;
mod state;
mod store;

pub use context::AuthContext;
pub use guard::{Access, LOGIN_PATH, Location, Redirect, RouteGuard};
pub use state::{Session, SessionAction};
pub use store::SessionStore;
