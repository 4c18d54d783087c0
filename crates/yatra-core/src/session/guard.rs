//! Route guard for protected content.

use std::fmt;

use crate::Token;
use crate::types::User;

use super::Session;

/// Where unauthenticated callers are sent.
pub const LOGIN_PATH: &str = "/login";

/// A client-side location: a path plus its query string.
///
/// The query keeps its leading `?`, so `to_string()` reproduces the exact
/// path+query the caller was at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    path: String,
    search: String,
}

impl Location {
    /// Create a location from a path and a query string (with or without the
    /// leading `?`; empty for none).
    pub fn new(path: impl Into<String>, search: impl AsRef<str>) -> Self {
        let search = search.as_ref();
        Self::from_parts(path.into(), search.strip_prefix('?').unwrap_or(search))
    }

    /// Split `path?query` at the first `?`.
    pub fn parse(s: &str) -> Self {
        match s.split_once('?') {
            Some((path, query)) => Self::from_parts(path.to_string(), query),
            None => Self::from_parts(s.to_string(), ""),
        }
    }

    fn from_parts(path: String, query: &str) -> Self {
        let search = if query.is_empty() {
            String::new()
        } else {
            format!("?{}", query)
        };
        Self { path, search }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query string including its leading `?`, or `""`.
    pub fn search(&self) -> &str {
        &self.search
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.path, self.search)
    }
}

/// A redirect to the login entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// The login path to navigate to.
    pub to: &'static str,
    /// The location to return to after login.
    pub from: Location,
}

/// The outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<T> {
    /// The protected content, unchanged.
    Granted(T),
    /// Not authenticated; go to login and come back to `from`.
    Redirect(Redirect),
}

impl<T> Access<T> {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Access::Redirect(_))
    }

    /// Convert into a `Result`, with the redirect as the error.
    pub fn into_result(self) -> Result<T, Redirect> {
        match self {
            Access::Granted(content) => Ok(content),
            Access::Redirect(redirect) => Err(redirect),
        }
    }
}

/// A render-time gate over a session snapshot and the stored token.
///
/// Access is granted when either a user is in the session or a token is
/// stored. The check is synchronous and performs no I/O of its own.
///
/// # Example
///
/// ```
/// use yatra_core::{Access, Location, RouteGuard, Session, LOGIN_PATH};
///
/// let session = Session::default();
/// let guard = RouteGuard::new(&session, None);
///
/// match guard.check(&Location::parse("/bookings?page=2"), "bookings view") {
///     Access::Redirect(r) => {
///         assert_eq!(r.to, LOGIN_PATH);
///         assert_eq!(r.from.to_string(), "/bookings?page=2");
///     }
///     Access::Granted(_) => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RouteGuard<'a> {
    user: Option<&'a User>,
    token: Option<&'a Token>,
}

impl<'a> RouteGuard<'a> {
    pub fn new(session: &'a Session, token: Option<&'a Token>) -> Self {
        Self {
            user: session.user.as_ref(),
            token,
        }
    }

    /// Returns true if the protected content may be shown.
    pub fn allows(&self) -> bool {
        self.user.is_some() || self.token.is_some()
    }

    /// Gate `content` for a caller currently at `location`.
    pub fn check<T>(&self, location: &Location, content: T) -> Access<T> {
        if self.allows() {
            Access::Granted(content)
        } else {
            Access::Redirect(Redirect {
                to: LOGIN_PATH,
                from: location.clone(),
            })
        }
    }
}
