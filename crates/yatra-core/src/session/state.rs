//! Session state and reducer.

use crate::types::User;

/// The in-memory authentication state of the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// The logged-in user, if any.
    pub user: Option<User>,
    /// True strictly between a login start and its success or failure.
    pub is_fetching: bool,
    /// True only immediately after a failed login.
    pub error: bool,
}

/// A session transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    LoginStart,
    LoginSuccess(User),
    LoginFailure,
    Logout,
}

impl SessionAction {
    /// Parse a string-tagged action as used by the web client
    /// (`LOGIN_START`, `LOGIN_SUCCESS`, `LOGIN_FAILURE`, `LOGOUT`).
    ///
    /// Returns `None` for unknown tags, and for `LOGIN_SUCCESS` without a
    /// payload.
    pub fn from_tag(tag: &str, payload: Option<User>) -> Option<Self> {
        match tag {
            "LOGIN_START" => Some(Self::LoginStart),
            "LOGIN_SUCCESS" => payload.map(Self::LoginSuccess),
            "LOGIN_FAILURE" => Some(Self::LoginFailure),
            "LOGOUT" => Some(Self::Logout),
            _ => None,
        }
    }

    /// Returns the string tag of this action.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::LoginStart => "LOGIN_START",
            Self::LoginSuccess(_) => "LOGIN_SUCCESS",
            Self::LoginFailure => "LOGIN_FAILURE",
            Self::Logout => "LOGOUT",
        }
    }
}

impl Session {
    /// Apply an action, returning the next state.
    ///
    /// Every action fully determines the next state; the current state is
    /// consumed and discarded.
    pub fn reduce(self, action: SessionAction) -> Self {
        match action {
            SessionAction::LoginStart => Self {
                user: None,
                is_fetching: true,
                error: false,
            },
            SessionAction::LoginSuccess(user) => Self {
                user: Some(user),
                is_fetching: false,
                error: false,
            },
            SessionAction::LoginFailure => Self {
                user: None,
                is_fetching: false,
                error: true,
            },
            SessionAction::Logout => Self {
                user: None,
                is_fetching: false,
                error: false,
            },
        }
    }

    /// Apply a string-tagged action. Unknown tags leave the state unchanged.
    pub fn reduce_tagged(self, tag: &str, payload: Option<User>) -> Self {
        match SessionAction::from_tag(tag, payload) {
            Some(action) => self.reduce(action),
            None => self,
        }
    }

    /// Returns true if a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
