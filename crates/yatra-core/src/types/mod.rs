//! Core client types.
//!
//! Validated types enforce their invariants at construction time; the
//! remote records ([`User`], [`Reservation`]) stay schema-agnostic.

mod api_url;
mod id;
mod reservation;
mod user;

pub use api_url::ApiUrl;
pub use id::ResourceId;
pub use reservation::Reservation;
pub use user::User;
