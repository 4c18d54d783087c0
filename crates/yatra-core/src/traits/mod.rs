//! Core traits for storage and remote API behavior.

mod api;
mod store;

pub use api::{BookingApi, LoginOutput};
pub use store::{KeyValueStore, TOKEN_KEY, USER_KEY};
