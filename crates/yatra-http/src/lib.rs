//! yatra-http - REST client for the YatraNepal booking service.
//!
//! [`HttpApi`] implements [`yatra_core::BookingApi`] over `reqwest`. It only
//! performs requests; session bookkeeping belongs to
//! [`yatra_core::AuthContext`] and the flows in [`yatra_core::flows`].

mod api;
mod client;
mod endpoints;

pub use api::HttpApi;
