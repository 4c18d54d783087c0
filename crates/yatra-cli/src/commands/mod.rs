//! Command implementations.

pub mod bookings;
pub mod login;
pub mod logout;
pub mod password;
pub mod profile;
pub mod register;
pub mod whoami;
