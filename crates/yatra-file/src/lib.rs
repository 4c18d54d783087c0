//! yatra-file - Filesystem-backed key-value storage.
//!
//! [`FileStore`] is the durable store behind a native client's session: one
//! file per key in a private directory.

mod store;

pub use store::FileStore;
