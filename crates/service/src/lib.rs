//! Service layer owning the in-memory user collection.
//! - All lookups are linear scans over an insertion-ordered `Vec`.
//! - Every read-modify-write runs under a single write guard.
//! - `user_service` turns raw request bodies into store operations.

pub mod errors;
pub mod storage;
pub mod user_service;
