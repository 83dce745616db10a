//! Storage for the service layer
//!
//! Process-lifetime stores; nothing here touches disk.

pub mod user_store;

pub use user_store::UserStore;
