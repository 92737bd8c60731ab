//! Data models
//!
//! Entities as consumed from and produced for the REST backend.
//! The backend is authoritative; all IDs are `i64`.

pub mod category;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod stats;
pub mod user;

// Re-exports
pub use category::*;
pub use menu_item::*;
pub use order::*;
pub use payment::*;
pub use stats::*;
pub use user::*;
