//! Shared types for the back-office panel
//!
//! Entity models as consumed from the REST backend, auth DTOs,
//! money helpers and the payment statistics used by the panel views.
//! Nothing in this crate performs I/O.

pub mod client;
pub mod models;
pub mod report;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{IdentityResponse, LoginResponse, UserInfo};
pub use models::*;
