//! Back-office Client - typed client for the restaurant REST backend
//!
//! Provides the HTTP layer, bearer-token storage, the session state
//! machine and a small request cache used by the panel views.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod storage;

pub use api::BackofficeApi;
pub use cache::{Mutation, MutationState, QueryCache, QueryKey, QueryState};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{Session, SessionState};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};

// Re-export shared types for convenience
pub use shared::client::{IdentityResponse, LoginResponse, UserInfo};
