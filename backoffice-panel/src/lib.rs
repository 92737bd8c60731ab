//! Back-office Panel - headless views and the `panel` command line
//!
//! Pages are view-models over [`AppContext`]: they run their queries
//! through the shared cache, settle into a [`pages::Page`] and are turned
//! into text by [`render`]. The route guard decides which page a path
//! shows for the current session.

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod logger;
pub mod pages;
pub mod render;
pub mod routes;

pub use config::PanelConfig;
pub use context::AppContext;
pub use error::{PanelError, PanelResult};
pub use logger::init_logger;
pub use render::Render;
