//! Page view-models
//!
//! Each page declares its queries, runs them concurrently and only builds
//! its view once every query has settled: loading while any is pending,
//! otherwise the first error, otherwise the data. Mutations invalidate the
//! list they belong to so the next read fetches it again.

mod confirm;
mod forms;

pub mod categories;
pub mod dashboard;
pub mod menu;
pub mod orders;
pub mod payments;
pub mod stats;
pub mod users;

use std::sync::Arc;

use backoffice_client::{ClientError, QueryState};

pub use confirm::ConfirmDelete;
pub use forms::{parse_count, parse_id, required};

/// Anything that can be pending or failed
pub trait QueryStatus {
    fn is_pending(&self) -> bool;
    fn failure(&self) -> Option<&Arc<ClientError>>;
}

impl<T> QueryStatus for QueryState<T> {
    fn is_pending(&self) -> bool {
        QueryState::is_pending(self)
    }

    fn failure(&self) -> Option<&Arc<ClientError>> {
        self.error()
    }
}

/// Combined state of a page's queries
#[derive(Debug, Clone, Default)]
pub struct PageData {
    pub loading: bool,
    pub error: Option<Arc<ClientError>>,
}

impl PageData {
    /// `loading` if any query is pending, `error` is the first failure in
    /// declaration order
    pub fn of(queries: &[&dyn QueryStatus]) -> Self {
        Self {
            loading: queries.iter().any(|q| q.is_pending()),
            error: queries.iter().find_map(|q| q.failure().cloned()),
        }
    }

    /// The page to show instead of data, if the queries are not all ok
    pub fn unsettled<T>(&self) -> Option<Page<T>> {
        if self.loading {
            return Some(Page::Loading);
        }
        self.error
            .as_ref()
            .map(|e| Page::Error(e.user_message()))
    }
}

/// What a page shows
#[derive(Debug, Clone, PartialEq)]
pub enum Page<T> {
    Loading,
    /// Inline error message
    Error(String),
    Ready(T),
}

impl<T> Page<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Page::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Page<U> {
        match self {
            Page::Loading => Page::Loading,
            Page::Error(e) => Page::Error(e),
            Page::Ready(v) => Page::Ready(f(v)),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Page<U>) -> Page<U> {
        match self {
            Page::Loading => Page::Loading,
            Page::Error(e) => Page::Error(e),
            Page::Ready(v) => f(v),
        }
    }
}

/// Data of a settled, successful query
fn data<T>(state: &QueryState<T>) -> Option<Arc<T>> {
    state.data().cloned()
}
