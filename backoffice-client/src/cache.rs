//! Request cache keyed by resource + parameters
//!
//! Guarantees:
//! - at most one in-flight load per key; concurrent readers share it
//! - `invalidate(prefix)` drops every entry under the prefix, so the next
//!   read loads again (a load still in flight is not stored afterwards)
//! - each key is observable as pending, error or success
//!
//! Failed loads are not reused: the next `fetch` of an errored key
//! loads again, the error stays visible through `peek` until then.
//!
//! A load stores its own result when it completes, whichever caller ends
//! up driving it. Dropping the caller that started it does not leave the
//! key stuck in flight.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use crate::error::{ClientError, ClientResult};

type AnyValue = Arc<dyn Any + Send + Sync>;
type SharedError = Arc<ClientError>;
type LoadResult = Result<AnyValue, SharedError>;
type Entries = Mutex<HashMap<QueryKey, Entry>>;

/// Composite cache key, e.g. `["orders", "completed", "2025-01-10"]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Append a parameter segment
    pub fn with(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl<const N: usize> From<[&str; N]> for QueryKey {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

impl std::fmt::Display for QueryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

/// Observable state of one query
#[derive(Debug)]
pub enum QueryState<T> {
    Pending,
    Error(SharedError),
    Success(Arc<T>),
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Pending => Self::Pending,
            Self::Error(e) => Self::Error(e.clone()),
            Self::Success(v) => Self::Success(v.clone()),
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn error(&self) -> Option<&SharedError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Success(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<Result<Arc<T>, SharedError>> for QueryState<T> {
    fn from(result: Result<Arc<T>, SharedError>) -> Self {
        match result {
            Ok(v) => Self::Success(v),
            Err(e) => Self::Error(e),
        }
    }
}

enum Entry {
    InFlight {
        load: Shared<BoxFuture<'static, LoadResult>>,
        generation: u64,
    },
    Ready(LoadResult),
}

enum Plan {
    Hit(AnyValue),
    Join(Shared<BoxFuture<'static, LoadResult>>),
    Load(Shared<BoxFuture<'static, LoadResult>>),
}

/// Shared request cache
#[derive(Default)]
pub struct QueryCache {
    entries: Arc<Entries>,
    generation: AtomicU64,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.lock().len())
            .finish()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<QueryKey, Entry>> {
        lock_entries(&self.entries)
    }

    /// Cached value for `key`, or the result of `loader` (shared with any
    /// concurrent caller asking for the same key)
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, loader: F) -> Result<Arc<T>, SharedError>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let plan = {
            let mut entries = self.lock();
            match entries.get(&key) {
                Some(Entry::Ready(Ok(value))) => Plan::Hit(value.clone()),
                Some(Entry::InFlight { load, .. }) => Plan::Join(load.clone()),
                _ => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed);
                    // Weak: the entry owns this future
                    let store = Arc::downgrade(&self.entries);
                    let stored_key = key.clone();
                    let load = loader()
                        .map(move |result| {
                            let result = match result {
                                Ok(value) => Ok(Arc::new(value) as AnyValue),
                                Err(e) => Err(Arc::new(e)),
                            };
                            if let Some(entries) = store.upgrade() {
                                store_if_current(&entries, &stored_key, generation, &result);
                            }
                            result
                        })
                        .boxed()
                        .shared();
                    entries.insert(
                        key.clone(),
                        Entry::InFlight {
                            load: load.clone(),
                            generation,
                        },
                    );
                    Plan::Load(load)
                }
            }
        };

        let load = match plan {
            Plan::Hit(value) => {
                tracing::trace!(key = %key, "Cache hit");
                return downcast(&key, value);
            }
            Plan::Join(load) => {
                tracing::trace!(key = %key, "Joining in-flight load");
                load
            }
            Plan::Load(load) => {
                tracing::debug!(key = %key, "Cache miss, loading");
                load
            }
        };

        downcast(&key, load.await?)
    }

    /// `fetch` folded into a [`QueryState`]
    pub async fn query<T, F, Fut>(&self, key: QueryKey, loader: F) -> QueryState<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        self.fetch(key, loader).await.into()
    }

    /// Current state of `key` without loading anything
    pub fn peek<T: Send + Sync + 'static>(&self, key: &QueryKey) -> QueryState<T> {
        let entries = self.lock();
        match entries.get(key) {
            Some(Entry::Ready(Ok(value))) => downcast(key, value.clone()).into(),
            Some(Entry::Ready(Err(e))) => QueryState::Error(e.clone()),
            Some(Entry::InFlight { .. }) | None => QueryState::Pending,
        }
    }

    /// Drop every entry whose key starts with `prefix`; returns how many
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        tracing::debug!(prefix = %prefix, removed, "Cache invalidated");
        removed
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

fn lock_entries(entries: &Entries) -> std::sync::MutexGuard<'_, HashMap<QueryKey, Entry>> {
    entries.lock().unwrap_or_else(|e| e.into_inner())
}

/// Settle `key` unless it was invalidated (or reloaded) meanwhile
fn store_if_current(entries: &Entries, key: &QueryKey, generation: u64, result: &LoadResult) {
    let mut entries = lock_entries(entries);
    let still_current = matches!(
        entries.get(key),
        Some(Entry::InFlight { generation: g, .. }) if *g == generation
    );
    if still_current {
        entries.insert(key.clone(), Entry::Ready(result.clone()));
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, value: AnyValue) -> Result<Arc<T>, SharedError> {
    value.downcast::<T>().map_err(|_| {
        Arc::new(ClientError::InvalidState(format!(
            "query key {} holds a different type",
            key
        )))
    })
}

/// State of a one-shot mutation
#[derive(Debug)]
pub enum MutationState<T> {
    Idle,
    Pending,
    Error(SharedError),
    Success(T),
}

/// One-shot mutation that invalidates query keys when it succeeds
#[derive(Debug)]
pub struct Mutation<T> {
    state: MutationState<T>,
    invalidates: Vec<QueryKey>,
}

impl<T> Default for Mutation<T> {
    fn default() -> Self {
        Self {
            state: MutationState::Idle,
            invalidates: Vec::new(),
        }
    }
}

impl<T> Mutation<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key prefix to invalidate on success
    pub fn invalidates(mut self, prefix: impl Into<QueryKey>) -> Self {
        self.invalidates.push(prefix.into());
        self
    }

    pub fn state(&self) -> &MutationState<T> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, MutationState::Pending)
    }

    pub fn error(&self) -> Option<&SharedError> {
        match &self.state {
            MutationState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Run the mutation; on success the configured keys are invalidated
    /// before this returns
    pub async fn run<Fut>(&mut self, cache: &QueryCache, fut: Fut) -> Result<&T, SharedError>
    where
        Fut: Future<Output = ClientResult<T>>,
    {
        self.state = MutationState::Pending;
        match fut.await {
            Ok(value) => {
                for prefix in &self.invalidates {
                    cache.invalidate(prefix);
                }
                self.state = MutationState::Success(value);
            }
            Err(e) => {
                self.state = MutationState::Error(Arc::new(e));
            }
        }
        match &self.state {
            MutationState::Success(value) => Ok(value),
            MutationState::Error(e) => Err(e.clone()),
            _ => Err(Arc::new(ClientError::InvalidState(
                "mutation did not settle".into(),
            ))),
        }
    }

    pub fn reset(&mut self) {
        self.state = MutationState::Idle;
    }
}
