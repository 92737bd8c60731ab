//! Application context
//!
//! One explicitly passed object holds the API client, the session and the
//! query cache. Pages read through [`AppContext`] queries so repeated and
//! concurrent reads of the same resource share one request.

use std::sync::Arc;

use backoffice_client::{
    BackofficeApi, ClientConfig, ClientResult, HttpClient, NetworkHttpClient, QueryCache,
    QueryKey, QueryState, Session,
};
use chrono::NaiveDate;
use shared::client::UserInfo;
use shared::models::{
    Bestseller, MenuCategory, MenuItem, Order, OrderEvent, Payment, TerminalOrders, User,
};
use shared::util::DATE_FORMAT;

use crate::error::{PanelError, PanelResult};

/// Cache keys, one function per logical query
pub mod keys {
    use backoffice_client::QueryKey;
    use chrono::NaiveDate;
    use shared::util::DATE_FORMAT;

    pub fn menu() -> QueryKey {
        QueryKey::from(["menu"])
    }

    pub fn categories() -> QueryKey {
        QueryKey::from(["menu", "categories"])
    }

    pub fn menu_items() -> QueryKey {
        QueryKey::from(["menu", "items"])
    }

    pub fn menu_item(id: i64) -> QueryKey {
        QueryKey::from(["menu", "item"]).with(id)
    }

    pub fn orders() -> QueryKey {
        QueryKey::from(["orders"])
    }

    pub fn pending_orders() -> QueryKey {
        QueryKey::from(["orders", "pending"])
    }

    pub fn completed_orders(date: NaiveDate) -> QueryKey {
        QueryKey::from(["orders", "completed"]).with(date.format(DATE_FORMAT))
    }

    pub fn order(id: &str) -> QueryKey {
        QueryKey::from(["orders", "details"]).with(id)
    }

    pub fn order_events(id: &str) -> QueryKey {
        QueryKey::from(["orders", "events"]).with(id)
    }

    pub fn daily_stats() -> QueryKey {
        QueryKey::from(["stats", "orders-daily"])
    }

    pub fn bestsellers() -> QueryKey {
        QueryKey::from(["stats", "bestsellers"])
    }

    pub fn users() -> QueryKey {
        QueryKey::from(["users"])
    }

    pub fn payments() -> QueryKey {
        QueryKey::from(["payments"])
    }

    pub fn payment(id: i64) -> QueryKey {
        QueryKey::from(["payments", "details"]).with(id)
    }

    pub fn payments_on(date: NaiveDate) -> QueryKey {
        QueryKey::from(["payments", "day"]).with(date.format(DATE_FORMAT))
    }
}

/// API client, session and cache for one panel instance
#[derive(Debug)]
pub struct AppContext<H: HttpClient = NetworkHttpClient> {
    api: Arc<BackofficeApi<H>>,
    session: Session<H>,
    cache: QueryCache,
}

impl AppContext<NetworkHttpClient> {
    /// Context over the network client with the file token store
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        Ok(Self::new(BackofficeApi::new(http)))
    }
}

impl<H: HttpClient + 'static> AppContext<H> {
    pub fn new(api: BackofficeApi<H>) -> Self {
        let api = Arc::new(api);
        Self {
            session: Session::new(api.clone()),
            api,
            cache: QueryCache::new(),
        }
    }

    pub fn api(&self) -> &BackofficeApi<H> {
        &self.api
    }

    pub fn session(&self) -> &Session<H> {
        &self.session
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn user(&self) -> Option<UserInfo> {
        self.session.user()
    }

    /// The logged-in user, or `NotAuthenticated`
    pub fn require_user(&self) -> PanelResult<UserInfo> {
        self.user().ok_or(PanelError::NotAuthenticated)
    }

    /// Forget every cached query (after logout)
    pub fn reset(&self) {
        self.cache.clear();
    }

    /// Run `call` against the API through the cache under `key`
    async fn cached<T, F, Fut>(&self, key: QueryKey, call: F) -> QueryState<T>
    where
        T: Send + Sync + 'static,
        F: FnOnce(Arc<BackofficeApi<H>>) -> Fut,
        Fut: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let api = self.api.clone();
        self.cache.query(key, move || call(api)).await
    }

    // ========== Queries ==========

    pub async fn categories(&self) -> QueryState<Vec<MenuCategory>> {
        self.cached(keys::categories(), |api| async move {
            api.list_categories().await
        })
        .await
    }

    pub async fn menu_items(&self) -> QueryState<Vec<MenuItem>> {
        self.cached(keys::menu_items(), |api| async move {
            api.list_menu_items().await
        })
        .await
    }

    pub async fn menu_item(&self, id: i64) -> QueryState<MenuItem> {
        self.cached(keys::menu_item(id), move |api| async move {
            api.get_menu_item(id).await
        })
        .await
    }

    pub async fn pending_orders(&self) -> QueryState<Vec<Order>> {
        self.cached(keys::pending_orders(), |api| async move {
            api.pending_orders().await
        })
        .await
    }

    pub async fn completed_orders(&self, date: NaiveDate) -> QueryState<Vec<Order>> {
        tracing::debug!(date = %date.format(DATE_FORMAT), "Loading completed orders");
        self.cached(keys::completed_orders(date), move |api| async move {
            api.completed_orders(date).await
        })
        .await
    }

    pub async fn order(&self, id: &str) -> QueryState<Order> {
        let owned = id.to_string();
        self.cached(keys::order(id), move |api| async move {
            api.get_order(&owned).await
        })
        .await
    }

    pub async fn order_events(&self, id: &str) -> QueryState<Vec<OrderEvent>> {
        let owned = id.to_string();
        self.cached(keys::order_events(id), move |api| async move {
            api.order_events(&owned).await
        })
        .await
    }

    pub async fn daily_stats(&self) -> QueryState<Vec<TerminalOrders>> {
        self.cached(keys::daily_stats(), |api| async move {
            api.orders_daily_stats().await
        })
        .await
    }

    pub async fn bestsellers(&self) -> QueryState<Vec<Bestseller>> {
        self.cached(keys::bestsellers(), |api| async move {
            api.bestsellers().await
        })
        .await
    }

    pub async fn users(&self) -> QueryState<Vec<User>> {
        self.cached(keys::users(), |api| async move { api.list_users().await })
            .await
    }

    pub async fn payments(&self) -> QueryState<Vec<Payment>> {
        self.cached(keys::payments(), |api| async move {
            api.list_payments().await
        })
        .await
    }

    pub async fn payment(&self, id: i64) -> QueryState<Payment> {
        self.cached(keys::payment(id), move |api| async move {
            api.get_payment(id).await
        })
        .await
    }

    pub async fn payments_on(&self, date: NaiveDate) -> QueryState<Vec<Payment>> {
        self.cached(keys::payments_on(date), move |api| async move {
            api.payments_on(date).await
        })
        .await
    }
}
