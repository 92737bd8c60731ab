// backoffice-client/tests/client_integration.rs
// API client against the in-memory backend

use std::sync::Arc;

use backoffice_client::{
    BackofficeApi, ClientConfig, ClientError, MemoryTokenStore, NetworkHttpClient, TokenStore,
};
use backoffice_mock::MockServer;
use chrono::NaiveDate;
use reqwest::StatusCode;
use shared::models::{
    CategoryPayload, MenuItemPayload, OrderStatus, PaymentCreate, PaymentStatus, UserPayload,
};

fn api_with(server: &MockServer, tokens: Arc<dyn TokenStore>) -> BackofficeApi {
    let config = ClientConfig::new(server.base_url());
    BackofficeApi::new(NetworkHttpClient::new(&config, tokens).unwrap())
}

/// Client already holding a valid admin token
async fn admin_api() -> (MockServer, BackofficeApi) {
    let server = backoffice_mock::spawn().await.unwrap();
    let token = server.state.issue_token("admin").unwrap();
    let api = api_with(&server, Arc::new(MemoryTokenStore::with_token(token)));
    (server, api)
}

#[tokio::test]
async fn test_login_returns_token_and_roles_list() {
    let server = backoffice_mock::spawn().await.unwrap();
    let api = api_with(&server, Arc::new(MemoryTokenStore::new()));

    let resp = api.login("admin", "admin").await.unwrap();
    assert!(!resp.access_token.is_empty());
    assert_eq!(resp.user.roles.as_deref(), Some(&["admin".to_string()][..]));
    assert_eq!(resp.user.normalized_role(), "admin");
}

#[tokio::test]
async fn test_login_failure_has_fixed_message() {
    let server = backoffice_mock::spawn().await.unwrap();
    let api = api_with(&server, Arc::new(MemoryTokenStore::new()));

    let err = api.login("admin", "wrong").await.unwrap_err();
    assert_eq!(err.user_message(), "Nieprawidłowy login lub hasło");
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn test_me_uses_singular_role() {
    let (_server, api) = admin_api().await;
    let me = api.me().await.unwrap();
    assert_eq!(me.role.as_deref(), Some("admin"));
    assert!(me.roles.is_none());
    assert_eq!(me.normalized_role(), "admin");
}

#[tokio::test]
async fn test_me_without_token_is_not_authenticated() {
    let server = backoffice_mock::spawn().await.unwrap();
    let api = api_with(&server, Arc::new(MemoryTokenStore::new()));
    assert!(matches!(api.me().await, Err(ClientError::NotAuthenticated)));
}

#[tokio::test]
async fn test_protected_call_with_bad_token_uses_backend_detail() {
    let server = backoffice_mock::spawn().await.unwrap();
    let api = api_with(&server, Arc::new(MemoryTokenStore::with_token("expired")));

    let err = api.list_categories().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert_eq!(err.user_message(), "Not authenticated");
}

#[tokio::test]
async fn test_menu_item_round_trip() {
    let (_server, api) = admin_api().await;

    let payload = MenuItemPayload::new(3, "Pizza", 2500).available(true);
    let created = api.create_menu_item(&payload).await.unwrap();
    let fetched = api.get_menu_item(created.id).await.unwrap();

    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.category_id, 3);
    assert_eq!(fetched.name_pl, "Pizza");
    assert_eq!(fetched.price_cents, 2500);
    assert!(fetched.is_available);
}

#[tokio::test]
async fn test_block_then_list_shows_unavailable() {
    let (_server, api) = admin_api().await;

    let item = api
        .list_menu_items()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.is_available)
        .unwrap();

    api.block_menu_item(item.id).await.unwrap();
    let blocked = api
        .list_menu_items()
        .await
        .unwrap()
        .into_iter()
        .find(|i| i.id == item.id)
        .unwrap();
    assert!(!blocked.is_available);
    assert!(blocked.is_blocked());

    api.unblock_menu_item(item.id).await.unwrap();
    assert!(api.get_menu_item(item.id).await.unwrap().is_available);
}

#[tokio::test]
async fn test_update_and_delete_menu_item() {
    let (_server, api) = admin_api().await;
    let created = api
        .create_menu_item(&MenuItemPayload::new(1, "Hawajska", 3100))
        .await
        .unwrap();

    let mut payload = MenuItemPayload::from(&created);
    payload.price_cents = 3300;
    let updated = api.update_menu_item(created.id, &payload).await.unwrap();
    assert_eq!(updated.price_cents, 3300);

    api.delete_menu_item(created.id).await.unwrap();
    let err = api.get_menu_item(created.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.user_message(), "Menu item not found");
}

#[tokio::test]
async fn test_category_crud() {
    let (_server, api) = admin_api().await;

    let created = api
        .create_category(&CategoryPayload::new("Zupy", "Soups", ""))
        .await
        .unwrap();
    assert_eq!(created.name_pl, "Zupy");

    let updated = api
        .update_category(created.id, &CategoryPayload::new("Zupy dnia", "Soups", ""))
        .await
        .unwrap();
    assert_eq!(updated.name_pl, "Zupy dnia");

    api.delete_category(created.id).await.unwrap();
    let remaining = api.list_categories().await.unwrap();
    assert!(remaining.iter().all(|c| c.id != created.id));
}

#[tokio::test]
async fn test_completed_orders_query_range() {
    let (server, api) = admin_api().await;
    let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();

    let orders = api.completed_orders(date).await.unwrap();
    assert!(!orders.is_empty());
    assert!(orders.iter().all(|o| o.status == OrderStatus::Ready));
    assert!(orders.iter().all(|o| o.created_at.starts_with("2025-01-10")));

    let query = server.state.orders_queries().pop().unwrap();
    assert_eq!(query.status.as_deref(), Some("ready"));
    assert_eq!(query.date_from.as_deref(), Some("2025-01-10"));
    assert_eq!(query.date_to.as_deref(), Some("2025-01-11"));
}

#[tokio::test]
async fn test_pending_orders_and_details() {
    let (_server, api) = admin_api().await;
    let pending = api.pending_orders().await.unwrap();
    assert!(pending.iter().all(|o| o.status == OrderStatus::Pending));

    let first = &pending[0];
    let details = api.get_order(&first.id.to_string()).await.unwrap();
    assert_eq!(details.order_number, first.order_number);
    assert!(!details.items.is_empty());
}

#[tokio::test]
async fn test_order_events_missing_uses_fallback() {
    let (_server, api) = admin_api().await;
    let err = api.order_events("1").await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    // The mock's generic 404 detail wins over the fallback
    assert_eq!(err.user_message(), "Not Found");
}

#[tokio::test]
async fn test_stats_are_remapped() {
    let (_server, api) = admin_api().await;

    let terminals = api.orders_daily_stats().await.unwrap();
    assert_eq!(terminals[0].terminal_name, "kiosk-1");
    assert_eq!(terminals[0].orders_done, 2);

    let top = api.bestsellers().await.unwrap();
    assert_eq!(top[0].name, "Margherita");
    assert_eq!(top[0].total, 3);
}

#[tokio::test]
async fn test_user_errors_prefer_detail() {
    let (_server, api) = admin_api().await;

    let payload = UserPayload {
        username: "kasia".into(),
        password: "tajne".into(),
        role: "manager".into(),
    };
    let created = api.create_user(&payload).await.unwrap();
    assert_eq!(created.role, "manager");

    let err = api.create_user(&payload).await.unwrap_err();
    assert_eq!(err.user_message(), "Username already registered");

    let mut renamed = payload.clone();
    renamed.username = "katarzyna".into();
    let updated = api.update_user(created.id, &renamed).await.unwrap();
    assert_eq!(updated.username, "katarzyna");

    api.delete_user(created.id).await.unwrap();
    assert!(
        api.list_users()
            .await
            .unwrap()
            .iter()
            .all(|u| u.id != created.id)
    );
}

#[tokio::test]
async fn test_payments() {
    let (_server, api) = admin_api().await;

    let for_order = api.payments_for_order(102).await.unwrap();
    assert_eq!(for_order.len(), 2);

    let day = api
        .payments_on(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(day.len(), 3);

    let created = api
        .create_payment(&PaymentCreate {
            hostname: "kiosk-3".into(),
            order_number: 104,
            amount_cents: 1999,
            status: PaymentStatus::Completed,
            terminal_log: String::new(),
            description: "Gotówka".into(),
        })
        .await
        .unwrap();
    let fetched = api.get_payment(created.id).await.unwrap();
    assert_eq!(fetched.amount_cents, 1999);
    assert_eq!(fetched.description.as_deref(), Some("Gotówka"));
    assert_eq!(api.list_payments().await.unwrap().len(), 5);
}
