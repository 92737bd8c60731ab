//! Route handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
};
use serde::Deserialize;
use shared::client::{IdentityResponse, LoginRequest};
use shared::models::{
    CategoryPayload, MenuCategory, MenuItem, MenuItemPayload, Order, Payment, PaymentCreate, User,
    UserPayload,
};

use crate::error::{MockError, MockResult};
use crate::state::{MockState, OrdersQuery, UserRecord};

type AppState = State<Arc<MockState>>;

pub fn routes() -> Router<Arc<MockState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/menu/categories", get(list_categories).post(create_category))
        .route(
            "/menu/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/menu/items", get(list_items).post(create_item))
        .route(
            "/menu/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/menu/items/{id}/block", post(block_item))
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order))
        .route("/stats/orders/daily", get(daily_order_stats))
        .route("/stats/menu-items/top", get(top_menu_items))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .route("/payments", get(list_payments).post(create_payment))
        .route("/payments/{id}", get(get_payment))
}

/// Resolve the bearer token to a stored user
fn authorize(state: &MockState, headers: &HeaderMap) -> MockResult<User> {
    let token = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(MockError::Unauthorized)?;
    state
        .store()
        .user_by_token(token)
        .map(|u| u.user.clone())
        .ok_or(MockError::Unauthorized)
}

/// `created_at` date part, compared as `YYYY-MM-DD` strings
fn in_range(created_at: &str, from: Option<&str>, to: Option<&str>) -> bool {
    let day = created_at.get(..10).unwrap_or(created_at);
    from.is_none_or(|f| day >= f) && to.is_none_or(|t| day < t)
}

// ========== Auth ==========

async fn login(
    State(state): AppState,
    Form(req): Form<LoginRequest>,
) -> MockResult<Json<serde_json::Value>> {
    let mut store = state.store();
    let user = store
        .users
        .iter()
        .find(|u| u.user.username == req.username && u.password == req.password)
        .map(|u| u.user.clone())
        .ok_or(MockError::BadCredentials)?;
    let token = store.issue_token(user.id);
    tracing::info!(username = %user.username, "Mock login");

    // Login reports roles as a list; /auth/me uses the singular field
    Ok(Json(serde_json::json!({
        "access_token": token,
        "token_type": "bearer",
        "user": {
            "id": user.id,
            "username": user.username,
            "roles": [user.role],
        }
    })))
}

async fn me(State(state): AppState, headers: HeaderMap) -> MockResult<Json<IdentityResponse>> {
    if state.store().reject_identity {
        return Err(MockError::Unauthorized);
    }
    let user = authorize(&state, &headers)?;
    Ok(Json(IdentityResponse {
        id: user.id,
        username: user.username,
        role: Some(user.role),
        roles: None,
    }))
}

// ========== Categories ==========

async fn list_categories(
    State(state): AppState,
    headers: HeaderMap,
) -> MockResult<Json<Vec<MenuCategory>>> {
    authorize(&state, &headers)?;
    Ok(Json(state.store().categories.clone()))
}

async fn create_category(
    State(state): AppState,
    headers: HeaderMap,
    Json(payload): Json<CategoryPayload>,
) -> MockResult<(StatusCode, Json<MenuCategory>)> {
    authorize(&state, &headers)?;
    if payload.name_pl.trim().is_empty() {
        return Err(MockError::BadRequest("name_pl must not be empty".into()));
    }
    let mut store = state.store();
    let category = MenuCategory {
        id: store.next_id(),
        name_pl: payload.name_pl,
        name_en: payload.name_en,
        image_url: payload.image_url,
    };
    store.categories.push(category.clone());
    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> MockResult<Json<MenuCategory>> {
    authorize(&state, &headers)?;
    let mut store = state.store();
    let category = store
        .categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| MockError::not_found("Category"))?;
    category.name_pl = payload.name_pl;
    category.name_en = payload.name_en;
    category.image_url = payload.image_url;
    Ok(Json(category.clone()))
}

async fn delete_category(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> MockResult<StatusCode> {
    authorize(&state, &headers)?;
    let mut store = state.store();
    let before = store.categories.len();
    store.categories.retain(|c| c.id != id);
    if store.categories.len() == before {
        return Err(MockError::not_found("Category"));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ========== Menu items ==========

async fn list_items(State(state): AppState, headers: HeaderMap) -> MockResult<Json<Vec<MenuItem>>> {
    authorize(&state, &headers)?;
    Ok(Json(state.store().items.clone()))
}

async fn get_item(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> MockResult<Json<MenuItem>> {
    authorize(&state, &headers)?;
    state
        .store()
        .items
        .iter()
        .find(|i| i.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("Menu item"))
}

async fn create_item(
    State(state): AppState,
    headers: HeaderMap,
    Json(payload): Json<MenuItemPayload>,
) -> MockResult<(StatusCode, Json<MenuItem>)> {
    authorize(&state, &headers)?;
    if payload.price_cents < 0 {
        return Err(MockError::BadRequest("price_cents must not be negative".into()));
    }
    let mut store = state.store();
    let item = MenuItem {
        id: store.next_id(),
        category_id: payload.category_id,
        name_pl: payload.name_pl,
        name_en: payload.name_en,
        price_cents: payload.price_cents,
        image_url: payload.image_url,
        is_available: payload.is_available.unwrap_or(true),
        ingredients: None,
    };
    store.items.push(item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemPayload>,
) -> MockResult<Json<MenuItem>> {
    authorize(&state, &headers)?;
    let mut store = state.store();
    let item = store
        .items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| MockError::not_found("Menu item"))?;
    item.category_id = payload.category_id;
    item.name_pl = payload.name_pl;
    item.name_en = payload.name_en;
    item.price_cents = payload.price_cents;
    item.image_url = payload.image_url;
    if let Some(available) = payload.is_available {
        item.is_available = available;
    }
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> MockResult<StatusCode> {
    authorize(&state, &headers)?;
    let mut store = state.store();
    let before = store.items.len();
    store.items.retain(|i| i.id != id);
    if store.items.len() == before {
        return Err(MockError::not_found("Menu item"));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
struct BlockQuery {
    is_available: bool,
}

async fn block_item(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(q): Query<BlockQuery>,
) -> MockResult<Json<MenuItem>> {
    authorize(&state, &headers)?;
    let mut store = state.store();
    let item = store
        .items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| MockError::not_found("Menu item"))?;
    item.is_available = q.is_available;
    Ok(Json(item.clone()))
}

// ========== Orders ==========

async fn list_orders(
    State(state): AppState,
    headers: HeaderMap,
    Query(q): Query<OrdersQuery>,
) -> MockResult<Json<Vec<Order>>> {
    authorize(&state, &headers)?;
    let mut store = state.store();
    store.orders_queries.push(q.clone());
    let orders = store
        .orders
        .iter()
        .filter(|o| q.status.as_deref().is_none_or(|s| o.status.as_str() == s))
        .filter(|o| in_range(&o.created_at, q.date_from.as_deref(), q.date_to.as_deref()))
        .cloned()
        .collect();
    Ok(Json(orders))
}

async fn get_order(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> MockResult<Json<Order>> {
    authorize(&state, &headers)?;
    state
        .store()
        .orders
        .iter()
        .find(|o| o.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("Order"))
}

// ========== Stats ==========

async fn daily_order_stats(
    State(state): AppState,
    headers: HeaderMap,
) -> MockResult<Json<serde_json::Value>> {
    authorize(&state, &headers)?;
    let stats: Vec<_> = state
        .store()
        .terminal_stats
        .iter()
        .map(|(name, count)| serde_json::json!({ "terminal_name": name, "orders_count": count }))
        .collect();
    Ok(Json(serde_json::json!({ "terminal_stats": stats })))
}

/// Sold quantities per menu item, highest first
async fn top_menu_items(
    State(state): AppState,
    headers: HeaderMap,
) -> MockResult<Json<Vec<serde_json::Value>>> {
    authorize(&state, &headers)?;
    let store = state.store();
    let mut sold: HashMap<i64, i64> = HashMap::new();
    for item in store.orders.iter().flat_map(|o| &o.items) {
        *sold.entry(item.menu_item_id).or_insert(0) += item.quantity;
    }
    let mut top: Vec<(String, i64)> = sold
        .into_iter()
        .filter_map(|(id, count)| {
            let name = store.items.iter().find(|i| i.id == id)?.name_pl.clone();
            Some((name, count))
        })
        .collect();
    top.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(Json(
        top.into_iter()
            .map(|(name, sold_count)| serde_json::json!({ "name": name, "sold_count": sold_count }))
            .collect(),
    ))
}

// ========== Users ==========

async fn list_users(State(state): AppState, headers: HeaderMap) -> MockResult<Json<Vec<User>>> {
    authorize(&state, &headers)?;
    Ok(Json(state.store().users.iter().map(|u| u.user.clone()).collect()))
}

fn validate_user(payload: &UserPayload) -> MockResult<()> {
    if payload.username.trim().is_empty() {
        return Err(MockError::BadRequest("Username must not be empty".into()));
    }
    if !matches!(payload.role.as_str(), "admin" | "manager") {
        return Err(MockError::BadRequest(format!("Unknown role: {}", payload.role)));
    }
    Ok(())
}

async fn create_user(
    State(state): AppState,
    headers: HeaderMap,
    Json(payload): Json<UserPayload>,
) -> MockResult<(StatusCode, Json<User>)> {
    authorize(&state, &headers)?;
    validate_user(&payload)?;
    let mut store = state.store();
    if store.users.iter().any(|u| u.user.username == payload.username) {
        return Err(MockError::BadRequest("Username already registered".into()));
    }
    let user = User {
        id: store.next_id(),
        username: payload.username,
        role: payload.role,
    };
    store.users.push(UserRecord {
        user: user.clone(),
        password: payload.password,
    });
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_user(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> MockResult<Json<User>> {
    authorize(&state, &headers)?;
    validate_user(&payload)?;
    let mut store = state.store();
    if store
        .users
        .iter()
        .any(|u| u.user.id != id && u.user.username == payload.username)
    {
        return Err(MockError::BadRequest("Username already registered".into()));
    }
    let record = store
        .users
        .iter_mut()
        .find(|u| u.user.id == id)
        .ok_or_else(|| MockError::not_found("User"))?;
    record.user.username = payload.username;
    record.user.role = payload.role;
    // An empty password leaves the current one in place
    if !payload.password.is_empty() {
        record.password = payload.password;
    }
    Ok(Json(record.user.clone()))
}

async fn delete_user(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> MockResult<StatusCode> {
    let caller = authorize(&state, &headers)?;
    if caller.id == id {
        return Err(MockError::BadRequest("Cannot delete the current user".into()));
    }
    let mut store = state.store();
    let before = store.users.len();
    store.users.retain(|u| u.user.id != id);
    if store.users.len() == before {
        return Err(MockError::not_found("User"));
    }
    store.tokens.retain(|_, user_id| *user_id != id);
    Ok(StatusCode::NO_CONTENT)
}

// ========== Payments ==========

#[derive(Deserialize)]
struct PaymentsQuery {
    order_number: Option<i64>,
    date_from: Option<String>,
    date_to: Option<String>,
}

async fn list_payments(
    State(state): AppState,
    headers: HeaderMap,
    Query(q): Query<PaymentsQuery>,
) -> MockResult<Json<Vec<Payment>>> {
    authorize(&state, &headers)?;
    let payments = state
        .store()
        .payments
        .iter()
        .filter(|p| q.order_number.is_none_or(|n| p.order_number == n))
        .filter(|p| in_range(&p.created_at, q.date_from.as_deref(), q.date_to.as_deref()))
        .cloned()
        .collect();
    Ok(Json(payments))
}

async fn get_payment(
    State(state): AppState,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> MockResult<Json<Payment>> {
    authorize(&state, &headers)?;
    state
        .store()
        .payments
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("Payment"))
}

async fn create_payment(
    State(state): AppState,
    headers: HeaderMap,
    Json(payload): Json<PaymentCreate>,
) -> MockResult<(StatusCode, Json<Payment>)> {
    authorize(&state, &headers)?;
    if payload.amount_cents <= 0 {
        return Err(MockError::BadRequest("amount_cents must be positive".into()));
    }
    let mut store = state.store();
    let payment = Payment {
        id: store.next_id(),
        order_number: payload.order_number,
        amount_cents: payload.amount_cents,
        status: payload.status,
        hostname: payload.hostname,
        description: Some(payload.description).filter(|d| !d.is_empty()),
        terminal_log: Some(payload.terminal_log).filter(|t| !t.is_empty()),
        created_at: chrono::Local::now()
            .naive_local()
            .format("%Y-%m-%dT%H:%M:%S")
            .to_string(),
    };
    store.payments.push(payment.clone());
    Ok((StatusCode::CREATED, Json(payment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_is_exclusive_at_the_top() {
        let from = Some("2025-01-10");
        let to = Some("2025-01-11");
        assert!(in_range("2025-01-10T00:00:00", from, to));
        assert!(in_range("2025-01-10T23:59:59", from, to));
        assert!(!in_range("2025-01-11T00:00:00", from, to));
        assert!(!in_range("2025-01-09T23:59:59", from, to));
        assert!(in_range("2025-01-09T23:59:59", None, None));
    }

    #[test]
    fn test_seeded_tokens_resolve() {
        let state = MockState::seeded();
        let token = state.issue_token("manager").unwrap();
        let store = state.store();
        let user = store.user_by_token(&token).unwrap();
        assert_eq!(user.user.role, "manager");
        assert!(store.user_by_token("mock-0-0").is_none());
    }
}
