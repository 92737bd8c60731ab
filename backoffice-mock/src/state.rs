//! In-memory backend state

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use shared::models::{
    MenuCategory, MenuItem, Order, OrderItem, OrderStatus, Payment, PaymentStatus, User,
};

/// Stored user with its (plain-text, mock only) password
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user: User,
    pub password: String,
}

/// Query string of a `GET /orders` call, recorded for assertions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersQuery {
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub categories: Vec<MenuCategory>,
    pub items: Vec<MenuItem>,
    pub orders: Vec<Order>,
    pub payments: Vec<Payment>,
    pub users: Vec<UserRecord>,
    /// (terminal_name, orders_count) as reported by `/stats/orders/daily`
    pub terminal_stats: Vec<(String, i64)>,
    pub tokens: HashMap<String, i64>,
    pub orders_queries: Vec<OrdersQuery>,
    /// When set, `/auth/me` answers 401 for every token
    pub reject_identity: bool,
    next_id: i64,
    token_seq: u64,
}

impl Store {
    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Issue a fresh bearer token for `user_id`
    pub fn issue_token(&mut self, user_id: i64) -> String {
        self.token_seq += 1;
        let token = format!("mock-{}-{}", user_id, self.token_seq);
        self.tokens.insert(token.clone(), user_id);
        token
    }

    pub fn user_by_token(&self, token: &str) -> Option<&UserRecord> {
        let id = self.tokens.get(token)?;
        self.users.iter().find(|u| u.user.id == *id)
    }

    fn add_user(&mut self, username: &str, password: &str, role: &str) {
        let id = self.next_id();
        self.users.push(UserRecord {
            user: User {
                id,
                username: username.to_string(),
                role: role.to_string(),
            },
            password: password.to_string(),
        });
    }
}

/// Shared mock state
#[derive(Debug, Default)]
pub struct MockState {
    store: Mutex<Store>,
}

impl MockState {
    /// Empty backend with only the two seeded accounts
    pub fn new() -> Self {
        let mut store = Store::default();
        store.add_user("admin", "admin", "admin");
        store.add_user("manager", "manager", "manager");
        Self {
            store: Mutex::new(store),
        }
    }

    /// Backend with a small restaurant's worth of data (dated 2025-01-09/10)
    pub fn seeded() -> Self {
        let state = Self::new();
        {
            let mut s = state.store();
            seed(&mut s);
        }
        state
    }

    pub fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every `GET /orders` query received so far, oldest first
    pub fn orders_queries(&self) -> Vec<OrdersQuery> {
        self.store().orders_queries.clone()
    }

    /// Make `/auth/me` reject every token from now on (tests)
    pub fn reject_identity_lookups(&self) {
        self.store().reject_identity = true;
    }

    /// Register a bearer token directly (tests)
    pub fn issue_token(&self, username: &str) -> Option<String> {
        let mut store = self.store();
        let id = store
            .users
            .iter()
            .find(|u| u.user.username == username)?
            .user
            .id;
        Some(store.issue_token(id))
    }
}

fn seed(s: &mut Store) {
    for (name_pl, name_en) in [("Pizza", "Pizza"), ("Napoje", "Drinks"), ("Makarony", "Pasta")] {
        let id = s.next_id();
        s.categories.push(MenuCategory {
            id,
            name_pl: name_pl.to_string(),
            name_en: name_en.to_string(),
            image_url: String::new(),
        });
    }
    let pizza = s.categories[0].id;
    let drinks = s.categories[1].id;

    for (category_id, name_pl, price_cents, is_available) in [
        (pizza, "Margherita", 2800, true),
        (pizza, "Capricciosa", 3400, true),
        (drinks, "Lemoniada", 1200, false),
    ] {
        let id = s.next_id();
        s.items.push(MenuItem {
            id,
            category_id,
            name_pl: name_pl.to_string(),
            name_en: None,
            price_cents,
            image_url: None,
            is_available,
            ingredients: None,
        });
    }
    let margherita = s.items[0].id;
    let capricciosa = s.items[1].id;
    let lemonade = s.items[2].id;

    let orders = [
        (101, OrderStatus::Pending, "2025-01-10T12:00:00", None, None, vec![(margherita, 2)]),
        (
            102,
            OrderStatus::Ready,
            "2025-01-10T11:00:00",
            Some("2025-01-10T11:02:00"),
            Some("2025-01-10T11:15:00"),
            vec![(capricciosa, 1), (lemonade, 2)],
        ),
        (
            103,
            OrderStatus::Ready,
            "2025-01-09T18:30:00",
            Some("2025-01-09T18:31:00"),
            Some("2025-01-09T18:50:00"),
            vec![(margherita, 1)],
        ),
    ];
    for (number, status, created_at, accepted_at, ready_at, lines) in orders {
        let id = s.next_id();
        let mut items = Vec::new();
        for (menu_item_id, quantity) in lines {
            items.push(OrderItem {
                id: s.next_id(),
                menu_item_id,
                quantity,
            });
        }
        s.orders.push(Order {
            id,
            order_number: number.to_string(),
            status,
            order_type: "dine_in".to_string(),
            created_at: created_at.to_string(),
            accepted_at: accepted_at.map(str::to_string),
            ready_at: ready_at.map(str::to_string),
            items,
        });
    }

    for (order_number, amount_cents, status, hostname, created_at) in [
        (101, 5600, PaymentStatus::Completed, "kiosk-1", "2025-01-10T12:01:00"),
        (102, 5800, PaymentStatus::Completed, "kiosk-2", "2025-01-10T11:01:00"),
        (102, 5800, PaymentStatus::Failed, "kiosk-2", "2025-01-10T11:00:30"),
        (103, 2800, PaymentStatus::Completed, "kiosk-1", "2025-01-09T18:30:40"),
    ] {
        let id = s.next_id();
        s.payments.push(Payment {
            id,
            order_number,
            amount_cents,
            status,
            hostname: hostname.to_string(),
            description: None,
            terminal_log: None,
            created_at: created_at.to_string(),
        });
    }

    s.terminal_stats = vec![("kiosk-1".to_string(), 2), ("kiosk-2".to_string(), 1)];
}
