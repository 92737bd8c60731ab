//! Routing and the route guard
//!
//! Every page except `/login` needs a resolved user. `/` and unknown paths
//! go to the dashboard (or to the login page when nobody is logged in).

use std::fmt;

use shared::client::UserInfo;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/dashboard";

/// Every page of the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Orders,
    CompletedOrders,
    OrderDetails(String),
    Menu,
    MenuNew,
    MenuEdit(i64),
    Categories,
    CategoryNew,
    CategoryEdit(i64),
    Stats,
    Users,
    UserNew,
    UserEdit(i64),
    Payments,
    PaymentNew,
    PaymentDetails(i64),
    PaymentStats,
}

impl Route {
    /// Match a path (query string and trailing slash ignored)
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            ["login"] => Self::Login,
            ["dashboard"] => Self::Dashboard,
            ["orders"] => Self::Orders,
            ["orders", "completed"] => Self::CompletedOrders,
            ["orders", id] => Self::OrderDetails((*id).to_string()),
            ["menu"] => Self::Menu,
            ["menu", "new"] => Self::MenuNew,
            ["menu", id, "edit"] => Self::MenuEdit(id.parse().ok()?),
            ["categories"] => Self::Categories,
            ["categories", "new"] => Self::CategoryNew,
            ["categories", id, "edit"] => Self::CategoryEdit(id.parse().ok()?),
            ["stats"] => Self::Stats,
            ["users"] => Self::Users,
            ["users", "new"] => Self::UserNew,
            ["users", id, "edit"] => Self::UserEdit(id.parse().ok()?),
            ["payments"] => Self::Payments,
            ["payments", "new"] => Self::PaymentNew,
            ["payments", "stats"] => Self::PaymentStats,
            ["payments", id] => Self::PaymentDetails(id.parse().ok()?),
            _ => return None,
        };
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_string(),
            Self::Dashboard => HOME_PATH.to_string(),
            Self::Orders => "/orders".to_string(),
            Self::CompletedOrders => "/orders/completed".to_string(),
            Self::OrderDetails(id) => format!("/orders/{}", id),
            Self::Menu => "/menu".to_string(),
            Self::MenuNew => "/menu/new".to_string(),
            Self::MenuEdit(id) => format!("/menu/{}/edit", id),
            Self::Categories => "/categories".to_string(),
            Self::CategoryNew => "/categories/new".to_string(),
            Self::CategoryEdit(id) => format!("/categories/{}/edit", id),
            Self::Stats => "/stats".to_string(),
            Self::Users => "/users".to_string(),
            Self::UserNew => "/users/new".to_string(),
            Self::UserEdit(id) => format!("/users/{}/edit", id),
            Self::Payments => "/payments".to_string(),
            Self::PaymentNew => "/payments/new".to_string(),
            Self::PaymentDetails(id) => format!("/payments/{}", id),
            Self::PaymentStats => "/payments/stats".to_string(),
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of the route guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(String),
}

/// Decide what to show for `path` given the current user
pub fn guard(path: &str, user: Option<&UserInfo>) -> Navigation {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return redirect_home(user);
    }

    match Route::parse(path) {
        Some(route) if route.requires_auth() && user.is_none() => {
            tracing::debug!(path, "Anonymous access, redirecting to login");
            Navigation::Redirect(LOGIN_PATH.to_string())
        }
        Some(route) => Navigation::Render(route),
        None => redirect_home(user),
    }
}

fn redirect_home(user: Option<&UserInfo>) -> Navigation {
    match user {
        Some(_) => Navigation::Redirect(HOME_PATH.to_string()),
        None => Navigation::Redirect(LOGIN_PATH.to_string()),
    }
}

/// Entry of the top navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
}

const NAV: &[NavItem] = &[
    NavItem { path: "/dashboard", label: "Dashboard" },
    NavItem { path: "/orders", label: "Zamówienia" },
    NavItem { path: "/orders/completed", label: "Zamówienia zrealizowane" },
    NavItem { path: "/menu", label: "Menu" },
    NavItem { path: "/categories", label: "Kategorie" },
    NavItem { path: "/payments", label: "Płatności" },
    NavItem { path: "/stats", label: "Statystyki" },
];

const ADMIN_NAV: &[NavItem] = &[NavItem { path: "/users", label: "Użytkownicy" }];

/// Navigation entries visible to `user`.
///
/// Only admins see the user management link. The pages themselves stay
/// reachable by path for every logged-in user.
pub fn nav_items(user: &UserInfo) -> Vec<NavItem> {
    let mut items = NAV.to_vec();
    if user.is_admin() {
        items.extend_from_slice(ADMIN_NAV);
    }
    items
}
