//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// `price_cents` is always integer grosz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,
    pub name_pl: String,
    #[serde(default)]
    pub name_en: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub ingredients: Option<String>,
}

fn default_true() -> bool {
    true
}

impl MenuItem {
    /// Blocked items offer "unblock" instead of "block"
    pub fn is_blocked(&self) -> bool {
        !self.is_available
    }
}

/// Create/update menu item payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemPayload {
    pub category_id: i64,
    pub name_pl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub price_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl MenuItemPayload {
    pub fn new(category_id: i64, name_pl: impl Into<String>, price_cents: i64) -> Self {
        Self {
            category_id,
            name_pl: name_pl.into(),
            name_en: None,
            price_cents,
            image_url: None,
            is_available: None,
        }
    }

    pub fn available(mut self, is_available: bool) -> Self {
        self.is_available = Some(is_available);
        self
    }
}

impl From<&MenuItem> for MenuItemPayload {
    fn from(item: &MenuItem) -> Self {
        Self {
            category_id: item.category_id,
            name_pl: item.name_pl.clone(),
            name_en: item.name_en.clone(),
            price_cents: item.price_cents,
            image_url: item.image_url.clone(),
            is_available: Some(item.is_available),
        }
    }
}
