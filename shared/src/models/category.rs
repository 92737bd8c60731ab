//! Menu Category Model

use serde::{Deserialize, Serialize};

/// Menu category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub id: i64,
    pub name_pl: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub image_url: String,
}

/// Create/update category payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPayload {
    /// Only sent on update; the backend expects the id echoed in the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name_pl: String,
    pub name_en: String,
    pub image_url: String,
}

impl CategoryPayload {
    pub fn new(
        name_pl: impl Into<String>,
        name_en: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name_pl: name_pl.into(),
            name_en: name_en.into(),
            image_url: image_url.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl From<&MenuCategory> for CategoryPayload {
    fn from(category: &MenuCategory) -> Self {
        Self {
            id: Some(category.id),
            name_pl: category.name_pl.clone(),
            name_en: category.name_en.clone(),
            image_url: category.image_url.clone(),
        }
    }
}

/// Category name by id, `-` when the reference is dangling
pub fn category_name(categories: &[MenuCategory], id: i64) -> &str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name_pl.as_str())
        .unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_name_fallback() {
        let cats = vec![MenuCategory {
            id: 3,
            name_pl: "Pizza".into(),
            name_en: "Pizza".into(),
            image_url: String::new(),
        }];
        assert_eq!(category_name(&cats, 3), "Pizza");
        assert_eq!(category_name(&cats, 4), "-");
        assert_eq!(category_name(&[], 3), "-");
    }

    #[test]
    fn test_update_payload_echoes_id() {
        let json = serde_json::to_value(CategoryPayload::new("Zupy", "Soups", "").with_id(9)).unwrap();
        assert_eq!(json["id"], 9);

        let json = serde_json::to_value(CategoryPayload::new("Zupy", "Soups", "")).unwrap();
        assert!(json.get("id").is_none());
    }
}
