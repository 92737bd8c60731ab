//! Menu items: table, block/unblock, create/edit form, delete

use std::sync::Arc;

use backoffice_client::{HttpClient, Mutation};
use shared::models::{MenuCategory, MenuItem, MenuItemPayload, category_name};

use super::forms::optional;
use super::{ConfirmDelete, Page, PageData, data, parse_count, parse_id, required};
use crate::context::{AppContext, keys};
use crate::error::PanelResult;

#[derive(Debug, Clone, PartialEq)]
pub struct MenuRow {
    pub item: MenuItem,
    /// Category name, `-` when the category is gone
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub rows: Vec<MenuRow>,
}

pub async fn load<H: HttpClient + 'static>(ctx: &AppContext<H>) -> Page<MenuView> {
    let (items, categories) = tokio::join!(ctx.menu_items(), ctx.categories());
    if let Some(page) = PageData::of(&[&items, &categories]).unsettled() {
        return page;
    }
    let (Some(items), Some(categories)) = (data(&items), data(&categories)) else {
        return Page::Loading;
    };
    let rows = items
        .iter()
        .map(|item| MenuRow {
            category: category_name(&categories, item.category_id).to_string(),
            item: item.clone(),
        })
        .collect();
    Page::Ready(MenuView { rows })
}

/// Raw form input, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItemForm {
    pub category_id: String,
    pub name_pl: String,
    pub name_en: String,
    /// Price in grosz
    pub price_cents: String,
    pub image_url: String,
    /// Only sent when editing; new items use the backend default
    pub is_available: Option<bool>,
}

impl MenuItemForm {
    /// Form pre-filled from an existing item
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            category_id: item.category_id.to_string(),
            name_pl: item.name_pl.clone(),
            name_en: item.name_en.clone().unwrap_or_default(),
            price_cents: item.price_cents.to_string(),
            image_url: item.image_url.clone().unwrap_or_default(),
            is_available: Some(item.is_available),
        }
    }

    pub fn validate(&self) -> PanelResult<MenuItemPayload> {
        let mut payload = MenuItemPayload::new(
            parse_id("Kategoria", &self.category_id)?,
            required("Nazwa (PL)", &self.name_pl)?,
            parse_count("Cena (gr)", &self.price_cents)?,
        );
        payload.name_en = optional(&self.name_en);
        payload.image_url = optional(&self.image_url);
        payload.is_available = self.is_available;
        Ok(payload)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuFormView {
    /// `Some(id)` when editing
    pub editing: Option<i64>,
    pub categories: Arc<Vec<MenuCategory>>,
    pub form: MenuItemForm,
}

/// Create (`id = None`) or edit form
pub async fn load_form<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    id: Option<i64>,
) -> Page<MenuFormView> {
    let categories = ctx.categories().await;
    let form = match id {
        Some(id) => {
            let item = ctx.menu_item(id).await;
            if let Some(page) = PageData::of(&[&categories, &item]).unsettled() {
                return page;
            }
            match data(&item) {
                Some(item) => MenuItemForm::from_item(&item),
                None => return Page::Loading,
            }
        }
        None => {
            if let Some(page) = PageData::of(&[&categories]).unsettled() {
                return page;
            }
            MenuItemForm::default()
        }
    };
    match data(&categories) {
        Some(categories) => Page::Ready(MenuFormView {
            editing: id,
            categories,
            form,
        }),
        None => Page::Loading,
    }
}

/// Validate and send the form; the menu queries are invalidated on success
pub async fn save<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    editing: Option<i64>,
    form: &MenuItemForm,
) -> PanelResult<MenuItem> {
    let payload = form.validate()?;
    let mut mutation = Mutation::new().invalidates(keys::menu());
    let saved = match editing {
        Some(id) => {
            mutation
                .run(ctx.cache(), ctx.api().update_menu_item(id, &payload))
                .await?
        }
        None => {
            mutation
                .run(ctx.cache(), ctx.api().create_menu_item(&payload))
                .await?
        }
    };
    tracing::info!(id = saved.id, name = %saved.name_pl, "Menu item saved");
    Ok(saved.clone())
}

/// Block an available item, unblock a blocked one
pub async fn toggle_availability<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    item: &MenuItem,
) -> PanelResult<()> {
    let mut mutation = Mutation::new().invalidates(keys::menu());
    if item.is_blocked() {
        mutation
            .run(ctx.cache(), ctx.api().unblock_menu_item(item.id))
            .await?;
    } else {
        mutation
            .run(ctx.cache(), ctx.api().block_menu_item(item.id))
            .await?;
    }
    Ok(())
}

/// Delete the item awaiting confirmation in `dialog`
pub async fn confirm_delete<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    dialog: &mut ConfirmDelete<i64>,
) -> PanelResult<bool> {
    let api = ctx.api();
    dialog
        .confirm(ctx.cache(), keys::menu(), |id| api.delete_menu_item(id))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_validation() {
        let form = MenuItemForm {
            category_id: "3".into(),
            name_pl: "Pizza".into(),
            price_cents: "2500".into(),
            ..Default::default()
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload, MenuItemPayload::new(3, "Pizza", 2500));

        let bad_price = MenuItemForm {
            price_cents: "25,00".into(),
            ..form.clone()
        };
        assert!(bad_price.validate().is_err());

        let no_category = MenuItemForm {
            category_id: String::new(),
            ..form
        };
        assert!(no_category.validate().is_err());
    }

    #[test]
    fn test_form_round_trips_item() {
        let item = MenuItem {
            id: 8,
            category_id: 2,
            name_pl: "Lemoniada".into(),
            name_en: Some("Lemonade".into()),
            price_cents: 1200,
            image_url: None,
            is_available: false,
            ingredients: None,
        };
        let payload = MenuItemForm::from_item(&item).validate().unwrap();
        assert_eq!(payload, MenuItemPayload::from(&item));
    }
}
