//! Menu categories: table, create/edit form, delete with confirmation

use std::sync::Arc;

use backoffice_client::{HttpClient, Mutation};
use shared::models::{CategoryPayload, MenuCategory};

use super::{ConfirmDelete, Page, PageData, data, required};
use crate::context::{AppContext, keys};
use crate::error::{PanelError, PanelResult};

#[derive(Debug, Clone, PartialEq)]
pub struct CategoriesView {
    pub categories: Arc<Vec<MenuCategory>>,
}

pub async fn load<H: HttpClient + 'static>(ctx: &AppContext<H>) -> Page<CategoriesView> {
    let categories = ctx.categories().await;
    if let Some(page) = PageData::of(&[&categories]).unsettled() {
        return page;
    }
    data(&categories)
        .map(|categories| Page::Ready(CategoriesView { categories }))
        .unwrap_or(Page::Loading)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name_pl: String,
    pub name_en: String,
    pub image_url: String,
}

impl CategoryForm {
    pub fn from_category(category: &MenuCategory) -> Self {
        Self {
            name_pl: category.name_pl.clone(),
            name_en: category.name_en.clone(),
            image_url: category.image_url.clone(),
        }
    }

    pub fn validate(&self) -> PanelResult<CategoryPayload> {
        Ok(CategoryPayload::new(
            required("Nazwa (PL)", &self.name_pl)?,
            self.name_en.trim(),
            self.image_url.trim(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormView {
    pub editing: Option<i64>,
    pub form: CategoryForm,
}

/// Create or edit form; an edited category is looked up in the list and
/// an unknown id is an error page
pub async fn load_form<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    id: Option<i64>,
) -> Page<CategoryFormView> {
    let Some(id) = id else {
        return Page::Ready(CategoryFormView {
            editing: None,
            form: CategoryForm::default(),
        });
    };
    load(ctx).await.and_then(|view| match find(&view.categories, id) {
        Ok(category) => Page::Ready(CategoryFormView {
            editing: Some(id),
            form: CategoryForm::from_category(category),
        }),
        Err(e) => Page::Error(e.user_message()),
    })
}

pub async fn save<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    editing: Option<i64>,
    form: &CategoryForm,
) -> PanelResult<MenuCategory> {
    let payload = form.validate()?;
    let mut mutation = Mutation::new().invalidates(keys::categories());
    let saved = match editing {
        Some(id) => {
            mutation
                .run(ctx.cache(), ctx.api().update_category(id, &payload))
                .await?
        }
        None => {
            mutation
                .run(ctx.cache(), ctx.api().create_category(&payload))
                .await?
        }
    };
    tracing::info!(id = saved.id, name = %saved.name_pl, "Category saved");
    Ok(saved.clone())
}

pub async fn confirm_delete<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    dialog: &mut ConfirmDelete<i64>,
) -> PanelResult<bool> {
    let api = ctx.api();
    dialog
        .confirm(ctx.cache(), keys::categories(), |id| api.delete_category(id))
        .await
}

/// Category being edited, or an error when it does not exist
pub fn find(categories: &[MenuCategory], id: i64) -> PanelResult<&MenuCategory> {
    categories
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| PanelError::validation(format!("Nie znaleziono kategorii {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_requires_polish_name() {
        assert!(CategoryForm::default().validate().is_err());
        let form = CategoryForm {
            name_pl: " Zupy ".into(),
            name_en: "Soups".into(),
            image_url: String::new(),
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.name_pl, "Zupy");
        assert_eq!(payload.id, None);
    }

    #[test]
    fn test_find_unknown_category() {
        let categories = vec![MenuCategory {
            id: 3,
            name_pl: "Pizza".into(),
            name_en: "Pizza".into(),
            image_url: String::new(),
        }];
        assert_eq!(find(&categories, 3).unwrap().name_pl, "Pizza");
        let err = find(&categories, 99).unwrap_err();
        assert_eq!(err.user_message(), "Nie znaleziono kategorii 99");
    }
}
