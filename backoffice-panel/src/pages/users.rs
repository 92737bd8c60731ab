//! User accounts

use std::sync::Arc;

use backoffice_client::{HttpClient, Mutation};
use shared::models::{User, UserPayload, UserRole};

use super::{ConfirmDelete, Page, PageData, data, required};
use crate::context::{AppContext, keys};
use crate::error::{PanelError, PanelResult};

#[derive(Debug, Clone, PartialEq)]
pub struct UsersView {
    pub users: Arc<Vec<User>>,
}

pub async fn load<H: HttpClient + 'static>(ctx: &AppContext<H>) -> Page<UsersView> {
    let users = ctx.users().await;
    if let Some(page) = PageData::of(&[&users]).unsettled() {
        return page;
    }
    data(&users)
        .map(|users| Page::Ready(UsersView { users }))
        .unwrap_or(Page::Loading)
}

/// Polish label of a stored role, the raw value when unknown
pub fn role_label(role: &str) -> &str {
    UserRole::parse(role).map(|r| r.label()).unwrap_or(role)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub username: String,
    /// Write-only; never pre-filled
    pub password: String,
    pub role: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            role: UserRole::default().as_str().to_string(),
        }
    }
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: String::new(),
            role: user.role.clone(),
        }
    }

    /// A password is mandatory for new accounts only
    pub fn validate(&self, editing: bool) -> PanelResult<UserPayload> {
        let username = required("Login", &self.username)?;
        if !editing {
            required("Hasło", &self.password)?;
        }
        let role = UserRole::parse(self.role.trim())
            .ok_or_else(|| PanelError::validation(format!("Nieznana rola: {}", self.role)))?;
        Ok(UserPayload {
            username,
            password: self.password.clone(),
            role: role.as_str().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserFormView {
    pub editing: Option<i64>,
    pub form: UserForm,
}

pub async fn load_form<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    id: Option<i64>,
) -> Page<UserFormView> {
    let Some(id) = id else {
        return Page::Ready(UserFormView {
            editing: None,
            form: UserForm::default(),
        });
    };
    load(ctx).await.and_then(|view| match find(&view.users, id) {
        Ok(user) => Page::Ready(UserFormView {
            editing: Some(id),
            form: UserForm::from_user(user),
        }),
        Err(e) => Page::Error(e.user_message()),
    })
}

/// User being edited, or an error when it does not exist
pub fn find(users: &[User], id: i64) -> PanelResult<&User> {
    users
        .iter()
        .find(|u| u.id == id)
        .ok_or_else(|| PanelError::validation(format!("Nie znaleziono użytkownika {}", id)))
}

/// Save the form. Backend rejections (e.g. a taken login) come back with
/// the backend's own message.
pub async fn save<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    editing: Option<i64>,
    form: &UserForm,
) -> PanelResult<User> {
    let payload = form.validate(editing.is_some())?;
    let mut mutation = Mutation::new().invalidates(keys::users());
    let saved = match editing {
        Some(id) => {
            mutation
                .run(ctx.cache(), ctx.api().update_user(id, &payload))
                .await?
        }
        None => {
            mutation
                .run(ctx.cache(), ctx.api().create_user(&payload))
                .await?
        }
    };
    tracing::info!(id = saved.id, username = %saved.username, "User saved");
    Ok(saved.clone())
}

pub async fn confirm_delete<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    dialog: &mut ConfirmDelete<i64>,
) -> PanelResult<bool> {
    let api = ctx.api();
    dialog
        .confirm(ctx.cache(), keys::users(), |id| api.delete_user(id))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        assert_eq!(role_label("admin"), "Administrator");
        assert_eq!(role_label("manager"), "Manager");
        assert_eq!(role_label("kitchen"), "kitchen");
    }

    #[test]
    fn test_password_required_on_create_only() {
        let form = UserForm {
            username: "ola".into(),
            ..Default::default()
        };
        assert!(form.validate(false).is_err());
        let payload = form.validate(true).unwrap();
        assert_eq!(payload.role, "manager");
        assert!(payload.password.is_empty());
    }

    #[test]
    fn test_find_unknown_user() {
        let users = vec![User {
            id: 1,
            username: "admin".into(),
            role: "admin".into(),
        }];
        assert!(find(&users, 1).is_ok());
        let err = find(&users, 7).unwrap_err();
        assert_eq!(err.user_message(), "Nie znaleziono użytkownika 7");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let form = UserForm {
            username: "ola".into(),
            password: "x".into(),
            role: "owner".into(),
        };
        assert!(form.validate(false).is_err());
    }
}
