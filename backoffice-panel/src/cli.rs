//! `panel` command line
//!
//! Every command works through the same page view-models a graphical
//! front-end would use; `run` returns the text to print.

use std::sync::Arc;

use backoffice_client::{ClientError, HttpClient, QueryState};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shared::util::parse_date;

use crate::context::AppContext;
use crate::error::{PanelError, PanelResult};
use crate::pages::categories::{self, CategoryForm};
use crate::pages::menu::{self, MenuItemForm};
use crate::pages::payments::{self, PaymentForm};
use crate::pages::users::{self, UserForm};
use crate::pages::{ConfirmDelete, dashboard, orders, stats};
use crate::render::{Render, render_login, render_nav};
use crate::routes::{Navigation, Route, guard, nav_items};

/// Redirects followed by `show` before giving up
const MAX_REDIRECTS: usize = 3;

#[derive(Debug, Parser)]
#[command(name = "panel")]
#[command(about = "Restaurant back-office panel", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL, overrides PANEL_API_URL
    #[arg(short, long, global = true)]
    pub url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login { username: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Render the page at PATH (e.g. /menu, /orders/completed)
    Show {
        path: String,
        /// Day for dated pages, YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Menu items
    Menu {
        #[command(subcommand)]
        action: MenuCommand,
    },
    /// Menu categories
    Category {
        #[command(subcommand)]
        action: CategoryCommand,
    },
    /// User accounts
    User {
        #[command(subcommand)]
        action: UserCommand,
    },
    /// Payments
    Payment {
        #[command(subcommand)]
        action: PaymentCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum MenuCommand {
    Block { id: i64 },
    Unblock { id: i64 },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    Create(MenuItemArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: MenuItemArgs,
    },
}

/// Menu item fields; on update only the given ones change
#[derive(Debug, Clone, Default, Args)]
pub struct MenuItemArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub name_en: Option<String>,
    /// Price in grosz
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub available: Option<bool>,
}

impl MenuItemArgs {
    fn apply(self, form: &mut MenuItemForm) {
        overlay(&mut form.category_id, self.category);
        overlay(&mut form.name_pl, self.name);
        overlay(&mut form.name_en, self.name_en);
        overlay(&mut form.price_cents, self.price);
        overlay(&mut form.image_url, self.image);
        if self.available.is_some() {
            form.is_available = self.available;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    Create(CategoryArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: CategoryArgs,
    },
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct CategoryArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub name_en: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
}

impl CategoryArgs {
    fn apply(self, form: &mut CategoryForm) {
        overlay(&mut form.name_pl, self.name);
        overlay(&mut form.name_en, self.name_en);
        overlay(&mut form.image_url, self.image);
    }
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    Create(UserArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: UserArgs,
    },
    Delete {
        id: i64,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct UserArgs {
    #[arg(long)]
    pub username: Option<String>,
    /// Left unchanged on update when omitted
    #[arg(long)]
    pub password: Option<String>,
    /// admin or manager
    #[arg(long)]
    pub role: Option<String>,
}

impl UserArgs {
    fn apply(self, form: &mut UserForm) {
        overlay(&mut form.username, self.username);
        overlay(&mut form.password, self.password);
        overlay(&mut form.role, self.role);
    }
}

#[derive(Debug, Subcommand)]
pub enum PaymentCommand {
    Create(PaymentArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PaymentArgs {
    #[arg(long)]
    pub order: String,
    /// Amount in grosz
    #[arg(long)]
    pub amount: String,
    #[arg(long)]
    pub terminal: String,
    #[arg(long, default_value = "pending")]
    pub status: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub terminal_log: String,
}

impl From<PaymentArgs> for PaymentForm {
    fn from(args: PaymentArgs) -> Self {
        Self {
            order_number: args.order,
            amount_cents: args.amount,
            hostname: args.terminal,
            status: args.status,
            description: args.description,
            terminal_log: args.terminal_log,
        }
    }
}

fn overlay(field: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *field = v;
    }
}

/// Data of a query that has settled
fn loaded<T>(state: QueryState<T>) -> PanelResult<Arc<T>> {
    match state {
        QueryState::Success(value) => Ok(value),
        QueryState::Error(e) => Err(e.into()),
        QueryState::Pending => Err(PanelError::from(ClientError::InvalidState(
            "query did not settle".into(),
        ))),
    }
}

/// Execute one command and return what to print.
///
/// `confirm` is asked before any deletion not pre-approved with `--yes`.
pub async fn run<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    command: Commands,
    today: NaiveDate,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> PanelResult<String> {
    match command {
        Commands::Login { username, password } => {
            let user = ctx.session().login(&username, &password).await?;
            ctx.reset();
            Ok(format!(
                "Zalogowano jako {} ({})",
                user.username,
                users::role_label(&user.role)
            ))
        }
        Commands::Logout => {
            ctx.session().logout()?;
            ctx.reset();
            Ok("Wylogowano".to_string())
        }
        Commands::Whoami => Ok(match ctx.user() {
            Some(user) => format!("{} ({})", user.username, users::role_label(&user.role)),
            None => "Niezalogowany".to_string(),
        }),
        Commands::Show { path, date } => {
            let date = match date {
                Some(raw) => parse_date(&raw)
                    .ok_or_else(|| PanelError::validation(format!("Nieprawidłowa data: {}", raw)))?,
                None => today,
            };
            show(ctx, &path, date, today).await
        }
        Commands::Menu { action } => {
            ctx.require_user()?;
            run_menu(ctx, action, confirm).await
        }
        Commands::Category { action } => {
            ctx.require_user()?;
            run_category(ctx, action, confirm).await
        }
        Commands::User { action } => {
            ctx.require_user()?;
            run_user(ctx, action, confirm).await
        }
        Commands::Payment {
            action: PaymentCommand::Create(args),
        } => {
            ctx.require_user()?;
            let payment = payments::create(ctx, &PaymentForm::from(args)).await?;
            Ok(format!("Zapisano płatność #{}", payment.id))
        }
    }
}

/// Render `path` behind the route guard, following redirects
pub async fn show<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    path: &str,
    date: NaiveDate,
    today: NaiveDate,
) -> PanelResult<String> {
    let user = ctx.user();
    let mut path = path.to_string();
    for _ in 0..MAX_REDIRECTS {
        match guard(&path, user.as_ref()) {
            Navigation::Redirect(next) => {
                tracing::debug!(from = %path, to = %next, "Redirect");
                path = next;
            }
            Navigation::Render(route) => {
                let body = render_route(ctx, &route, date, today).await;
                return Ok(match &user {
                    Some(u) if route.requires_auth() => {
                        format!("{}\n{}", render_nav(&nav_items(u), &u.username), body)
                    }
                    _ => body,
                });
            }
        }
    }
    Err(PanelError::UnknownPage(path))
}

async fn render_route<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    route: &Route,
    date: NaiveDate,
    today: NaiveDate,
) -> String {
    match route {
        Route::Login => render_login(),
        Route::Dashboard => dashboard::load(ctx).await.render(),
        Route::Orders => orders::load(ctx).await.render(),
        Route::CompletedOrders => orders::load_completed(ctx, date, today).await.render(),
        Route::OrderDetails(id) => orders::load_details(ctx, id).await.render(),
        Route::Menu => menu::load(ctx).await.render(),
        Route::MenuNew => menu::load_form(ctx, None).await.render(),
        Route::MenuEdit(id) => menu::load_form(ctx, Some(*id)).await.render(),
        Route::Categories => categories::load(ctx).await.render(),
        Route::CategoryNew => categories::load_form(ctx, None).await.render(),
        Route::CategoryEdit(id) => categories::load_form(ctx, Some(*id)).await.render(),
        Route::Stats => stats::load(ctx).await.render(),
        Route::Users => users::load(ctx).await.render(),
        Route::UserNew => users::load_form(ctx, None).await.render(),
        Route::UserEdit(id) => users::load_form(ctx, Some(*id)).await.render(),
        Route::Payments => payments::load(ctx).await.render(),
        Route::PaymentNew => PaymentForm::default().render(),
        Route::PaymentDetails(id) => payments::load_details(ctx, *id).await.render(),
        Route::PaymentStats => payments::load_stats(ctx, date).await.render(),
    }
}

/// Open a confirmation for `id`, then delete or cancel
async fn delete_with_confirmation<F, Fut>(
    id: i64,
    yes: bool,
    prompt: String,
    confirm: &mut dyn FnMut(&str) -> bool,
    delete: F,
) -> PanelResult<String>
where
    F: FnOnce(ConfirmDelete<i64>) -> Fut,
    Fut: Future<Output = PanelResult<bool>>,
{
    let mut dialog = ConfirmDelete::new();
    dialog.request(id);
    if !yes && !confirm(&prompt) {
        dialog.cancel();
    }
    if delete(dialog).await? {
        Ok(format!("Usunięto #{}", id))
    } else {
        Ok("Anulowano".to_string())
    }
}

async fn run_menu<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    action: MenuCommand,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> PanelResult<String> {
    match action {
        MenuCommand::Block { id } | MenuCommand::Unblock { id } => {
            let block = matches!(action, MenuCommand::Block { .. });
            let item = loaded(ctx.menu_item(id).await)?;
            if item.is_available != block {
                return Ok(format!(
                    "Pozycja #{} jest już {}",
                    id,
                    crate::render::availability_label(item.is_available).to_lowercase()
                ));
            }
            menu::toggle_availability(ctx, &item).await?;
            Ok(format!(
                "Pozycja #{}: {}",
                id,
                crate::render::availability_label(!block)
            ))
        }
        MenuCommand::Delete { id, yes } => {
            delete_with_confirmation(
                id,
                yes,
                format!("Usunąć pozycję menu #{}?", id),
                confirm,
                |mut dialog| async move { menu::confirm_delete(ctx, &mut dialog).await },
            )
            .await
        }
        MenuCommand::Create(args) => {
            let mut form = MenuItemForm::default();
            args.apply(&mut form);
            let item = menu::save(ctx, None, &form).await?;
            Ok(format!("Zapisano pozycję #{}", item.id))
        }
        MenuCommand::Update { id, args } => {
            let current = loaded(ctx.menu_item(id).await)?;
            let mut form = MenuItemForm::from_item(&current);
            args.apply(&mut form);
            let item = menu::save(ctx, Some(id), &form).await?;
            Ok(format!("Zapisano pozycję #{}", item.id))
        }
    }
}

async fn run_category<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    action: CategoryCommand,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> PanelResult<String> {
    match action {
        CategoryCommand::Create(args) => {
            let mut form = CategoryForm::default();
            args.apply(&mut form);
            let category = categories::save(ctx, None, &form).await?;
            Ok(format!("Zapisano kategorię #{}", category.id))
        }
        CategoryCommand::Update { id, args } => {
            let list = loaded(ctx.categories().await)?;
            let mut form = CategoryForm::from_category(categories::find(&list, id)?);
            args.apply(&mut form);
            let category = categories::save(ctx, Some(id), &form).await?;
            Ok(format!("Zapisano kategorię #{}", category.id))
        }
        CategoryCommand::Delete { id, yes } => {
            delete_with_confirmation(
                id,
                yes,
                format!("Usunąć kategorię #{}?", id),
                confirm,
                |mut dialog| async move { categories::confirm_delete(ctx, &mut dialog).await },
            )
            .await
        }
    }
}

async fn run_user<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    action: UserCommand,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> PanelResult<String> {
    match action {
        UserCommand::Create(args) => {
            let mut form = UserForm::default();
            args.apply(&mut form);
            let user = users::save(ctx, None, &form).await?;
            Ok(format!("Zapisano użytkownika #{}", user.id))
        }
        UserCommand::Update { id, args } => {
            let list = loaded(ctx.users().await)?;
            let mut form = UserForm::from_user(users::find(&list, id)?);
            args.apply(&mut form);
            let user = users::save(ctx, Some(id), &form).await?;
            Ok(format!("Zapisano użytkownika #{}", user.id))
        }
        UserCommand::Delete { id, yes } => {
            delete_with_confirmation(
                id,
                yes,
                format!("Usunąć użytkownika #{}?", id),
                confirm,
                |mut dialog| async move { users::confirm_delete(ctx, &mut dialog).await },
            )
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["panel", "show", "/payments/stats", "--date", "2025-01-10"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Show { ref path, date: Some(ref d) } if path == "/payments/stats" && d == "2025-01-10"
        ));

        let cli = Cli::try_parse_from(["panel", "--url", "http://x", "menu", "delete", "4", "--yes"])
            .unwrap();
        assert_eq!(cli.url.as_deref(), Some("http://x"));
        assert!(matches!(
            cli.command,
            Commands::Menu {
                action: MenuCommand::Delete { id: 4, yes: true }
            }
        ));
    }

    #[test]
    fn test_update_overlays_only_given_fields() {
        let mut form = UserForm {
            username: "ola".into(),
            password: String::new(),
            role: "manager".into(),
        };
        UserArgs {
            role: Some("admin".into()),
            ..Default::default()
        }
        .apply(&mut form);
        assert_eq!(form.username, "ola");
        assert_eq!(form.role, "admin");
        assert!(form.password.is_empty());
    }
}
