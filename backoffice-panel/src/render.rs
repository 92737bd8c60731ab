//! Plain-text rendering of page views
//!
//! Amounts are shown as `12.50 PLN`, timestamps as `YYYY-MM-DD HH:mm`,
//! missing values as `-`.

use std::fmt::Write as _;
use std::sync::Arc;

use shared::models::{MenuCategory, Payment, UserRole};
use shared::report::display_max;
use shared::util::{DATE_FORMAT, format_amount, format_pln, format_price, format_timestamp};

use crate::pages::Page;
use crate::pages::categories::{CategoriesView, CategoryFormView};
use crate::pages::dashboard::DashboardView;
use crate::pages::menu::{MenuFormView, MenuView};
use crate::pages::orders::{CompletedOrdersView, OrderDetailsView, OrdersView};
use crate::pages::payments::{PaymentForm, PaymentStatsView, PaymentsView};
use crate::pages::stats::StatsView;
use crate::pages::users::{UserFormView, UsersView, role_label};
use crate::routes::NavItem;

pub const LOADING: &str = "Ładowanie...";
const MISSING: &str = "-";

/// Text shown for a page
pub trait Render {
    fn render(&self) -> String;
}

impl<T: Render> Render for Page<T> {
    fn render(&self) -> String {
        match self {
            Page::Loading => LOADING.to_string(),
            Page::Error(message) => format!("Błąd: {}", message),
            Page::Ready(view) => view.render(),
        }
    }
}

impl<T: Render> Render for Arc<T> {
    fn render(&self) -> String {
        self.as_ref().render()
    }
}

// =============================================================================
// Text layout
// =============================================================================

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, to: usize) -> String {
    let mut out = s.to_string();
    out.extend(std::iter::repeat_n(' ', to.saturating_sub(width(s))));
    out
}

fn or_missing(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => MISSING,
    }
}

/// Column-aligned table with a header rule
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    empty: Option<&'static str>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Line shown instead of rows when there are none
    pub fn empty(mut self, text: &'static str) -> Self {
        self.empty = Some(text);
        self
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(width(cell)),
                    None => widths.push(width(cell)),
                }
            }
        }
        widths
    }

    fn line(cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| pad(cells.get(i).map(String::as_str).unwrap_or(""), *w))
            .collect();
        padded.join("  ").trim_end().to_string()
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let widths = self.widths();
        writeln!(f, "{}", Self::line(&self.headers, &widths))?;
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(f, "{}", "-".repeat(total))?;
        if self.rows.is_empty()
            && let Some(empty) = self.empty
        {
            writeln!(f, "{}", empty)?;
        }
        for row in &self.rows {
            writeln!(f, "{}", Self::line(row, &widths))?;
        }
        Ok(())
    }
}

/// Heading, body sections and `label: value` lines
#[derive(Debug, Default)]
struct TextBuilder {
    out: String,
}

impl TextBuilder {
    fn title(&mut self, s: &str) -> &mut Self {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        self.out.push_str(s);
        self.out.push('\n');
        self.out.push_str(&"=".repeat(width(s)));
        self.out.push('\n');
        self
    }

    fn line(&mut self, s: &str) -> &mut Self {
        self.out.push_str(s);
        self.out.push('\n');
        self
    }

    fn field(&mut self, label: &str, value: impl std::fmt::Display) -> &mut Self {
        let _ = writeln!(self.out, "{}: {}", label, value);
        self
    }

    fn table(&mut self, table: &Table) -> &mut Self {
        let _ = write!(self.out, "{}", table);
        self
    }

    fn finish(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

// =============================================================================
// Labels
// =============================================================================

pub fn availability_label(is_available: bool) -> &'static str {
    if is_available { "Dostępna" } else { "Zablokowana" }
}

/// Action offered for an item in the given state
pub fn availability_action(is_available: bool) -> &'static str {
    if is_available { "Zablokuj" } else { "Odblokuj" }
}

fn wait_label(minutes: Option<i64>) -> String {
    minutes
        .map(|m| format!("{} min", m))
        .unwrap_or_else(|| MISSING.to_string())
}

// =============================================================================
// Pages
// =============================================================================

/// Top navigation bar
pub fn render_nav(items: &[NavItem], username: &str) -> String {
    let links: Vec<String> = items
        .iter()
        .map(|i| format!("{} ({})", i.label, i.path))
        .collect();
    format!("[{}] {}\n", username, links.join(" | "))
}

pub fn render_login() -> String {
    TextBuilder::default()
        .title("Logowanie")
        .line("Zaloguj się: panel login <login> <hasło>")
        .finish()
}

impl Render for DashboardView {
    fn render(&self) -> String {
        let mut b = TextBuilder::default();
        b.title("Oczekujące zamówienia");
        b.table(&orders_table(&self.pending));
        b.title("Ilość zrealizowanych zamówień (dzisiaj)");
        for stat in self.terminals.iter() {
            b.field(&stat.terminal_name, stat.orders_done);
        }
        b.title("Bestsellery (dzisiaj)");
        for item in self.bestsellers.iter() {
            b.field(&item.name, item.total);
        }
        b.finish()
    }
}

fn orders_table(orders: &[shared::models::Order]) -> Table {
    let mut table =
        Table::new(["ID", "Numer zamówienia", "Status", "Typ", "Utworzone"]).empty("Brak zamówień");
    for order in orders {
        table.row([
            order.id.to_string(),
            order.order_number.clone(),
            order.status.to_string(),
            or_missing(Some(&order.order_type)).to_string(),
            format_timestamp(Some(&order.created_at)),
        ]);
    }
    table
}

impl Render for OrdersView {
    fn render(&self) -> String {
        TextBuilder::default()
            .title("Zamówienia oczekujące")
            .table(&orders_table(&self.orders))
            .finish()
    }
}

impl Render for CompletedOrdersView {
    fn render(&self) -> String {
        let day = if self.is_today {
            "dzisiaj".to_string()
        } else {
            self.date.format(DATE_FORMAT).to_string()
        };
        let mut table = Table::new([
            "Numer zamówienia",
            "Data zam.",
            "Status",
            "Data wydania",
            "Czas oczekiwania klienta",
        ])
        .empty("Brak zamówień");
        for row in &self.rows {
            table.row([
                row.order.order_number.clone(),
                format_timestamp(Some(&row.order.created_at)),
                row.order.status.to_string(),
                format_timestamp(row.order.ready_at.as_deref()),
                wait_label(row.wait_minutes),
            ]);
        }
        TextBuilder::default()
            .title(&format!("Zamówienia zrealizowane {}", day))
            .table(&table)
            .finish()
    }
}

impl Render for OrderDetailsView {
    fn render(&self) -> String {
        let order = &self.order;
        let mut b = TextBuilder::default();
        b.title(&format!("Szczegóły zamówienia #{}", order.order_number))
            .field("Status", &order.status)
            .field("Typ", or_missing(Some(&order.order_type)))
            .field("Data złożenia", format_timestamp(Some(&order.created_at)))
            .field(
                "Data przyjęcia w kuchni",
                format_timestamp(order.accepted_at.as_deref()),
            )
            .field("Data wydania", format_timestamp(order.ready_at.as_deref()))
            .field("Czas oczekiwania klienta", wait_label(order.wait_minutes()));

        let mut items = Table::new(["Pozycja", "Ilość"]).empty("Brak pozycji");
        for line in &self.lines {
            items.row([line.name.clone(), line.quantity.to_string()]);
        }
        b.title("Produkty").table(&items);

        if let Some(events) = &self.events {
            let mut history =
                Table::new(["Czas", "Zdarzenie", "Nowy status", "Terminal"]).empty("Brak zdarzeń");
            for event in events.iter() {
                history.row([
                    format_timestamp(Some(&event.timestamp)),
                    event.event_type.clone(),
                    or_missing(event.new_status.as_deref()).to_string(),
                    or_missing(event.terminal_name.as_deref()).to_string(),
                ]);
            }
            b.title("Historia").table(&history);
        }
        b.finish()
    }
}

impl Render for MenuView {
    fn render(&self) -> String {
        let mut table = Table::new(["ID", "Nazwa", "Kategoria", "Cena (PLN)", "Dostępność", ""])
            .empty("Brak pozycji");
        for row in &self.rows {
            table.row([
                row.item.id.to_string(),
                row.item.name_pl.clone(),
                row.category.clone(),
                format_price(row.item.price_cents),
                availability_label(row.item.is_available).to_string(),
                availability_action(row.item.is_available).to_string(),
            ]);
        }
        TextBuilder::default()
            .title("Menu restauracji")
            .table(&table)
            .finish()
    }
}

impl Render for MenuFormView {
    fn render(&self) -> String {
        let form = &self.form;
        let title = match self.editing {
            Some(id) => format!("Edycja pozycji #{}", id),
            None => "Dodaj pozycję".to_string(),
        };
        let category = form
            .category_id
            .parse::<i64>()
            .ok()
            .map(|id| shared::models::category_name(&self.categories, id).to_string())
            .unwrap_or_else(|| MISSING.to_string());
        let mut b = TextBuilder::default();
        b.title(&title)
            .field("Kategoria", category)
            .field("Nazwa (PL)", or_missing(Some(&form.name_pl)))
            .field("Nazwa (EN)", or_missing(Some(&form.name_en)))
            .field("Cena (gr)", or_missing(Some(&form.price_cents)))
            .field("Obrazek", or_missing(Some(&form.image_url)));
        if let Some(available) = form.is_available {
            b.field("Dostępność", availability_label(available));
        }
        b.title("Kategorie").table(&categories_table(&self.categories));
        b.finish()
    }
}

fn categories_table(categories: &[MenuCategory]) -> Table {
    let mut table = Table::new(["ID", "Nazwa (PL)", "Nazwa (EN)", "Obrazek"]).empty("Brak kategorii");
    for cat in categories {
        table.row([
            cat.id.to_string(),
            cat.name_pl.clone(),
            or_missing(Some(&cat.name_en)).to_string(),
            or_missing(Some(&cat.image_url)).to_string(),
        ]);
    }
    table
}

impl Render for CategoriesView {
    fn render(&self) -> String {
        TextBuilder::default()
            .title("Kategorie produktów")
            .table(&categories_table(&self.categories))
            .finish()
    }
}

impl Render for CategoryFormView {
    fn render(&self) -> String {
        let title = match self.editing {
            Some(id) => format!("Edycja kategorii #{}", id),
            None => "Dodaj kategorię".to_string(),
        };
        TextBuilder::default()
            .title(&title)
            .field("Nazwa (PL)", or_missing(Some(&self.form.name_pl)))
            .field("Nazwa (EN)", or_missing(Some(&self.form.name_en)))
            .field("Obrazek", or_missing(Some(&self.form.image_url)))
            .finish()
    }
}

impl Render for StatsView {
    fn render(&self) -> String {
        let mut terminals = Table::new(["Terminal", "Zamówienia"]).empty("Brak danych");
        for stat in self.terminals.iter() {
            terminals.row([stat.terminal_name.clone(), stat.orders_done.to_string()]);
        }
        let mut best = Table::new(["Produkt", "Sprzedano"]).empty("Brak danych");
        for item in self.bestsellers.iter() {
            best.row([item.name.clone(), item.total.to_string()]);
        }
        TextBuilder::default()
            .title("Liczba zamówień zrealizowanych dzisiaj (terminale)")
            .table(&terminals)
            .title("Najlepiej sprzedające się produkty (dzisiaj)")
            .table(&best)
            .finish()
    }
}

impl Render for UsersView {
    fn render(&self) -> String {
        let mut table = Table::new(["ID", "Login", "Rola"]).empty("Brak użytkowników");
        for user in self.users.iter() {
            table.row([
                user.id.to_string(),
                user.username.clone(),
                or_missing(Some(role_label(&user.role))).to_string(),
            ]);
        }
        TextBuilder::default()
            .title("Użytkownicy")
            .table(&table)
            .finish()
    }
}

impl Render for UserFormView {
    fn render(&self) -> String {
        let title = match self.editing {
            Some(id) => format!("Edycja użytkownika #{}", id),
            None => "Dodaj użytkownika".to_string(),
        };
        let roles: Vec<String> = UserRole::ALL
            .iter()
            .map(|r| format!("{} ({})", r.label(), r.as_str()))
            .collect();
        TextBuilder::default()
            .title(&title)
            .field("Login", or_missing(Some(&self.form.username)))
            .field("Rola", role_label(&self.form.role))
            .field("Dostępne role", roles.join(", "))
            .finish()
    }
}

impl Render for PaymentsView {
    fn render(&self) -> String {
        let mut table = Table::new(["ID", "Numer zamówienia", "Kwota", "Status", "Data", "Terminal", "Opis"])
            .empty("Brak płatności");
        for p in self.payments.iter() {
            table.row([
                p.id.to_string(),
                p.order_number.to_string(),
                format_pln(p.amount_cents),
                p.status.to_string(),
                format_timestamp(Some(&p.created_at)),
                p.hostname.clone(),
                or_missing(p.description.as_deref()).to_string(),
            ]);
        }
        TextBuilder::default()
            .title("Płatności")
            .table(&table)
            .finish()
    }
}

impl Render for PaymentForm {
    fn render(&self) -> String {
        TextBuilder::default()
            .title("Dodaj płatność")
            .field("Numer zamówienia", or_missing(Some(&self.order_number)))
            .field("Kwota (gr)", or_missing(Some(&self.amount_cents)))
            .field("Terminal", or_missing(Some(&self.hostname)))
            .field("Status", or_missing(Some(&self.status)))
            .field("Opis", or_missing(Some(&self.description)))
            .field("Terminal log", or_missing(Some(&self.terminal_log)))
            .finish()
    }
}

impl Render for Payment {
    fn render(&self) -> String {
        TextBuilder::default()
            .title(&format!("Szczegóły płatności #{}", self.id))
            .field("Kwota", format_pln(self.amount_cents))
            .field("Status", &self.status)
            .field("Numer zamówienia", self.order_number)
            .field("Terminal", &self.hostname)
            .field("Opis", or_missing(self.description.as_deref()))
            .field("Terminal log", or_missing(self.terminal_log.as_deref()))
            .field("Data utworzenia", format_timestamp(Some(&self.created_at)))
            .finish()
    }
}

impl Render for PaymentStatsView {
    fn render(&self) -> String {
        let s = &self.summary;
        let mut b = TextBuilder::default();
        b.title(&format!(
            "Statystyki płatności {}",
            self.date.format(DATE_FORMAT)
        ))
        .field("Liczba płatności", s.count)
        .field("Suma", format_amount(s.sum))
        .field("Średnia", format_amount(s.average))
        .field("Największa", display_max(s.max))
        .field("Płatności od 100 PLN", self.large_count)
        .field("Suma w miesiącu", format_amount(self.month_total));

        let mut by_status = Table::new(["Status", "Liczba", "Kwota"]).empty("Brak płatności");
        for (status, (count, amount)) in &self.by_status {
            by_status.row([status.to_string(), count.to_string(), format_amount(*amount)]);
        }
        b.title("Według statusu").table(&by_status);

        let mut by_terminal = Table::new(["Terminal", "Liczba", "Kwota"]).empty("Brak płatności");
        for (terminal, (count, amount)) in &self.by_terminal {
            by_terminal.row([terminal.clone(), count.to_string(), format_amount(*amount)]);
        }
        b.title("Według terminala").table(&by_terminal);

        let mut by_month = Table::new(["Miesiąc", "Kwota"]).empty("Brak płatności");
        for (month, amount) in &self.by_month {
            by_month.row([month.clone(), format_amount(*amount)]);
        }
        b.title("Według miesiąca").table(&by_month);
        b.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::menu::MenuRow;
    use shared::models::MenuItem;

    #[test]
    fn test_table_alignment() {
        let mut table = Table::new(["ID", "Nazwa"]);
        table.row(["1", "Żurek"]).row(["10", "Pierogi ruskie"]);
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "ID  Nazwa");
        assert_eq!(lines[1], "-".repeat(2 + 2 + 14));
        assert_eq!(lines[2], "1   Żurek");
        assert_eq!(lines[3], "10  Pierogi ruskie");
    }

    #[test]
    fn test_empty_table_placeholder() {
        let table = Table::new(["ID"]).empty("Brak płatności");
        assert!(table.to_string().ends_with("Brak płatności\n"));
    }

    #[test]
    fn test_page_states() {
        assert_eq!(Page::<PaymentsView>::Loading.render(), "Ładowanie...");
        assert_eq!(
            Page::<PaymentsView>::Error("Brak dostępu".into()).render(),
            "Błąd: Brak dostępu"
        );
    }

    #[test]
    fn test_menu_availability_labels() {
        let item = MenuItem {
            id: 3,
            category_id: 9,
            name_pl: "Lemoniada".into(),
            name_en: None,
            price_cents: 1250,
            image_url: None,
            is_available: false,
            ingredients: None,
        };
        let view = MenuView {
            rows: vec![MenuRow {
                item,
                category: "-".into(),
            }],
        };
        let text = view.render();
        assert!(text.contains("12.50"));
        assert!(text.contains("Zablokowana"));
        assert!(text.contains("Odblokuj"));
    }

    #[test]
    fn test_payment_missing_fields() {
        let payment = Payment {
            id: 7,
            order_number: 102,
            amount_cents: 1250,
            status: shared::models::PaymentStatus::Completed,
            hostname: "kiosk-1".into(),
            description: None,
            terminal_log: Some(String::new()),
            created_at: "2025-01-10T12:30:00".into(),
        };
        let text = payment.render();
        assert!(text.contains("Kwota: 12.50 PLN"));
        assert!(text.contains("Opis: -"));
        assert!(text.contains("Terminal log: -"));
        assert!(text.contains("Data utworzenia: 2025-01-10 12:30"));
    }
}
