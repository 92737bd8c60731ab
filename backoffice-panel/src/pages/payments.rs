//! Payments: list, details, manual entry and day statistics

use std::collections::BTreeMap;
use std::sync::Arc;

use backoffice_client::{HttpClient, Mutation};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{Payment, PaymentCreate, PaymentStatus};
use shared::report::{self, PaymentSummary};

use super::{Page, PageData, data, parse_count, parse_id, required};
use crate::context::{AppContext, keys};
use crate::error::{PanelError, PanelResult};

/// Payments at or above this amount are counted separately on the
/// statistics page (100.00 PLN)
pub const LARGE_PAYMENT_CENTS: i64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentsView {
    pub payments: Arc<Vec<Payment>>,
}

pub async fn load<H: HttpClient + 'static>(ctx: &AppContext<H>) -> Page<PaymentsView> {
    let payments = ctx.payments().await;
    if let Some(page) = PageData::of(&[&payments]).unsettled() {
        return page;
    }
    data(&payments)
        .map(|payments| Page::Ready(PaymentsView { payments }))
        .unwrap_or(Page::Loading)
}

pub async fn load_details<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    id: i64,
) -> Page<Arc<Payment>> {
    let payment = ctx.payment(id).await;
    if let Some(page) = PageData::of(&[&payment]).unsettled() {
        return page;
    }
    data(&payment).map(Page::Ready).unwrap_or(Page::Loading)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentForm {
    pub order_number: String,
    /// Amount in grosz
    pub amount_cents: String,
    pub hostname: String,
    pub status: String,
    pub description: String,
    pub terminal_log: String,
}

impl Default for PaymentForm {
    fn default() -> Self {
        Self {
            order_number: String::new(),
            amount_cents: String::new(),
            hostname: String::new(),
            status: PaymentStatus::Pending.as_str().to_string(),
            description: String::new(),
            terminal_log: String::new(),
        }
    }
}

impl PaymentForm {
    pub fn validate(&self) -> PanelResult<PaymentCreate> {
        let amount_cents = parse_count("Kwota (gr)", &self.amount_cents)?;
        if amount_cents == 0 {
            return Err(PanelError::validation("Kwota musi być większa od zera"));
        }
        Ok(PaymentCreate {
            hostname: required("Terminal", &self.hostname)?,
            order_number: parse_id("Numer zamówienia", &self.order_number)?,
            amount_cents,
            status: PaymentStatus::from(required("Status", &self.status)?),
            terminal_log: self.terminal_log.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

pub async fn create<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    form: &PaymentForm,
) -> PanelResult<Payment> {
    let payload = form.validate()?;
    let mut mutation = Mutation::new().invalidates(keys::payments());
    let created = mutation
        .run(ctx.cache(), ctx.api().create_payment(&payload))
        .await?;
    tracing::info!(id = created.id, order = created.order_number, "Payment recorded");
    Ok(created.clone())
}

/// Day summary plus breakdowns for the statistics view
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentStatsView {
    pub date: NaiveDate,
    pub summary: PaymentSummary,
    pub large_count: usize,
    pub by_status: BTreeMap<PaymentStatus, (usize, Decimal)>,
    pub by_terminal: BTreeMap<String, (usize, Decimal)>,
    /// Month of `date`, over all payments
    pub month_total: Decimal,
    pub by_month: BTreeMap<String, Decimal>,
}

impl PaymentStatsView {
    pub fn build(date: NaiveDate, day: &[Payment], all: &[Payment]) -> Self {
        let month_key = date.format("%Y-%m").to_string();
        Self {
            date,
            summary: PaymentSummary::from_payments(day),
            large_count: report::count_at_or_above(day, LARGE_PAYMENT_CENTS),
            by_status: zip_groups(report::count_by_status(day), report::amount_by_status(day)),
            by_terminal: zip_groups(
                report::count_by_terminal(day),
                report::amount_by_terminal(day),
            ),
            month_total: report::sum_for_month(all, &month_key),
            by_month: report::amount_by_month(all),
        }
    }
}

fn zip_groups<K: Ord>(
    counts: BTreeMap<K, usize>,
    mut amounts: BTreeMap<K, Decimal>,
) -> BTreeMap<K, (usize, Decimal)> {
    counts
        .into_iter()
        .map(|(k, count)| {
            let amount = amounts.remove(&k).unwrap_or(Decimal::ZERO);
            (k, (count, amount))
        })
        .collect()
}

/// Statistics for the payments of `date`
pub async fn load_stats<H: HttpClient + 'static>(
    ctx: &AppContext<H>,
    date: NaiveDate,
) -> Page<PaymentStatsView> {
    let (day, all) = tokio::join!(ctx.payments_on(date), ctx.payments());
    if let Some(page) = PageData::of(&[&day, &all]).unsettled() {
        return page;
    }
    match (data(&day), data(&all)) {
        (Some(day), Some(all)) => Page::Ready(PaymentStatsView::build(date, &day, &all)),
        _ => Page::Loading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(cents: i64, status: &str, host: &str, created_at: &str) -> Payment {
        Payment {
            id: cents,
            order_number: 1,
            amount_cents: cents,
            status: PaymentStatus::from(status.to_string()),
            hostname: host.into(),
            description: None,
            terminal_log: None,
            created_at: created_at.into(),
        }
    }

    #[test]
    fn test_stats_view() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let day = vec![
            payment(12_000, "completed", "kiosk-1", "2025-01-10T10:00:00"),
            payment(500, "failed", "kiosk-1", "2025-01-10T11:00:00"),
        ];
        let mut all = day.clone();
        all.push(payment(700, "completed", "kiosk-2", "2025-01-02T09:00:00"));
        all.push(payment(900, "completed", "kiosk-2", "2024-12-31T09:00:00"));

        let view = PaymentStatsView::build(date, &day, &all);
        assert_eq!(view.summary.count, 2);
        assert_eq!(view.large_count, 1);
        assert_eq!(
            view.by_status[&PaymentStatus::Failed],
            (1, Decimal::new(500, 2))
        );
        assert_eq!(view.by_terminal["kiosk-1"], (2, Decimal::new(12_500, 2)));
        assert_eq!(view.month_total, Decimal::new(13_200, 2));
        assert_eq!(view.by_month.len(), 2);
    }

    #[test]
    fn test_stats_view_empty_day() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let view = PaymentStatsView::build(date, &[], &[]);
        assert_eq!(view.summary.sum, Decimal::ZERO);
        assert_eq!(view.large_count, 0);
        assert!(view.by_status.is_empty());
    }

    #[test]
    fn test_payment_form() {
        let form = PaymentForm {
            order_number: "104".into(),
            amount_cents: "1999".into(),
            hostname: "kiosk-3".into(),
            ..Default::default()
        };
        let payload = form.validate().unwrap();
        assert_eq!(payload.status, PaymentStatus::Pending);
        assert_eq!(payload.amount_cents, 1999);

        let zero = PaymentForm {
            amount_cents: "0".into(),
            ..form
        };
        assert!(zero.validate().is_err());
    }
}
