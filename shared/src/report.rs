//! Payment statistics
//!
//! Pure aggregation over a list of payments that the backend has already
//! scoped (usually to one day). Every function is defined for the empty
//! list and returns zero there. Amounts come back as decimal PLN.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Payment, PaymentStatus};
use crate::util::{cents_to_amount, format_amount};

/// Σ amount_cents / 100
pub fn sum(payments: &[Payment]) -> Decimal {
    cents_to_amount(payments.iter().map(|p| p.amount_cents).sum())
}

/// Largest single payment, 0 for an empty list
pub fn max(payments: &[Payment]) -> Decimal {
    payments
        .iter()
        .map(|p| p.amount_cents)
        .max()
        .map(cents_to_amount)
        .unwrap_or(Decimal::ZERO)
}

/// `sum / count`, 0 for an empty list
pub fn average(payments: &[Payment]) -> Decimal {
    if payments.is_empty() {
        return Decimal::ZERO;
    }
    sum(payments) / Decimal::from(payments.len())
}

/// Sum of payments whose `created_at` starts with `month_key` (`YYYY-MM`).
///
/// Matching is a plain string prefix, so timestamps in any other format
/// simply do not match.
pub fn sum_for_month(payments: &[Payment], month_key: &str) -> Decimal {
    cents_to_amount(
        payments
            .iter()
            .filter(|p| p.created_at.starts_with(month_key))
            .map(|p| p.amount_cents)
            .sum(),
    )
}

/// Number of payments with `amount_cents >= threshold_cents`
pub fn count_at_or_above(payments: &[Payment], threshold_cents: i64) -> usize {
    payments
        .iter()
        .filter(|p| p.amount_cents >= threshold_cents)
        .count()
}

pub fn count_by_status(payments: &[Payment]) -> BTreeMap<PaymentStatus, usize> {
    count_by(payments, |p| Some(p.status.clone()))
}

pub fn amount_by_status(payments: &[Payment]) -> BTreeMap<PaymentStatus, Decimal> {
    amount_by(payments, |p| Some(p.status.clone()))
}

/// Payments per terminal (`hostname`)
pub fn count_by_terminal(payments: &[Payment]) -> BTreeMap<String, usize> {
    count_by(payments, |p| Some(p.hostname.clone()))
}

pub fn amount_by_terminal(payments: &[Payment]) -> BTreeMap<String, Decimal> {
    amount_by(payments, |p| Some(p.hostname.clone()))
}

/// Amount per `YYYY-MM-DD`; records with a shorter timestamp are skipped
pub fn amount_by_day(payments: &[Payment]) -> BTreeMap<String, Decimal> {
    amount_by(payments, |p| p.created_at.get(..10).map(str::to_string))
}

/// Amount per `YYYY-MM`; records with a shorter timestamp are skipped
pub fn amount_by_month(payments: &[Payment]) -> BTreeMap<String, Decimal> {
    amount_by(payments, |p| p.created_at.get(..7).map(str::to_string))
}

fn count_by<K: Ord>(
    payments: &[Payment],
    key: impl Fn(&Payment) -> Option<K>,
) -> BTreeMap<K, usize> {
    let mut groups = BTreeMap::new();
    for payment in payments {
        if let Some(k) = key(payment) {
            *groups.entry(k).or_insert(0) += 1;
        }
    }
    groups
}

fn amount_by<K: Ord>(
    payments: &[Payment],
    key: impl Fn(&Payment) -> Option<K>,
) -> BTreeMap<K, Decimal> {
    let mut cents: BTreeMap<K, i64> = BTreeMap::new();
    for payment in payments {
        if let Some(k) = key(payment) {
            *cents.entry(k).or_insert(0) += payment.amount_cents;
        }
    }
    cents
        .into_iter()
        .map(|(k, v)| (k, cents_to_amount(v)))
        .collect()
}

/// Headline numbers for one day of payments
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSummary {
    pub count: usize,
    pub sum: Decimal,
    pub max: Decimal,
    pub average: Decimal,
}

impl PaymentSummary {
    pub fn from_payments(payments: &[Payment]) -> Self {
        Self {
            count: payments.len(),
            sum: sum(payments),
            max: max(payments),
            average: average(payments),
        }
    }
}

/// A zero maximum is shown as `-`
pub fn display_max(value: Decimal) -> String {
    if value.is_zero() {
        "-".to_string()
    } else {
        format_amount(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(id: i64, cents: i64, status: &str, host: &str, created_at: &str) -> Payment {
        Payment {
            id,
            order_number: id,
            amount_cents: cents,
            status: PaymentStatus::from(status.to_string()),
            hostname: host.to_string(),
            description: None,
            terminal_log: None,
            created_at: created_at.to_string(),
        }
    }

    fn sample() -> Vec<Payment> {
        vec![
            payment(1, 2500, "completed", "kiosk-1", "2025-01-10T10:00:00"),
            payment(2, 1000, "completed", "kiosk-2", "2025-01-10T11:00:00"),
            payment(3, 999, "failed", "kiosk-1", "2025-01-11T12:00:00"),
            payment(4, 4001, "pending", "kiosk-1", "2025-02-01T09:00:00"),
        ]
    }

    #[test]
    fn test_empty_list_is_all_zero() {
        assert_eq!(sum(&[]), Decimal::ZERO);
        assert_eq!(max(&[]), Decimal::ZERO);
        assert_eq!(average(&[]), Decimal::ZERO);
        assert_eq!(sum_for_month(&[], "2025-01"), Decimal::ZERO);
        assert_eq!(count_at_or_above(&[], 0), 0);
        assert!(count_by_status(&[]).is_empty());
        assert!(amount_by_terminal(&[]).is_empty());
        assert_eq!(display_max(max(&[])), "-");
    }

    #[test]
    fn test_sum_max_average() {
        let p = sample();
        assert_eq!(sum(&p), Decimal::new(8500, 2));
        assert_eq!(max(&p), Decimal::new(4001, 2));
        assert_eq!(average(&p), Decimal::new(2125, 2));
        assert_eq!(display_max(max(&p)), "40.01 PLN");
    }

    #[test]
    fn test_average_times_count_matches_sum() {
        let p = vec![
            payment(1, 1000, "completed", "a", "2025-01-10"),
            payment(2, 1000, "completed", "a", "2025-01-10"),
            payment(3, 1001, "completed", "a", "2025-01-10"),
        ];
        let back = average(&p) * Decimal::from(p.len());
        let diff = (back - sum(&p)).abs();
        assert!(diff < Decimal::new(1, 10), "diff was {}", diff);
    }

    #[test]
    fn test_count_at_or_above_is_non_increasing() {
        let p = sample();
        assert_eq!(count_at_or_above(&p, 1000), 3);
        assert_eq!(count_at_or_above(&p, 1001), 2);
        let mut prev = usize::MAX;
        for t in (0..=5000).step_by(250) {
            let c = count_at_or_above(&p, t);
            assert!(c <= prev);
            prev = c;
        }
    }

    #[test]
    fn test_sum_for_month_uses_prefix() {
        let mut p = sample();
        p.push(payment(5, 700, "completed", "kiosk-3", "10/01/2025 12:00"));
        assert_eq!(sum_for_month(&p, "2025-01"), Decimal::new(4499, 2));
        assert_eq!(sum_for_month(&p, "2025-02"), Decimal::new(4001, 2));
        assert_eq!(sum_for_month(&p, "2024-12"), Decimal::ZERO);
    }

    #[test]
    fn test_groupings() {
        let p = sample();

        let by_status = count_by_status(&p);
        assert_eq!(by_status[&PaymentStatus::Completed], 2);
        assert_eq!(by_status[&PaymentStatus::Failed], 1);
        assert_eq!(by_status[&PaymentStatus::Pending], 1);

        let by_terminal = amount_by_terminal(&p);
        assert_eq!(by_terminal["kiosk-1"], Decimal::new(7500, 2));
        assert_eq!(by_terminal["kiosk-2"], Decimal::new(1000, 2));
        assert_eq!(count_by_terminal(&p)["kiosk-1"], 3);

        let by_day = amount_by_day(&p);
        assert_eq!(by_day.len(), 3);
        assert_eq!(by_day["2025-01-10"], Decimal::new(3500, 2));

        let by_month = amount_by_month(&p);
        assert_eq!(by_month["2025-01"], Decimal::new(4499, 2));
        assert_eq!(amount_by_status(&p)[&PaymentStatus::Failed], Decimal::new(999, 2));
    }

    #[test]
    fn test_summary() {
        let s = PaymentSummary::from_payments(&sample());
        assert_eq!(s.count, 4);
        assert_eq!(s.sum, Decimal::new(8500, 2));
        assert_eq!(PaymentSummary::from_payments(&[]).count, 0);
    }
}
