//! Money and date helpers
//!
//! All monetary fields travel as integer grosz. They are only turned
//! into a decimal amount for display and aggregation.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Date format used in query strings and by the date picker
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert grosz to a decimal PLN amount
///
/// ```
/// use shared::util::cents_to_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(cents_to_amount(2500), Decimal::new(2500, 2));
/// ```
pub fn cents_to_amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Format a decimal amount with two fraction digits and the currency suffix
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2} PLN", amount.round_dp(2))
}

/// Format grosz as `"25.00 PLN"`
pub fn format_pln(cents: i64) -> String {
    format_amount(cents_to_amount(cents))
}

/// Format grosz without the currency suffix (menu table column)
pub fn format_price(cents: i64) -> String {
    format!("{:.2}", cents_to_amount(cents))
}

/// The day after `date`, used as an exclusive upper bound
pub fn next_day(date: NaiveDate) -> NaiveDate {
    date + Duration::days(1)
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 as well as naive ISO-8601 (`2025-01-10T12:30:00`,
/// optionally with fractional seconds), which is what the backend emits.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

/// `YYYY-MM-DD HH:mm`, or `-` when missing or unparsable
pub fn format_timestamp(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pln() {
        assert_eq!(format_pln(2500), "25.00 PLN");
        assert_eq!(format_pln(1), "0.01 PLN");
        assert_eq!(format_pln(0), "0.00 PLN");
        assert_eq!(format_price(1999), "19.99");
    }

    #[test]
    fn test_next_day_crosses_month_and_year() {
        let d = parse_date("2025-01-31").unwrap();
        assert_eq!(next_day(d).to_string(), "2025-02-01");
        let d = parse_date("2024-12-31").unwrap();
        assert_eq!(next_day(d).to_string(), "2025-01-01");
        let d = parse_date("2024-02-28").unwrap();
        assert_eq!(next_day(d).to_string(), "2024-02-29");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(Some("2025-01-10T08:05:00")),
            "2025-01-10 08:05"
        );
        assert_eq!(
            format_timestamp(Some("2025-01-10T08:05:00.123456")),
            "2025-01-10 08:05"
        );
        assert_eq!(
            format_timestamp(Some("2025-01-10T08:05:00+01:00")),
            "2025-01-10 08:05"
        );
        assert_eq!(format_timestamp(Some("wczoraj")), "-");
        assert_eq!(format_timestamp(None), "-");
    }
}
