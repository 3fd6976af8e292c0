//! Monthly aggregation of transactions into an income/expense report.

use std::collections::HashMap;

use rusqlite::Connection;
use time::{Date, Month, OffsetDateTime};

use crate::{Error, category::CategoryKind};

/// Income and expense totals for one calendar month, with per-category sums.
///
/// Rebuilt from the store on every query, never cached.
#[derive(Debug, Default, PartialEq)]
pub struct MonthlySummary {
    /// Sum of all income-kind transaction amounts in the month.
    pub income_total: i64,
    /// Sum of all expense-kind transaction amounts in the month.
    pub expense_total: i64,
    /// Summed amount per category name.
    ///
    /// A name cannot normally appear under both kinds, but if it does the
    /// last row read wins rather than the sums being merged.
    pub category_totals: HashMap<String, i64>,
}

/// The half-open UTC window `[month start, next month start)` of the calendar
/// month containing `reference`.
///
/// Excluding the end instant rather than including a "last moment" avoids
/// double counting across month boundaries.
pub fn month_window(reference: Date) -> (OffsetDateTime, OffsetDateTime) {
    let start = reference.replace_day(1).unwrap();

    let end = match start.month() {
        Month::December => Date::from_calendar_date(start.year() + 1, Month::January, 1),
        month => Date::from_calendar_date(start.year(), month.next(), 1),
    }
    .unwrap();

    (start.midnight().assume_utc(), end.midnight().assume_utc())
}

/// Sum a user's transactions within the calendar month containing
/// `reference`, grouped by (kind, category name).
///
/// Transactions whose category has been deleted have no name to group under
/// and are left out, matching the name-based lookups elsewhere.
pub fn monthly_aggregate(
    user_id: &str,
    reference: Date,
    connection: &Connection,
) -> Result<MonthlySummary, Error> {
    let (start, end) = month_window(reference);

    let mut statement = connection.prepare(
        "SELECT t.kind, c.name, SUM(t.amount)
         FROM \"transaction\" t
         JOIN category c ON t.category_id = c.id
         WHERE t.user_id = ?1 AND t.created_at >= ?2 AND t.created_at < ?3
         GROUP BY t.kind, c.name;",
    )?;
    let mut rows = statement.query((user_id, start, end))?;

    let mut summary = MonthlySummary::default();

    while let Some(row) = rows.next()? {
        let kind: String = row.get(0)?;
        let name: String = row.get(1)?;
        let total: i64 = row.get(2)?;

        summary.category_totals.insert(name, total);
        if kind == CategoryKind::Income.as_str() {
            summary.income_total += total;
        } else {
            summary.expense_total += total;
        }
    }

    Ok(summary)
}
