//! Borrowing records.

use crate::clock::Clock;
use crate::item::Item;
use crate::policy::LoanPolicy;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The person borrowing an item. The borrowing limit is keyed on `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patron {
    /// Library card number.
    pub id: String,
    pub name: String,
    pub email: String,
}

impl Patron {
    /// Create a new patron.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// An active checkout of one item by one patron.
///
/// Only [`crate::Library::checkout`] creates these. The due date is derived
/// from the checkout date and the item category every time it is asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Borrowing {
    item: Arc<Item>,
    patron: Patron,
    checkout_date: NaiveDate,
}

impl Borrowing {
    pub(crate) const fn new(item: Arc<Item>, patron: Patron, checkout_date: NaiveDate) -> Self {
        Self {
            item,
            patron,
            checkout_date,
        }
    }

    /// The borrowed item.
    #[must_use]
    pub fn item(&self) -> &Item {
        &self.item
    }

    /// Who borrowed it.
    #[must_use]
    pub const fn patron(&self) -> &Patron {
        &self.patron
    }

    #[must_use]
    pub const fn checkout_date(&self) -> NaiveDate {
        self.checkout_date
    }

    /// Lending rules that apply to this borrowing.
    #[must_use]
    pub fn policy(&self) -> LoanPolicy {
        LoanPolicy::for_category(self.item.category)
    }

    /// Checkout date plus the category's loan period.
    #[must_use]
    pub fn due_date(&self) -> NaiveDate {
        self.checkout_date
            .checked_add_days(Days::new(u64::from(self.policy().loan_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whole days between the due date and `today`; zero or negative when not late.
    #[must_use]
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        today.signed_duration_since(self.due_date()).num_days()
    }

    /// One-line summary, flagged `[OVERDUE]` once the due date has passed.
    #[must_use]
    pub fn describe(&self, clock: &impl Clock) -> String {
        let due = self.due_date();
        let overdue = if due < clock.today() { " [OVERDUE]" } else { "" };
        format!(
            "Item {} checked out {} due {}{overdue}",
            self.item.id, self.checkout_date, due
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::item::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn borrowing(category: Category, checkout: NaiveDate) -> Borrowing {
        Borrowing::new(
            Arc::new(Item::new("X1", "Sample", category)),
            Patron::new("1234", "Edward Snowden", "snowden@protonmail.com"),
            checkout,
        )
    }

    #[test]
    fn test_due_date_offsets() {
        let checkout = date(2024, 1, 1);
        for (category, days) in [
            (Category::Book, 14),
            (Category::Audio, 7),
            (Category::Video, 5),
        ] {
            let b = borrowing(category, checkout);
            assert_eq!(b.due_date().signed_duration_since(checkout).num_days(), days);
        }
    }

    #[test]
    fn test_due_date_crosses_month() {
        let b = borrowing(Category::Book, date(2024, 2, 20));
        assert_eq!(b.due_date(), date(2024, 3, 5));
    }

    #[test]
    fn test_days_overdue() {
        let b = borrowing(Category::Video, date(2024, 1, 1));
        assert_eq!(b.days_overdue(date(2024, 1, 4)), -2);
        assert_eq!(b.days_overdue(date(2024, 1, 6)), 0);
        assert_eq!(b.days_overdue(date(2024, 1, 9)), 3);
    }

    #[test]
    fn test_describe() {
        let b = borrowing(Category::Book, date(2024, 1, 1));

        let clock = ManualClock::new(date(2024, 1, 15));
        assert_eq!(b.describe(&clock), "Item X1 checked out 2024-01-01 due 2024-01-15");

        let clock = ManualClock::new(date(2024, 1, 16));
        assert_eq!(
            b.describe(&clock),
            "Item X1 checked out 2024-01-01 due 2024-01-15 [OVERDUE]"
        );
    }
}
