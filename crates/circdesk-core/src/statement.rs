//! Patron statements.

use crate::borrowing::Borrowing;
use crate::item::Category;
use chrono::NaiveDate;
use serde::Serialize;

/// A patron's active borrowings as of a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    pub patron_id: String,
    pub date: NaiveDate,
    pub lines: Vec<StatementLine>,
}

impl Statement {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of the fees owed if everything were returned on the statement date.
    #[must_use]
    pub fn total_fees(&self) -> u64 {
        self.lines.iter().map(|l| l.fee_if_returned_today).sum()
    }
}

/// One borrowing on a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementLine {
    pub item_id: String,
    pub title: String,
    pub category: Category,
    pub checkout_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Set only when the item is overdue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_overdue: Option<i64>,
    pub fee_if_returned_today: u64,
}

impl StatementLine {
    pub(crate) fn new(borrowing: &Borrowing, days_overdue: Option<i64>, fee: u64) -> Self {
        let item = borrowing.item();
        Self {
            item_id: item.id.clone(),
            title: item.title.clone(),
            category: item.category,
            checkout_date: borrowing.checkout_date(),
            due_date: borrowing.due_date(),
            days_overdue,
            fee_if_returned_today: fee,
        }
    }
}
