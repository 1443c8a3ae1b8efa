//! The circulation registry: checkout, return and late fees.

use crate::borrowing::{Borrowing, Patron};
use crate::clock::{Clock, SystemClock};
use crate::date::IntoDate;
use crate::error::{CoreError, Result};
use crate::item::Item;
use crate::policy::MAX_ACTIVE_BORROWINGS;
use crate::statement::{Statement, StatementLine};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Why a checkout did not go through.
///
/// These are ordinary desk outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum CheckoutRefusal {
    /// The item already has an active borrowing.
    AlreadyCheckedOut { item_id: String },
    /// The patron is at the borrowing limit.
    LimitReached { patron_id: String, active: usize },
}

impl fmt::Display for CheckoutRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyCheckedOut { item_id } => {
                write!(f, "item {item_id} is currently checked out")
            }
            Self::LimitReached { patron_id, active } => write!(
                f,
                "patron {patron_id} has {active} items checked out (limit {MAX_ACTIVE_BORROWINGS})"
            ),
        }
    }
}

/// Result of a checkout attempt.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// A borrowing was recorded.
    Borrowed(Borrowing),
    /// Nothing was recorded.
    Refused(CheckoutRefusal),
}

impl CheckoutOutcome {
    #[must_use]
    pub const fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    #[must_use]
    pub const fn borrowing(&self) -> Option<&Borrowing> {
        match self {
            Self::Borrowed(b) => Some(b),
            Self::Refused(_) => None,
        }
    }

    #[must_use]
    pub fn into_borrowing(self) -> Option<Borrowing> {
        match self {
            Self::Borrowed(b) => Some(b),
            Self::Refused(_) => None,
        }
    }

    #[must_use]
    pub const fn refusal(&self) -> Option<&CheckoutRefusal> {
        match self {
            Self::Borrowed(_) => None,
            Self::Refused(r) => Some(r),
        }
    }
}

/// A completed return: the closed borrowing and what it cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub borrowing: Borrowing,
    pub return_date: NaiveDate,
    /// Whether the item came back after its due date.
    pub overdue: bool,
    pub fee: u64,
}

/// Registry of active borrowings, keyed by item id.
///
/// Each item id has at most one active borrowing, and each patron at most
/// [`MAX_ACTIVE_BORROWINGS`].
#[derive(Debug)]
pub struct Library<C = SystemClock> {
    checkouts: HashMap<String, Borrowing>,
    clock: C,
}

impl Library<SystemClock> {
    /// Create an empty library using the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Library<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Library<C> {
    /// Create an empty library reading dates from `clock`.
    #[must_use]
    pub fn with_clock(clock: C) -> Self {
        Self {
            checkouts: HashMap::new(),
            clock,
        }
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub const fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Current date according to the library clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Number of active borrowings across all patrons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checkouts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkouts.is_empty()
    }

    /// Check an item out to a patron.
    ///
    /// Refused when the item is already out, or when the patron already holds
    /// the maximum number of items. `checkout_date` defaults to today.
    pub fn checkout(
        &mut self,
        item: impl Into<Arc<Item>>,
        patron: Patron,
        checkout_date: Option<NaiveDate>,
    ) -> CheckoutOutcome {
        let item = item.into();

        if self.checkouts.contains_key(&item.id) {
            warn!(item_id = %item.id, "Checkout refused: item is currently checked out");
            return CheckoutOutcome::Refused(CheckoutRefusal::AlreadyCheckedOut {
                item_id: item.id.clone(),
            });
        }

        let active = self.active_count(&patron.id);
        if active >= MAX_ACTIVE_BORROWINGS {
            warn!(
                patron_id = %patron.id,
                active,
                "Checkout refused: patron is at the borrowing limit"
            );
            return CheckoutOutcome::Refused(CheckoutRefusal::LimitReached {
                patron_id: patron.id,
                active,
            });
        }

        let checkout_date = checkout_date.unwrap_or_else(|| self.clock.today());
        let borrowing = Borrowing::new(Arc::clone(&item), patron, checkout_date);

        info!(
            item_id = %item.id,
            patron_id = %borrowing.patron().id,
            due = %borrowing.due_date(),
            "Checked out item"
        );

        self.checkouts.insert(item.id.clone(), borrowing.clone());
        CheckoutOutcome::Borrowed(borrowing)
    }

    /// Check an item out on a date given as a date, text or JSON value.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDate` or `CoreError::InvalidDateType` when
    /// `checkout_date` cannot be read as a date. Nothing is recorded then.
    pub fn checkout_on(
        &mut self,
        item: impl Into<Arc<Item>>,
        patron: Patron,
        checkout_date: impl IntoDate,
    ) -> Result<CheckoutOutcome> {
        let checkout_date = checkout_date.into_date()?;
        Ok(self.checkout(item, patron, Some(checkout_date)))
    }

    /// Process the return of an item and compute its late fee.
    ///
    /// # Errors
    /// Returns `CoreError::NotCheckedOut` if the item has no active borrowing.
    /// The registry is left untouched in that case.
    pub fn return_item(&mut self, item_id: &str) -> Result<u64> {
        self.receive(item_id).map(|receipt| receipt.fee)
    }

    /// Process the return of an item, keeping the closed borrowing.
    ///
    /// # Errors
    /// Same as [`Library::return_item`].
    pub fn receive(&mut self, item_id: &str) -> Result<ReturnReceipt> {
        let Some(borrowing) = self.checkouts.remove(item_id) else {
            error!(item_id = %item_id, "Return of item that is not checked out");
            return Err(CoreError::NotCheckedOut(item_id.to_string()));
        };

        let receipt = ReturnReceipt {
            return_date: self.clock.today(),
            overdue: self.is_overdue(&borrowing),
            fee: self.late_fee(&borrowing),
            borrowing,
        };
        info!(
            item_id = %item_id,
            patron_id = %receipt.borrowing.patron().id,
            fee = receipt.fee,
            "Returned item"
        );

        Ok(receipt)
    }

    /// Fee owed if `borrowing` were returned today.
    #[must_use]
    pub fn late_fee(&self, borrowing: &Borrowing) -> u64 {
        let today = self.clock.today();
        if today <= borrowing.due_date() {
            return 0;
        }
        borrowing
            .policy()
            .late_fee(borrowing.days_overdue(today))
    }

    /// All active borrowings of a patron, oldest checkout first.
    #[must_use]
    pub fn borrowed_items(&self, patron_id: &str) -> Vec<&Borrowing> {
        let mut items: Vec<&Borrowing> = self
            .checkouts
            .values()
            .filter(|b| b.patron().id == patron_id)
            .collect();
        items.sort_by(|a, b| {
            a.checkout_date()
                .cmp(&b.checkout_date())
                .then_with(|| a.item().id.cmp(&b.item().id))
        });
        items
    }

    /// The active borrowing for an item, if it is checked out.
    #[must_use]
    pub fn borrowed_item(&self, item_id: &str) -> Option<&Borrowing> {
        let found = self.checkouts.get(item_id);
        debug!(item_id = %item_id, checked_out = found.is_some(), "Looked up item");
        found
    }

    /// True once today is strictly after the due date.
    #[must_use]
    pub fn is_overdue(&self, borrowing: &Borrowing) -> bool {
        self.clock.today() > borrowing.due_date()
    }

    /// Statement of a patron's borrowings as of today.
    #[must_use]
    pub fn statement(&self, patron_id: &str) -> Statement {
        let today = self.clock.today();
        let lines = self
            .borrowed_items(patron_id)
            .into_iter()
            .map(|b| {
                let days_overdue = self.is_overdue(b).then(|| b.days_overdue(today));
                StatementLine::new(b, days_overdue, self.late_fee(b))
            })
            .collect();

        Statement {
            patron_id: patron_id.to_string(),
            date: today,
            lines,
        }
    }

    fn active_count(&self, patron_id: &str) -> usize {
        self.checkouts
            .values()
            .filter(|b| b.patron().id == patron_id)
            .count()
    }
}
