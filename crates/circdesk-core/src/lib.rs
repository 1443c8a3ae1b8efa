//! circdesk-core: Circulation rules for a small library desk.
//!
//! This crate provides:
//! - `Item`: what the library lends (book, audio, video)
//! - `Borrowing`: an active checkout with its derived due date
//! - `Library`: the registry enforcing borrowing limits and computing late fees
//! - `Clock`: the injected source of "today"

pub mod borrowing;
pub mod clock;
pub mod date;
pub mod error;
pub mod item;
pub mod library;
pub mod policy;
pub mod statement;

pub use borrowing::{Borrowing, Patron};
pub use clock::{Clock, ManualClock, SystemClock};
pub use date::{parse_date, IntoDate};
pub use error::{CoreError, Result};
pub use item::{Category, Item};
pub use library::{CheckoutOutcome, CheckoutRefusal, Library, ReturnReceipt};
pub use policy::{LoanPolicy, MAX_ACTIVE_BORROWINGS};
pub use statement::{Statement, StatementLine};
