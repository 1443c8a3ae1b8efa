//! Loan policy table.
//!
//! Due-date offsets and late-fee rules both come from [`LoanPolicy::for_category`],
//! so the two can't drift apart.

use crate::item::Category;
use serde::Serialize;

/// Maximum number of simultaneous active borrowings per patron.
pub const MAX_ACTIVE_BORROWINGS: usize = 4;

/// Lending rules for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanPolicy {
    /// Days between checkout and due date.
    pub loan_days: u32,
    /// Days past the due date before fees start accruing.
    pub grace_days: u32,
    /// Fee units charged per day beyond the grace period.
    pub daily_fee: u32,
}

impl LoanPolicy {
    /// Policy for a category.
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Book => Self {
                loan_days: 14,
                grace_days: 3,
                daily_fee: 10,
            },
            Category::Audio => Self {
                loan_days: 7,
                grace_days: 2,
                daily_fee: 15,
            },
            Category::Video => Self {
                loan_days: 5,
                grace_days: 0,
                daily_fee: 20,
            },
        }
    }

    /// Late fee for an item returned `days_overdue` days after its due date.
    ///
    /// Zero for on-time returns and anywhere inside the grace period,
    /// including its last day.
    #[must_use]
    pub fn late_fee(&self, days_overdue: i64) -> u64 {
        let chargeable = days_overdue.saturating_sub(i64::from(self.grace_days));
        if days_overdue <= 0 || chargeable <= 0 {
            return 0;
        }
        u64::try_from(chargeable).map_or(0, |days| days.saturating_mul(u64::from(self.daily_fee)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_days() {
        assert_eq!(LoanPolicy::for_category(Category::Book).loan_days, 14);
        assert_eq!(LoanPolicy::for_category(Category::Audio).loan_days, 7);
        assert_eq!(LoanPolicy::for_category(Category::Video).loan_days, 5);
    }

    #[test]
    fn test_book_fee_boundary() {
        let book = LoanPolicy::for_category(Category::Book);
        assert_eq!(book.late_fee(1), 0);
        assert_eq!(book.late_fee(3), 0);
        assert_eq!(book.late_fee(4), 10);
        assert_eq!(book.late_fee(5), 20);
    }

    #[test]
    fn test_audio_fee_boundary() {
        let audio = LoanPolicy::for_category(Category::Audio);
        assert_eq!(audio.late_fee(2), 0);
        assert_eq!(audio.late_fee(3), 15);
        assert_eq!(audio.late_fee(10), 120);
    }

    #[test]
    fn test_video_has_no_grace() {
        let video = LoanPolicy::for_category(Category::Video);
        assert_eq!(video.late_fee(1), 20);
        assert_eq!(video.late_fee(7), 140);
    }

    #[test]
    fn test_serialized_table_is_unsigned() {
        let video = serde_json::to_value(LoanPolicy::for_category(Category::Video)).unwrap();
        assert_eq!(
            video,
            serde_json::json!({"loan_days": 5, "grace_days": 0, "daily_fee": 20})
        );
        assert!(video["grace_days"].is_u64());
    }

    #[test]
    fn test_fee_saturates() {
        let book = LoanPolicy::for_category(Category::Book);
        assert_eq!(book.late_fee(i64::MAX), u64::MAX);
    }

    #[test]
    fn test_not_late_is_free() {
        for category in Category::ALL {
            let policy = LoanPolicy::for_category(category);
            assert_eq!(policy.late_fee(0), 0);
            assert_eq!(policy.late_fee(-5), 0);
        }
    }
}
