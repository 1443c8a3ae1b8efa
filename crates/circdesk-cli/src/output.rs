//! Output formatting for the CLI.

use crate::scenario::StepReport;
use circdesk_core::{Category, LoanPolicy, Statement, MAX_ACTIVE_BORROWINGS};
use serde::Serialize;
use std::fmt::Write;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
}

/// Print output in the specified format.
pub fn print<T: Serialize + HumanDisplay>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Human => println!("{}", value.human_display()),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(value).expect("Failed to serialize to JSON")
            );
        }
        OutputFormat::Yaml => {
            println!(
                "{}",
                serde_yaml::to_string(value).expect("Failed to serialize to YAML")
            );
        }
    }
}

/// Print a list in the specified format.
pub fn print_list<T: Serialize + HumanDisplay>(values: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Human => {
            for value in values {
                println!("{}", value.human_display());
            }
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(values).expect("Failed to serialize to JSON")
            );
        }
        OutputFormat::Yaml => {
            println!(
                "{}",
                serde_yaml::to_string(values).expect("Failed to serialize to YAML")
            );
        }
    }
}

/// Trait for human-readable display.
pub trait HumanDisplay {
    fn human_display(&self) -> String;
}

impl HumanDisplay for Statement {
    fn human_display(&self) -> String {
        let mut out = String::new();

        writeln!(out, "Statement for patron {} on {}", self.patron_id, self.date).unwrap();
        writeln!(out, "{}", "-".repeat(70)).unwrap();
        writeln!(
            out,
            "{:<8} {:<28} {:<10}  {:<10}  STATUS",
            "ITEM", "TITLE", "CHECKOUT", "DUE"
        )
        .unwrap();

        for line in &self.lines {
            let status = line
                .days_overdue
                .map(|days| format!("OVERDUE {days} days"))
                .unwrap_or_default();
            writeln!(
                out,
                "{:<8} {:<28} {}  {}  {status}",
                line.item_id, line.title, line.checkout_date, line.due_date
            )
            .unwrap();
        }

        if self.is_empty() {
            writeln!(out, "(nothing checked out)").unwrap();
        } else if self.total_fees() > 0 {
            writeln!(out, "Fees if returned today: {}", self.total_fees()).unwrap();
        }

        out
    }
}

impl HumanDisplay for StepReport {
    fn human_display(&self) -> String {
        match self {
            Self::Clock { today } => format!("Today is now {today}"),
            Self::CheckedOut {
                item_id,
                patron_id,
                checkout_date,
                due_date,
            } => format!(
                "Checked out {item_id} to {patron_id} on {checkout_date}, due {due_date}"
            ),
            Self::Refused { item_id, reason } => {
                format!("Checkout of {item_id} refused: {reason}")
            }
            Self::Returned {
                item_id,
                title,
                return_date,
                due_date,
                overdue,
                fee,
            } => {
                let status = if *overdue { "OVERDUE" } else { "Normal" };
                format!(
                    "Returned {item_id} \"{title}\" on {return_date} (due {due_date}, {status}), late fee {fee}"
                )
            }
            Self::Statement(statement) => statement.human_display(),
        }
    }
}

/// One row of the loan policy table.
#[derive(Debug, Serialize)]
pub struct PolicyRow {
    pub category: Category,
    #[serde(flatten)]
    pub policy: LoanPolicy,
    pub max_active_borrowings: usize,
}

impl PolicyRow {
    /// The full policy table, one row per category.
    #[must_use]
    pub fn table() -> Vec<Self> {
        Category::ALL
            .into_iter()
            .map(|category| Self {
                category,
                policy: LoanPolicy::for_category(category),
                max_active_borrowings: MAX_ACTIVE_BORROWINGS,
            })
            .collect()
    }
}

impl HumanDisplay for PolicyRow {
    fn human_display(&self) -> String {
        format!(
            "{:<6} loan {:>2} days, grace {} days, {} per day after grace",
            self.category, self.policy.loan_days, self.policy.grace_days, self.policy.daily_fee
        )
    }
}
