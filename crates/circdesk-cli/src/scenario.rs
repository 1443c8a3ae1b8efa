//! Scripted desk scenarios.
//!
//! A scenario is a YAML list of steps replayed against a fresh library with a
//! manual clock:
//!
//! ```yaml
//! start_date: "2024-01-01"
//! steps:
//!   - action: checkout
//!     item: "111"
//!   - action: set_date
//!     date: "2024-01-20"
//!   - action: return
//!     item: "111"
//!   - action: statement
//! ```

use crate::config::DeskConfig;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use circdesk_core::{
    CheckoutOutcome, Clock, IntoDate, Item, Library, ManualClock, Patron, Statement, SystemClock,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A scripted sequence of desk operations.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Initial clock date. Defaults to the configured session start, then today.
    #[serde(default)]
    pub start_date: Option<Value>,

    /// Patrons besides the configured one.
    #[serde(default)]
    pub patrons: Vec<Patron>,

    /// Items besides the configured catalog.
    #[serde(default)]
    pub items: Vec<Item>,

    pub steps: Vec<Step>,
}

/// One scripted operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Check an item out. Patron defaults to the configured one, date to today.
    Checkout {
        item: String,
        #[serde(default)]
        patron: Option<String>,
        #[serde(default)]
        date: Option<Value>,
    },
    /// Return an item and report the late fee.
    Return { item: String },
    /// Move the clock to a date.
    SetDate { date: Value },
    /// Move the clock forward.
    Advance { days: u64 },
    /// Report a patron's borrowings. Patron defaults to the configured one.
    Statement {
        #[serde(default)]
        patron: Option<String>,
    },
}

/// What a step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepReport {
    Clock {
        today: NaiveDate,
    },
    CheckedOut {
        item_id: String,
        patron_id: String,
        checkout_date: NaiveDate,
        due_date: NaiveDate,
    },
    Refused {
        item_id: String,
        reason: String,
    },
    Returned {
        item_id: String,
        title: String,
        return_date: NaiveDate,
        due_date: NaiveDate,
        overdue: bool,
        fee: u64,
    },
    Statement(Statement),
}

impl Scenario {
    /// Read a scenario file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Replay every step, stopping at the first integrity error.
    pub fn run(&self, config: &DeskConfig) -> Result<Vec<StepReport>> {
        self.check_ids(config)?;
        let start = match &self.start_date {
            Some(date) => date.into_date().context("Invalid scenario start_date")?,
            None => config
                .session
                .start_date()?
                .unwrap_or_else(|| SystemClock.today()),
        };
        let mut library = Library::with_clock(ManualClock::new(start));
        let mut reports = Vec::with_capacity(self.steps.len());

        for (n, step) in self.steps.iter().enumerate() {
            debug!(step = n + 1, ?step, "Running scenario step");
            let report = self
                .apply(&mut library, config, step)
                .with_context(|| format!("Step {} failed", n + 1))?;
            reports.push(report);
        }

        Ok(reports)
    }

    fn apply(
        &self,
        library: &mut Library<ManualClock>,
        config: &DeskConfig,
        step: &Step,
    ) -> Result<StepReport> {
        let report = match step {
            Step::Checkout { item, patron, date } => {
                let item = self
                    .item(config, item)
                    .with_context(|| format!("Unknown item {item}"))?
                    .clone();
                let patron = self.patron(config, patron.as_deref())?;
                let outcome = match date {
                    Some(date) => library.checkout_on(item.clone(), patron, date)?,
                    None => library.checkout(item.clone(), patron, None),
                };

                match outcome {
                    CheckoutOutcome::Borrowed(b) => StepReport::CheckedOut {
                        item_id: item.id,
                        patron_id: b.patron().id.clone(),
                        checkout_date: b.checkout_date(),
                        due_date: b.due_date(),
                    },
                    CheckoutOutcome::Refused(refusal) => StepReport::Refused {
                        item_id: item.id,
                        reason: refusal.to_string(),
                    },
                }
            }
            Step::Return { item } => {
                let receipt = library.receive(item)?;
                StepReport::Returned {
                    item_id: item.clone(),
                    title: receipt.borrowing.item().title.clone(),
                    return_date: receipt.return_date,
                    due_date: receipt.borrowing.due_date(),
                    overdue: receipt.overdue,
                    fee: receipt.fee,
                }
            }
            Step::SetDate { date } => {
                library.clock_mut().set_today(date.into_date()?);
                StepReport::Clock {
                    today: library.today(),
                }
            }
            Step::Advance { days } => {
                library.clock_mut().advance_days(*days);
                StepReport::Clock {
                    today: library.today(),
                }
            }
            Step::Statement { patron } => {
                let patron_id = patron.as_deref().unwrap_or(&config.patron.id);
                StepReport::Statement(library.statement(patron_id))
            }
        };
        Ok(report)
    }

    /// Scenario items and patrons must not repeat or shadow configured ids.
    fn check_ids(&self, config: &DeskConfig) -> Result<()> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if config.item(&item.id).is_some() {
                anyhow::bail!("scenario item {} is already in the catalog", item.id);
            }
            if !seen.insert(item.id.as_str()) {
                anyhow::bail!("duplicate scenario item id: {}", item.id);
            }
        }

        let mut seen = HashSet::new();
        for patron in &self.patrons {
            if patron.id == config.patron.id {
                anyhow::bail!("scenario patron {} is already configured", patron.id);
            }
            if !seen.insert(patron.id.as_str()) {
                anyhow::bail!("duplicate scenario patron id: {}", patron.id);
            }
        }
        Ok(())
    }

    fn item<'a>(&'a self, config: &'a DeskConfig, id: &str) -> Option<&'a Item> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .or_else(|| config.item(id))
    }

    fn patron(&self, config: &DeskConfig, id: Option<&str>) -> Result<Patron> {
        let Some(id) = id else {
            return Ok(config.patron.clone());
        };
        if id == config.patron.id {
            return Ok(config.patron.clone());
        }
        self.patrons
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .with_context(|| format!("Unknown patron {id}"))
    }
}
