//! CLI command implementations.

use crate::config::DeskConfig;
use crate::interactive::{self, ReturnChoice};
use crate::output::{self, OutputFormat, PolicyRow};
use crate::scenario::Scenario;
use anyhow::{Context, Result};
use circdesk_core::{CheckoutOutcome, Clock, Library, ManualClock, Patron, SystemClock};
use console::style;
use std::path::Path;

/// Run the interactive desk session for the configured patron.
///
/// The session is a conversation on the terminal, so it only speaks the
/// human format.
pub fn session(config: &DeskConfig, format: OutputFormat) -> Result<()> {
    ensure_human(format)?;
    let start = config
        .session
        .start_date()?
        .unwrap_or_else(|| SystemClock.today());
    let step = config.session.step_days;
    let patron = &config.patron;
    let mut library = Library::with_clock(ManualClock::new(start));

    interactive::pause("Press ENTER to check out some library items...")?;
    println!("{}", "-".repeat(46));

    for item in &config.catalog {
        println!("Check out {item} on {}", library.today());
        match library.checkout(item.clone(), patron.clone(), None) {
            CheckoutOutcome::Borrowed(b) => {
                println!("{}", style("> Checkout OK").green());
                println!("> Date due {}", b.due_date());
            }
            CheckoutOutcome::Refused(reason) => {
                println!("{}", style(format!("> Checkout failed: {reason}")).red());
            }
        }
    }

    interactive::pause("Press ENTER to print statement of borrowed items...")?;
    print_statement(&library, patron);

    loop {
        library.clock_mut().advance_days(step);
        println!();
        println!("{step} days later. Today is now {}.", library.today());
        interactive::pause("Press ENTER to print statement of borrowed items...")?;
        print_statement(&library, patron);

        if library.borrowed_items(&patron.id).is_empty() {
            break;
        }

        match interactive::prompt_return()? {
            ReturnChoice::Keep => {}
            ReturnChoice::Quit => break,
            ReturnChoice::Return(item_id) => return_item(&mut library, &item_id)?,
        }
    }

    print_statement(&library, patron);
    Ok(())
}

fn ensure_human(format: OutputFormat) -> Result<()> {
    if !matches!(format, OutputFormat::Human) {
        anyhow::bail!(
            "session is interactive and only supports --format human; use `circdesk run` for structured output"
        );
    }
    Ok(())
}

fn print_statement<C: Clock>(library: &Library<C>, patron: &Patron) {
    println!();
    println!("{} <{}>", style(&patron.name).bold(), patron.email);
    output::print(&library.statement(&patron.id), OutputFormat::Human);
}

fn return_item<C: Clock>(library: &mut Library<C>, item_id: &str) -> Result<()> {
    if library.borrowed_item(item_id).is_none() {
        println!("{}", style(format!("{item_id} is not checked out")).yellow());
        return Ok(());
    }

    let receipt = library
        .receive(item_id)
        .context("Failed to return item")?;
    println!("{}", "-".repeat(40));
    println!(
        "Return \"{}\" on {}",
        receipt.borrowing.item().title,
        receipt.return_date
    );
    println!("Due Date: {}", receipt.borrowing.due_date());
    println!(
        "Status:   {}",
        if receipt.overdue { "OVERDUE" } else { "Normal" }
    );
    println!("Late Fee: {}", receipt.fee);

    if library.borrowed_item(item_id).is_none() {
        println!("{}", style("Item returned to library").green());
    } else {
        println!(
            "{}",
            style("Library still shows this item as checked out").red()
        );
    }
    Ok(())
}

/// Replay a scripted scenario.
pub fn run(config: &DeskConfig, path: &Path, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let reports = scenario
        .run(config)
        .context("Scenario aborted")?;
    output::print_list(&reports, format);
    Ok(())
}

/// Print the loan policy table.
pub fn policy(format: OutputFormat) {
    output::print_list(&PolicyRow::table(), format);
}
