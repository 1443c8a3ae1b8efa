//! Interactive prompts for the console session.

use anyhow::{Context, Result};
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};

/// What the librarian chose at the return prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnChoice {
    /// Keep everything checked out and move on.
    Keep,
    /// Return the item with this id.
    Return(String),
    /// End the session.
    Quit,
}

/// Check if input is a quit command.
fn is_quit_command(input: &str) -> bool {
    let trimmed = input.trim().to_lowercase();
    trimmed == "q" || trimmed == "quit"
}

/// Interpret a line typed at the return prompt.
#[must_use]
pub fn parse_return_choice(input: &str) -> ReturnChoice {
    if is_quit_command(input) {
        return ReturnChoice::Quit;
    }
    match input.trim() {
        "" => ReturnChoice::Keep,
        id => ReturnChoice::Return(id.to_string()),
    }
}

/// Block until the librarian presses enter.
pub fn pause(message: &str) -> Result<()> {
    let _: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{}", style(message).dim()))
        .allow_empty(true)
        .interact_text()
        .context("Failed to read input")?;
    Ok(())
}

/// Ask which item is being returned.
pub fn prompt_return() -> Result<ReturnChoice> {
    let result: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Item id to return (enter to keep all, 'q' to quit)")
        .allow_empty(true)
        .interact_text()
        .context("Failed to read item id")?;

    Ok(parse_return_choice(&result))
}
