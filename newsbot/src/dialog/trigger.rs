//! Classifies inbound text into dialog triggers.

/// Keyword that cancels the dialog, matched case-insensitively.
pub const CANCEL_KEYWORD: &str = "Отмена";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// `/start` or `/help`
    Welcome,
    /// `/analyze`
    Analyze,
    /// `/cancel` or the cancel keyword
    Cancel,
    /// Anything else, including unknown commands.
    Text(String),
}

/// Command name without the leading slash and an optional `@botname` suffix.
fn command_name(text: &str) -> Option<&str> {
    let first = text.split_whitespace().next()?;
    let command = first.strip_prefix('/')?;
    Some(command.split('@').next().unwrap_or(command))
}

pub fn classify(content: &str) -> Trigger {
    let trimmed = content.trim();
    if trimmed.to_lowercase() == CANCEL_KEYWORD.to_lowercase() {
        return Trigger::Cancel;
    }
    match command_name(trimmed).map(str::to_lowercase).as_deref() {
        Some("start") | Some("help") => Trigger::Welcome,
        Some("analyze") => Trigger::Analyze,
        Some("cancel") => Trigger::Cancel,
        _ => Trigger::Text(content.to_string()),
    }
}
