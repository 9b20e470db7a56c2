//! Outcome of one handler for one message.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Not answered here; later handlers still run.
    Continue,
    /// Dropped without a reply.
    Stop,
    /// Deliberately left unanswered (no dialog open, non-text content).
    Ignore,
    /// Answered; carries the text sent to the user so `after` hooks can log it.
    Reply(String),
}
