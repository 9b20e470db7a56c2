//! Cross-cutting handlers placed in front of the conversation handler.

mod logging;

pub use logging::{truncate_for_log, LoggingHandler};
