//! Two-step analysis dialog: model choice, then news text, per user and chat.

mod conversation;
mod session;
pub mod texts;
mod trigger;

pub use conversation::ConversationHandler;
pub use session::{DialogState, InMemorySessionStore, Session, SessionKey, SessionStore};
pub use trigger::{classify, Trigger};
