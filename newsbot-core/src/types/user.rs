//! User identity type for core messages.

use serde::{Deserialize, Serialize};

/// User identity (id, username, names).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl User {
    /// Name used when greeting the user: first name, then username, then a generic fallback.
    pub fn display_name(&self) -> &str {
        self.first_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("друг")
    }
}
